//! # `schemaform`
//!
//! Turn a JSON-Schema-like object description into an HTML form, validate
//! what users submit against the same description, and render the form
//! again with their values and inline errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemaform::{Definition, Form, FormAttributes, FormOptions, SchemaNode, Submission};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = SchemaNode::from_value(json!({
//!     "type": "object",
//!     "required": ["email"],
//!     "properties": {
//!         "email": {"type": "string", "title": "Email"},
//!         "plan": {"type": "string", "enum": ["free", "pro"]}
//!     }
//! }))?;
//! let definition = Definition::from_value(json!(["*", {"key": "go", "type": "submit"}]))?;
//! let form = Form::new(schema, Some(&definition), &FormOptions::default())?;
//!
//! let blank = form.render(&Submission::new(), &FormAttributes::new())?;
//! assert!(blank.contains("name=\"email\""));
//!
//! let state = form.validate(json!({"email": "", "plan": "pro"}));
//! assert!(!state.is_valid());
//! let with_errors = form.render(&state, &FormAttributes::new())?;
//! assert!(with_errors.contains("has-errors"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Unified error type
pub mod error;

/// The form facade
pub mod form;

pub use error::{FormError, Result};
pub use form::{renderer_for, Form};

pub use schemaform_config::FormConfig;
pub use schemaform_fields::{
    Definition, DefinitionEntry, FieldDescriptor, FieldKey, FormBuilder, FormOptions, SchemaNode,
};
pub use schemaform_templating::{FormAttributes, Renderer, TemplateStore};
pub use schemaform_validation::{ErrorMap, Submission, Violation, ViolationCode};
