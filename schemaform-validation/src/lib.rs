//! Validation of submitted form data against a form schema.
//!
//! Blank values are stripped before validation, every violation is
//! collected, and violations are grouped by the field key they belong to
//! so a renderer can show them next to the right input.
//!
//! ```
//! use schemaform_fields::SchemaNode;
//! use schemaform_validation::{validate, ViolationCode};
//! use serde_json::json;
//!
//! let schema = SchemaNode::from_value(json!({
//!     "type": "object",
//!     "required": ["name"],
//!     "properties": {"name": {"type": "string"}}
//! })).unwrap();
//!
//! let result = validate(&json!({"name": ""}), &schema).unwrap();
//! assert!(!result.valid);
//! assert_eq!(result.errors.get("name")[0].code, ViolationCode::Required);
//! ```

pub mod error;
pub mod strip;
pub mod submission;
pub mod validator;
pub mod violation;

pub use error::{ValidatorError, ValidatorResult};
pub use strip::{is_empty_value, strip_empty};
pub use submission::Submission;
pub use validator::{validate, SchemaValidator, Validation};
pub use violation::{ErrorMap, Violation, ViolationCode};
