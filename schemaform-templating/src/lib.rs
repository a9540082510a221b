//! Field templates and form rendering for schemaform
//!
//! A [`TemplateStore`] maps field types to template sources, a
//! [`TemplateEngine`] compiles them, and a [`Renderer`] walks a compiled
//! field list and wraps the output in a `<form>` element.
//!
//! ```
//! use schemaform_fields::{FieldDescriptor, FieldKey};
//! use schemaform_templating::{FormAttributes, Renderer};
//! use schemaform_validation::Submission;
//!
//! let renderer = Renderer::builtin().unwrap();
//! let fields = vec![FieldDescriptor::for_key(FieldKey::single("name")).with_type("text")];
//! let mut attrs = FormAttributes::new();
//! attrs.insert("method".into(), "post".into());
//!
//! let html = renderer.render(&fields, &Submission::new(), &attrs).unwrap();
//! assert!(html.starts_with("<form method=\"post\">"));
//! assert!(html.contains("name=\"name\""));
//! ```

pub mod engine;
pub mod error;
pub mod renderer;
pub mod security;
pub mod store;

pub use engine::{CompiledTemplate, LiquidEngine, TemplateEngine};
pub use error::{Result, TemplatingError};
pub use renderer::{envelope, field_context, FormAttributes, Renderer, FIELD_ATTRIBUTES};
pub use security::{check_template, MAX_TEMPLATE_NESTING, MAX_TEMPLATE_SIZE};
pub use store::{TemplateSource, TemplateStore, DEFAULT_TEMPLATE, TEMPLATE_EXTENSIONS};
