//! Schema-driven field compiler
//!
//! `schemaform-fields` turns a JSON-Schema-like object description plus an
//! optional author override list into the ordered list of field descriptors
//! a renderer walks.
//!
//! # Pipeline
//!
//! - **Resolve**: a [`RuleTable`] maps each property to a default
//!   [`FieldDescriptor`], first claiming rule wins
//! - **Build**: [`FormBuilder::build`] walks the root object's properties in
//!   declaration order
//! - **Merge**: [`merge_definition`] splices defaults into the author's
//!   [`Definition`] at the `"*"` marker and fills unset override attributes
//!
//! ```rust
//! use schemaform_fields::{Definition, FormBuilder, FormOptions, SchemaNode};
//! use serde_json::json;
//!
//! let schema = SchemaNode::from_value(json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string"},
//!         "size": {"type": "string", "enum": ["s", "m", "l"]}
//!     }
//! }))
//! .unwrap();
//! let definition = Definition::from_value(json!(["*", {"type": "submit"}])).unwrap();
//!
//! let fields = FormBuilder::standard()
//!     .compile(&schema, Some(&definition), &FormOptions::default())
//!     .unwrap();
//! assert_eq!(fields.len(), 3);
//! assert_eq!(fields[1].field_type.as_deref(), Some("select"));
//! ```

pub mod builder;
pub mod error;
pub mod merge;
pub mod rules;
pub mod schema;
pub mod types;

pub use builder::{DefaultForm, FormBuilder, FormOptions};
pub use error::{FieldsError, Result};
pub use merge::{cascade_readonly, merge_definition, Definition, DefinitionEntry, WILDCARD};
pub use rules::{
    base_descriptor, DefaultRule, FieldLookup, ResolveOptions, RuleContext, RuleTable,
    SELECT_RULE, TEXT_RULE,
};
pub use schema::{ExclusiveBound, Required, SchemaNode, SchemaType};
pub use types::{FieldDescriptor, FieldKey};
