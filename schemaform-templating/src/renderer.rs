//! Form rendering
//!
//! Every template is compiled once when the [`Renderer`] is built; after
//! that the renderer is read-only and can be shared across threads.

use std::fmt;

use indexmap::IndexMap;
use schemaform_fields::FieldDescriptor;
use schemaform_validation::Submission;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::engine::{CompiledTemplate, LiquidEngine, TemplateEngine};
use crate::error::{Result, TemplatingError};
use crate::store::{TemplateStore, DEFAULT_TEMPLATE};

/// Descriptor attributes always present in a template's `field` object,
/// as `nil` when the descriptor leaves them unset.
pub const FIELD_ATTRIBUTES: &[&str] = &[
    "key",
    "type",
    "title",
    "description",
    "required",
    "readonly",
    "minLength",
    "maxLength",
    "minimum",
    "maximum",
    "options",
];

/// Caller-supplied attributes for the `<form>` element, in output order
pub type FormAttributes = IndexMap<String, String>;

/// Compiled templates keyed by field type
pub struct Renderer {
    templates: IndexMap<String, Box<dyn CompiledTemplate>>,
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Renderer {
    /// Compile every template in `store` with `engine`.
    ///
    /// The store must contain a `default` template.
    pub fn new(engine: &dyn TemplateEngine, store: &TemplateStore) -> Result<Self> {
        if !store.has_default() {
            return Err(TemplatingError::MissingDefault);
        }
        let mut templates = IndexMap::with_capacity(store.len());
        for (name, source) in store.iter() {
            templates.insert(name.to_string(), engine.compile(name, source)?);
        }
        debug!(templates = templates.len(), "compiled template set");
        Ok(Self { templates })
    }

    /// A renderer over the builtin templates using Liquid
    pub fn builtin() -> Result<Self> {
        Self::new(&LiquidEngine::new()?, &TemplateStore::builtin())
    }

    /// Render each field in order and concatenate the fragments.
    ///
    /// Fields without a `type` produce nothing.
    pub fn render_fields(&self, fields: &[FieldDescriptor], state: &Submission) -> Result<String> {
        let mut out = String::new();
        let mut rendered = 0;
        for field in fields {
            let Some(field_type) = field.field_type.as_deref() else {
                trace!(field = ?field.name(), "skipping field without type");
                continue;
            };
            let template = self.template_for(field_type)?;
            out.push_str(&template.render(&field_context(field, state)?)?);
            rendered += 1;
        }
        debug!(fields = fields.len(), rendered, "rendered fields");
        Ok(out)
    }

    /// Render `fields` wrapped in a `<form>` envelope carrying `attrs`.
    pub fn render(
        &self,
        fields: &[FieldDescriptor],
        state: &Submission,
        attrs: &FormAttributes,
    ) -> Result<String> {
        let body = self.render_fields(fields, state)?;
        Ok(envelope(&body, attrs))
    }

    /// Field types with a compiled template
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    fn template_for(&self, field_type: &str) -> Result<&dyn CompiledTemplate> {
        self.templates
            .get(field_type)
            .or_else(|| self.templates.get(DEFAULT_TEMPLATE))
            .map(|template| template.as_ref())
            .ok_or(TemplatingError::MissingDefault)
    }
}

/// The context one field's template renders against.
///
/// Holds `field`, `name`, `value` (the submitted value at the field's key
/// path), `data`, `errors`, `has_errors` and `submitted`.
pub fn field_context(field: &FieldDescriptor, state: &Submission) -> Result<Value> {
    let mut descriptor = match serde_json::to_value(field) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(TemplatingError::Context(format!(
                "field descriptor serialized to {other}"
            )))
        }
        Err(e) => return Err(TemplatingError::Context(e.to_string())),
    };
    for attribute in FIELD_ATTRIBUTES {
        descriptor
            .entry(attribute.to_string())
            .or_insert(Value::Null);
    }

    let name = field.name().unwrap_or_default();
    let value = field
        .key
        .as_ref()
        .and_then(|key| key.lookup(&state.data))
        .cloned()
        .unwrap_or(Value::Null);
    let errors = if field.key.is_some() {
        state.errors_for(&name)
    } else {
        &[]
    };
    let errors_value =
        serde_json::to_value(errors).map_err(|e| TemplatingError::Context(e.to_string()))?;

    let mut context = Map::new();
    context.insert("field".into(), Value::Object(descriptor));
    context.insert("name".into(), Value::String(name));
    context.insert("value".into(), value);
    context.insert("data".into(), state.data.clone());
    context.insert("errors".into(), errors_value);
    context.insert("has_errors".into(), Value::Bool(!errors.is_empty()));
    context.insert("submitted".into(), Value::Bool(state.submitted));
    Ok(Value::Object(context))
}

/// Wrap `body` in a `<form>` element.
///
/// Attribute values are written verbatim without escaping; callers must
/// pass safe values.
pub fn envelope(body: &str, attrs: &FormAttributes) -> String {
    let mut out = String::from("<form");
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
    out.push_str(body);
    out.push_str("</form>");
    out
}
