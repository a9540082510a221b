//! The `Form` facade: compile once, validate and render many times.

use std::path::Path;
use std::sync::Arc;

use schemaform_config::FormConfig;
use schemaform_fields::{Definition, FieldDescriptor, FormBuilder, FormOptions, SchemaNode};
use schemaform_templating::{FormAttributes, LiquidEngine, Renderer, TemplateStore};
use schemaform_validation::{SchemaValidator, Submission};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// A compiled form.
///
/// The field list, validator and renderer are fixed at construction.
/// Validation returns a [`Submission`] instead of storing it, so one form
/// can serve concurrent requests.
pub struct Form {
    schema: SchemaNode,
    fields: Vec<FieldDescriptor>,
    validator: SchemaValidator,
    renderer: Arc<Renderer>,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.fields)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Compile `schema` and `definition` with the builtin templates.
    ///
    /// A `None` definition renders every default field.
    pub fn new(
        schema: SchemaNode,
        definition: Option<&Definition>,
        options: &FormOptions,
    ) -> Result<Self> {
        Self::with_renderer(schema, definition, options, Arc::new(Renderer::builtin()?))
    }

    /// Compile with a renderer shared between forms.
    pub fn with_renderer(
        schema: SchemaNode,
        definition: Option<&Definition>,
        options: &FormOptions,
        renderer: Arc<Renderer>,
    ) -> Result<Self> {
        Self::with_builder(&FormBuilder::standard(), schema, definition, options, renderer)
    }

    /// Compile with custom field rules.
    pub fn with_builder(
        builder: &FormBuilder,
        schema: SchemaNode,
        definition: Option<&Definition>,
        options: &FormOptions,
        renderer: Arc<Renderer>,
    ) -> Result<Self> {
        let fields = builder.compile(&schema, definition, options)?;
        let validator = SchemaValidator::new(&schema)?;
        debug!(fields = fields.len(), "compiled form");
        Ok(Self {
            schema,
            fields,
            validator,
            renderer,
        })
    }

    /// Compile using loaded configuration.
    ///
    /// A relative `templates_dir` is resolved against `base`.
    pub fn from_config(
        schema: SchemaNode,
        definition: Option<&Definition>,
        config: &FormConfig,
        base: &Path,
    ) -> Result<Self> {
        let renderer = Arc::new(renderer_for(config, base)?);
        Self::with_renderer(schema, definition, &config.form_options(), renderer)
    }

    /// The schema this form was compiled from
    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// Compiled fields in render order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The shared renderer
    pub fn renderer(&self) -> &Arc<Renderer> {
        &self.renderer
    }

    /// Validate submitted data and return the submission state to render.
    pub fn validate(&self, data: Value) -> Submission {
        self.validator.validate(&data).into_submission(data)
    }

    /// Render the form for `state` wrapped in a `<form>` carrying `attrs`.
    ///
    /// Pass [`Submission::new`] for a blank form.
    pub fn render(&self, state: &Submission, attrs: &FormAttributes) -> Result<String> {
        Ok(self.renderer.render(&self.fields, state, attrs)?)
    }
}

/// Builtin templates overlaid with `config.templates_dir`, compiled with Liquid.
pub fn renderer_for(config: &FormConfig, base: &Path) -> Result<Renderer> {
    let mut store = TemplateStore::builtin();
    if let Some(dir) = config.templates_dir_in(base) {
        let loaded = store.load_dir(&dir, config.trusted_templates)?;
        debug!(dir = %dir.display(), loaded, "overlaid template directory");
    }
    Ok(Renderer::new(&LiquidEngine::new()?, &store)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormError;
    use serde_json::json;

    fn schema(value: Value) -> SchemaNode {
        SchemaNode::from_value(value).unwrap()
    }

    #[test]
    fn test_string_root_is_rejected() {
        let err = Form::new(schema(json!({"type": "string"})), None, &FormOptions::default())
            .unwrap_err();
        assert!(matches!(err, FormError::Fields(_)));
    }

    #[test]
    fn test_validate_does_not_mutate_form() {
        let form = Form::new(
            schema(json!({
                "type": "object",
                "required": ["name"],
                "properties": {"name": {"type": "string"}}
            })),
            None,
            &FormOptions::default(),
        )
        .unwrap();

        let bad = form.validate(json!({"name": ""}));
        let good = form.validate(json!({"name": "Ada"}));
        assert!(bad.submitted && !bad.is_valid());
        assert!(good.submitted && good.is_valid());
        assert_eq!(form.fields().len(), 1);
    }

    #[test]
    fn test_form_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Form>();
    }
}
