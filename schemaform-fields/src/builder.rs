//! Default form construction: one resolver pass over a root object schema.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::rules::{FieldLookup, ResolveOptions, RuleTable};
use crate::schema::SchemaNode;
use crate::types::{FieldDescriptor, FieldKey};

/// Compile-wide options shared by the builder and the merge engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormOptions {
    /// Property names left out of the default field list.
    pub ignore: HashSet<String>,
    /// Property names forced to be required.
    pub force_required: HashSet<String>,
    /// When the root schema is read-only, mark every field without its own
    /// `readonly` as read-only.
    pub cascade_readonly: bool,
}

/// The default field list for a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultForm {
    /// Resolved fields in property declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// The same fields keyed by stringified key.
    pub lookup: FieldLookup,
}

/// Builds default forms from schemas using a [`RuleTable`].
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    rules: RuleTable,
}

impl FormBuilder {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// A builder using the shipped rules.
    pub fn standard() -> Self {
        Self::new(RuleTable::standard())
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleTable {
        &mut self.rules
    }

    /// Walk the root schema's properties and resolve each one.
    ///
    /// The root must be an object schema. Properties named in `ignore` and
    /// properties no rule claims are left out.
    pub fn build(
        &self,
        schema: &SchemaNode,
        ignore: &HashSet<String>,
        options: &FormOptions,
    ) -> Result<DefaultForm> {
        match schema.base_type() {
            Some("object") => {}
            other => return Err(FieldsError::root_not_object(other)),
        }

        let mut form = DefaultForm::default();
        for (name, node) in &schema.properties {
            if ignore.contains(name) {
                continue;
            }

            let resolve_options = ResolveOptions {
                path: FieldKey::single(name.clone()),
                required: schema.requires(name) || options.force_required.contains(name),
            };

            if let Some(descriptor) =
                self.rules
                    .resolve(name, node, &resolve_options, &mut form.lookup)
            {
                form.fields.push(descriptor);
            }
        }

        debug!(
            properties = schema.properties.len(),
            fields = form.fields.len(),
            "built default form"
        );
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> SchemaNode {
        SchemaNode::from_value(json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"},
                "color": {"type": "string", "enum": ["red", "blue"]},
                "email": {"type": ["string", "null"], "required": true},
                "notes": {"type": "string"}
            }
        }))
        .unwrap()
    }

    fn names(fields: &[FieldDescriptor]) -> Vec<String> {
        fields.iter().filter_map(FieldDescriptor::name).collect()
    }

    #[test]
    fn builds_fields_in_declaration_order() {
        let form = FormBuilder::standard()
            .build(&schema(), &HashSet::new(), &FormOptions::default())
            .unwrap();
        assert_eq!(names(&form.fields), vec!["name", "color", "email", "notes"]);
        assert_eq!(form.lookup.len(), 4);
        assert!(!form.lookup.contains_key("age"));
    }

    #[test]
    fn required_from_array_or_flag() {
        let form = FormBuilder::standard()
            .build(&schema(), &HashSet::new(), &FormOptions::default())
            .unwrap();
        assert_eq!(form.lookup["name"].required, Some(true));
        assert_eq!(form.lookup["email"].required, Some(true));
        assert_eq!(form.lookup["notes"].required, Some(false));
    }

    #[test]
    fn force_required_option() {
        let options = FormOptions {
            force_required: ["notes".to_string()].into_iter().collect(),
            ..FormOptions::default()
        };
        let form = FormBuilder::standard()
            .build(&schema(), &HashSet::new(), &options)
            .unwrap();
        assert_eq!(form.lookup["notes"].required, Some(true));
    }

    #[test]
    fn ignored_properties_are_skipped() {
        let ignore: HashSet<String> = ["color".to_string(), "notes".to_string()]
            .into_iter()
            .collect();
        let form = FormBuilder::standard()
            .build(&schema(), &ignore, &FormOptions::default())
            .unwrap();
        assert_eq!(names(&form.fields), vec!["name", "email"]);
        assert!(!form.lookup.contains_key("color"));
    }

    #[test]
    fn non_object_root_is_an_error() {
        let root = SchemaNode::from_value(json!({"type": "string"})).unwrap();
        let err = FormBuilder::standard()
            .build(&root, &HashSet::new(), &FormOptions::default())
            .unwrap_err();
        assert!(matches!(err, FieldsError::RootNotObject { .. }));
        assert!(err.to_string().contains("\"string\""));
    }

    #[test]
    fn untyped_root_is_an_error() {
        let root = SchemaNode::from_value(json!({"properties": {}})).unwrap();
        let result = FormBuilder::standard().build(&root, &HashSet::new(), &FormOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn nullable_object_root_is_accepted() {
        let root = SchemaNode::from_value(json!({
            "type": ["object", "null"],
            "properties": {"a": {"type": "string"}}
        }))
        .unwrap();
        let form = FormBuilder::standard()
            .build(&root, &HashSet::new(), &FormOptions::default())
            .unwrap();
        assert_eq!(form.fields.len(), 1);
    }
}
