//! Definition merging: author overrides combined with schema defaults.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::builder::{DefaultForm, FormBuilder, FormOptions};
use crate::error::{FieldsError, Result};
use crate::schema::SchemaNode;
use crate::types::{FieldDescriptor, FieldKey};

/// The marker that splices the whole default field list into a definition.
pub const WILDCARD: &str = "*";

/// One entry of an author's override list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEntry")]
pub enum DefinitionEntry {
    /// `"*"`: all default fields go here.
    Wildcard,
    /// A bare key string or a partial descriptor.
    Field(FieldDescriptor),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Key(String),
    Descriptor(FieldDescriptor),
}

impl From<RawEntry> for DefinitionEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Key(key) if key == WILDCARD => DefinitionEntry::Wildcard,
            RawEntry::Key(key) => DefinitionEntry::key(&key),
            RawEntry::Descriptor(descriptor) => DefinitionEntry::Field(descriptor),
        }
    }
}

impl DefinitionEntry {
    /// A bare key entry, equivalent to `{ "key": path }`.
    pub fn key(path: &str) -> Self {
        DefinitionEntry::Field(FieldDescriptor::for_key(FieldKey::from_path(path)))
    }
}

/// An author's ordered override list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definition {
    entries: Vec<DefinitionEntry>,
}

impl Definition {
    pub fn new(entries: Vec<DefinitionEntry>) -> Self {
        Self { entries }
    }

    /// `["*"]`: exactly the default fields.
    pub fn all() -> Self {
        Self::new(vec![DefinitionEntry::Wildcard])
    }

    /// Parse a JSON list of entries, reporting the position of a bad entry.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(FieldsError::InvalidDefinition {
                index: 0,
                message: "definition must be a list".to_string(),
            });
        };

        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<DefinitionEntry>(item).map_err(|e| {
                    FieldsError::InvalidDefinition {
                        index,
                        message: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[DefinitionEntry] {
        &self.entries
    }

    pub fn has_wildcard(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| matches!(entry, DefinitionEntry::Wildcard))
    }
}

/// Combine a default form with an author's definition.
///
/// The first wildcard is replaced by the default fields; later wildcards are
/// dropped. Keyed entries with a matching default have their unset
/// attributes filled from it. Output order is the expanded entry order.
pub fn merge_definition(defaults: &DefaultForm, definition: &Definition) -> Vec<FieldDescriptor> {
    let mut expanded = false;
    let mut fields = Vec::with_capacity(definition.entries.len() + defaults.fields.len());

    for entry in &definition.entries {
        match entry {
            DefinitionEntry::Wildcard if !expanded => {
                fields.extend(defaults.fields.iter().cloned());
                expanded = true;
            }
            DefinitionEntry::Wildcard => {
                trace!("ignoring repeated wildcard marker");
            }
            DefinitionEntry::Field(authored) => {
                let default = authored
                    .name()
                    .and_then(|name| defaults.lookup.get(&name));
                match default {
                    // Keys match by string form; the schema path keeps the
                    // segments of property names that contain dots.
                    Some(default) => fields.push(FieldDescriptor {
                        key: default.key.clone(),
                        ..authored.filled_from(default)
                    }),
                    None => fields.push(authored.clone()),
                }
            }
        }
    }

    fields
}

/// Apply the root read-only cascade to fields without an explicit flag.
pub fn cascade_readonly(fields: &mut [FieldDescriptor]) {
    for field in fields.iter_mut().filter(|f| f.readonly.is_none()) {
        field.readonly = Some(true);
    }
}

impl FormBuilder {
    /// Compile a schema and optional definition into the field list to
    /// render.
    ///
    /// Without a definition every default field is rendered, as if the
    /// definition were `["*"]`.
    pub fn compile(
        &self,
        schema: &SchemaNode,
        definition: Option<&Definition>,
        options: &FormOptions,
    ) -> Result<Vec<FieldDescriptor>> {
        let defaults = self.build(schema, &options.ignore, options)?;

        let mut fields = match definition {
            Some(definition) => merge_definition(&defaults, definition),
            None => defaults.fields,
        };

        if options.cascade_readonly && schema.is_read_only() {
            cascade_readonly(&mut fields);
        }

        debug!(fields = fields.len(), "compiled field list");
        Ok(fields)
    }
}
