//! Field keys and field descriptors.
//!
//! A [`FieldDescriptor`] is the canonical renderable unit. Every attribute is
//! optional so that "not set" and "set to a falsy value" stay distinct when
//! an author's override is filled in from a schema default.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Ordered path segments identifying a field within the submitted data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawKey", into = "Vec<String>")]
pub struct FieldKey(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Path(String),
    Segments(Vec<String>),
}

impl From<RawKey> for FieldKey {
    fn from(raw: RawKey) -> Self {
        match raw {
            RawKey::Path(path) => FieldKey::from_path(&path),
            RawKey::Segments(segments) => FieldKey(segments),
        }
    }
}

impl From<FieldKey> for Vec<String> {
    fn from(key: FieldKey) -> Self {
        key.0
    }
}

impl FieldKey {
    /// Separator used when a key is written as a single string.
    pub const SEPARATOR: char = '.';

    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// A single-segment key, as produced for root-level schema properties.
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Parse a dotted path such as `address.city`.
    pub fn from_path(path: &str) -> Self {
        Self(path.split(Self::SEPARATOR).map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The final segment; renderers use it to find a field's errors.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Follow the key through nested objects of `data`.
    pub fn lookup<'a>(&self, data: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(data, |current, segment| current.get(segment.as_str()))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, "{}", Self::SEPARATOR)?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

/// A renderable form field.
///
/// `field_type` selects the template; a descriptor without one renders
/// nothing. Keys this struct does not model travel in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<FieldKey>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    /// Choices offered by a select field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    /// A descriptor carrying only a key, as produced for a bare string entry.
    pub fn for_key(key: FieldKey) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }

    /// Set the rendering type.
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    /// The stringified key used for default lookups.
    pub fn name(&self) -> Option<String> {
        self.key.as_ref().map(FieldKey::to_string)
    }

    /// Whether a renderer should produce output for this descriptor.
    pub fn is_renderable(&self) -> bool {
        self.field_type.is_some()
    }

    /// Return a copy of `self` where every attribute `self` leaves unset is
    /// taken from `defaults`.
    ///
    /// Presence is decided per attribute: an explicit `false` or `0` in
    /// `self` is kept.
    pub fn filled_from(&self, defaults: &FieldDescriptor) -> FieldDescriptor {
        let mut extra = self.extra.clone();
        for (name, value) in &defaults.extra {
            if !extra.contains_key(name) {
                extra.insert(name.clone(), value.clone());
            }
        }

        FieldDescriptor {
            key: fill(&self.key, &defaults.key),
            field_type: fill(&self.field_type, &defaults.field_type),
            title: fill(&self.title, &defaults.title),
            description: fill(&self.description, &defaults.description),
            required: fill(&self.required, &defaults.required),
            readonly: fill(&self.readonly, &defaults.readonly),
            min_length: fill(&self.min_length, &defaults.min_length),
            max_length: fill(&self.max_length, &defaults.max_length),
            minimum: fill(&self.minimum, &defaults.minimum),
            maximum: fill(&self.maximum, &defaults.maximum),
            options: fill(&self.options, &defaults.options),
            extra,
        }
    }
}

fn fill<T: Clone>(own: &Option<T>, fallback: &Option<T>) -> Option<T> {
    match own {
        Some(value) => Some(value.clone()),
        None => fallback.clone(),
    }
}
