//! Schema nodes: the JSON-Schema subset the field compiler understands.
//!
//! A [`SchemaNode`] keeps property declaration order (properties are an
//! [`IndexMap`]) because the compiled field list follows it. Keywords the
//! compiler does not interpret are kept in `extra` so a node can be handed
//! to the validator unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::Result;

/// The `type` keyword: a single name, or a union such as `["string", "null"]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Union(Vec<String>),
}

impl SchemaType {
    /// The type name with any `"null"` union member stripped.
    pub fn base(&self) -> Option<&str> {
        match self {
            SchemaType::Single(name) => Some(name.as_str()),
            SchemaType::Union(names) => names
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
        }
    }

    /// True when the union admits `null` alongside the base type.
    pub fn is_nullable(&self) -> bool {
        match self {
            SchemaType::Single(name) => name == "null",
            SchemaType::Union(names) => names.iter().any(|name| name == "null"),
        }
    }
}

/// The `required` keyword.
///
/// On object nodes it lists required property names (draft 4). On property
/// nodes it may also appear as a boolean flag, which the compiler folds into
/// the parent's list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Required {
    Flag(bool),
    Names(Vec<String>),
}

/// `exclusiveMinimum` / `exclusiveMaximum`: a draft-4 flag on the sibling
/// bound, or a draft-6 numeric limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExclusiveBound {
    Flag(bool),
    Limit(Number),
}

/// One node of a data-shape description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<ExclusiveBound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<ExclusiveBound>,
    #[serde(alias = "readonly", default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemaNode {
    /// Parse a schema from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a schema from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The node's type after stripping a `"null"` union member.
    pub fn base_type(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(SchemaType::base)
    }

    /// Property names listed in this node's `required` array.
    pub fn required_names(&self) -> &[String] {
        match &self.required {
            Some(Required::Names(names)) => names,
            _ => &[],
        }
    }

    /// True when this node carries `required: true` as a property flag.
    pub fn is_flagged_required(&self) -> bool {
        matches!(self.required, Some(Required::Flag(true)))
    }

    /// True when `name` is required by this object node, through either the
    /// `required` array or the property's own flag.
    pub fn requires(&self, name: &str) -> bool {
        self.required_names().iter().any(|n| n == name)
            || self
                .properties
                .get(name)
                .is_some_and(SchemaNode::is_flagged_required)
    }

    /// True when the node is marked read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only == Some(true)
    }

    /// Fold property-level `required: true` flags into this node's
    /// `required` array, recursively for nested object nodes.
    ///
    /// The flags themselves stay on the properties.
    pub fn normalize_required(&mut self) {
        let flagged: Vec<String> = self
            .properties
            .iter()
            .filter(|(_, node)| node.is_flagged_required())
            .map(|(name, _)| name.clone())
            .collect();

        for node in self.properties.values_mut() {
            node.normalize_required();
        }

        if flagged.is_empty() {
            return;
        }

        let mut names = self.required_names().to_vec();
        for name in flagged {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        self.required = Some(Required::Names(names));
    }

    /// Lower bound as an inclusive value.
    ///
    /// A draft-4 `exclusiveMinimum: true` raises `minimum` by one; a draft-6
    /// numeric `exclusiveMinimum` becomes its value plus one.
    pub fn inclusive_minimum(&self) -> Option<Number> {
        match &self.exclusive_minimum {
            Some(ExclusiveBound::Flag(true)) => self.minimum.as_ref().map(|n| shift(n, 1)),
            Some(ExclusiveBound::Limit(limit)) => {
                let raised = shift(limit, 1);
                match &self.minimum {
                    Some(min) if as_f64(min) > as_f64(&raised) => Some(min.clone()),
                    _ => Some(raised),
                }
            }
            _ => self.minimum.clone(),
        }
    }

    /// Upper bound as an inclusive value. Mirror of [`Self::inclusive_minimum`].
    pub fn inclusive_maximum(&self) -> Option<Number> {
        match &self.exclusive_maximum {
            Some(ExclusiveBound::Flag(true)) => self.maximum.as_ref().map(|n| shift(n, -1)),
            Some(ExclusiveBound::Limit(limit)) => {
                let lowered = shift(limit, -1);
                match &self.maximum {
                    Some(max) if as_f64(max) < as_f64(&lowered) => Some(max.clone()),
                    _ => Some(lowered),
                }
            }
            _ => self.maximum.clone(),
        }
    }

    /// Export a draft-4 schema for the validator.
    ///
    /// Required flags are folded into their parents' arrays and then removed,
    /// empty `required` arrays are dropped, and numeric exclusive bounds are
    /// rewritten into the draft-4 `minimum` + `exclusiveMinimum: true` form.
    /// Every subschema position is lowered, including the ones kept in
    /// `extra` such as `items` or `allOf`.
    pub fn to_validation_schema(&self) -> Result<Value> {
        let mut node = self.clone();
        node.normalize_required();
        let mut exported = serde_json::to_value(&node)?;
        lower_to_draft4(&mut exported);
        Ok(exported)
    }
}

/// Keywords holding one subschema or an array of them.
const INLINE_SUBSCHEMAS: &[&str] = &[
    "items",
    "additionalItems",
    "additionalProperties",
    "not",
    "allOf",
    "anyOf",
    "oneOf",
];

/// Keywords holding a map of subschemas.
const NAMED_SUBSCHEMAS: &[&str] = &[
    "properties",
    "patternProperties",
    "definitions",
    "dependencies",
];

fn lower_to_draft4(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };

    fold_required_flags(map);

    for keyword in INLINE_SUBSCHEMAS {
        match map.get_mut(*keyword) {
            Some(Value::Array(items)) => items.iter_mut().for_each(lower_to_draft4),
            Some(sub) => lower_to_draft4(sub),
            None => {}
        }
    }
    for keyword in NAMED_SUBSCHEMAS {
        if let Some(Value::Object(subs)) = map.get_mut(*keyword) {
            subs.values_mut().for_each(lower_to_draft4);
        }
    }

    let drop_required = match map.get("required") {
        Some(Value::Bool(_)) => true,
        Some(Value::Array(names)) => names.is_empty(),
        _ => false,
    };
    if drop_required {
        map.remove("required");
    }

    lower_exclusive(map, "exclusiveMinimum", "minimum", |bound, limit| bound > limit);
    lower_exclusive(map, "exclusiveMaximum", "maximum", |bound, limit| bound < limit);
}

/// Append the names of `required: true` properties to this node's
/// `required` array. The flags are removed when the properties are lowered.
fn fold_required_flags(map: &mut Map<String, Value>) {
    let flagged: Vec<Value> = match map.get("properties") {
        Some(Value::Object(props)) => props
            .iter()
            .filter(|(_, prop)| prop.get("required") == Some(&Value::Bool(true)))
            .map(|(name, _)| Value::String(name.clone()))
            .collect(),
        _ => return,
    };
    if flagged.is_empty() {
        return;
    }

    let mut names = match map.remove("required") {
        Some(Value::Array(names)) => names,
        _ => Vec::new(),
    };
    for name in flagged {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    map.insert("required".to_string(), Value::Array(names));
}

/// Rewrite a numeric `exclusive` limit as `bound` + `exclusive: true`,
/// unless the existing inclusive `bound` is already stricter.
fn lower_exclusive(
    map: &mut Map<String, Value>,
    exclusive: &str,
    bound: &str,
    stricter: fn(f64, f64) -> bool,
) {
    let Some(Value::Number(limit)) = map.get(exclusive) else {
        return;
    };
    let limit = limit.clone();
    let keep_bound = map
        .get(bound)
        .and_then(Value::as_f64)
        .is_some_and(|b| stricter(b, as_f64(&limit)));

    if keep_bound {
        map.remove(exclusive);
    } else {
        map.insert(bound.to_string(), Value::Number(limit));
        map.insert(exclusive.to_string(), Value::Bool(true));
    }
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(0.0)
}

/// Add `delta` to a JSON number, staying integral when the input is.
fn shift(n: &Number, delta: i64) -> Number {
    if let Some(i) = n.as_i64() {
        if let Some(shifted) = i.checked_add(delta) {
            return Number::from(shifted);
        }
    }
    if let Some(u) = n.as_u64() {
        if let Some(shifted) = u.checked_add_signed(delta) {
            return Number::from(shifted);
        }
    }
    n.as_f64()
        .and_then(|f| Number::from_f64(f + delta as f64))
        .unwrap_or_else(|| n.clone())
}
