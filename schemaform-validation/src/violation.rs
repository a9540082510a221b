//! Violations and the per-field error map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What kind of constraint a submitted value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Required,
    Type,
    MinLength,
    MaxLength,
    Minimum,
    Maximum,
    Pattern,
    Enum,
    Format,
    Other,
}

impl ViolationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationCode::Required => "required",
            ViolationCode::Type => "type",
            ViolationCode::MinLength => "min_length",
            ViolationCode::MaxLength => "max_length",
            ViolationCode::Minimum => "minimum",
            ViolationCode::Maximum => "maximum",
            ViolationCode::Pattern => "pattern",
            ViolationCode::Enum => "enum",
            ViolationCode::Format => "format",
            ViolationCode::Other => "other",
        }
    }
}

impl std::fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One constraint mismatch, attached to a field key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub key: String,
    pub code: ViolationCode,
    pub message: String,
}

impl Violation {
    pub fn new(key: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code,
            message: message.into(),
        }
    }
}

/// Violations grouped by field key, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(IndexMap<String, Vec<Violation>>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation to its key's list.
    pub fn push(&mut self, violation: Violation) {
        self.0
            .entry(violation.key.clone())
            .or_default()
            .push(violation);
    }

    /// Violations for `key`; empty when the field is clean.
    pub fn get(&self, key: &str) -> &[Violation] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Violation])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of keys with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Violation> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        let mut map = ErrorMap::new();
        for violation in iter {
            map.push(violation);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_key_preserving_order() {
        let map: ErrorMap = vec![
            Violation::new("password", ViolationCode::MinLength, "too short"),
            Violation::new("email", ViolationCode::Required, "missing"),
            Violation::new("password", ViolationCode::Pattern, "needs a digit"),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["password", "email"]);
        let codes: Vec<ViolationCode> = map.get("password").iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![ViolationCode::MinLength, ViolationCode::Pattern]);
    }

    #[test]
    fn missing_key_yields_empty_slice() {
        let map = ErrorMap::new();
        assert!(map.get("anything").is_empty());
        assert!(map.is_empty());
    }

    #[test]
    fn serializes_as_plain_map() {
        let map: ErrorMap = vec![Violation::new("name", ViolationCode::Required, "missing")]
            .into_iter()
            .collect();
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value["name"][0]["code"], "required");
    }
}
