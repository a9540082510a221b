//! Schema validation of submitted data.
//!
//! Validation uses draft-4 semantics. Every violation is collected in one
//! pass and attached to a field key:
//! - a missing required property is keyed by the property name (under its
//!   parent's path for nested objects)
//! - anything else is keyed by its data path, with the leading `/` removed
//!   and nested segments joined by `.` like [`schemaform_fields::FieldKey`]

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, ValidationError};
use schemaform_fields::SchemaNode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ValidatorError, ValidatorResult};
use crate::strip::strip_empty;
use crate::violation::{ErrorMap, Violation, ViolationCode};

/// The outcome of validating one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: ErrorMap,
}

impl Validation {
    fn from_errors(errors: ErrorMap) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// A compiled validator for one schema.
pub struct SchemaValidator {
    inner: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile `schema` for validation.
    ///
    /// Fails when the exported schema is not a valid draft-4 schema, for
    /// example when a `pattern` is not a valid regular expression.
    pub fn new(schema: &SchemaNode) -> ValidatorResult<Self> {
        let exported = schema.to_validation_schema()?;
        let inner = jsonschema::options()
            .with_draft(Draft::Draft4)
            .build(&exported)
            .map_err(|e| ValidatorError::invalid_schema(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Validate submitted data.
    ///
    /// Empty values are stripped first so blank required fields are
    /// reported as missing.
    pub fn validate(&self, data: &Value) -> Validation {
        let stripped = strip_empty(data);
        let errors: ErrorMap = self.inner.iter_errors(&stripped).map(to_violation).collect();

        debug!(
            violations = errors.iter().map(|(_, v)| v.len()).sum::<usize>(),
            fields = errors.len(),
            "validated submission"
        );
        Validation::from_errors(errors)
    }
}

/// Validate `data` against `schema` in one call.
pub fn validate(data: &Value, schema: &SchemaNode) -> ValidatorResult<Validation> {
    Ok(SchemaValidator::new(schema)?.validate(data))
}

fn to_violation(error: ValidationError<'_>) -> Violation {
    let path = pointer_to_key(&error.instance_path.to_string());
    let key = match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = match property {
                Value::String(name) => name.clone(),
                other => other.to_string(),
            };
            if path.is_empty() {
                name
            } else {
                format!("{}.{}", path, name)
            }
        }
        _ => path,
    };
    Violation::new(key, code_for(&error.kind), error.to_string())
}

fn code_for(kind: &ValidationErrorKind) -> ViolationCode {
    match kind {
        ValidationErrorKind::Required { .. } => ViolationCode::Required,
        ValidationErrorKind::Type { .. } => ViolationCode::Type,
        ValidationErrorKind::MinLength { .. } => ViolationCode::MinLength,
        ValidationErrorKind::MaxLength { .. } => ViolationCode::MaxLength,
        ValidationErrorKind::Minimum { .. } | ValidationErrorKind::ExclusiveMinimum { .. } => {
            ViolationCode::Minimum
        }
        ValidationErrorKind::Maximum { .. } | ValidationErrorKind::ExclusiveMaximum { .. } => {
            ViolationCode::Maximum
        }
        ValidationErrorKind::Pattern { .. } => ViolationCode::Pattern,
        ValidationErrorKind::Enum { .. } => ViolationCode::Enum,
        ValidationErrorKind::Format { .. } => ViolationCode::Format,
        _ => ViolationCode::Other,
    }
}

/// `/address/city` → `address.city`, undoing JSON pointer escapes.
fn pointer_to_key(pointer: &str) -> String {
    pointer
        .strip_prefix('/')
        .unwrap_or(pointer)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn contact_schema() -> SchemaNode {
        SchemaNode::from_value(json!({
            "type": "object",
            "required": ["name", "email"],
            "properties": {
                "name": {"type": "string", "minLength": 2},
                "email": {"type": "string", "pattern": "^[^@]+@[^@]+$"},
                "size": {"type": "string", "enum": ["s", "m", "l"]},
                "age": {"type": "integer", "minimum": 18, "maximum": 99, "exclusiveMaximum": true}
            }
        }))
        .unwrap()
    }

    #[rstest]
    #[case("", "")]
    #[case("/name", "name")]
    #[case("/address/city", "address.city")]
    #[case("/a~1b/c~0d", "a/b.c~d")]
    #[case("/items/0", "items.0")]
    fn pointer_keys(#[case] pointer: &str, #[case] expected: &str) {
        assert_eq!(pointer_to_key(pointer), expected);
    }

    #[test]
    fn blank_required_field_is_reported_missing() {
        let result = validate(&json!({"name": "", "email": "a@b.com"}), &contact_schema()).unwrap();
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        let violations = result.errors.get("name");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, ViolationCode::Required);
        assert!(result.errors.get("email").is_empty());
    }

    #[test]
    fn valid_data_has_no_errors() {
        let data = json!({"name": "Ada", "email": "ada@example.com", "size": "m", "age": 36});
        let result = validate(&data, &contact_schema()).unwrap();
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn collects_every_violation() {
        let data = json!({"name": "A", "email": "nope", "size": "xl", "age": 99});
        let result = validate(&data, &contact_schema()).unwrap();
        assert!(!result.valid);
        assert_eq!(result.errors.get("name")[0].code, ViolationCode::MinLength);
        assert_eq!(result.errors.get("email")[0].code, ViolationCode::Pattern);
        assert_eq!(result.errors.get("size")[0].code, ViolationCode::Enum);
        assert_eq!(result.errors.get("age")[0].code, ViolationCode::Maximum);
    }

    #[test]
    fn field_can_carry_several_violations() {
        let schema = SchemaNode::from_value(json!({
            "type": "object",
            "properties": {
                "code": {"type": "string", "minLength": 4, "pattern": "^[0-9]+$"}
            }
        }))
        .unwrap();
        let result = validate(&json!({"code": "ab"}), &schema).unwrap();
        let codes: Vec<ViolationCode> = result.errors.get("code").iter().map(|v| v.code).collect();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains(&ViolationCode::MinLength));
        assert!(codes.contains(&ViolationCode::Pattern));
    }

    #[test]
    fn type_mismatch_is_keyed_by_path() {
        let result = validate(&json!({"name": 42, "email": "a@b.c"}), &contact_schema()).unwrap();
        assert_eq!(result.errors.get("name")[0].code, ViolationCode::Type);
    }

    #[test]
    fn property_required_flags_are_enforced() {
        let schema = SchemaNode::from_value(json!({
            "type": "object",
            "properties": {
                "title": {"type": "string", "required": true},
                "body": {"type": "string"}
            }
        }))
        .unwrap();
        let result = validate(&json!({"body": "text"}), &schema).unwrap();
        assert_eq!(result.errors.get("title")[0].code, ViolationCode::Required);
        assert!(result.errors.get("body").is_empty());
    }

    #[test]
    fn nested_required_is_keyed_under_parent() {
        let schema = SchemaNode::from_value(json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "object",
                    "required": ["city"],
                    "properties": {"city": {"type": "string"}, "zip": {"type": "string"}}
                }
            }
        }))
        .unwrap();
        let result = validate(&json!({"address": {"zip": "0150"}}), &schema).unwrap();
        assert_eq!(result.errors.get("address.city")[0].code, ViolationCode::Required);
    }

    #[test]
    fn empty_required_array_is_accepted() {
        let schema = SchemaNode::from_value(json!({
            "type": "object",
            "required": [],
            "properties": {"name": {"type": "string"}}
        }))
        .unwrap();
        let result = validate(&json!({}), &schema).unwrap();
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn required_flag_under_items_is_enforced() {
        let schema = SchemaNode::from_value(json!({
            "type": "object",
            "properties": {
                "contacts": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"email": {"type": "string", "required": true}}
                    }
                }
            }
        }))
        .unwrap();
        let validator = SchemaValidator::new(&schema).unwrap();
        let result = validator.validate(&json!({"contacts": [{"email": "a@b.c"}, {"note": "x"}]}));
        assert!(!result.valid);
        assert_eq!(result.errors.get("contacts.1.email")[0].code, ViolationCode::Required);
    }

    #[test]
    fn validator_is_reusable() {
        let validator = SchemaValidator::new(&contact_schema()).unwrap();
        let first = validator.validate(&json!({}));
        let second = validator.validate(&json!({}));
        assert_eq!(first, second);
        assert_eq!(first.errors.len(), 2);
    }

    #[test]
    fn invalid_pattern_is_a_schema_error() {
        let schema = SchemaNode::from_value(json!({
            "type": "object",
            "properties": {"x": {"type": "string", "pattern": "["}}
        }))
        .unwrap();
        assert!(matches!(
            SchemaValidator::new(&schema),
            Err(ValidatorError::InvalidSchema(_))
        ));
    }
}
