//! Numeric normalization and scalar classification of decoded JSON values.

use serde_json::{Number, Value};

use crate::model::FieldType;

/// Classification of one decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    String,
    /// A mapping that becomes its own struct.
    Object,
    /// Arrays, booleans and null; carries the JSON kind name.
    Unsupported(&'static str),
}

impl ValueKind {
    /// Field type for scalar kinds, `None` for objects and unsupported values.
    pub fn field_type(self) -> Option<FieldType> {
        match self {
            ValueKind::Integer => Some(FieldType::Integer),
            ValueKind::Float => Some(FieldType::Float),
            ValueKind::String => Some(FieldType::String),
            ValueKind::Object | ValueKind::Unsupported(_) => None,
        }
    }
}

/// Classify a value that has already been through [`normalize_numbers`].
pub fn classify(value: &Value) -> ValueKind {
    match value {
        Value::Number(number) if number.is_i64() || number.is_u64() => ValueKind::Integer,
        Value::Number(_) => ValueKind::Float,
        Value::String(_) => ValueKind::String,
        Value::Object(_) => ValueKind::Object,
        other => ValueKind::Unsupported(json_kind(other)),
    }
}

/// Rewrite every float leaf without a fractional part into an integer, at any depth.
///
/// `5.0` and `5` must classify the same way, so this runs over the whole document
/// before any field is typed.
pub fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(number) => {
            if let Some(integral) = integral_float(number) {
                *number = Number::from(integral);
            }
        }
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        _ => {}
    }
}

fn integral_float(number: &Number) -> Option<i64> {
    if number.is_i64() || number.is_u64() {
        return None;
    }
    let float = number.as_f64()?;
    // i64::MAX is not exactly representable; the bound excludes its rounded-up value.
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.is_finite() && float.fract() == 0.0 && in_range).then_some(float as i64)
}

/// JSON kind name used in diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalized(mut value: Value) -> Value {
        normalize_numbers(&mut value);
        value
    }

    #[test]
    fn test_integral_floats_become_integers() {
        assert_eq!(classify(&normalized(json!(5))), ValueKind::Integer);
        assert_eq!(classify(&normalized(json!(5.0))), ValueKind::Integer);
        assert_eq!(classify(&normalized(json!(5.5))), ValueKind::Float);
        assert_eq!(classify(&normalized(json!(-3.0))), ValueKind::Integer);
    }

    #[test]
    fn test_normalization_reaches_nested_leaves() {
        let value = normalized(json!({"a": {"b": {"c": 2.0, "d": 2.25}}, "e": [1.0]}));
        assert_eq!(value["a"]["b"]["c"], json!(2));
        assert!(value["a"]["b"]["c"].is_i64());
        assert!(value["a"]["b"]["d"].is_f64());
        assert!(value["e"][0].is_i64());
    }

    #[test]
    fn test_huge_floats_stay_floats() {
        let value = normalized(json!(1e300));
        assert_eq!(classify(&value), ValueKind::Float);
    }

    #[test]
    fn test_classify_kinds() {
        assert_eq!(classify(&json!("x")), ValueKind::String);
        assert_eq!(classify(&json!({"k": 1})), ValueKind::Object);
        assert_eq!(classify(&json!([1, 2])), ValueKind::Unsupported("array"));
        assert_eq!(classify(&json!(true)), ValueKind::Unsupported("boolean"));
        assert_eq!(classify(&Value::Null), ValueKind::Unsupported("null"));
    }

    #[test]
    fn test_field_types() {
        assert_eq!(ValueKind::Integer.field_type(), Some(FieldType::Integer));
        assert_eq!(ValueKind::Float.field_type(), Some(FieldType::Float));
        assert_eq!(ValueKind::String.field_type(), Some(FieldType::String));
        assert_eq!(ValueKind::Object.field_type(), None);
    }
}
