//! Scalar type coercion.
//!
//! Text inputs report strings, so `"8000"` typed into an `amount` field
//! whose schema says `type: number` would fail a strict check. When
//! coercion is enabled, each payload value whose JSON type is not among
//! the property's declared types is converted to the first declared
//! scalar type it parses as. Values that convert to nothing are left
//! untouched for the schema to reject. `null` is never coerced.

use serde_json::{Map, Value};

use crate::extract::number_value;

/// Return a copy of `payload` with scalars coerced to the types `schema`
/// declares for each property.
pub fn coerce_payload(payload: &Map<String, Value>, schema: &Value) -> Map<String, Value> {
    let properties = schema.get("properties").and_then(Value::as_object);
    payload
        .iter()
        .map(|(name, value)| {
            let declared = properties
                .and_then(|p| p.get(name))
                .map(declared_types)
                .unwrap_or_default();
            let coerced = coerce_value(value, &declared).unwrap_or_else(|| value.clone());
            (name.clone(), coerced)
        })
        .collect()
}

fn declared_types(property: &Value) -> Vec<&str> {
    match property.get("type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(ts)) => ts.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn matches_type(value: &Value, ty: &str) -> bool {
    match ty {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.as_f64().is_some_and(|n| n.fract() == 0.0),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => false,
    }
}

fn coerce_value(value: &Value, declared: &[&str]) -> Option<Value> {
    if value.is_null() || declared.is_empty() || declared.iter().any(|t| matches_type(value, t)) {
        return None;
    }
    declared.iter().find_map(|ty| coerce_to(value, ty))
}

fn coerce_to(value: &Value, ty: &str) -> Option<Value> {
    match (value, ty) {
        (Value::String(s), "number") => parse_number(s).map(number_value),
        (Value::String(s), "integer") => parse_number(s)
            .filter(|n| n.fract() == 0.0)
            .map(number_value),
        (Value::String(s), "boolean") => match s.trim() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        (Value::String(s), "null") if s.is_empty() => Some(Value::Null),
        (Value::Number(n), "string") => Some(Value::String(n.to_string())),
        (Value::Bool(b), "string") => Some(Value::String(b.to_string())),
        (Value::Bool(b), "number" | "integer") => Some(Value::from(i64::from(*b))),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "properties": {
                "userid": { "type": "string", "minLength": 2 },
                "amount": { "type": "number" },
                "count": { "type": "integer" },
                "active": { "type": ["boolean", "null"] },
                "createdate": { "format": "date-time" }
            }
        })
    }

    fn coerce(payload: Value) -> Value {
        let Value::Object(map) = payload else {
            panic!("payload must be an object")
        };
        Value::Object(coerce_payload(&map, &schema()))
    }

    #[test]
    fn numeric_text_becomes_number() {
        let out = coerce(json!({"amount": "8000", "count": "12"}));
        assert_eq!(out, json!({"amount": 8000, "count": 12}));
    }

    #[test]
    fn fractional_text_is_not_an_integer() {
        let out = coerce(json!({"count": "1.5"}));
        assert_eq!(out, json!({"count": "1.5"}));
    }

    #[test]
    fn non_numeric_text_is_left_for_the_schema() {
        let out = coerce(json!({"amount": "lots"}));
        assert_eq!(out, json!({"amount": "lots"}));
    }

    #[test]
    fn numbers_become_strings_for_string_properties() {
        let out = coerce(json!({"userid": 42}));
        assert_eq!(out, json!({"userid": "42"}));
    }

    #[test]
    fn null_is_never_coerced() {
        let out = coerce(json!({"userid": null, "amount": null}));
        assert_eq!(out, json!({"userid": null, "amount": null}));
    }

    #[test]
    fn type_unions_use_first_match() {
        let out = coerce(json!({"active": "true"}));
        assert_eq!(out, json!({"active": true}));
        let out = coerce(json!({"active": ""}));
        assert_eq!(out, json!({"active": null}));
    }

    #[test]
    fn untyped_and_unknown_properties_pass_through() {
        let out = coerce(json!({"createdate": "2024-05-01T10:00:00Z", "extra": "1"}));
        assert_eq!(out, json!({"createdate": "2024-05-01T10:00:00Z", "extra": "1"}));
    }
}
