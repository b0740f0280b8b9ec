//! # Value Extraction
//!
//! Normalizes element values into the JSON representation the schema is
//! checked against. The strategy is picked from the element's
//! [`ElementKind`] through [`extractor_for`]; there is no capability
//! probing.
//!
//! | Kind      | Text        | Number          | Date      | Json        | Empty  |
//! |-----------|-------------|-----------------|-----------|-------------|--------|
//! | `Text`    | string*     | string          | RFC 3339  | string form | `null` |
//! | `Numeric` | number or string | number     | RFC 3339  | as-is       | `null` |
//! | `Date`    | string*     | number          | RFC 3339  | as-is       | `null` |
//! | `Other`   | string*     | number          | RFC 3339  | as-is       | `null` |
//!
//! `*` empty text extracts as `null`.

use chrono::{DateTime, SecondsFormat, Utc};
use formval_core::{ElementKind, ElementValue, FormElement};
use serde_json::{Map, Value};

/// Converts a raw element value into its JSON representation.
pub type Extractor = fn(&ElementValue) -> Value;

/// Dispatch table from element kind to extraction function.
pub fn extractor_for(kind: ElementKind) -> Extractor {
    match kind {
        ElementKind::Text => extract_text,
        ElementKind::Numeric => extract_numeric,
        ElementKind::Date => extract_date,
        ElementKind::Other => extract_other,
    }
}

/// Current value of a single element, normalized for schema checking.
pub fn control_value<E: FormElement + ?Sized>(element: &E) -> Value {
    extractor_for(element.kind())(&element.value())
}

/// Map each element's id to its extracted value.
///
/// The key set equals the element id set; elements without a value map to
/// `null`.
pub fn payload<E: FormElement + ?Sized>(controls: &[&E]) -> Map<String, Value> {
    controls
        .iter()
        .map(|el| (el.id().to_string(), control_value(*el)))
        .collect()
}

fn extract_text(value: &ElementValue) -> Value {
    match value {
        ElementValue::Empty => Value::Null,
        ElementValue::Text(s) if s.is_empty() => Value::Null,
        ElementValue::Text(s) => Value::String(s.clone()),
        ElementValue::Number(n) => Value::String(number_text(*n)),
        ElementValue::Date(d) => Value::String(date_text(d)),
        ElementValue::Json(Value::String(s)) => Value::String(s.clone()),
        ElementValue::Json(Value::Null) => Value::Null,
        ElementValue::Json(v) => Value::String(v.to_string()),
    }
}

fn extract_numeric(value: &ElementValue) -> Value {
    match value {
        ElementValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Value::Null;
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => number_value(n),
                _ => Value::String(s.clone()),
            }
        }
        other => extract_other(other),
    }
}

fn extract_date(value: &ElementValue) -> Value {
    extract_other(value)
}

fn extract_other(value: &ElementValue) -> Value {
    match value {
        ElementValue::Empty => Value::Null,
        ElementValue::Text(s) if s.is_empty() => Value::Null,
        ElementValue::Text(s) => Value::String(s.clone()),
        ElementValue::Number(n) => number_value(*n),
        ElementValue::Date(d) => Value::String(date_text(d)),
        ElementValue::Json(v) => v.clone(),
    }
}

/// JSON number for `n`, as an integer when it has no fractional part.
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn number_text(n: f64) -> String {
    match number_value(n) {
        Value::Null => n.to_string(),
        v => v.to_string(),
    }
}

fn date_text(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::Millis, true)
}
