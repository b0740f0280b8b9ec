//! Raw schema violations, attributed to the form property they concern.

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::ValidationError;
use serde::{Deserialize, Serialize};

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// The form property the violation concerns, if attributable.
    pub property: Option<String>,
    /// JSON Pointer path to the violating value in the payload.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// The schema keyword that failed (`minLength`, `type`, ...).
    pub keyword: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldViolation {
    pub(crate) fn from_error(error: &ValidationError<'_>) -> Self {
        let instance_path = error.instance_path.to_string();
        let schema_path = error.schema_path.to_string();
        let property = first_segment(&instance_path).or_else(|| match &error.kind {
            ValidationErrorKind::Required { property } => property.as_str().map(str::to_string),
            _ => None,
        });
        Self {
            property,
            keyword: last_segment(&schema_path).unwrap_or_default(),
            instance_path,
            schema_path,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(p) => write!(f, "{p}: {}", self.message),
            None => write!(f, "(root): {}", self.message),
        }
    }
}

fn first_segment(pointer: &str) -> Option<String> {
    pointer
        .strip_prefix('/')
        .and_then(|rest| rest.split('/').next())
        .filter(|s| !s.is_empty())
        .map(unescape)
}

fn last_segment(pointer: &str) -> Option<String> {
    pointer
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(unescape)
}

/// Undo JSON Pointer escaping (RFC 6901 §4).
fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
