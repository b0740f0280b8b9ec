//! # Error Hierarchy
//!
//! Structured error types for the element model, built with `thiserror`.
//! Validation failures are never errors: they travel as data in the
//! validator's outcome type. These variants cover loading views and
//! configuration from disk.

use thiserror::Error;

/// Top-level error type for formval.
#[derive(Error, Debug)]
pub enum FormvalError {
    /// A view snapshot is structurally unusable.
    #[error("invalid view snapshot: {0}")]
    Snapshot(String),

    /// Two elements in one view share an identifier.
    #[error("duplicate element id \"{id}\" in view \"{view}\"")]
    DuplicateElement {
        /// The view scope.
        view: String,
        /// The repeated element identifier.
        id: String,
    },

    /// Configuration could not be interpreted.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_element_display_names_view_and_id() {
        let err = FormvalError::DuplicateElement {
            view: "orders".to_string(),
            id: "amount".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("orders"));
        assert!(msg.contains("\"amount\""));
    }

    #[test]
    fn json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FormvalError = parse_err.into();
        assert!(matches!(err, FormvalError::Json(_)));
    }
}
