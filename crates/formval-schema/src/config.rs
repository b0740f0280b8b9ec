//! # Validator Configuration
//!
//! Options that shape how the schema is compiled and how payload values
//! are prepared before checking. Every field has a default, so an empty
//! YAML or JSON document is a valid configuration.

use std::path::Path;

use formval_core::FormvalError;
use jsonschema::Draft;
use serde::{Deserialize, Serialize};

/// JSON Schema draft used to compile the form schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaDraft {
    /// Draft 7.
    Draft7,
    /// Draft 2019-09.
    Draft201909,
    /// Draft 2020-12.
    #[default]
    Draft202012,
}

impl SchemaDraft {
    pub(crate) fn to_jsonschema(self) -> Draft {
        match self {
            Self::Draft7 => Draft::Draft7,
            Self::Draft201909 => Draft::Draft201909,
            Self::Draft202012 => Draft::Draft202012,
        }
    }
}

/// Configuration for a [`FormValidator`](crate::FormValidator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Coerce extracted strings to the scalar type a property declares.
    pub coerce_types: bool,
    /// Assert `format` keywords instead of treating them as annotations.
    pub validate_formats: bool,
    /// Schema draft.
    pub draft: SchemaDraft,
    /// Replaces the validator's text on annotated elements that have no
    /// custom message of their own.
    pub default_error_message: Option<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            coerce_types: true,
            validate_formats: true,
            draft: SchemaDraft::default(),
            default_error_message: None,
        }
    }
}

impl ValidatorConfig {
    /// Parse a configuration from YAML (or JSON, which is valid YAML).
    ///
    /// # Errors
    ///
    /// Returns [`FormvalError::Config`] if the document does not describe a
    /// configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self, FormvalError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| FormvalError::Config(e.to_string()))
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`FormvalError::Io`] if the file cannot be read and
    /// [`FormvalError::Config`] if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormvalError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            FormvalError::Config(reason) => {
                FormvalError::Config(format!("{}: {reason}", path.as_ref().display()))
            }
            other => other,
        })
    }
}
