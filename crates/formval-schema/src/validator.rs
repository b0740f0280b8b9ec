//! # Form Validator
//!
//! Binds a JSON schema to the elements of a view and validates them.
//!
//! ## Pipeline
//!
//! Each [`FormValidator::validate`] call runs, in one synchronous pass:
//!
//! 1. match schema properties to view elements ([`FormValidator::controls`]),
//! 2. clear every matched element's indicator,
//! 3. extract the payload ([`FormValidator::payload`]) and optionally
//!    coerce it to the declared scalar types,
//! 4. check the payload against the compiled schema,
//! 5. annotate failing elements and format the messages.
//!
//! Nothing from one call is retained for the next, except the
//! recognized-property registry.
//!
//! ## Failure Model
//!
//! Building a validator can fail ([`ConstructionError`]); validating cannot.
//! A form that does not conform is an expected outcome and is reported as
//! [`ValidationOutcome::Fail`].

use std::collections::HashSet;
use std::fmt;

use formval_core::{ElementLocator, FormElement};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::annotate::{clear_control_status, set_control_error_status};
use crate::coerce::coerce_payload;
use crate::config::ValidatorConfig;
use crate::extract;
use crate::message::{self, Message};
use crate::registry::ValidProperties;
use crate::violation::FieldViolation;

/// Error building a [`FormValidator`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// No view was supplied.
    #[error("a view is required to build a form validator")]
    MissingView,

    /// No schema was supplied.
    #[error("a schema is required to build a form validator")]
    MissingSchema,

    /// The schema is not a JSON object.
    #[error("schema must be a JSON object, got {found}")]
    InvalidSchema {
        /// JSON type that was supplied instead.
        found: &'static str,
    },

    /// The schema could not be compiled.
    #[error("schema compile error: {reason}")]
    SchemaCompile {
        /// Compiler diagnostic.
        reason: String,
    },
}

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "details", rename_all = "lowercase")]
pub enum ValidationOutcome {
    /// Every field conforms.
    Pass,
    /// At least one field violates the schema.
    Fail(ValidationDetails),
}

impl ValidationOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Failure details, `None` on pass.
    pub fn details(&self) -> Option<&ValidationDetails> {
        match self {
            Self::Pass => None,
            Self::Fail(details) => Some(details),
        }
    }

    pub fn into_details(self) -> Option<ValidationDetails> {
        match self {
            Self::Pass => None,
            Self::Fail(details) => Some(details),
        }
    }
}

/// Everything a failed pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetails {
    /// The payload that was checked, after coercion.
    pub payload_used: Map<String, Value>,
    /// Raw violations in validator order.
    #[serde(rename = "originalErrorMessages")]
    pub original_errors: Vec<FieldViolation>,
    /// Formatted messages, one per violation.
    #[serde(rename = "errorMessageObjects")]
    pub messages: Vec<Message>,
}

/// Builder for [`FormValidator`].
pub struct FormValidatorBuilder<'v, 's, V> {
    view: Option<&'v V>,
    schema: Option<&'s Value>,
    config: ValidatorConfig,
}

impl<'v, 's, V: ElementLocator> FormValidatorBuilder<'v, 's, V> {
    pub fn view(mut self, view: &'v V) -> Self {
        self.view = Some(view);
        self
    }

    pub fn schema(mut self, schema: &'s Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Compile the schema and bind it to the view.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::MissingView`] and
    /// [`ConstructionError::MissingSchema`] when either input is absent (the
    /// view is checked first), [`ConstructionError::InvalidSchema`] when the
    /// schema is not an object, and [`ConstructionError::SchemaCompile`] when
    /// the schema compiler rejects it.
    pub fn build(self) -> Result<FormValidator<'v, 's, V>, ConstructionError> {
        let view = self.view.ok_or(ConstructionError::MissingView)?;
        let schema = self.schema.ok_or(ConstructionError::MissingSchema)?;
        if !schema.is_object() {
            return Err(ConstructionError::InvalidSchema {
                found: json_type_name(schema),
            });
        }

        let mut opts = jsonschema::options();
        opts.with_draft(self.config.draft.to_jsonschema());
        opts.should_validate_formats(self.config.validate_formats);
        let compiled = opts
            .build(schema)
            .map_err(|e| ConstructionError::SchemaCompile {
                reason: e.to_string(),
            })?;

        tracing::debug!(
            view = view.scope(),
            properties = declared_properties(schema).map_or(0, Map::len),
            "form validator bound"
        );

        Ok(FormValidator {
            view,
            schema,
            compiled,
            config: self.config,
            valid_properties: ValidProperties::default(),
        })
    }
}

/// A schema bound to a view.
///
/// Borrows both; the view's element values may change between
/// [`validate`](Self::validate) calls and each call sees the current ones.
pub struct FormValidator<'v, 's, V: ElementLocator> {
    view: &'v V,
    schema: &'s Value,
    compiled: jsonschema::Validator,
    config: ValidatorConfig,
    valid_properties: ValidProperties,
}

impl<'v, 's, V: ElementLocator> fmt::Debug for FormValidator<'v, 's, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValidator")
            .field("view", &self.view.scope())
            .field("schema", &self.schema)
            .field("config", &self.config)
            .field("valid_properties", &self.valid_properties)
            .finish_non_exhaustive()
    }
}

impl<'v, 's, V: ElementLocator> FormValidator<'v, 's, V> {
    /// Start a builder.
    pub fn builder() -> FormValidatorBuilder<'v, 's, V> {
        FormValidatorBuilder {
            view: None,
            schema: None,
            config: ValidatorConfig::default(),
        }
    }

    /// Bind `schema` to `view` with the default configuration.
    pub fn new(view: &'v V, schema: &'s Value) -> Result<Self, ConstructionError> {
        Self::builder().view(view).schema(schema).build()
    }

    pub fn view(&self) -> &'v V {
        self.view
    }

    pub fn schema(&self) -> &'s Value {
        self.schema
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Elements whose id matches a schema property, in declaration order.
    ///
    /// Properties with no matching element are skipped.
    pub fn controls(&self) -> Vec<&'v V::Element> {
        let Some(properties) = declared_properties(self.schema) else {
            return Vec::new();
        };
        let view: &'v V = self.view;
        let scope = view.scope();
        properties
            .keys()
            .filter_map(|name| {
                let found = view.find_by_id(scope, name);
                if found.is_none() {
                    tracing::trace!(property = %name, view = scope, "no element for schema property");
                }
                found
            })
            .collect()
    }

    /// Current value of one element.
    pub fn control_value(&self, element: &V::Element) -> Value {
        extract::control_value(element)
    }

    /// Map of element id to current value for `controls`.
    pub fn payload(&self, controls: &[&V::Element]) -> Map<String, Value> {
        extract::payload(controls)
    }

    /// Validate the view's current values against the schema.
    pub fn validate(&self) -> ValidationOutcome {
        let controls = self.controls();
        clear_control_status(&controls);

        let mut payload = self.payload(&controls);
        if self.config.coerce_types {
            payload = coerce_payload(&payload, self.schema);
        }

        let instance = Value::Object(payload.clone());
        let violations: Vec<FieldViolation> = self
            .compiled
            .iter_errors(&instance)
            .map(|e| FieldViolation::from_error(&e))
            .collect();

        if violations.is_empty() {
            tracing::debug!(view = self.view.scope(), fields = controls.len(), "form valid");
            return ValidationOutcome::Pass;
        }

        let mut annotated: HashSet<&str> = HashSet::new();
        for violation in &violations {
            let Some(property) = violation.property.as_deref() else {
                continue;
            };
            if !annotated.insert(property) {
                continue;
            }
            match controls.iter().find(|el| el.id() == property) {
                Some(element) => {
                    let default_message = self
                        .config
                        .default_error_message
                        .as_deref()
                        .unwrap_or(&violation.message);
                    set_control_error_status(*element, default_message);
                }
                None => {
                    tracing::trace!(property, "violation has no bound element to annotate");
                }
            }
        }

        let messages = self.process_validation_errors(&violations);
        tracing::debug!(
            view = self.view.scope(),
            violations = violations.len(),
            fields = annotated.len(),
            "form invalid"
        );

        ValidationOutcome::Fail(ValidationDetails {
            payload_used: payload,
            original_errors: violations,
            messages,
        })
    }

    /// Format violations as messages targeting this view's elements.
    pub fn process_validation_errors(&self, violations: &[FieldViolation]) -> Vec<Message> {
        message::process_validation_errors(self.view.scope(), violations)
    }

    /// Recognized keyword names.
    pub fn valid_properties(&self) -> &[String] {
        self.valid_properties.as_slice()
    }

    /// Append recognized keyword names.
    pub fn add_valid_properties<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_properties.extend(names);
    }

    pub fn is_recognized(&self, keyword: &str) -> bool {
        self.valid_properties.contains(keyword)
    }
}

fn declared_properties(schema: &Value) -> Option<&Map<String, Value>> {
    schema.get("properties").and_then(Value::as_object)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
