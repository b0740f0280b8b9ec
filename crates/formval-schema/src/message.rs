//! # Message Formatting
//!
//! Turns raw violations into display-ready message records that a message
//! area can list directly. Formatting is pure: it reads the violation list
//! and the view scope and touches nothing else.

use serde::{Deserialize, Serialize};

use crate::violation::FieldViolation;

/// Severity of a message. Schema violations are always errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Error,
}

/// A message record for a message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Severity.
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Human-readable text.
    pub message: String,
    /// Secondary text; the property name for field violations.
    pub additional_text: String,
    /// The element binding the message concerns, e.g. `orders--userid/value`.
    /// Root-level violations target the view itself.
    pub target: String,
}

/// Target for a property's value binding in the given view scope.
pub fn message_target(scope: &str, property: Option<&str>) -> String {
    match property {
        Some(p) => format!("{scope}--{p}/value"),
        None => scope.to_string(),
    }
}

/// Convert violations into error messages, preserving order.
pub fn process_validation_errors(scope: &str, violations: &[FieldViolation]) -> Vec<Message> {
    violations
        .iter()
        .map(|v| Message {
            message_type: MessageType::Error,
            message: v.message.clone(),
            additional_text: v.property.clone().unwrap_or_default(),
            target: message_target(scope, v.property.as_deref()),
        })
        .collect()
}
