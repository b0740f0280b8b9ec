//! # Element Contract
//!
//! The capability surface a view must offer to be validated: an id-scoped
//! lookup ([`ElementLocator`]) and per-element value and value-state access
//! ([`FormElement`]).
//!
//! Element identifiers are local to the view that owns them. The view's
//! scope (its own id) namespaces them, so two views may each hold an
//! `amount` element without colliding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of control an element is.
///
/// Selects the value extraction strategy. Text inputs report strings,
/// numeric inputs report numbers, date pickers report date values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Free text input.
    #[default]
    Text,
    /// Numeric input (step input, slider).
    Numeric,
    /// Date or date-time picker.
    Date,
    /// Anything else; raw JSON values pass through unchanged.
    Other,
}

impl ElementKind {
    /// All kinds, in declaration order.
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Text,
        ElementKind::Numeric,
        ElementKind::Date,
        ElementKind::Other,
    ];

    /// Lowercase name as used in view snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Date => "date",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visible validation state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueState {
    /// No indicator shown.
    #[default]
    None,
    /// Error indicator shown alongside the value-state text.
    Error,
}

/// The raw value an element holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ElementValue {
    /// Nothing entered.
    #[default]
    Empty,
    /// Text content.
    Text(String),
    /// Numeric content.
    Number(f64),
    /// A date value (date pickers).
    Date(DateTime<Utc>),
    /// An arbitrary JSON value (custom controls).
    Json(serde_json::Value),
}

impl ElementValue {
    /// Returns true if the element holds nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for ElementValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ElementValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for ElementValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for ElementValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<DateTime<Utc>> for ElementValue {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

/// A single input element inside a view.
///
/// Setters take `&self`: the view owns the element and the validator only
/// borrows it, so implementations keep value state behind interior
/// mutability.
pub trait FormElement {
    /// Identifier, unique within the owning view's scope.
    fn id(&self) -> &str;

    /// Control kind; selects value extraction.
    fn kind(&self) -> ElementKind;

    /// Current value.
    fn value(&self) -> ElementValue;

    /// Current value state.
    fn value_state(&self) -> ValueState;

    fn set_value_state(&self, state: ValueState);

    /// Text shown with the value state. Empty when none.
    fn value_state_text(&self) -> String;

    fn set_value_state_text(&self, text: &str);

    /// Per-element override for the validator's error text.
    fn custom_error_message(&self) -> Option<String> {
        None
    }
}

/// Id-scoped element lookup on a view.
pub trait ElementLocator {
    /// Element type the view holds.
    type Element: FormElement;

    /// The view's own id, which scopes element identifiers.
    fn scope(&self) -> &str;

    /// Look up an element by identifier within `scope`.
    ///
    /// Returns `None` when the scope is not this view's or no element has
    /// that identifier.
    fn find_by_id(&self, scope: &str, id: &str) -> Option<&Self::Element>;

    /// Look up an element in this view's own scope.
    fn by_id(&self, id: &str) -> Option<&Self::Element> {
        self.find_by_id(self.scope(), id)
    }
}
