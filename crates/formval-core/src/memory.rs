//! # In-Memory View
//!
//! A flat, id-indexed view whose elements keep their value and value state
//! in `Cell`/`RefCell`. Used as the test double for the validator and as
//! the view the CLI loads from a JSON snapshot.
//!
//! ## Snapshot Format
//!
//! ```json
//! {
//!   "id": "orders",
//!   "elements": [
//!     { "id": "userid", "kind": "text", "value": "42" },
//!     { "id": "createdate", "kind": "date", "value": "2024-05-01T10:00:00Z" },
//!     { "id": "amount", "kind": "numeric", "customErrorMessage": "Enter an amount" }
//!   ]
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::element::{ElementKind, ElementLocator, ElementValue, FormElement, ValueState};
use crate::error::FormvalError;

/// An element held by a [`MemoryView`].
#[derive(Debug)]
pub struct MemoryElement {
    id: String,
    kind: ElementKind,
    value: RefCell<ElementValue>,
    value_state: Cell<ValueState>,
    value_state_text: RefCell<String>,
    custom_error_message: Option<String>,
}

impl MemoryElement {
    /// Create an empty element with no value state.
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            value: RefCell::new(ElementValue::Empty),
            value_state: Cell::new(ValueState::None),
            value_state_text: RefCell::new(String::new()),
            custom_error_message: None,
        }
    }

    /// Shorthand for a text input.
    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Text)
    }

    /// Shorthand for a numeric input.
    pub fn numeric(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Numeric)
    }

    /// Shorthand for a date picker.
    pub fn date(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Date)
    }

    /// Attach a custom error message shown instead of the validator's text.
    pub fn with_custom_error_message(mut self, message: impl Into<String>) -> Self {
        self.custom_error_message = Some(message.into());
        self
    }

    /// Set the element's initial value.
    pub fn with_value(self, value: impl Into<ElementValue>) -> Self {
        self.set_value(value);
        self
    }

    /// Replace the element's value.
    pub fn set_value(&self, value: impl Into<ElementValue>) {
        *self.value.borrow_mut() = value.into();
    }

    /// Remove the element's value.
    pub fn clear_value(&self) {
        *self.value.borrow_mut() = ElementValue::Empty;
    }
}

impl FormElement for MemoryElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn value(&self) -> ElementValue {
        self.value.borrow().clone()
    }

    fn value_state(&self) -> ValueState {
        self.value_state.get()
    }

    fn set_value_state(&self, state: ValueState) {
        self.value_state.set(state);
    }

    fn value_state_text(&self) -> String {
        self.value_state_text.borrow().clone()
    }

    fn set_value_state_text(&self, text: &str) {
        let mut current = self.value_state_text.borrow_mut();
        current.clear();
        current.push_str(text);
    }

    fn custom_error_message(&self) -> Option<String> {
        self.custom_error_message.clone()
    }
}

/// A view holding [`MemoryElement`]s in insertion order.
#[derive(Debug)]
pub struct MemoryView {
    id: String,
    elements: Vec<MemoryElement>,
    index: HashMap<String, usize>,
}

impl MemoryView {
    /// Create an empty view with the given scope id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add an element.
    ///
    /// # Errors
    ///
    /// Returns [`FormvalError::DuplicateElement`] if an element with the same
    /// id already exists in this view.
    pub fn add(&mut self, element: MemoryElement) -> Result<&MemoryElement, FormvalError> {
        if self.index.contains_key(element.id()) {
            return Err(FormvalError::DuplicateElement {
                view: self.id.clone(),
                id: element.id().to_string(),
            });
        }
        let pos = self.elements.len();
        self.index.insert(element.id().to_string(), pos);
        self.elements.push(element);
        Ok(&self.elements[pos])
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, element: MemoryElement) -> Result<Self, FormvalError> {
        self.add(element)?;
        Ok(self)
    }

    /// The view id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> &[MemoryElement] {
        &self.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the view holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build a view from a parsed snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FormvalError::Snapshot`] if an element value does not fit
    /// its kind, or [`FormvalError::DuplicateElement`] for repeated ids.
    pub fn from_snapshot(snapshot: ViewSnapshot) -> Result<Self, FormvalError> {
        if snapshot.id.is_empty() {
            return Err(FormvalError::Snapshot("view id must not be empty".to_string()));
        }
        let mut view = Self::new(snapshot.id);
        for entry in snapshot.elements {
            let value = snapshot_value(&entry)?;
            let mut element = MemoryElement::new(entry.id, entry.kind);
            element.custom_error_message = entry.custom_error_message;
            element.set_value(value);
            view.add(element)?;
        }
        Ok(view)
    }

    /// Load a view from a JSON snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormvalError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let snapshot: ViewSnapshot = serde_json::from_str(&content)?;
        Self::from_snapshot(snapshot)
    }
}

impl ElementLocator for MemoryView {
    type Element = MemoryElement;

    fn scope(&self) -> &str {
        &self.id
    }

    fn find_by_id(&self, scope: &str, id: &str) -> Option<&MemoryElement> {
        if scope != self.id {
            return None;
        }
        self.index.get(id).map(|&pos| &self.elements[pos])
    }
}

/// Serialized form of a view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSnapshot {
    /// View id.
    pub id: String,
    /// Elements in order.
    #[serde(default)]
    pub elements: Vec<ElementSnapshot>,
}

/// Serialized form of one element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Element id, local to the view.
    pub id: String,
    /// Control kind.
    #[serde(default)]
    pub kind: ElementKind,
    /// Current value; absent or `null` means empty.
    #[serde(default)]
    pub value: Option<Value>,
    /// Optional custom error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_error_message: Option<String>,
}

fn snapshot_value(entry: &ElementSnapshot) -> Result<ElementValue, FormvalError> {
    let Some(raw) = &entry.value else {
        return Ok(ElementValue::Empty);
    };
    let value = match (entry.kind, raw) {
        (_, Value::Null) => ElementValue::Empty,
        (ElementKind::Other, v) => ElementValue::Json(v.clone()),
        (ElementKind::Date, Value::String(s)) => {
            let parsed = DateTime::parse_from_rfc3339(s).map_err(|e| {
                FormvalError::Snapshot(format!(
                    "element \"{}\": invalid RFC 3339 date \"{s}\": {e}",
                    entry.id
                ))
            })?;
            ElementValue::Date(parsed.with_timezone(&Utc))
        }
        (_, Value::String(s)) => ElementValue::Text(s.clone()),
        (_, Value::Number(n)) => match n.as_f64() {
            Some(f) => ElementValue::Number(f),
            None => {
                return Err(FormvalError::Snapshot(format!(
                    "element \"{}\": number {n} out of range",
                    entry.id
                )))
            }
        },
        (kind, other) => {
            return Err(FormvalError::Snapshot(format!(
                "element \"{}\": {kind} element cannot hold {other}",
                entry.id
            )))
        }
    };
    Ok(value)
}
