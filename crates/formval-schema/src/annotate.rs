//! Error indicators on view elements.

use formval_core::{FormElement, ValueState};

/// Message to show on `element`: its custom message if it has one,
/// otherwise `default_message`.
pub fn control_custom_error_message<E: FormElement + ?Sized>(
    element: &E,
    default_message: &str,
) -> String {
    element
        .custom_error_message()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| default_message.to_string())
}

/// Put `element` into the error state with the resolved message.
pub fn set_control_error_status<E: FormElement + ?Sized>(element: &E, default_message: &str) {
    let text = control_custom_error_message(element, default_message);
    element.set_value_state(ValueState::Error);
    element.set_value_state_text(&text);
}

/// Reset every element to no indicator and empty text. Idempotent.
pub fn clear_control_status<E: FormElement + ?Sized>(elements: &[&E]) {
    for element in elements {
        element.set_value_state(ValueState::None);
        element.set_value_state_text("");
    }
}
