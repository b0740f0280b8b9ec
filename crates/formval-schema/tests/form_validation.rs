//! Integration test: the order-entry form.
//!
//! A view with user id, description, amount, and creation date inputs plus
//! one field the schema does not mention, validated end to end.

use chrono::Utc;
use formval_core::{ElementLocator, FormElement, MemoryElement, MemoryView, ValueState};
use formval_schema::{
    ConstructionError, FormValidator, MessageType, ValidationOutcome, DEFAULT_VALID_PROPERTIES,
};
use serde_json::{json, Value};

fn order_view() -> MemoryView {
    MemoryView::new("orderview")
        .with(MemoryElement::text("userid"))
        .and_then(|v| v.with(MemoryElement::text("description")))
        .and_then(|v| v.with(MemoryElement::text("amount")))
        .and_then(|v| v.with(MemoryElement::date("createdate")))
        .and_then(|v| v.with(MemoryElement::text("whatever")))
        .expect("view ids are unique")
}

fn order_schema() -> Value {
    json!({
        "properties": {
            "userid": { "type": "string", "minLength": 2 },
            "description": { "type": "string", "maxLength": 50, "minLength": 5 },
            "amount": { "type": "number", "minimum": 5, "maximum": 999999 },
            "createdate": { "format": "date-time" }
        }
    })
}

fn fill_valid(view: &MemoryView) {
    view.by_id("amount").unwrap().set_value(8000_i64);
    view.by_id("description").unwrap().set_value("Lager");
    view.by_id("createdate").unwrap().set_value(Utc::now());
    view.by_id("userid").unwrap().set_value(42_i64);
}

// -- construction -------------------------------------------------------------

#[test]
fn construction_fails_without_view_or_schema() {
    let schema = order_schema();
    let view = order_view();

    assert_eq!(
        FormValidator::<MemoryView>::builder().build().unwrap_err(),
        ConstructionError::MissingView
    );
    assert_eq!(
        FormValidator::builder().view(&view).build().unwrap_err(),
        ConstructionError::MissingSchema
    );
    assert_eq!(
        FormValidator::<MemoryView>::builder()
            .schema(&schema)
            .build()
            .unwrap_err(),
        ConstructionError::MissingView
    );
}

#[test]
fn construction_binds_view_and_default_properties() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    assert_eq!(validator.view().scope(), "orderview");
    assert_eq!(validator.valid_properties(), DEFAULT_VALID_PROPERTIES);
}

// -- controls -----------------------------------------------------------------

#[test]
fn no_controls_for_empty_properties() {
    let view = order_view();
    let schema = json!({ "properties": {} });
    let validator = FormValidator::new(&view, &schema).unwrap();
    assert_eq!(validator.controls().len(), 0);
}

#[test]
fn no_controls_for_unknown_ids() {
    let view = order_view();
    let schema = json!({ "properties": { "unknownid": { "type": "number" } } });
    let validator = FormValidator::new(&view, &schema).unwrap();
    assert_eq!(validator.controls().len(), 0);
}

#[test]
fn controls_follow_schema_declaration_order() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    let controls = validator.controls();
    let ids: Vec<&str> = controls.iter().map(|c| c.id()).collect();
    assert_eq!(ids, ["userid", "description", "amount", "createdate"]);
}

// -- payload ------------------------------------------------------------------

#[test]
fn payload_of_no_controls_is_empty() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    assert!(validator.payload(&[]).is_empty());
}

#[test]
fn payload_of_untouched_form_is_all_null() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    let payload = validator.payload(&validator.controls());
    assert_eq!(
        Value::Object(payload),
        json!({ "amount": null, "description": null, "createdate": null, "userid": null })
    );
}

#[test]
fn payload_reflects_values_set_after_binding() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    let controls = validator.controls();

    let now = Utc::now();
    view.by_id("amount").unwrap().set_value("9000");
    view.by_id("description").unwrap().set_value("Pale Ale");
    view.by_id("createdate").unwrap().set_value(now);
    view.by_id("userid").unwrap().set_value("42");

    let payload = validator.payload(&controls);
    assert_eq!(payload["amount"], json!("9000"));
    assert_eq!(payload["description"], json!("Pale Ale"));
    assert_eq!(payload["userid"], json!("42"));
    let date = payload["createdate"].as_str().unwrap();
    assert_eq!(
        chrono::DateTime::parse_from_rfc3339(date).unwrap().timestamp_millis(),
        now.timestamp_millis()
    );
}

#[test]
fn control_value_of_text_input_is_a_string() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    let amount = view.by_id("amount").unwrap();
    amount.set_value(42_i64);
    assert_eq!(validator.control_value(amount), json!("42"));
}

// -- messages -----------------------------------------------------------------

#[test]
fn validation_errors_become_error_messages() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    let details = validator.validate().into_details().unwrap();
    let messages = validator.process_validation_errors(&details.original_errors);
    assert_eq!(messages.len(), details.original_errors.len());
    for message in &messages {
        assert_eq!(message.message_type, MessageType::Error);
        assert!(!message.message.is_empty());
        assert!(message.target.starts_with("orderview--"));
    }
    assert_eq!(messages, details.messages);
}

// -- registry -----------------------------------------------------------------

#[test]
fn default_valid_properties() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    assert_eq!(validator.valid_properties().len(), 3);
}

#[test]
fn add_valid_properties_is_cumulative() {
    let view = order_view();
    let schema = order_schema();
    let mut validator = FormValidator::new(&view, &schema).unwrap();
    validator.add_valid_properties(["ABAP"]);
    assert_eq!(validator.valid_properties().len(), 4);
    validator.add_valid_properties(["Kamehameha", "Qi"]);
    assert_eq!(validator.valid_properties().len(), 6);
    assert_eq!(validator.valid_properties()[5], "Qi");
}

// -- validate -----------------------------------------------------------------

#[test]
fn empty_form_fails_and_marks_userid() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();

    let outcome = validator.validate();
    let details = outcome.details().expect("empty form must fail");
    assert_eq!(details.payload_used.len(), 4);
    assert!(!details.original_errors.is_empty());
    assert_eq!(details.messages.len(), details.original_errors.len());

    let userid = view.by_id("userid").unwrap();
    assert_eq!(userid.value_state(), ValueState::Error);
    assert!(!userid.value_state_text().is_empty());

    // Not in the schema, never touched.
    assert_eq!(view.by_id("whatever").unwrap().value_state(), ValueState::None);
}

#[test]
fn filled_form_passes_and_leaves_no_indicators() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    fill_valid(&view);

    assert_eq!(validator.validate(), ValidationOutcome::Pass);
    let userid = view.by_id("userid").unwrap();
    assert_eq!(userid.value_state(), ValueState::None);
    assert!(userid.value_state_text().is_empty());
}

#[test]
fn text_amount_is_coerced_to_number() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    fill_valid(&view);
    view.by_id("amount").unwrap().set_value("8000");

    assert!(validator.validate().is_pass());
}

#[test]
fn fixing_one_field_clears_only_its_indicator() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    fill_valid(&view);
    view.by_id("userid").unwrap().set_value("x");
    view.by_id("description").unwrap().set_value("Ale");

    let details = validator.validate().into_details().unwrap();
    let mut failed: Vec<&str> = details
        .original_errors
        .iter()
        .filter_map(|v| v.property.as_deref())
        .collect();
    failed.sort_unstable();
    assert_eq!(failed, ["description", "userid"]);

    view.by_id("userid").unwrap().set_value("42");
    let details = validator.validate().into_details().unwrap();
    assert_eq!(details.original_errors.len(), 1);
    assert_eq!(view.by_id("userid").unwrap().value_state(), ValueState::None);
    assert_eq!(view.by_id("userid").unwrap().value_state_text(), "");
    assert_eq!(
        view.by_id("description").unwrap().value_state(),
        ValueState::Error
    );
}

#[test]
fn revalidating_after_fix_clears_all_indicators() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();

    assert!(!validator.validate().is_pass());
    fill_valid(&view);
    assert!(validator.validate().is_pass());
    for control in validator.controls() {
        assert_eq!(control.value_state(), ValueState::None);
        assert_eq!(control.value_state_text(), "");
    }
}

#[test]
fn out_of_range_amount_is_reported() {
    let view = order_view();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();
    fill_valid(&view);
    view.by_id("amount").unwrap().set_value(1_000_000_i64);

    let details = validator.validate().into_details().unwrap();
    assert_eq!(details.original_errors.len(), 1);
    assert_eq!(details.original_errors[0].keyword, "maximum");
    assert_eq!(details.messages[0].target, "orderview--amount/value");
}

#[test]
fn custom_error_message_is_shown_on_the_element() {
    let view = MemoryView::new("orderview")
        .with(MemoryElement::text("userid").with_custom_error_message("User ID is required"))
        .unwrap();
    let schema = order_schema();
    let validator = FormValidator::new(&view, &schema).unwrap();

    let details = validator.validate().into_details().unwrap();
    let userid = view.by_id("userid").unwrap();
    assert_eq!(userid.value_state_text(), "User ID is required");
    // The message list keeps the validator's own text.
    assert_ne!(details.messages[0].message, "User ID is required");
}
