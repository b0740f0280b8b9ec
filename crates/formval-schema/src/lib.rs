//! # formval-schema — Schema-Driven Form Validation
//!
//! Binds a JSON schema to the elements of a view: each property declared
//! under the schema's `properties` is matched to the view element with the
//! same id, the element values are extracted into a payload, the payload is
//! checked with the `jsonschema` crate, and failing elements get an error
//! indicator and message.
//!
//! ```no_run
//! use formval_core::{MemoryElement, MemoryView};
//! use formval_schema::{FormValidator, ValidationOutcome};
//! use serde_json::json;
//!
//! let view = MemoryView::new("orders")
//!     .with(MemoryElement::text("userid"))?;
//! let schema = json!({ "properties": { "userid": { "type": "string", "minLength": 2 } } });
//!
//! let validator = FormValidator::new(&view, &schema)?;
//! if let ValidationOutcome::Fail(details) = validator.validate() {
//!     for message in &details.messages {
//!         println!("{}: {}", message.target, message.message);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`validator`] — [`FormValidator`], its builder, and the outcome types.
//! - [`extract`] — kind-dispatched value extraction.
//! - [`coerce`] — scalar coercion to declared schema types.
//! - [`annotate`] — setting and clearing element error indicators.
//! - [`message`] — message records for display.
//! - [`registry`] — the recognized-property list.
//! - [`config`] — [`ValidatorConfig`].
//!
//! ## Crate Policy
//!
//! - Depends only on `formval-core` internally.
//! - Constraint checking is delegated to `jsonschema`; this crate never
//!   interprets constraint keywords itself beyond `type` for coercion.
//! - Validation failure is data, never an `Err`.

pub mod annotate;
pub mod coerce;
pub mod config;
pub mod extract;
pub mod message;
pub mod registry;
pub mod validator;
pub mod violation;

pub use config::{SchemaDraft, ValidatorConfig};
pub use message::{Message, MessageType};
pub use registry::{ValidProperties, DEFAULT_VALID_PROPERTIES};
pub use validator::{
    ConstructionError, FormValidator, FormValidatorBuilder, ValidationDetails, ValidationOutcome,
};
pub use violation::FieldViolation;
