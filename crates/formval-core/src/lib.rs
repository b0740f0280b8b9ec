//! # formval-core — Element Model
//!
//! Defines the view-side contract that the schema validator binds against.
//! The validator never renders anything: it locates existing elements by
//! identifier, reads their values, and writes their value state. This crate
//! describes exactly that surface and nothing more.
//!
//! ## Key Types
//!
//! - [`ElementLocator`] — id-scoped element lookup on a view.
//! - [`FormElement`] — per-element read access to the value and read/write
//!   access to the value state and value-state text.
//! - [`ElementKind`] — tagged control kind that selects the value
//!   extraction strategy. Chosen explicitly, never probed.
//! - [`ElementValue`] — the raw value an element currently holds.
//! - [`MemoryView`] — an in-memory view used by tests and the CLI.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formval-*` crates (leaf of the DAG).
//! - No `.unwrap()` outside tests.
//! - Element state changes go through `&self` setters; views own their
//!   elements and the validator only ever borrows them.

pub mod element;
pub mod error;
pub mod memory;

pub use element::{ElementKind, ElementLocator, ElementValue, FormElement, ValueState};
pub use error::FormvalError;
pub use memory::{ElementSnapshot, MemoryElement, MemoryView, ViewSnapshot};
