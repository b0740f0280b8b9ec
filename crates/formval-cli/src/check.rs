//! # Check Subcommand
//!
//! Loads a form schema and a view snapshot, runs one validation pass, and
//! prints the outcome together with the element states it left behind.

use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use formval_core::{FormElement, MemoryView, ValueState};
use formval_schema::{FormValidator, ValidationOutcome, ValidatorConfig};

/// Arguments for the `formval check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON schema describing the form.
    #[arg(long, value_name = "PATH")]
    pub schema: PathBuf,

    /// View snapshot (JSON) holding the element values.
    #[arg(long, value_name = "PATH")]
    pub view: PathBuf,

    /// Print the outcome as JSON instead of a report.
    #[arg(long)]
    pub json: bool,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when the form is valid, 1 when it is not.
pub fn run_check(args: &CheckArgs, config: &ValidatorConfig, base: &Path) -> Result<u8> {
    let schema_path = crate::resolve_path(&args.schema, base);
    let view_path = crate::resolve_path(&args.view, base);

    let schema = load_schema(&schema_path)?;
    let view = MemoryView::from_path(&view_path)
        .with_context(|| format!("failed to load view snapshot {}", view_path.display()))?;

    tracing::info!(
        schema = %schema_path.display(),
        view = view.id(),
        elements = view.len(),
        "checking form"
    );

    let outcome = check(&schema, &view, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_report(&outcome, &view));
    }

    Ok(if outcome.is_pass() { 0 } else { 1 })
}

/// Read and parse a schema file.
pub fn load_schema(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read schema {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Validate `view` against `schema` once.
pub fn check(schema: &Value, view: &MemoryView, config: &ValidatorConfig) -> Result<ValidationOutcome> {
    let validator = FormValidator::builder()
        .view(view)
        .schema(schema)
        .config(config.clone())
        .build()
        .context("failed to build form validator")?;
    Ok(validator.validate())
}

/// Human-readable report of an outcome and the view's element states.
pub fn render_report(outcome: &ValidationOutcome, view: &MemoryView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    write_report(&mut out, outcome, view).ok();
    out
}

fn write_report(
    out: &mut impl Write,
    outcome: &ValidationOutcome,
    view: &MemoryView,
) -> fmt::Result {
    match outcome {
        ValidationOutcome::Pass => writeln!(out, "PASS: {}", view.id())?,
        ValidationOutcome::Fail(details) => {
            writeln!(
                out,
                "FAIL: {} — {} violation(s)",
                view.id(),
                details.original_errors.len()
            )?;
            for message in &details.messages {
                writeln!(out, "  {}: {}", message.target, message.message)?;
            }
        }
    }
    for element in view.elements() {
        match element.value_state() {
            ValueState::None => writeln!(out, "  [ok]    {}", element.id())?,
            ValueState::Error => writeln!(
                out,
                "  [error] {}: {}",
                element.id(),
                element.value_state_text()
            )?,
        }
    }
    Ok(())
}
