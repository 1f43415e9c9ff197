//! `validate`: check one field value against its rule.

use clap::Args;

use myinvois_compliance::FieldErrors;
use myinvois_core::{FieldName, FieldValue};

use crate::Outcome;

/// Arguments for the validate subcommand.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Form field name, e.g. `annualRevenue2024` or `email`.
    pub field: String,

    /// Raw value as typed into the form.
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

pub fn run(args: ValidateArgs) -> Outcome {
    if args.field.parse::<FieldName>().is_err() {
        tracing::warn!(field = %args.field, "field has no validation rule");
    }

    let mut errors = FieldErrors::new();
    if errors.validate_named(&args.field, &FieldValue::text(args.value)) {
        return Outcome::ok("valid\n");
    }
    let message = args
        .field
        .parse::<FieldName>()
        .ok()
        .and_then(|field| errors.message(field))
        .unwrap_or_default();
    Outcome::failed(format!("{message}\n"))
}
