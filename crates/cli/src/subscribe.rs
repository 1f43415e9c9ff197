//! `subscribe`: newsletter signup. The signup is logged, never sent.

use clap::Args;

use myinvois_compliance::Questionnaire;
use myinvois_core::{DomainError, FieldName};

use crate::{Outcome, render_field_errors};

/// Arguments for the subscribe subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SubscribeArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, default_value = "")]
    pub business_name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Agree to receive marketing updates.
    #[arg(long)]
    pub marketing_consent: bool,
}

pub fn run(args: SubscribeArgs) -> anyhow::Result<Outcome> {
    let mut questionnaire = Questionnaire::new();
    questionnaire.set_field(FieldName::BusinessName, args.business_name)?;
    questionnaire.set_field(FieldName::Phone, args.phone)?;
    questionnaire.set_field(FieldName::MarketingConsent, args.marketing_consent)?;
    // Errors are re-checked on submit.
    let _ = questionnaire.set_field(FieldName::Email, args.email);

    match questionnaire.submit_newsletter() {
        Ok(_) => Ok(Outcome::ok(
            "Thank You! You have successfully subscribed to the newsletter.\n",
        )),
        Err(DomainError::Validation { .. }) => {
            Ok(Outcome::failed(render_field_errors(questionnaire.errors())))
        }
        Err(err) => Err(err.into()),
    }
}
