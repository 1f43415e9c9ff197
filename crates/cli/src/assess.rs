//! `assess`: answer steps 1 and 2 from flags and print the result page.

use clap::Args;

use myinvois_compliance::Questionnaire;
use myinvois_core::{DomainError, FieldName, FieldValue};

use crate::{Outcome, config, render_field_errors};

/// Arguments for the assess subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct AssessArgs {
    /// Annual revenue for 2024, in RM.
    #[arg(long = "revenue-2024")]
    pub revenue_2024: Option<String>,

    /// Annual (or projected first-year) revenue for 2025, in RM.
    #[arg(long = "revenue-2025")]
    pub revenue_2025: Option<String>,

    /// Year the business commenced (or will commence) operations.
    #[arg(long, default_value = "2024")]
    pub commencement_year: String,

    /// The business has not commenced operations yet.
    #[arg(long)]
    pub pre_business: bool,

    /// Reference year; January 1 of it counts as today.
    /// Defaults to MYINVOIS_CURRENT_YEAR.
    #[arg(long)]
    pub current_year: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AssessArgs) -> anyhow::Result<Outcome> {
    let current_year = args
        .current_year
        .clone()
        .unwrap_or_else(config::current_year_from_env);
    let mut questionnaire = Questionnaire::new();

    let answers: [(FieldName, FieldValue); 5] = [
        (FieldName::AnnualRevenue2024, args.revenue_2024.into()),
        (FieldName::AnnualRevenue2025, args.revenue_2025.into()),
        (FieldName::IsPreBusiness, args.pre_business.into()),
        (FieldName::BusinessCommencementYear, args.commencement_year.into()),
        (FieldName::CurrentYear, current_year.into()),
    ];
    for (field, value) in answers {
        if let Err(err) = questionnaire.set_field(field, value) {
            tracing::debug!(error = %err, "answer rejected");
        }
    }

    // Steps 1 and 2; leaving step 2 computes the result.
    for _ in 0..2 {
        match questionnaire.next() {
            Ok(_) => {}
            Err(DomainError::IncompleteStep { .. }) => {
                return Ok(Outcome::failed(render_field_errors(questionnaire.errors())));
            }
            Err(err) => return Err(err.into()),
        }
    }

    let results = questionnaire
        .results()
        .ok_or_else(|| anyhow::anyhow!("questionnaire finished without results"))?;
    let output = if args.json {
        serde_json::to_string_pretty(results)?
    } else {
        results.render_text()
    };
    Ok(Outcome::ok(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(revenue_2024: &str, revenue_2025: &str) -> AssessArgs {
        AssessArgs {
            revenue_2024: Some(revenue_2024.to_string()),
            revenue_2025: Some(revenue_2025.to_string()),
            commencement_year: "2020".to_string(),
            pre_business: false,
            current_year: Some("2024".to_string()),
            json: false,
        }
    }

    #[test]
    fn prints_result_page() {
        let outcome = run(args("6000000", "0")).unwrap();
        assert!(outcome.success);
        assert!(outcome.output.contains("Category: Large Business"));
        assert!(outcome.output.contains("Implementation Date: July 1, 2025"));
        assert!(outcome.output.contains("Days Until Implementation: 547 (Urgency: Low)"));
    }

    #[test]
    fn prints_json_when_asked() {
        let outcome = run(AssessArgs {
            json: true,
            ..args("2000000", "0")
        })
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(json["implementationDate"], "January 1, 2026");
        assert_eq!(json["urgencyLevel"], "low");
    }

    #[test]
    fn reports_every_invalid_field_of_the_step() {
        let outcome = run(AssessArgs {
            revenue_2025: None,
            ..args("-5", "")
        })
        .unwrap();
        assert!(!outcome.success);
        assert_eq!(
            outcome.output,
            "annualRevenue2024: Value must be 0 or more.\nannualRevenue2025: This field is required.\n"
        );
    }

    #[test]
    fn rejects_current_year_out_of_range() {
        let outcome = run(AssessArgs {
            current_year: Some("2021".to_string()),
            ..args("100", "100")
        })
        .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.output, "currentYear: Value must be 2022 or more.\n");
    }
}
