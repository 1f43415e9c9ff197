//! Multi-step questionnaire controller.
//!
//! Owns the form snapshot, the field-error map and the current step, and calls
//! into the validator, classifier, deadline calculator and composer as the
//! user moves through the steps. Nothing here performs IO: the newsletter
//! signup is only logged.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use myinvois_core::parse::parse_float_prefix;
use myinvois_core::{DomainError, DomainResult, FieldName, FieldValue};

use crate::classifier::{BusinessInputs, classify};
use crate::composer::{ResultBundle, compose};
use crate::deadline::calculate_details;
use crate::validator::FieldErrors;

/// Questionnaire steps, in order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    AnnualRevenue = 1,
    BusinessInformation = 2,
    Requirements = 3,
    StayUpdated = 4,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::AnnualRevenue,
        Step::BusinessInformation,
        Step::Requirements,
        Step::StayUpdated,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::AnnualRevenue => "Annual Revenue",
            Step::BusinessInformation => "Business Information",
            Step::Requirements => "Your E-Invoice Requirements",
            Step::StayUpdated => "Stay Updated",
        }
    }

    /// Fields that must validate before leaving this step.
    pub fn gated_fields(self) -> &'static [FieldName] {
        match self {
            Step::AnnualRevenue => &[FieldName::AnnualRevenue2024, FieldName::AnnualRevenue2025],
            Step::BusinessInformation => {
                &[FieldName::BusinessCommencementYear, FieldName::CurrentYear]
            }
            Step::Requirements | Step::StayUpdated => &[],
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::ALL.get(usize::from(self.number())).copied()
    }

    pub fn previous(self) -> Option<Step> {
        usize::from(self.number())
            .checked_sub(2)
            .and_then(|i| Step::ALL.get(i).copied())
    }
}

/// Everything the user has entered so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub annual_revenue_2024: FieldValue,
    pub annual_revenue_2025: FieldValue,
    pub business_commencement_year: FieldValue,
    pub is_pre_business: bool,
    pub current_year: FieldValue,
    pub email: String,
    pub business_name: String,
    pub phone: String,
    pub marketing_consent: bool,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            annual_revenue_2024: FieldValue::Absent,
            annual_revenue_2025: FieldValue::Absent,
            business_commencement_year: FieldValue::text("2024"),
            is_pre_business: false,
            current_year: FieldValue::text("2024"),
            email: String::new(),
            business_name: String::new(),
            phone: String::new(),
            marketing_consent: false,
        }
    }
}

impl FormData {
    pub fn get(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::AnnualRevenue2024 => self.annual_revenue_2024.clone(),
            FieldName::AnnualRevenue2025 => self.annual_revenue_2025.clone(),
            FieldName::BusinessCommencementYear => self.business_commencement_year.clone(),
            FieldName::IsPreBusiness => FieldValue::Flag(self.is_pre_business),
            FieldName::CurrentYear => self.current_year.clone(),
            FieldName::Email => FieldValue::text(&self.email),
            FieldName::BusinessName => FieldValue::text(&self.business_name),
            FieldName::Phone => FieldValue::text(&self.phone),
            FieldName::MarketingConsent => FieldValue::Flag(self.marketing_consent),
        }
    }

    /// Store a raw value the way the form control would hand it over.
    ///
    /// Revenue text is converted to a number when it parses; empty revenue
    /// text becomes absent, and unparsable text is kept so validation can
    /// report it.
    pub fn set(&mut self, field: FieldName, value: FieldValue) {
        match field {
            FieldName::AnnualRevenue2024 => self.annual_revenue_2024 = revenue_value(value),
            FieldName::AnnualRevenue2025 => self.annual_revenue_2025 = revenue_value(value),
            FieldName::BusinessCommencementYear => self.business_commencement_year = value,
            FieldName::IsPreBusiness => self.is_pre_business = value.is_set(),
            FieldName::CurrentYear => self.current_year = value,
            FieldName::Email => self.email = plain_text(&value),
            FieldName::BusinessName => self.business_name = plain_text(&value),
            FieldName::Phone => self.phone = plain_text(&value),
            FieldName::MarketingConsent => self.marketing_consent = value.is_set(),
        }
    }

    pub fn business_inputs(&self) -> BusinessInputs {
        BusinessInputs::from_values(
            &self.annual_revenue_2024,
            &self.annual_revenue_2025,
            &self.business_commencement_year,
            self.is_pre_business,
        )
    }

    /// The reference year, if the form holds a usable one. Zero counts as unset.
    pub fn current_year(&self) -> Option<i32> {
        self.current_year
            .to_integer()
            .and_then(|y| i32::try_from(y).ok())
            .filter(|y| *y != 0)
    }
}

fn revenue_value(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(s) if s.is_empty() => FieldValue::Absent,
        FieldValue::Text(s) => match parse_float_prefix(&s) {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Text(s),
        },
        other => other,
    }
}

fn plain_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Absent => String::new(),
        other => other.as_text().into_owned(),
    }
}

/// A newsletter signup, as logged on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSignup {
    pub email: String,
    pub business_name: String,
    pub phone: String,
    pub marketing_consent: bool,
}

/// Questionnaire state for one user session.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    step: Step,
    form: FormData,
    errors: FieldErrors,
    results: Option<ResultBundle>,
    subscribed: bool,
    fallback_year: i32,
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::new()
    }
}

impl Questionnaire {
    /// Start at step 1 with default form values. The system clock supplies
    /// the reference year when the form has none.
    pub fn new() -> Self {
        Self::with_fallback_year(chrono::Local::now().year())
    }

    pub fn with_fallback_year(fallback_year: i32) -> Self {
        Self {
            step: Step::AnnualRevenue,
            form: FormData::default(),
            errors: FieldErrors::new(),
            results: None,
            subscribed: false,
            fallback_year,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn results(&self) -> Option<&ResultBundle> {
        self.results.as_ref()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// "Step N / 4".
    pub fn progress(&self) -> String {
        format!("Step {} / {}", self.step.number(), Step::ALL.len())
    }

    /// Label of the forward button, or `None` on the last step.
    pub fn next_label(&self) -> Option<&'static str> {
        match self.step {
            Step::StayUpdated => None,
            Step::Requirements => Some("Go to Newsletter"),
            Step::AnnualRevenue | Step::BusinessInformation => Some("Next"),
        }
    }

    /// Record a field change and validate it immediately.
    pub fn set_field(&mut self, field: FieldName, value: impl Into<FieldValue>) -> DomainResult<()> {
        self.form.set(field, value.into());
        self.validate_field(field)
    }

    fn validate_field(&mut self, field: FieldName) -> DomainResult<()> {
        let value = self.form.get(field);
        self.errors.validate(field, &value);
        match self.errors.get(field) {
            Some(err) => Err(DomainError::validation(field, err.clone())),
            None => Ok(()),
        }
    }

    /// Validate the current step and move forward.
    ///
    /// Every gated field is validated, even after the first failure, so all
    /// messages are available at once. Leaving step 2 computes the results.
    pub fn next(&mut self) -> DomainResult<Step> {
        self.errors.clear_all();

        let mut invalid = Vec::new();
        for &field in self.step.gated_fields() {
            if self.validate_field(field).is_err() {
                invalid.push(field);
            }
        }
        if !invalid.is_empty() {
            return Err(DomainError::IncompleteStep {
                step: self.step.number(),
                fields: invalid,
            });
        }

        if self.step == Step::BusinessInformation {
            self.results = Some(self.assess());
        }

        if let Some(next) = self.step.next() {
            tracing::info!(from = self.step.number(), to = next.number(), "questionnaire advanced");
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move back one step; stays put on step 1.
    pub fn previous(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Reference year for deadline maths.
    pub fn reference_year(&self) -> i32 {
        self.form.current_year().unwrap_or(self.fallback_year)
    }

    /// Classify the current form and build the result bundle.
    pub fn assess(&self) -> ResultBundle {
        let category = classify(&self.form.business_inputs());
        let details = calculate_details(&category, self.reference_year());
        tracing::debug!(
            category = %category.category(),
            urgency = %details.urgency_level,
            "assessment computed"
        );
        compose(&category, &details)
    }

    /// Validate the email and record the signup. Nothing is transmitted.
    pub fn submit_newsletter(&mut self) -> DomainResult<NewsletterSignup> {
        self.errors.clear_all();

        self.validate_field(FieldName::Email)?;

        let signup = NewsletterSignup {
            email: self.form.email.clone(),
            business_name: self.form.business_name.clone(),
            phone: self.form.phone.clone(),
            marketing_consent: self.form.marketing_consent,
        };
        tracing::info!(
            email = %signup.email,
            business_name = %signup.business_name,
            phone = %signup.phone,
            marketing_consent = signup.marketing_consent,
            "newsletter signup"
        );
        self.subscribed = true;
        Ok(signup)
    }
}
