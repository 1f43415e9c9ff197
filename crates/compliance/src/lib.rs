//! E-invoice readiness assessment (MyInvois rollout).
//!
//! Deterministic domain logic only (no IO, no rendering targets, no storage):
//! - [`validator`]: per-field rules gating each questionnaire step
//! - [`classifier`]: revenue/commencement rules assigning a category
//! - [`deadline`]: days remaining and urgency for the category's date
//! - [`composer`]: the result bundle and recommended actions
//! - [`questionnaire`]: the step-by-step controller tying them together

pub mod category;
pub mod classifier;
pub mod composer;
pub mod deadline;
pub mod questionnaire;
pub mod validator;

pub use category::{Category, CategoryResult};
pub use classifier::{BusinessInputs, classify};
pub use composer::{ResultBundle, action_items, compose};
pub use deadline::{DaysUntil, ImplementationDetails, UrgencyLevel, calculate_details};
pub use questionnaire::{FormData, NewsletterSignup, Questionnaire, Step};
pub use validator::{FieldErrors, Pattern, ValidationRule, check, rule_for};

/// Classify, compute the deadline view and compose the result in one call.
pub fn assess(inputs: &BusinessInputs, current_year: i32) -> ResultBundle {
    let category = classify(inputs);
    let details = calculate_details(&category, current_year);
    compose(&category, &details)
}
