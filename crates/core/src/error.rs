//! Domain error model.

use thiserror::Error;

use crate::field::FieldName;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Why a single questionnaire field was rejected.
///
/// The `Display` output is the exact message shown next to the field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("This field is required.")]
    RequiredFieldMissing,

    #[error("Please enter a valid number.")]
    InvalidNumberFormat,

    /// Out of range, lower bound.
    #[error("Value must be {min} or more.")]
    BelowMinimum { min: f64 },

    /// Out of range, upper bound.
    #[error("Value must be {max} or less.")]
    AboveMaximum { max: f64 },

    #[error("Invalid format.")]
    PatternMismatch,
}

impl FieldError {
    /// True for both range variants.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::BelowMinimum { .. } | Self::AboveMaximum { .. })
    }
}

/// Domain-level error.
///
/// None of these are fatal: the assessment always degrades to a displayable
/// result, so these surface as return values for callers that want to branch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A field value failed its validation rule.
    #[error("{field}: {source}")]
    Validation { field: FieldName, source: FieldError },

    /// A questionnaire step cannot be left until these fields are valid.
    #[error("step {step} has invalid fields: {fields:?}")]
    IncompleteStep { step: u8, fields: Vec<FieldName> },

    /// An implementation date string did not parse as `YYYY-MM-DD`.
    #[error("unparsable date: {0}")]
    UnparsableDate(String),

    /// The inputs matched no category rule.
    #[error("e-invoice category cannot be determined")]
    IndeterminateCategory,

    /// A category number outside 0..=6.
    #[error("unknown category: {0}")]
    UnknownCategory(u8),

    /// A field name that the questionnaire does not know.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(field: FieldName, source: FieldError) -> Self {
        Self::Validation { field, source }
    }

    pub fn unparsable_date(raw: impl Into<String>) -> Self {
        Self::UnparsableDate(raw.into())
    }

    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
