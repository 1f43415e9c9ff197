//! Per-field validation against the questionnaire's fixed rule table.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use myinvois_core::{FieldError, FieldName, FieldValue};

/// Static validation config for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRule {
    pub required: bool,
    /// Value must parse as a number.
    pub numeric: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Pattern>,
}

/// Text patterns a rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Email,
}

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

impl Pattern {
    pub fn regex(self) -> &'static Regex {
        match self {
            Pattern::Email => &*EMAIL,
        }
    }

    pub fn is_match(self, text: &str) -> bool {
        self.regex().is_match(text)
    }
}

static REVENUE: ValidationRule = ValidationRule {
    required: true,
    numeric: true,
    min: Some(0.0),
    max: Some(1_000_000_000.0),
    pattern: None,
};

static COMMENCEMENT_YEAR: ValidationRule = ValidationRule {
    required: true,
    numeric: true,
    min: Some(2020.0),
    max: Some(2030.0),
    pattern: None,
};

static CURRENT_YEAR: ValidationRule = ValidationRule {
    required: true,
    numeric: true,
    min: Some(2022.0),
    max: Some(2026.0),
    pattern: None,
};

static EMAIL_ADDRESS: ValidationRule = ValidationRule {
    required: true,
    numeric: false,
    min: None,
    max: None,
    pattern: Some(Pattern::Email),
};

/// Rule for a field, if it has one. Fields without a rule always pass.
pub fn rule_for(field: FieldName) -> Option<&'static ValidationRule> {
    match field {
        FieldName::AnnualRevenue2024 | FieldName::AnnualRevenue2025 => Some(&REVENUE),
        FieldName::BusinessCommencementYear => Some(&COMMENCEMENT_YEAR),
        FieldName::CurrentYear => Some(&CURRENT_YEAR),
        FieldName::Email => Some(&EMAIL_ADDRESS),
        FieldName::IsPreBusiness
        | FieldName::BusinessName
        | FieldName::Phone
        | FieldName::MarketingConsent => None,
    }
}

/// Check a raw value against a rule.
///
/// Order is required → numeric → pattern; the first failure is returned.
pub fn check(rule: &ValidationRule, value: &FieldValue) -> Result<(), FieldError> {
    if value.is_blank() {
        return if rule.required {
            Err(FieldError::RequiredFieldMissing)
        } else {
            Ok(())
        };
    }

    if rule.numeric {
        let number = value.to_number().ok_or(FieldError::InvalidNumberFormat)?;
        if let Some(min) = rule.min {
            if number < min {
                return Err(FieldError::BelowMinimum { min });
            }
        }
        if let Some(max) = rule.max {
            if number > max {
                return Err(FieldError::AboveMaximum { max });
            }
        }
    }

    if let Some(pattern) = rule.pattern {
        if !pattern.is_match(&value.as_text()) {
            return Err(FieldError::PatternMismatch);
        }
    }

    Ok(())
}

/// Latest verdict per validated field.
///
/// A field maps to `None` once it has been validated and passed, to
/// `Some(error)` when its last validation failed, and is missing when it has
/// never been validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    entries: BTreeMap<FieldName, Option<FieldError>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `value` for `field`, replacing that field's previous verdict.
    pub fn validate(&mut self, field: FieldName, value: &FieldValue) -> bool {
        let Some(rule) = rule_for(field) else {
            return true;
        };

        self.entries.insert(field, None);
        match check(rule, value) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(field = %field, error = %err, "field failed validation");
                self.entries.insert(field, Some(err));
                false
            }
        }
    }

    /// Same as [`validate`](Self::validate), keyed by form name. Unknown
    /// names pass.
    pub fn validate_named(&mut self, name: &str, value: &FieldValue) -> bool {
        match name.parse::<FieldName>() {
            Ok(field) => self.validate(field, value),
            Err(_) => true,
        }
    }

    pub fn get(&self, field: FieldName) -> Option<&FieldError> {
        self.entries.get(&field).and_then(Option::as_ref)
    }

    /// Display message for a field, if it currently has an error.
    pub fn message(&self, field: FieldName) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    /// Whether the field has a verdict at all (passed or failed).
    pub fn is_tracked(&self, field: FieldName) -> bool {
        self.entries.contains_key(&field)
    }

    /// Reset every ruled field to "no error".
    pub fn clear_all(&mut self) {
        for field in FieldName::ALL {
            if rule_for(field).is_some() {
                self.entries.insert(field, None);
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        self.entries.values().any(Option::is_some)
    }

    /// Fields currently in error, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldError)> {
        self.entries
            .iter()
            .filter_map(|(field, err)| err.as_ref().map(|e| (*field, e)))
    }

    /// Field name → message-or-null, for rendering.
    pub fn to_messages(&self) -> BTreeMap<&'static str, Option<String>> {
        self.entries
            .iter()
            .map(|(field, err)| (field.as_str(), err.as_ref().map(ToString::to_string)))
            .collect()
    }
}
