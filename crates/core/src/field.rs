//! Questionnaire field names and the raw values users type into them.

use core::str::FromStr;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::parse::{parse_float_prefix, parse_int_prefix};
use crate::value_object::ValueObject;

/// Every input the questionnaire collects.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    AnnualRevenue2024,
    AnnualRevenue2025,
    BusinessCommencementYear,
    IsPreBusiness,
    CurrentYear,
    Email,
    BusinessName,
    Phone,
    MarketingConsent,
}

impl FieldName {
    pub const ALL: [FieldName; 9] = [
        FieldName::AnnualRevenue2024,
        FieldName::AnnualRevenue2025,
        FieldName::BusinessCommencementYear,
        FieldName::IsPreBusiness,
        FieldName::CurrentYear,
        FieldName::Email,
        FieldName::BusinessName,
        FieldName::Phone,
        FieldName::MarketingConsent,
    ];

    /// Form key, as used in the rule table and error map.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::AnnualRevenue2024 => "annualRevenue2024",
            FieldName::AnnualRevenue2025 => "annualRevenue2025",
            FieldName::BusinessCommencementYear => "businessCommencementYear",
            FieldName::IsPreBusiness => "isPreBusiness",
            FieldName::CurrentYear => "currentYear",
            FieldName::Email => "email",
            FieldName::BusinessName => "businessName",
            FieldName::Phone => "phone",
            FieldName::MarketingConsent => "marketingConsent",
        }
    }
}

impl core::fmt::Display for FieldName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DomainError::unknown_field(s))
    }
}

/// A raw form value, before any rule has looked at it.
///
/// Form controls hand back text, checkbox state, already-parsed numbers, or
/// nothing at all; all four reach the validator and classifier unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Absent,
    Flag(bool),
    Number(f64),
    Text(String),
}

impl ValueObject for FieldValue {}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Absent, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Absent => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(_) | FieldValue::Number(_) => false,
        }
    }

    /// The value as the form would display it.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Absent => Cow::Borrowed("null"),
            FieldValue::Flag(true) => Cow::Borrowed("true"),
            FieldValue::Flag(false) => Cow::Borrowed("false"),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s),
        }
    }

    /// Leading decimal number, if any. Never returns NaN.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if !n.is_nan() => Some(*n),
            FieldValue::Text(s) => parse_float_prefix(s),
            _ => None,
        }
    }

    /// Leading integer, if any. Numbers truncate toward zero.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            FieldValue::Text(s) => parse_int_prefix(s),
            _ => None,
        }
    }

    /// Checkbox reading: booleans as-is, anything else by truthiness.
    pub fn is_set(&self) -> bool {
        match self {
            FieldValue::Absent => false,
            FieldValue::Flag(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Absent, Into::into)
    }
}
