//! Days remaining and urgency for a category's implementation date.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use myinvois_core::{DomainError, DomainResult, ValueObject};

use crate::category::CategoryResult;

/// Placeholder shown wherever a date or day count does not apply.
pub const NOT_APPLICABLE: &str = "N/A";

pub const NO_DETAILS_MESSAGE: &str = "Implementation details not applicable.";
pub const INVALID_DATE_MESSAGE: &str = "Invalid implementation date configured.";

const HIGH_URGENCY_DAYS: i64 = 90;
const MEDIUM_URGENCY_DAYS: i64 = 180;

/// How soon the implementation date is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Overdue,
}

impl UrgencyLevel {
    /// Tier for a signed day count (negative = already passed).
    pub fn from_days(days: i64) -> Self {
        if days <= 0 {
            UrgencyLevel::Overdue
        } else if days <= HIGH_URGENCY_DAYS {
            UrgencyLevel::High
        } else if days <= MEDIUM_URGENCY_DAYS {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
            UrgencyLevel::Overdue => "overdue",
        }
    }

    /// Capitalized, for display.
    pub fn title(self) -> &'static str {
        match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
            UrgencyLevel::Overdue => "Overdue",
        }
    }
}

impl core::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days until the implementation date, never negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DaysUntil {
    Days(u64),
    NotApplicable,
}

impl DaysUntil {
    pub fn days(self) -> Option<u64> {
        match self {
            DaysUntil::Days(d) => Some(d),
            DaysUntil::NotApplicable => None,
        }
    }
}

impl core::fmt::Display for DaysUntil {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DaysUntil::Days(d) => write!(f, "{d}"),
            DaysUntil::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for DaysUntil {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DaysUntil::Days(d) => serializer.serialize_u64(*d),
            DaysUntil::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

/// Deadline view of a [`CategoryResult`] relative to a reference year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationDetails {
    /// Long-form date ("July 1, 2025") or `N/A`.
    pub implementation_date: String,
    pub days_until: DaysUntil,
    pub is_overdue: bool,
    pub urgency_level: UrgencyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValueObject for ImplementationDetails {}

impl ImplementationDetails {
    fn not_applicable(message: impl Into<String>) -> Self {
        Self {
            implementation_date: NOT_APPLICABLE.to_string(),
            days_until: DaysUntil::NotApplicable,
            is_overdue: false,
            urgency_level: UrgencyLevel::Low,
            message: Some(message.into()),
        }
    }
}

/// Compute the deadline view, taking January 1 of `current_year` as today.
///
/// Never fails: a missing date or one that does not parse yields an `N/A`
/// view with an explanatory message.
pub fn calculate_details(result: &CategoryResult, current_year: i32) -> ImplementationDetails {
    let Some(raw) = result.implementation_date() else {
        return ImplementationDetails::not_applicable(result.message().unwrap_or(NO_DETAILS_MESSAGE));
    };

    let span = reference_date(current_year).and_then(|today| Ok((today, parse_target(raw)?)));
    let (today, target) = match span {
        Ok(span) => span,
        Err(err) => {
            tracing::warn!(error = %err, current_year, "cannot compute implementation deadline");
            return ImplementationDetails::not_applicable(INVALID_DATE_MESSAGE);
        }
    };

    // Both ends are midnight calendar dates, so the difference is already whole days.
    let days = (target - today).num_days();

    ImplementationDetails {
        implementation_date: format_long(target),
        days_until: DaysUntil::Days(days.max(0).unsigned_abs()),
        is_overdue: days < 0,
        urgency_level: UrgencyLevel::from_days(days),
        message: None,
    }
}

/// Parse a `YYYY-MM-DD` implementation date.
pub fn parse_target(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| DomainError::unparsable_date(raw))
}

/// January 1 of `year`.
pub fn reference_date(year: i32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| DomainError::unparsable_date(format!("{year}-01-01")))
}

/// "July 1, 2025".
pub fn format_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
