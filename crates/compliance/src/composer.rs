//! User-facing result bundle and recommended action items.

use std::fmt::Write as _;

use serde::Serialize;

use myinvois_core::ValueObject;

use crate::category::{Category, CategoryResult};
use crate::deadline::{DaysUntil, ImplementationDetails, NOT_APPLICABLE, UrgencyLevel};

pub const NO_ACTION_REQUIRED: &str = "No immediate action required based on current information.";

pub const BASE_ACTIONS: [&str; 4] = [
    "Familiarize yourself with the e-Invoice guidelines on the MyInvois portal.",
    "Assess your current accounting system's compatibility for API integration.",
    "Plan for staff training on new e-invoice procedures.",
    "Prepare for testing e-invoice generation and submission.",
];

const OVERDUE_ACTION: &str =
    "URGENT: Implementation date has passed. Please check requirements immediately.";
const HIGH_URGENCY_PREFIX: &str = "PRIORITY: Your implementation date is approaching soon. ";
const MEDIUM_URGENCY_PREFIX: &str =
    "ACTION: Your implementation date is within the next 6 months. ";

/// Everything the result page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBundle {
    /// Category label, or "Not Applicable".
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub implementation_date: String,
    pub days_until: DaysUntil,
    pub urgency_level: UrgencyLevel,
    pub is_overdue: bool,
    pub action_items: Vec<String>,
}

impl ValueObject for ResultBundle {}

/// Combine a classification and its deadline view into a result bundle.
pub fn compose(result: &CategoryResult, details: &ImplementationDetails) -> ResultBundle {
    if result.category() == Category::NotApplicable {
        return ResultBundle {
            category: Category::NotApplicable.label().to_string(),
            message: result.message().map(str::to_string),
            implementation_date: NOT_APPLICABLE.to_string(),
            days_until: DaysUntil::NotApplicable,
            urgency_level: UrgencyLevel::Low,
            is_overdue: false,
            action_items: vec![NO_ACTION_REQUIRED.to_string()],
        };
    }

    ResultBundle {
        category: result.category().label().to_string(),
        message: details.message.clone(),
        implementation_date: details.implementation_date.clone(),
        days_until: details.days_until,
        urgency_level: details.urgency_level,
        is_overdue: details.is_overdue,
        action_items: action_items(details),
    }
}

/// Base actions, escalated by how close the deadline is.
pub fn action_items(details: &ImplementationDetails) -> Vec<String> {
    let mut items: Vec<String> = BASE_ACTIONS.iter().map(|s| s.to_string()).collect();

    if details.is_overdue {
        items.insert(0, OVERDUE_ACTION.to_string());
        return items;
    }

    let prefix = match details.urgency_level {
        UrgencyLevel::High => HIGH_URGENCY_PREFIX,
        UrgencyLevel::Medium => MEDIUM_URGENCY_PREFIX,
        UrgencyLevel::Low | UrgencyLevel::Overdue => return items,
    };
    items[0] = format!("{prefix}{}", BASE_ACTIONS[0]);
    items
}

impl ResultBundle {
    /// Plain-text rendering of the result page.
    pub fn render_text(&self) -> String {
        let mut out = String::from("Your E-Invoice Implementation Details\n");

        if let Some(message) = &self.message {
            let _ = writeln!(out, "Status: {message}");
        }
        let _ = writeln!(out, "Category: {}", self.category);

        if self.implementation_date != NOT_APPLICABLE {
            let _ = writeln!(out, "Implementation Date: {}", self.implementation_date);
        }

        if let DaysUntil::Days(days) = self.days_until {
            if self.is_overdue {
                let _ = writeln!(out, "Status: OVERDUE (Implementation was due {days} days ago)");
            } else {
                let _ = writeln!(
                    out,
                    "Days Until Implementation: {days} (Urgency: {})",
                    self.urgency_level.title()
                );
            }
        }

        if !self.action_items.is_empty() {
            out.push_str("\nRecommended Actions:\n");
            for item in &self.action_items {
                let _ = writeln!(out, "  - {item}");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::calculate_details;

    fn details(days: u64, urgency: UrgencyLevel, is_overdue: bool) -> ImplementationDetails {
        ImplementationDetails {
            implementation_date: "July 1, 2026".to_string(),
            days_until: DaysUntil::Days(days),
            is_overdue,
            urgency_level: urgency,
            message: None,
        }
    }

    #[test]
    fn low_urgency_keeps_base_actions() {
        let items = action_items(&details(400, UrgencyLevel::Low, false));
        assert_eq!(items, BASE_ACTIONS.to_vec());
    }

    #[test]
    fn high_urgency_prefixes_first_action() {
        let items = action_items(&details(30, UrgencyLevel::High, false));
        assert_eq!(items.len(), 4);
        assert_eq!(
            items[0],
            "PRIORITY: Your implementation date is approaching soon. Familiarize yourself with the e-Invoice guidelines on the MyInvois portal."
        );
        assert_eq!(items[1..], BASE_ACTIONS[1..]);
    }

    #[test]
    fn medium_urgency_prefixes_first_action() {
        let items = action_items(&details(120, UrgencyLevel::Medium, false));
        assert!(items[0].starts_with("ACTION: Your implementation date is within the next 6 months. "));
        assert!(items[0].ends_with(BASE_ACTIONS[0]));
    }

    #[test]
    fn overdue_prepends_urgent_action() {
        let items = action_items(&details(0, UrgencyLevel::Overdue, true));
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], OVERDUE_ACTION);
        assert_eq!(items[1..], BASE_ACTIONS[..]);
    }

    #[test]
    fn due_today_is_overdue_tier_without_urgent_item() {
        let items = action_items(&details(0, UrgencyLevel::Overdue, false));
        assert_eq!(items, BASE_ACTIONS.to_vec());
    }

    #[test]
    fn category_zero_bundle_has_single_action() {
        let result = CategoryResult::not_applicable("below threshold");
        let bundle = compose(&result, &calculate_details(&result, 2024));
        assert_eq!(bundle.category, "Not Applicable");
        assert_eq!(bundle.message.as_deref(), Some("below threshold"));
        assert_eq!(bundle.implementation_date, NOT_APPLICABLE);
        assert_eq!(bundle.days_until, DaysUntil::NotApplicable);
        assert_eq!(bundle.urgency_level, UrgencyLevel::Low);
        assert!(!bundle.is_overdue);
        assert_eq!(bundle.action_items, vec![NO_ACTION_REQUIRED.to_string()]);
    }

    #[test]
    fn scheduled_bundle_copies_deadline_fields() {
        let result = CategoryResult::scheduled(Category::MediumBusiness, "2026-01-01").unwrap();
        let bundle = compose(&result, &calculate_details(&result, 2025));
        assert_eq!(
            bundle.category,
            "Medium Business (>RM1mil, ≤RM5mil annual revenue in 2024)"
        );
        assert_eq!(bundle.implementation_date, "January 1, 2026");
        assert_eq!(bundle.days_until, DaysUntil::Days(365));
        assert_eq!(bundle.urgency_level, UrgencyLevel::Low);
        assert_eq!(bundle.message, None);
    }

    #[test]
    fn renders_overdue_status() {
        let result = CategoryResult::scheduled(Category::LargeBusiness, "2025-07-01").unwrap();
        let text = compose(&result, &calculate_details(&result, 2026)).render_text();
        assert!(text.contains("Implementation Date: July 1, 2025"));
        assert!(text.contains("Status: OVERDUE"));
        assert!(text.contains("  - URGENT: Implementation date has passed."));
    }

    #[test]
    fn renders_not_applicable_without_dates() {
        let result = CategoryResult::not_applicable("below threshold");
        let text = compose(&result, &calculate_details(&result, 2024)).render_text();
        assert!(text.contains("Status: below threshold"));
        assert!(text.contains("Category: Not Applicable"));
        assert!(!text.contains("Implementation Date:"));
        assert!(!text.contains("Days Until"));
    }

    #[test]
    fn renders_days_and_capitalized_urgency() {
        let result = CategoryResult::scheduled(Category::SmallBusiness, "2026-07-01").unwrap();
        let text = compose(&result, &calculate_details(&result, 2026)).render_text();
        assert!(text.contains("Days Until Implementation: 181 (Urgency: Low)"));
    }
}
