//! Revenue and commencement rules that assign a compliance category.
//!
//! Established businesses are classified by 2024 revenue; pre-business
//! entities by projected first-year revenue and commencement year. Rules are
//! evaluated top to bottom and the first match wins. Anything left unmatched
//! degrades to category 0 rather than failing.

use serde::{Deserialize, Serialize};

use myinvois_core::{DomainError, FieldValue, ValueObject};

use crate::category::{Category, CategoryResult};

/// Revenue at or above which e-invoicing is mandatory.
pub const MANDATORY_THRESHOLD: f64 = 500_000.0;
/// First year of the new-business phase.
pub const NEW_BUSINESS_YEAR: i32 = 2026;

const LARGE_FLOOR: f64 = 5_000_000.0;
const LARGE_CEILING: f64 = 25_000_000.0;
const MEDIUM_FLOOR: f64 = 1_000_000.0;

pub const BELOW_THRESHOLD_MESSAGE: &str =
    "E-invoice not required based on current revenue (below RM500k) or information provided.";
pub const UNDETERMINED_MESSAGE: &str =
    "E-invoice requirements cannot be determined with the provided information.";

/// Inputs to classification. `None` means the value was missing or did not
/// parse; comparisons against it never hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInputs {
    pub annual_revenue_2024: Option<f64>,
    pub annual_revenue_2025: Option<f64>,
    pub business_commencement_year: Option<i32>,
    pub is_pre_business: bool,
}

impl ValueObject for BusinessInputs {}

impl BusinessInputs {
    /// Build from raw form values: revenues parse as decimals, the year as an
    /// integer prefix.
    pub fn from_values(
        revenue_2024: &FieldValue,
        revenue_2025: &FieldValue,
        commencement_year: &FieldValue,
        is_pre_business: bool,
    ) -> Self {
        Self {
            annual_revenue_2024: revenue_2024.to_number(),
            annual_revenue_2025: revenue_2025.to_number(),
            business_commencement_year: commencement_year
                .to_integer()
                .and_then(|y| i32::try_from(y).ok()),
            is_pre_business,
        }
    }
}

/// Assign a category. Total and deterministic.
pub fn classify(inputs: &BusinessInputs) -> CategoryResult {
    let matched = if inputs.is_pre_business {
        classify_pre_business(
            known(inputs.annual_revenue_2025),
            inputs.business_commencement_year,
        )
    } else {
        classify_established(known(inputs.annual_revenue_2024))
    };

    matched.unwrap_or_else(|| {
        tracing::debug!(
            reason = %DomainError::IndeterminateCategory,
            pre_business = inputs.is_pre_business,
            "no category rule matched"
        );
        CategoryResult::not_applicable(UNDETERMINED_MESSAGE)
    })
}

fn classify_pre_business(revenue: Option<f64>, year: Option<i32>) -> Option<CategoryResult> {
    let meets_threshold = revenue.is_some_and(|r| r >= MANDATORY_THRESHOLD);

    match year {
        Some(y) if meets_threshold && y < NEW_BUSINESS_YEAR => {
            return Some(scheduled(Category::PreCommencement, "2026-07-01".to_string()));
        }
        Some(y) if meets_threshold => {
            return Some(scheduled(Category::NewBusiness, format!("{y}-07-01")));
        }
        _ => {}
    }

    if revenue.is_some_and(|r| r < MANDATORY_THRESHOLD) {
        let second_year = year.map(|y| i64::from(y) + 1);
        return Some(scheduled(
            Category::NewBusinessBelowThreshold,
            format!("{}-01-01", year_component(second_year)),
        ));
    }

    None
}

fn classify_established(revenue: Option<f64>) -> Option<CategoryResult> {
    let Some(r) = revenue else {
        return Some(CategoryResult::not_applicable(BELOW_THRESHOLD_MESSAGE));
    };

    if r > LARGE_FLOOR && r <= LARGE_CEILING {
        Some(scheduled(Category::LargeBusiness, "2025-07-01".to_string()))
    } else if r > MEDIUM_FLOOR && r <= LARGE_FLOOR {
        Some(scheduled(Category::MediumBusiness, "2026-01-01".to_string()))
    } else if r >= MANDATORY_THRESHOLD && r <= MEDIUM_FLOOR {
        Some(scheduled(Category::SmallBusiness, "2026-07-01".to_string()))
    } else if r < MANDATORY_THRESHOLD {
        Some(CategoryResult::not_applicable(BELOW_THRESHOLD_MESSAGE))
    } else {
        None
    }
}

fn scheduled(category: Category, date: String) -> CategoryResult {
    CategoryResult::scheduled(category, date)
        .unwrap_or_else(|_| CategoryResult::not_applicable(UNDETERMINED_MESSAGE))
}

fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// An unknown year renders as `NaN`, which the deadline calculator then
/// reports as an unparsable date.
fn year_component(year: Option<i64>) -> String {
    year.map_or_else(|| "NaN".to_string(), |y| y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn established(revenue_2024: f64) -> BusinessInputs {
        BusinessInputs {
            annual_revenue_2024: Some(revenue_2024),
            annual_revenue_2025: Some(0.0),
            business_commencement_year: Some(2020),
            is_pre_business: false,
        }
    }

    fn pre_business(revenue_2025: Option<f64>, year: Option<i32>) -> BusinessInputs {
        BusinessInputs {
            annual_revenue_2024: None,
            annual_revenue_2025: revenue_2025,
            business_commencement_year: year,
            is_pre_business: true,
        }
    }

    fn assert_scheduled(result: &CategoryResult, category: Category, date: &str) {
        assert_eq!(result.category(), category);
        assert_eq!(result.implementation_date(), Some(date));
        assert_eq!(result.message(), None);
    }

    #[test]
    fn large_business_between_five_and_twenty_five_million() {
        assert_scheduled(&classify(&established(6_000_000.0)), Category::LargeBusiness, "2025-07-01");
        assert_scheduled(&classify(&established(25_000_000.0)), Category::LargeBusiness, "2025-07-01");
    }

    #[test]
    fn medium_business_upper_bound_is_inclusive() {
        assert_scheduled(&classify(&established(2_000_000.0)), Category::MediumBusiness, "2026-01-01");
        assert_scheduled(&classify(&established(5_000_000.0)), Category::MediumBusiness, "2026-01-01");
    }

    #[test]
    fn small_business_includes_both_bounds() {
        assert_scheduled(&classify(&established(500_000.0)), Category::SmallBusiness, "2026-07-01");
        assert_scheduled(&classify(&established(750_000.0)), Category::SmallBusiness, "2026-07-01");
        assert_scheduled(&classify(&established(1_000_000.0)), Category::SmallBusiness, "2026-07-01");
    }

    #[test]
    fn low_or_missing_revenue_is_not_required() {
        for inputs in [
            established(100_000.0),
            established(499_999.99),
            BusinessInputs {
                annual_revenue_2024: None,
                ..established(0.0)
            },
            BusinessInputs {
                annual_revenue_2024: Some(f64::NAN),
                ..established(0.0)
            },
        ] {
            let result = classify(&inputs);
            assert_eq!(result.category(), Category::NotApplicable);
            assert_eq!(result.implementation_date(), None);
            assert_eq!(result.message(), Some(BELOW_THRESHOLD_MESSAGE));
        }
    }

    #[test]
    fn revenue_above_twenty_five_million_cannot_be_determined() {
        let result = classify(&established(25_000_001.0));
        assert_eq!(result.category(), Category::NotApplicable);
        assert_eq!(result.message(), Some(UNDETERMINED_MESSAGE));
    }

    #[test]
    fn pre_commencement_before_2026() {
        assert_scheduled(
            &classify(&pre_business(Some(600_000.0), Some(2025))),
            Category::PreCommencement,
            "2026-07-01",
        );
        assert_scheduled(
            &classify(&pre_business(Some(500_000.0), Some(2020))),
            Category::PreCommencement,
            "2026-07-01",
        );
    }

    #[test]
    fn new_business_uses_commencement_year() {
        assert_scheduled(
            &classify(&pre_business(Some(700_000.0), Some(2026))),
            Category::NewBusiness,
            "2026-07-01",
        );
        assert_scheduled(
            &classify(&pre_business(Some(700_000.0), Some(2027))),
            Category::NewBusiness,
            "2027-07-01",
        );
        assert_scheduled(
            &classify(&pre_business(Some(500_000.0), Some(2026))),
            Category::NewBusiness,
            "2026-07-01",
        );
    }

    #[test]
    fn small_new_business_starts_the_year_after_commencement() {
        assert_scheduled(
            &classify(&pre_business(Some(400_000.0), Some(2025))),
            Category::NewBusinessBelowThreshold,
            "2026-01-01",
        );
        assert_scheduled(
            &classify(&pre_business(Some(0.0), Some(2030))),
            Category::NewBusinessBelowThreshold,
            "2031-01-01",
        );
    }

    #[test]
    fn pre_business_without_projected_revenue_cannot_be_determined() {
        let result = classify(&pre_business(None, Some(2025)));
        assert_eq!(result.category(), Category::NotApplicable);
        assert!(result.message().unwrap().contains("cannot be determined"));
    }

    #[test]
    fn pre_business_above_threshold_without_year_cannot_be_determined() {
        let result = classify(&pre_business(Some(900_000.0), None));
        assert_eq!(result.category(), Category::NotApplicable);
        assert_eq!(result.message(), Some(UNDETERMINED_MESSAGE));
    }

    #[test]
    fn small_new_business_without_year_gets_an_unparsable_date() {
        let result = classify(&pre_business(Some(100.0), None));
        assert_eq!(result.category(), Category::NewBusinessBelowThreshold);
        assert_eq!(result.implementation_date(), Some("NaN-01-01"));
    }

    #[test]
    fn pre_business_ignores_2024_revenue() {
        let inputs = BusinessInputs {
            annual_revenue_2024: Some(10_000_000.0),
            ..pre_business(Some(100_000.0), Some(2024))
        };
        assert_eq!(classify(&inputs).category(), Category::NewBusinessBelowThreshold);
    }

    #[test]
    fn inputs_parse_from_form_values() {
        let inputs = BusinessInputs::from_values(
            &FieldValue::Number(6_000_000.0),
            &FieldValue::text("abc"),
            &FieldValue::text("2025"),
            true,
        );
        assert_eq!(inputs.annual_revenue_2024, Some(6_000_000.0));
        assert_eq!(inputs.annual_revenue_2025, None);
        assert_eq!(inputs.business_commencement_year, Some(2025));
        assert!(inputs.is_pre_business);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: the large-business band is exclusive-lower, inclusive-upper.
            #[test]
            fn large_band_is_category_one(revenue in 5_000_000.01f64..=25_000_000.0) {
                let result = classify(&established(revenue));
                prop_assert_eq!(result.category(), Category::LargeBusiness);
                prop_assert_eq!(result.implementation_date(), Some("2025-07-01"));
            }

            /// Property: commencing before 2026 with enough revenue is always category 4.
            #[test]
            fn early_commencement_is_pre_commencement(
                year in 1900i32..2026,
                revenue in 500_000.0f64..1_000_000_000.0,
            ) {
                let result = classify(&pre_business(Some(revenue), Some(year)));
                prop_assert_eq!(result.category(), Category::PreCommencement);
            }

            /// Property: classification is deterministic and upholds the date/message invariant.
            #[test]
            fn classification_is_deterministic(
                rev_2024 in proptest::option::of(-1.0e9f64..1.0e9),
                rev_2025 in proptest::option::of(-1.0e9f64..1.0e9),
                year in proptest::option::of(2000i32..2100),
                is_pre_business in any::<bool>(),
            ) {
                let inputs = BusinessInputs {
                    annual_revenue_2024: rev_2024,
                    annual_revenue_2025: rev_2025,
                    business_commencement_year: year,
                    is_pre_business,
                };
                let first = classify(&inputs);
                prop_assert_eq!(&first, &classify(&inputs));

                if first.category() == Category::NotApplicable {
                    prop_assert!(first.implementation_date().is_none());
                    prop_assert!(first.message().is_some_and(|m| !m.is_empty()));
                } else {
                    prop_assert!(first.implementation_date().is_some());
                    prop_assert!(first.message().is_none());
                }
            }
        }
    }
}
