//! E-invoice compliance categories and the classification result.

use serde::{Deserialize, Serialize};

use myinvois_core::{DomainError, DomainResult, ValueObject};

/// Compliance category, numbered as published (0 = not applicable).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Category {
    NotApplicable = 0,
    LargeBusiness = 1,
    MediumBusiness = 2,
    SmallBusiness = 3,
    PreCommencement = 4,
    NewBusiness = 5,
    NewBusinessBelowThreshold = 6,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::NotApplicable,
        Category::LargeBusiness,
        Category::MediumBusiness,
        Category::SmallBusiness,
        Category::PreCommencement,
        Category::NewBusiness,
        Category::NewBusinessBelowThreshold,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::NotApplicable => "Not Applicable",
            Category::LargeBusiness => "Large Business (>RM5mil, ≤RM25mil annual revenue in 2024)",
            Category::MediumBusiness => "Medium Business (>RM1mil, ≤RM5mil annual revenue in 2024)",
            Category::SmallBusiness => "Small Business (RM500k-RM1mil annual revenue in 2024)",
            Category::PreCommencement => {
                "Pre-commencement Business (commencing before 2026, ≥RM500k projected first year revenue)"
            }
            Category::NewBusiness => {
                "New Business (commencing 2026+, ≥RM500k projected first year revenue)"
            }
            Category::NewBusinessBelowThreshold => {
                "New Business (any commencement, <RM500k projected first year revenue)"
            }
        }
    }

    pub fn is_applicable(self) -> bool {
        self != Category::NotApplicable
    }
}

impl From<Category> for u8 {
    fn from(value: Category) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for Category {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Category::ALL
            .into_iter()
            .find(|c| c.number() == value)
            .ok_or(DomainError::UnknownCategory(value))
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Outcome of classifying one set of business inputs.
///
/// Invariant: category 0 carries a message and no date; categories 1–6
/// carry a `YYYY-MM-DD` date and no message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    category: Category,
    implementation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ValueObject for CategoryResult {}

impl CategoryResult {
    /// A compliance category with its implementation date.
    pub fn scheduled(category: Category, implementation_date: impl Into<String>) -> DomainResult<Self> {
        if !category.is_applicable() {
            return Err(DomainError::invariant(
                "category 0 cannot carry an implementation date",
            ));
        }
        Ok(Self {
            category,
            implementation_date: Some(implementation_date.into()),
            message: None,
        })
    }

    /// Category 0 with the reason shown to the user.
    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self {
            category: Category::NotApplicable,
            implementation_date: None,
            message: Some(message.into()),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn implementation_date(&self) -> Option<&str> {
        self.implementation_date.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
