//! Environment-driven defaults.

/// Reference year used when the questionnaire is started without one.
pub const DEFAULT_CURRENT_YEAR: &str = "2024";

pub const CURRENT_YEAR_ENV: &str = "MYINVOIS_CURRENT_YEAR";

/// Current year from `MYINVOIS_CURRENT_YEAR`, falling back to the form default.
pub fn current_year_from_env() -> String {
    std::env::var(CURRENT_YEAR_ENV).unwrap_or_else(|_| {
        tracing::warn!(
            "{CURRENT_YEAR_ENV} not set; using default current year {DEFAULT_CURRENT_YEAR}"
        );
        DEFAULT_CURRENT_YEAR.to_string()
    })
}
