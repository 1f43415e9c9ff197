//! `myinvois` command-line front end.
//!
//! Each subcommand drives the questionnaire the way the web form would and
//! returns the text to print plus whether the run succeeded.

pub mod assess;
pub mod config;
pub mod subscribe;
pub mod validate;

/// What a subcommand produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: false,
        }
    }
}

/// One line per field currently in error.
pub(crate) fn render_field_errors(errors: &myinvois_compliance::FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, err)| format!("{field}: {err}\n"))
        .collect()
}
