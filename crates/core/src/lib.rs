//! `myinvois-core`: shared building blocks for the e-invoice readiness assessment.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering): the
//! error taxonomy, questionnaire field names and raw values, and the lenient
//! numeric parsing that turns typed form input into numbers.

pub mod error;
pub mod field;
pub mod parse;
pub mod value_object;

pub use error::{DomainError, DomainResult, FieldError};
pub use field::{FieldName, FieldValue};
pub use value_object::ValueObject;
