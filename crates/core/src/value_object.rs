//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two
/// classification results with the same category, date and message are the
/// same result, regardless of which call produced them.
///
/// The trait requires:
/// - **Clone**: values are copied, not shared
/// - **PartialEq**: compared by attribute values
/// - **Debug**: printable in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
