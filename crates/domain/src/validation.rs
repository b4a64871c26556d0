//! Validation rules applied before anything is persisted.
//!
//! Checks are pure: they never mutate or clamp the value being checked.

use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::DomainError;

/// Entities that must pass a set of invariants before they reach a store.
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}

/// Validate a string is non-empty after trimming.
pub fn require_non_empty(value: &str, field_name: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "{field_name} cannot be empty"
        )));
    }
    Ok(())
}

/// Validate a number lies inside an inclusive range.
pub fn require_in_range<T>(
    value: T,
    range: RangeInclusive<T>,
    field_name: &'static str,
) -> Result<(), DomainError>
where
    T: PartialOrd + Display + Copy,
{
    if !range.contains(&value) {
        return Err(DomainError::validation(format!(
            "{field_name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}

/// Validate a number is not below a floor.
pub fn require_at_least<T>(value: T, min: T, field_name: &'static str) -> Result<(), DomainError>
where
    T: PartialOrd + Display + Copy,
{
    if value < min {
        return Err(DomainError::validation(format!(
            "{field_name} must be at least {min}, got {value}"
        )));
    }
    Ok(())
}
