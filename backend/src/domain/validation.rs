//! Field-level validation outcome shared by every domain constructor.
//!
//! Constructors reject input with a [`FieldViolation`] naming the field and the
//! rule it broke. The first violation wins; callers never receive a list.

use std::fmt;

use super::Error;

/// Machine-readable rule identifiers attached to validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Required value was blank once trimmed.
    Empty,
    /// Value was shorter than the minimum length.
    TooShort,
    /// Value was longer than the maximum length.
    TooLong,
    /// Value had to be an exact length and was not.
    WrongLength,
    /// Numeric value fell outside its allowed range.
    OutOfRange,
    /// Value was expected to be a number.
    NotANumber,
    /// Value collides with an existing record.
    Duplicate,
    /// Calendar date does not exist.
    InvalidDate,
    /// Requested status change is not allowed from the current status.
    IllegalTransition,
}

impl Rule {
    /// Stable snake-case label exposed to clients.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::WrongLength => "wrong_length",
            Self::OutOfRange => "out_of_range",
            Self::NotANumber => "not_a_number",
            Self::Duplicate => "duplicate",
            Self::InvalidDate => "invalid_date",
            Self::IllegalTransition => "illegal_transition",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected field.
///
/// # Examples
/// ```
/// use service_station::domain::{Error, ErrorCode, FieldViolation, Rule};
///
/// let violation = FieldViolation::new("vin", Rule::WrongLength, "vin must be 17 characters");
/// let err = Error::from(violation);
/// assert_eq!(err.code(), ErrorCode::ValidationFailed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldViolation {
    field: &'static str,
    rule: Rule,
    message: String,
}

impl FieldViolation {
    /// Build a violation for `field` breaking `rule`.
    pub fn new(field: &'static str, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }

    /// Name of the rejected field as clients spell it.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Rule the field failed.
    pub fn rule(&self) -> Rule {
        self.rule
    }
}

impl From<FieldViolation> for Error {
    fn from(value: FieldViolation) -> Self {
        Error::validation_failed(value.field, value.rule.as_str(), value.message)
    }
}

pub(crate) fn required_text(
    field: &'static str,
    raw: &str,
    max_chars: usize,
) -> Result<String, FieldViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new(
            field,
            Rule::Empty,
            format!("{field} must not be empty"),
        ));
    }
    if trimmed.chars().count() > max_chars {
        return Err(FieldViolation::new(
            field,
            Rule::TooLong,
            format!("{field} must be at most {max_chars} characters"),
        ));
    }
    Ok(trimmed.to_owned())
}
