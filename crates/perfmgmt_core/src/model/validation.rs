//! Validation errors shared by employee and review models.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reason for a domain value that must not reach storage or the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Identifier field is zero or negative.
    NonPositiveId { field: &'static str, value: i64 },
    /// Required text field is empty after trimming.
    EmptyField(&'static str),
    /// Employee lists itself as its own manager.
    SelfReport(i64),
    /// Rating dimension is outside `[1, 10]` or not a number.
    RatingOutOfRange { field: &'static str, value: f64 },
    /// Date text does not start with `YYYY-MM-DD`.
    InvalidDate { field: &'static str, value: String },
    /// Role text is not one of the known role names.
    UnknownRole(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::SelfReport(id) => write!(f, "employee {id} cannot report to itself"),
            Self::RatingOutOfRange { field, value } => {
                write!(f, "{field} must be between 1 and 10, got {value}")
            }
            Self::InvalidDate { field, value } => {
                write!(f, "{field} must be a YYYY-MM-DD date, got `{value}`")
            }
            Self::UnknownRole(value) => write!(f, "unknown role `{value}`"),
        }
    }
}

impl Error for ModelValidationError {}

/// Rejects zero or negative identifiers.
pub fn ensure_positive_id(field: &'static str, value: i64) -> Result<(), ModelValidationError> {
    if value <= 0 {
        return Err(ModelValidationError::NonPositiveId { field, value });
    }
    Ok(())
}
