//! Typed failures raised by the roster core. Every variant carries just enough
//! context for a caller to build its own message; the core itself never logs
//! or formats user-facing text beyond the `Display` impl below.

use std::fmt;

use thiserror::Error;

/// Which numeric field a range check rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Gpa,
    Score,
}

impl RangeField {
    /// Inclusive bounds accepted for the field.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            RangeField::Gpa => (0.0, 5.0),
            RangeField::Score => (0.0, 100.0),
        }
    }
}

impl fmt::Display for RangeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeField::Gpa => write!(f, "GPA"),
            RangeField::Score => write!(f, "Score"),
        }
    }
}

fn lower_bound(field: &RangeField) -> f64 {
    field.bounds().0
}

fn upper_bound(field: &RangeField) -> f64 {
    field.bounds().1
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("Student with ID {0} already exists")]
    DuplicateId(String),

    #[error("No student with ID {0}")]
    NotFound(String),

    #[error("{field} must be between {} and {}, got {value}", lower_bound(.field), upper_bound(.field))]
    InvalidRange { field: RangeField, value: f64 },

    #[error("No scores recorded for course {0}")]
    NoData(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;

/// Reject `value` unless it lies inside the field's inclusive bounds. NaN never
/// passes, and `-0.0` comes back as `0.0`.
pub(crate) fn check_range(field: RangeField, value: f64) -> Result<f64> {
    let (min, max) = field.bounds();
    if (min..=max).contains(&value) {
        Ok(value + 0.0)
    } else {
        Err(RosterError::InvalidRange { field, value })
    }
}
