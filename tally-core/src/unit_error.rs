//! Unit errors
//!
//! Every failure of the quantity model is one of these. They are validation
//! errors: never transient, always surfaced to the caller.

use thiserror::Error;

/// Error type for unit lookup, conversion and quantity arithmetic
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("cannot convert {from} ({from_dimension}) to {to} ({to_dimension}): incompatible units")]
    IncompatibleUnits {
        from: String,
        from_dimension: String,
        to: String,
        to_dimension: String,
    },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("invalid magnitude: {0} is not finite")]
    InvalidMagnitude(f64),

    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

impl UnitError {
    pub fn incompatible(
        from: impl Into<String>,
        from_dimension: impl Into<String>,
        to: impl Into<String>,
        to_dimension: impl Into<String>,
    ) -> Self {
        UnitError::IncompatibleUnits {
            from: from.into(),
            from_dimension: from_dimension.into(),
            to: to.into(),
            to_dimension: to_dimension.into(),
        }
    }

    /// True for cross-dimension failures, which callers may recover from by
    /// keeping the quantities as separate totals.
    pub fn is_incompatible(&self) -> bool {
        matches!(self, UnitError::IncompatibleUnits { .. })
    }
}
