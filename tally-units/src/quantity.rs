//! Quantity type - a magnitude with an associated unit

use std::fmt;
use serde::{Serialize, Deserialize};
use tally_core::UnitError;
use crate::{Dimension, Unit};

/// An amount of something: a magnitude in a unit.
///
/// Quantities are values. Every operation returns a new quantity and leaves
/// its operands untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Quantity { magnitude, unit }
    }

    /// Create a quantity, rejecting NaN and infinite magnitudes
    pub fn try_new(magnitude: f64, unit: Unit) -> Result<Self, UnitError> {
        if !magnitude.is_finite() {
            return Err(UnitError::InvalidMagnitude(magnitude));
        }
        Ok(Quantity::new(magnitude, unit))
    }

    /// Create a count quantity ("3 onions")
    pub fn count(magnitude: f64) -> Self {
        Quantity::new(magnitude, Unit::Count)
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// The magnitude expressed in the dimension's canonical unit
    pub fn canonical_magnitude(&self) -> f64 {
        self.magnitude * self.unit.factor()
    }

    /// True if both quantities describe the same amount within `tolerance`
    /// (measured in canonical units). Incompatible quantities never match.
    pub fn same_amount(&self, other: &Quantity, tolerance: f64) -> bool {
        self.is_compatible(other)
            && (self.canonical_magnitude() - other.canonical_magnitude()).abs() <= tolerance
    }

    /// Convert to another unit
    ///
    /// Count converts only to count; measured quantities are never
    /// reinterpreted as counts or vice versa.
    pub fn convert_to(&self, target: Unit) -> Result<Quantity, UnitError> {
        let magnitude = self.unit.convert_value(self.magnitude, &target)?;
        Ok(Quantity::new(magnitude, target))
    }

    /// Add two quantities (must have compatible dimensions).
    /// The result is expressed in `self`'s unit.
    pub fn add(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let converted = other.convert_to(self.unit)?;
        Ok(Quantity::new(self.magnitude + converted.magnitude, self.unit))
    }

    /// Subtract two quantities (must have compatible dimensions)
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        let converted = other.convert_to(self.unit)?;
        Ok(Quantity::new(self.magnitude - converted.magnitude, self.unit))
    }

    /// Add two quantities, expressing the sum in the coarser of the two units.
    /// On a tie (same unit) the receiver's unit is kept.
    pub fn merge(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        if !self.is_compatible(other) {
            return Err(other.unit.incompatible_with(&self.unit));
        }
        if other.unit.is_coarser_than(&self.unit) {
            other.add(self)
        } else {
            self.add(other)
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Three decimals is finer than any kitchen measure
        let rounded = format!("{:.3}", self.magnitude);
        let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
        let magnitude = if trimmed == "-0" { "0" } else { trimmed };
        write!(f, "{} {}", magnitude, self.unit)
    }
}
