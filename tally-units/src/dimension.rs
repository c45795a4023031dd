//! Dimensions partition units into mutually incompatible families

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::Unit;

/// A family of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Whole items ("3 onions"); converts only to itself
    Count,
    /// Kitchen volume measures
    Volume,
}

impl Dimension {
    pub const ALL: [Dimension; 2] = [Dimension::Count, Dimension::Volume];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Count => "count",
            Dimension::Volume => "volume",
        }
    }

    /// The reference unit all factors in this dimension are expressed against
    pub fn canonical_unit(&self) -> Unit {
        match self {
            Dimension::Count => Unit::Count,
            Dimension::Volume => Unit::Tsp,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_unit_has_unit_factor() {
        for dim in Dimension::ALL {
            let unit = dim.canonical_unit();
            assert_eq!(unit.dimension(), dim);
            assert_eq!(unit.factor(), 1.0);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::Count), "count");
        assert_eq!(format!("{}", Dimension::Volume), "volume");
    }
}
