//! Unit identities backed by a static definition table

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use tally_core::UnitError;
use crate::{Dimension, UNITS};

/// A known unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Count,
    Cup,
    Tbsp,
    Tsp,
}

/// One row of the unit table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub unit: Unit,
    /// Identifier used in data files and choice lists (e.g., "tbsp")
    pub symbol: &'static str,
    /// Long singular name (e.g., "tablespoon")
    pub name: &'static str,
    pub dimension: Dimension,
    /// Magnitude of one of this unit in the dimension's canonical unit
    pub factor: f64,
}

/// Indexed by `Unit as usize`; keep in declaration order.
/// Volume is expressed in teaspoons so the kitchen ratios stay exact.
static DEFINITIONS: [UnitDef; 4] = [
    UnitDef { unit: Unit::Count, symbol: "count", name: "count", dimension: Dimension::Count, factor: 1.0 },
    UnitDef { unit: Unit::Cup, symbol: "cup", name: "cup", dimension: Dimension::Volume, factor: 48.0 },
    UnitDef { unit: Unit::Tbsp, symbol: "tbsp", name: "tablespoon", dimension: Dimension::Volume, factor: 3.0 },
    UnitDef { unit: Unit::Tsp, symbol: "tsp", name: "teaspoon", dimension: Dimension::Volume, factor: 1.0 },
];

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Count, Unit::Cup, Unit::Tbsp, Unit::Tsp];

    /// The table row for this unit
    pub fn def(&self) -> &'static UnitDef {
        &DEFINITIONS[*self as usize]
    }

    pub fn symbol(&self) -> &'static str {
        self.def().symbol
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    pub fn dimension(&self) -> Dimension {
        self.def().dimension
    }

    pub fn factor(&self) -> f64 {
        self.def().factor
    }

    /// Check if two units share a dimension (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension() == other.dimension()
    }

    /// Within one dimension, true if this unit is strictly larger than `other`
    pub fn is_coarser_than(&self, other: &Unit) -> bool {
        self.is_compatible(other) && self.factor() > other.factor()
    }

    /// Convert a magnitude expressed in this unit into `target`
    pub fn convert_value(&self, magnitude: f64, target: &Unit) -> Result<f64, UnitError> {
        if self == target {
            return Ok(magnitude);
        }
        if !self.is_compatible(target) {
            return Err(self.incompatible_with(target));
        }
        // Multiply first so integral ratios stay exact (3 tsp -> 1 tbsp)
        Ok(magnitude * self.factor() / target.factor())
    }

    pub(crate) fn incompatible_with(&self, target: &Unit) -> UnitError {
        UnitError::incompatible(
            self.symbol(),
            self.dimension().name(),
            target.symbol(),
            target.dimension().name(),
        )
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UNITS.lookup(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_declaration_order() {
        for unit in Unit::ALL {
            assert_eq!(unit.def().unit, unit);
        }
    }

    #[test]
    fn test_compatible_units() {
        assert!(Unit::Cup.is_compatible(&Unit::Tsp));
        assert!(Unit::Tbsp.is_compatible(&Unit::Cup));
        assert!(!Unit::Count.is_compatible(&Unit::Cup));
        assert!(Unit::Count.is_compatible(&Unit::Count));
    }

    #[test]
    fn test_coarser() {
        assert!(Unit::Cup.is_coarser_than(&Unit::Tbsp));
        assert!(Unit::Tbsp.is_coarser_than(&Unit::Tsp));
        assert!(!Unit::Tsp.is_coarser_than(&Unit::Tsp));
        assert!(!Unit::Cup.is_coarser_than(&Unit::Count));
    }

    #[test]
    fn test_convert_value() {
        assert_eq!(Unit::Tsp.convert_value(3.0, &Unit::Tbsp).unwrap(), 1.0);
        assert_eq!(Unit::Cup.convert_value(1.0, &Unit::Tbsp).unwrap(), 16.0);
        assert_eq!(Unit::Tbsp.convert_value(8.0, &Unit::Cup).unwrap(), 0.5);
    }

    #[test]
    fn test_convert_to_self_is_identity() {
        let awkward = 0.1 + 0.2;
        for unit in Unit::ALL {
            assert_eq!(unit.convert_value(awkward, &unit).unwrap(), awkward);
        }
    }

    #[test]
    fn test_count_converts_only_to_itself() {
        for target in [Unit::Cup, Unit::Tbsp, Unit::Tsp] {
            let err = Unit::Count.convert_value(2.0, &target).unwrap_err();
            assert!(err.is_incompatible());
            let err = target.convert_value(2.0, &Unit::Count).unwrap_err();
            assert!(err.is_incompatible());
        }
    }

    #[test]
    fn test_serde_uses_symbols() {
        assert_eq!(serde_json::to_string(&Unit::Tbsp).unwrap(), "\"tbsp\"");
        let unit: Unit = serde_json::from_str("\"cup\"").unwrap();
        assert_eq!(unit, Unit::Cup);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Tablespoons".parse::<Unit>().unwrap(), Unit::Tbsp);
        assert!("pinch".parse::<Unit>().is_err());
    }
}
