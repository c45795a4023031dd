//! Unit registry - identifier and alias lookup over the unit table

use std::collections::HashMap;
use std::sync::LazyLock;
use tally_core::UnitError;
use crate::{Dimension, Unit};

/// Global unit registry, read-only after initialization
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of all known units
pub struct UnitRegistry {
    units: Vec<Unit>,
    aliases: HashMap<String, Unit>,
    /// Case-sensitive abbreviations ("T" is tbsp, "t" is tsp)
    exact: HashMap<&'static str, Unit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: Vec::new(),
            aliases: HashMap::new(),
            exact: HashMap::new(),
        };
        registry.register_count_units();
        registry.register_volume_units();
        registry
    }

    /// Get a unit by identifier or alias. Case-insensitive, except for the
    /// single-letter spoon abbreviations.
    pub fn get(&self, id: &str) -> Option<Unit> {
        let id = id.trim();
        self.exact.get(id)
            .or_else(|| self.aliases.get(&id.to_lowercase()))
            .copied()
    }

    /// Like `get`, but an unrecognized identifier is an error
    pub fn lookup(&self, id: &str) -> Result<Unit, UnitError> {
        self.get(id).ok_or_else(|| UnitError::UnknownUnit(id.trim().to_string()))
    }

    /// All registered units in declaration order
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Identifiers of all units, in declaration order
    pub fn names(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.symbol()).collect()
    }

    /// Get all units in a dimension
    pub fn by_dimension(&self, dimension: Dimension) -> Vec<Unit> {
        self.units.iter()
            .copied()
            .filter(|u| u.dimension() == dimension)
            .collect()
    }

    /// True if both identifiers resolve and share a dimension
    pub fn convertible(&self, from: &str, to: &str) -> Result<bool, UnitError> {
        Ok(self.lookup(from)?.is_compatible(&self.lookup(to)?))
    }

    fn register(&mut self, unit: Unit) {
        self.units.push(unit);
        self.alias(unit.symbol(), unit);
        self.alias(unit.name(), unit);
    }

    fn alias(&mut self, alias: &str, unit: Unit) {
        self.aliases.insert(alias.to_string(), unit);
    }

    fn register_count_units(&mut self) {
        self.register(Unit::Count);

        self.alias("counts", Unit::Count);
        self.alias("each", Unit::Count);
        self.alias("ea", Unit::Count);
        self.alias("whole", Unit::Count);
        self.alias("x", Unit::Count);
    }

    fn register_volume_units(&mut self) {
        self.register(Unit::Cup);
        self.register(Unit::Tbsp);
        self.register(Unit::Tsp);

        self.alias("cups", Unit::Cup);
        self.alias("c", Unit::Cup);
        self.alias("tablespoons", Unit::Tbsp);
        self.alias("tbs", Unit::Tbsp);
        self.alias("tbl", Unit::Tbsp);
        self.alias("teaspoons", Unit::Tsp);

        self.exact.insert("T", Unit::Tbsp);
        self.exact.insert("t", Unit::Tsp);
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_unit_registered() {
        assert_eq!(UNITS.units(), &Unit::ALL);
        for unit in Unit::ALL {
            assert_eq!(UNITS.get(unit.symbol()), Some(unit));
            assert_eq!(UNITS.get(unit.name()), Some(unit));
        }
    }

    #[test]
    fn test_alias_lookup() {
        assert_eq!(UNITS.get("cups"), Some(Unit::Cup));
        assert_eq!(UNITS.get(" TBSP "), Some(Unit::Tbsp));
        assert_eq!(UNITS.get("Teaspoons"), Some(Unit::Tsp));
        assert_eq!(UNITS.get("each"), Some(Unit::Count));
        assert_eq!(UNITS.get("C"), Some(Unit::Cup));
    }

    #[test]
    fn test_spoon_abbreviations_case_sensitive() {
        assert_eq!(UNITS.get("T"), Some(Unit::Tbsp));
        assert_eq!(UNITS.get(" T "), Some(Unit::Tbsp));
        assert_eq!(UNITS.get("t"), Some(Unit::Tsp));
    }

    #[test]
    fn test_unknown_unit() {
        let err = UNITS.lookup("fathom").unwrap_err();
        assert_eq!(err, UnitError::UnknownUnit("fathom".to_string()));
    }

    #[test]
    fn test_by_dimension() {
        assert_eq!(UNITS.by_dimension(Dimension::Count), vec![Unit::Count]);
        assert_eq!(UNITS.by_dimension(Dimension::Volume), vec![Unit::Cup, Unit::Tbsp, Unit::Tsp]);
    }

    #[test]
    fn test_convertible() {
        assert!(UNITS.convertible("cup", "tsp").unwrap());
        assert!(!UNITS.convertible("count", "cup").unwrap());
        assert!(UNITS.convertible("count", "pinch").is_err());
    }
}
