//! Tally Units - Kitchen Quantities and Aggregation
//!
//! Provides unit-aware quantities with dimensional compatibility checks.
//!
//! Dimensions:
//! - Count (count)
//! - Volume (cup, tbsp, tsp)
//!
//! Quantities of the same dimension convert and add; quantities of
//! different dimensions never combine. `aggregate` reduces a product's
//! ingredient quantities into one total per dimension.

mod dimension;
mod unit;
mod units;
mod quantity;
mod parse;
mod aggregate;

pub use dimension::Dimension;
pub use unit::{Unit, UnitDef};
pub use units::{UnitRegistry, UNITS};
pub use quantity::Quantity;
pub use parse::{parse_unit, parse_magnitude, parse_quantity_string};
pub use aggregate::{aggregate, format_totals, Measured};
pub use tally_core::UnitError;

/// Unit identifiers in declaration order, for populating choice widgets
pub fn unit_choices() -> Vec<&'static str> {
    UNITS.names()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_choices() {
        assert_eq!(unit_choices(), vec!["count", "cup", "tbsp", "tsp"]);
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UnitRegistry>();
        assert_send_sync::<Quantity>();
    }
}
