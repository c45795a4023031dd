//! Aggregation - reduce one product's quantities to per-dimension totals
//!
//! Each incoming quantity merges into the first total of a compatible
//! dimension (the sum is kept in the coarser unit), or starts a new total.
//! Totals appear in the order their dimension was first seen; nothing is
//! sorted afterwards.
//!
//! The engine never looks at names. Callers group line items by product
//! before calling it.

use tally_core::UnitError;
use tracing::debug;
use crate::Quantity;

/// Anything that can report the quantity it contributes to a total
pub trait Measured {
    fn quantity(&self) -> Quantity;
}

impl Measured for Quantity {
    fn quantity(&self) -> Quantity {
        *self
    }
}

impl<T: Measured + ?Sized> Measured for &T {
    fn quantity(&self) -> Quantity {
        (**self).quantity()
    }
}

/// Reduce `items` to the minimal list of totals, one per dimension present.
///
/// Any conversion failure aborts the whole aggregation.
pub fn aggregate<I>(items: I) -> Result<Vec<Quantity>, UnitError>
where
    I: IntoIterator,
    I::Item: Measured,
{
    let totals = items
        .into_iter()
        .try_fold(Vec::new(), |totals, item| fold_into(totals, item.quantity()))?;
    debug!(totals = totals.len(), "aggregated quantities");
    Ok(totals)
}

fn fold_into(totals: Vec<Quantity>, incoming: Quantity) -> Result<Vec<Quantity>, UnitError> {
    let mut merged = false;
    let mut next = Vec::with_capacity(totals.len() + 1);

    for total in totals {
        if !merged && total.is_compatible(&incoming) {
            next.push(total.merge(&incoming)?);
            merged = true;
        } else {
            next.push(total);
        }
    }

    if !merged {
        next.push(incoming);
    }
    Ok(next)
}

/// Render totals for a single display column, e.g. "2 tbsp, 3 count"
pub fn format_totals(totals: &[Quantity]) -> String {
    totals.iter()
        .map(|q| q.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Unit;

    fn q(magnitude: f64, unit: Unit) -> Quantity {
        Quantity::new(magnitude, unit)
    }

    #[test]
    fn test_empty_input() {
        let totals = aggregate(Vec::<Quantity>::new()).unwrap();
        assert!(totals.is_empty());
    }

    #[test]
    fn test_single_item_passes_through() {
        let totals = aggregate([q(1.5, Unit::Cup)]).unwrap();
        assert_eq!(totals, vec![q(1.5, Unit::Cup)]);
    }

    #[test]
    fn test_mixed_volume_and_count() {
        let totals = aggregate([q(3.0, Unit::Tsp), q(1.0, Unit::Tbsp), q(2.0, Unit::Count)]).unwrap();
        assert_eq!(totals, vec![q(2.0, Unit::Tbsp), q(2.0, Unit::Count)]);
    }

    #[test]
    fn test_preserves_first_seen_order() {
        let totals = aggregate([q(1.0, Unit::Cup), q(2.0, Unit::Cup), q(1.0, Unit::Count)]).unwrap();
        assert_eq!(totals, vec![q(3.0, Unit::Cup), q(1.0, Unit::Count)]);

        let totals = aggregate([q(1.0, Unit::Count), q(1.0, Unit::Cup), q(2.0, Unit::Count)]).unwrap();
        assert_eq!(totals, vec![q(3.0, Unit::Count), q(1.0, Unit::Cup)]);
    }

    #[test]
    fn test_accumulates_in_coarsest_unit_seen() {
        let totals = aggregate([q(1.0, Unit::Tsp), q(2.0, Unit::Tbsp), q(0.5, Unit::Cup), q(2.0, Unit::Tsp)]).unwrap();
        // 1 tsp + 6 tsp + 24 tsp + 2 tsp = 33 tsp = 0.6875 cup
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].unit, Unit::Cup);
        assert!((totals[0].magnitude - 0.6875).abs() < 1e-12);
    }

    #[test]
    fn test_does_not_mutate_inputs() {
        let inputs = vec![q(3.0, Unit::Tsp), q(1.0, Unit::Tbsp)];
        let totals = aggregate(&inputs).unwrap();
        assert_eq!(inputs, vec![q(3.0, Unit::Tsp), q(1.0, Unit::Tbsp)]);
        assert_eq!(totals, vec![q(2.0, Unit::Tbsp)]);
    }

    #[test]
    fn test_separate_products_never_merge() {
        let onions = [q(1.0, Unit::Count), q(2.0, Unit::Count)];
        let milk = [q(1.0, Unit::Cup)];
        assert_eq!(aggregate(onions).unwrap(), vec![q(3.0, Unit::Count)]);
        assert_eq!(aggregate(milk).unwrap(), vec![q(1.0, Unit::Cup)]);
    }

    #[test]
    fn test_format_totals() {
        let totals = vec![q(2.0, Unit::Tbsp), q(3.0, Unit::Count)];
        assert_eq!(format_totals(&totals), "2 tbsp, 3 count");
        assert_eq!(format_totals(&[]), "");
    }
}
