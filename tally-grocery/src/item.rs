//! Named line items

use serde::{Serialize, Deserialize};
use tally_units::{aggregate, Measured, Quantity, Unit, UnitError};
use crate::list::ListError;
use crate::NameKey;

/// One use of one product: a display name and a quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub name: String,
    pub quantity: Quantity,
}

impl GroceryItem {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        GroceryItem { name: name.into(), quantity }
    }

    /// Build an item from user input, collecting every validation problem
    pub fn from_input(name: &str, magnitude: f64, unit: Unit) -> Result<Self, ListError> {
        let mut errors = Vec::new();
        if NameKey::new(name).is_empty() {
            errors.push("An item name is required".to_string());
        }
        if !magnitude.is_finite() {
            errors.push("An item quantity must be a number".to_string());
        } else if magnitude == 0.0 {
            errors.push("An item quantity is required".to_string());
        } else if magnitude < 0.0 {
            errors.push("An item quantity cannot be negative".to_string());
        }

        if !errors.is_empty() {
            return Err(ListError::Invalid(errors));
        }
        Ok(GroceryItem::new(name.trim(), Quantity::new(magnitude, unit)))
    }

    pub fn key(&self) -> NameKey {
        NameKey::new(&self.name)
    }
}

impl Default for GroceryItem {
    fn default() -> Self {
        GroceryItem::new("", Quantity::count(0.0))
    }
}

impl Measured for GroceryItem {
    fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// Aggregate one product's line items. Names are not inspected.
pub fn aggregate_line_items(items: &[GroceryItem]) -> Result<Vec<Quantity>, UnitError> {
    aggregate(items)
}

/// Group items by `NameKey` (first-seen order) and aggregate each group.
/// The display name of a group is the first spelling encountered.
pub fn totals_by_name(items: &[GroceryItem]) -> Result<Vec<(String, Vec<Quantity>)>, UnitError> {
    let mut groups: Vec<(NameKey, String, Vec<&GroceryItem>)> = Vec::new();
    for item in items {
        let key = item.key();
        match groups.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, _, members)) => members.push(item),
            None => groups.push((key, item.name.clone(), vec![item])),
        }
    }

    groups.into_iter()
        .map(|(_, name, members)| Ok((name, aggregate(members)?)))
        .collect()
}
