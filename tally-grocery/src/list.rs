//! Editable grocery list
//!
//! Rows are unique by `NameKey`. Adding an item whose name already has a
//! row folds its quantity into that row, keeping the row's unit.

use thiserror::Error;
use tracing::debug;
use tally_units::{Quantity, Unit, UnitError};
use crate::{GroceryItem, NameKey};

/// Errors from editing a grocery list
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListError {
    #[error("no item named '{0}'")]
    NotFound(String),

    #[error("an item named '{0}' already exists")]
    Duplicate(String),

    #[error("{}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// Ordered list of uniquely named grocery items
#[derive(Debug, Clone, Default)]
pub struct GroceryList {
    items: Vec<GroceryItem>,
}

impl GroceryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list by adding each item in turn
    pub fn from_items<I>(items: I) -> Result<Self, ListError>
    where
        I: IntoIterator<Item = GroceryItem>,
    {
        let mut list = GroceryList::new();
        for item in items {
            list.add_item(item)?;
        }
        Ok(list)
    }

    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, key: &NameKey) -> Option<usize> {
        self.items.iter().position(|item| item.key() == *key)
    }

    pub fn get(&self, key: &NameKey) -> Option<&GroceryItem> {
        self.position(key).map(|idx| &self.items[idx])
    }

    /// Add an item, merging into an existing row with the same name.
    /// Returns the row index.
    ///
    /// A count cannot be added to a measured row (or vice versa); the list
    /// is left unchanged in that case.
    pub fn add_item(&mut self, item: GroceryItem) -> Result<usize, ListError> {
        match self.position(&item.key()) {
            Some(idx) => {
                let row = &mut self.items[idx];
                row.quantity = row.quantity.add(&item.quantity)?;
                debug!(item = %row.name, quantity = %row.quantity, "merged into existing row");
                Ok(idx)
            }
            None => {
                debug!(item = %item.name, quantity = %item.quantity, "appended row");
                self.items.push(item);
                Ok(self.items.len() - 1)
            }
        }
    }

    /// Remove the row with this name, if any
    pub fn remove_item(&mut self, key: &NameKey) -> Option<GroceryItem> {
        let idx = self.position(key)?;
        Some(self.items.remove(idx))
    }

    pub fn rename(&mut self, key: &NameKey, new_name: &str) -> Result<(), ListError> {
        let idx = self.require(key)?;
        let new_key = NameKey::new(new_name);
        if new_key.is_empty() {
            return Err(ListError::Invalid(vec!["An item name is required".to_string()]));
        }
        if let Some(other) = self.position(&new_key) {
            if other != idx {
                return Err(ListError::Duplicate(new_name.trim().to_string()));
            }
        }
        self.items[idx].name = new_name.trim().to_string();
        Ok(())
    }

    pub fn set_quantity(&mut self, key: &NameKey, magnitude: f64) -> Result<(), ListError> {
        let idx = self.require(key)?;
        let unit = self.items[idx].quantity.unit;
        self.items[idx].quantity = Quantity::try_new(magnitude, unit)?;
        Ok(())
    }

    /// Change a row's unit, converting its magnitude
    pub fn set_unit(&mut self, key: &NameKey, unit: Unit) -> Result<(), ListError> {
        let idx = self.require(key)?;
        self.items[idx].quantity = self.items[idx].quantity.convert_to(unit)?;
        Ok(())
    }

    fn require(&self, key: &NameKey) -> Result<usize, ListError> {
        self.position(key)
            .ok_or_else(|| ListError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, magnitude: f64, unit: Unit) -> GroceryItem {
        GroceryItem::new(name, Quantity::new(magnitude, unit))
    }

    #[test]
    fn test_add_new_rows() {
        let mut list = GroceryList::new();
        assert_eq!(list.add_item(item("Milk", 1.0, Unit::Cup)).unwrap(), 0);
        assert_eq!(list.add_item(item("Eggs", 6.0, Unit::Count)).unwrap(), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_add_merges_same_name_in_row_unit() {
        let mut list = GroceryList::new();
        list.add_item(item("Milk", 1.0, Unit::Cup)).unwrap();
        let idx = list.add_item(item("milk", 8.0, Unit::Tbsp)).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0], item("Milk", 1.5, Unit::Cup));
    }

    #[test]
    fn test_add_count_to_measured_row_fails_without_change() {
        let mut list = GroceryList::new();
        list.add_item(item("Onion", 1.0, Unit::Cup)).unwrap();
        let err = list.add_item(item("Onion", 2.0, Unit::Count)).unwrap_err();
        assert!(matches!(err, ListError::Unit(ref e) if e.is_incompatible()));
        assert_eq!(list.items(), &[item("Onion", 1.0, Unit::Cup)]);
    }

    #[test]
    fn test_from_items() {
        let list = GroceryList::from_items(vec![
            item("Flour", 1.0, Unit::Cup),
            item("Sugar", 2.0, Unit::Tbsp),
            item("FLOUR", 0.5, Unit::Cup),
        ]).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(&NameKey::new("flour")).unwrap().quantity, Quantity::new(1.5, Unit::Cup));
    }

    #[test]
    fn test_remove_item() {
        let mut list = GroceryList::from_items(vec![item("Bread", 1.0, Unit::Count)]).unwrap();
        assert!(list.remove_item(&NameKey::new("butter")).is_none());
        let removed = list.remove_item(&NameKey::new("BREAD")).unwrap();
        assert_eq!(removed.name, "Bread");
        assert!(list.is_empty());
    }

    #[test]
    fn test_rename() {
        let mut list = GroceryList::from_items(vec![
            item("Beans", 1.0, Unit::Count),
            item("Rice", 1.0, Unit::Cup),
        ]).unwrap();
        list.rename(&NameKey::new("beans"), "Black Beans").unwrap();
        assert!(list.get(&NameKey::new("black beans")).is_some());

        // Changing only the case of a name is allowed
        list.rename(&NameKey::new("rice"), "RICE").unwrap();
        assert_eq!(list.items()[1].name, "RICE");

        let err = list.rename(&NameKey::new("rice"), "black beans").unwrap_err();
        assert_eq!(err, ListError::Duplicate("black beans".to_string()));
        assert!(matches!(list.rename(&NameKey::new("rice"), " "), Err(ListError::Invalid(_))));
        assert!(matches!(list.rename(&NameKey::new("pasta"), "Penne"), Err(ListError::NotFound(_))));
    }

    #[test]
    fn test_set_quantity() {
        let mut list = GroceryList::from_items(vec![item("Yogurt", 1.0, Unit::Cup)]).unwrap();
        list.set_quantity(&NameKey::new("yogurt"), 2.5).unwrap();
        assert_eq!(list.items()[0].quantity, Quantity::new(2.5, Unit::Cup));
        assert!(list.set_quantity(&NameKey::new("yogurt"), f64::INFINITY).is_err());
    }

    #[test]
    fn test_set_unit_converts() {
        let mut list = GroceryList::from_items(vec![item("Butter", 2.0, Unit::Tbsp)]).unwrap();
        list.set_unit(&NameKey::new("butter"), Unit::Tsp).unwrap();
        assert_eq!(list.items()[0].quantity, Quantity::new(6.0, Unit::Tsp));

        let err = list.set_unit(&NameKey::new("butter"), Unit::Count).unwrap_err();
        assert!(matches!(err, ListError::Unit(_)));
        assert_eq!(list.items()[0].quantity, Quantity::new(6.0, Unit::Tsp));
    }
}
