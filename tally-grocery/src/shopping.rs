//! Shopping list - product totals grouped by store, then category
//!
//! Stores, categories and products are listed by name. A product stocked by
//! several stores appears under each of them; products with no store go in a
//! trailing "Unassigned" section. Products no recipe uses are left out.

use std::collections::BTreeMap;
use std::fmt;
use serde::Serialize;
use tally_units::{format_totals, Quantity};
use crate::{Catalog, CatalogError, NameKey};

/// Section name for products no store carries
pub const UNASSIGNED_STORE: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingList {
    pub stores: Vec<StoreSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSection {
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub categories: Vec<CategorySection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySection {
    pub category: String,
    pub products: Vec<ShoppingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingEntry {
    pub product: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub totals: Vec<Quantity>,
}

impl ShoppingList {
    pub fn build(catalog: &Catalog) -> Result<Self, CatalogError> {
        let mut stores: BTreeMap<NameKey, StoreSection> = BTreeMap::new();
        let mut unassigned = StoreSection::new(UNASSIGNED_STORE, None);

        for (product, totals) in catalog.all_totals()? {
            if totals.is_empty() {
                continue;
            }
            let category = catalog.category(&product.category)
                .map(|c| c.name.as_str())
                .unwrap_or(&product.category);

            if product.stores.is_empty() {
                unassigned.push(category, ShoppingEntry {
                    product: product.name.clone(),
                    location: None,
                    totals,
                });
                continue;
            }

            for stock in &product.stores {
                let section = stores.entry(NameKey::new(&stock.store)).or_insert_with(|| {
                    match catalog.store(&stock.store) {
                        Some(store) => StoreSection::new(&store.name, store.address.clone()),
                        None => StoreSection::new(&stock.store, None),
                    }
                });
                section.push(category, ShoppingEntry {
                    product: product.name.clone(),
                    location: stock.location.clone(),
                    totals: totals.clone(),
                });
            }
        }

        let mut sections: Vec<StoreSection> = stores.into_values().collect();
        if !unassigned.categories.is_empty() {
            sections.push(unassigned);
        }
        for section in &mut sections {
            section.sort();
        }
        Ok(ShoppingList { stores: sections })
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Every entry, flattened, in display order
    pub fn entries(&self) -> impl Iterator<Item = &ShoppingEntry> {
        self.stores.iter()
            .flat_map(|s| s.categories.iter())
            .flat_map(|c| c.products.iter())
    }
}

impl StoreSection {
    fn new(store: &str, address: Option<String>) -> Self {
        StoreSection { store: store.to_string(), address, categories: Vec::new() }
    }

    fn push(&mut self, category: &str, entry: ShoppingEntry) {
        let key = NameKey::new(category);
        match self.categories.iter_mut().find(|c| NameKey::new(&c.category) == key) {
            Some(section) => section.products.push(entry),
            None => self.categories.push(CategorySection {
                category: category.to_string(),
                products: vec![entry],
            }),
        }
    }

    fn sort(&mut self) {
        self.categories.sort_by_key(|c| NameKey::new(&c.category));
        for category in &mut self.categories {
            category.products.sort_by_key(|p| NameKey::new(&p.product));
        }
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for store in &self.stores {
            match &store.address {
                Some(address) => writeln!(f, "{} ({})", store.store, address)?,
                None => writeln!(f, "{}", store.store)?,
            }
            for category in &store.categories {
                writeln!(f, "  {}", category.category)?;
                for entry in &category.products {
                    match &entry.location {
                        Some(location) => write!(f, "    {} [{}]", entry.product, location)?,
                        None => write!(f, "    {}", entry.product)?,
                    }
                    writeln!(f, ": {}", format_totals(&entry.totals))?;
                }
            }
        }
        Ok(())
    }
}
