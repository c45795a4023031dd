//! Tally Grocery - the collaborators around the quantity model
//!
//! - `NameKey`: normalized product identity used for grouping
//! - `GroceryItem` / `GroceryList`: named line items and the editable list
//! - `Catalog`: in-memory recipes, products, stores and categories
//! - `ShoppingList`: per-product totals grouped by store and category

mod name;
mod item;
mod list;
mod catalog;
mod shopping;

pub use name::{NameKey, normalize_name};
pub use item::{GroceryItem, aggregate_line_items, totals_by_name};
pub use list::{GroceryList, ListError};
pub use catalog::{
    Catalog, CatalogError, Category, Ingredient, IngredientSource, Product, Recipe, Store,
    StoreStock, product_totals,
};
pub use shopping::{ShoppingList, StoreSection, CategorySection, ShoppingEntry, UNASSIGNED_STORE};
