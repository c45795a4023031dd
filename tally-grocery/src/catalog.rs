//! Recipe catalog - the record store feeding the aggregation
//!
//! Records reference each other by name (case-insensitive). Every reference
//! is checked when a record is added, so a built `Catalog` has no dangling
//! keys and every ingredient carries a valid quantity.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;
use tally_core::TallyError;
use tally_units::{aggregate, Measured, Quantity, UnitError, UNITS};
use crate::NameKey;

/// Errors from building or querying a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate {kind}: '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("no {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} name is required")]
    EmptyName { kind: &'static str },

    #[error("ingredient '{product}' in recipe '{recipe}': {source}")]
    Ingredient {
        recipe: String,
        product: String,
        #[source]
        source: UnitError,
    },

    #[error("totals for '{product}': {source}")]
    Aggregation {
        product: String,
        #[source]
        source: UnitError,
    },
}

impl From<CatalogError> for TallyError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io { path, source } => TallyError::io(&path, source.to_string()),
            CatalogError::Json(e) => TallyError::parse_error(e.to_string()),
            CatalogError::Duplicate { kind, name } => TallyError::duplicate(kind, &name),
            CatalogError::NotFound { kind, name } => TallyError::not_found(kind, &name),
            CatalogError::EmptyName { kind } => TallyError::invalid_input(format!("{} name is required", kind)),
            CatalogError::Ingredient { recipe, product, source } => TallyError::from(source)
                .for_product(product)
                .in_recipe(recipe),
            CatalogError::Aggregation { product, source } => TallyError::from(source)
                .for_product(product),
        }
    }
}

/// Product category (e.g., "Produce")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A store carrying a product, and where to find it there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStock {
    pub store: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub stores: Vec<StoreStock>,
}

fn default_servings() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default = "default_servings")]
    pub servings: u32,
}

/// One recipe's use of one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub recipe: String,
    pub product: String,
    pub quantity: Quantity,
}

impl Measured for Ingredient {
    fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// Where aggregation input comes from
pub trait IngredientSource {
    /// Product names in the source's natural order
    fn product_names(&self) -> Vec<String>;

    /// A product's ingredients in insertion order
    fn ingredients_for(&self, product: &str) -> Vec<&Ingredient>;
}

/// Aggregate a product's ingredients from any source
pub fn product_totals<S>(source: &S, product: &str) -> Result<Vec<Quantity>, CatalogError>
where
    S: IngredientSource + ?Sized,
{
    let ingredients = source.ingredients_for(product);
    debug!(product, ingredients = ingredients.len(), "tallying product");
    aggregate(ingredients).map_err(|source| CatalogError::Aggregation {
        product: product.to_string(),
        source,
    })
}

// On-disk shape: ingredients nest under their recipe, units are identifiers
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    stores: Vec<Store>,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    recipes: Vec<RecipeEntry>,
}

#[derive(Debug, Deserialize)]
struct RecipeEntry {
    #[serde(flatten)]
    recipe: Recipe,
    #[serde(default)]
    ingredients: Vec<IngredientEntry>,
}

#[derive(Debug, Deserialize)]
struct IngredientEntry {
    product: String,
    quantity: f64,
    unit: String,
}

/// In-memory record store
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    stores: Vec<Store>,
    products: Vec<Product>,
    recipes: Vec<Recipe>,
    ingredients: Vec<Ingredient>,
    category_index: HashMap<NameKey, usize>,
    store_index: HashMap<NameKey, usize>,
    product_index: HashMap<NameKey, usize>,
    recipe_index: HashMap<NameKey, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Catalog::new();

        for category in file.categories {
            catalog.add_category(category)?;
        }
        for store in file.stores {
            catalog.add_store(store)?;
        }
        for product in file.products {
            catalog.add_product(product)?;
        }
        for entry in file.recipes {
            let recipe_name = entry.recipe.name.clone();
            catalog.add_recipe(entry.recipe)?;
            for ingredient in entry.ingredients {
                catalog.add_ingredient_entry(&recipe_name, ingredient)?;
            }
        }

        debug!(
            categories = catalog.categories.len(),
            stores = catalog.stores.len(),
            products = catalog.products.len(),
            recipes = catalog.recipes.len(),
            ingredients = catalog.ingredients.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Read and parse a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn add_category(&mut self, category: Category) -> Result<(), CatalogError> {
        let key = Self::unique_key(&self.category_index, "category", &category.name)?;
        self.category_index.insert(key, self.categories.len());
        self.categories.push(category);
        Ok(())
    }

    pub fn add_store(&mut self, store: Store) -> Result<(), CatalogError> {
        let key = Self::unique_key(&self.store_index, "store", &store.name)?;
        self.store_index.insert(key, self.stores.len());
        self.stores.push(store);
        Ok(())
    }

    pub fn add_product(&mut self, product: Product) -> Result<(), CatalogError> {
        let key = Self::unique_key(&self.product_index, "product", &product.name)?;
        self.category(&product.category)
            .ok_or_else(|| Self::not_found("category", &product.category))?;
        let mut stocked = HashSet::new();
        for stock in &product.stores {
            self.store(&stock.store)
                .ok_or_else(|| Self::not_found("store", &stock.store))?;
            if !stocked.insert(NameKey::new(&stock.store)) {
                return Err(CatalogError::Duplicate { kind: "store", name: stock.store.clone() });
            }
        }
        self.product_index.insert(key, self.products.len());
        self.products.push(product);
        Ok(())
    }

    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<(), CatalogError> {
        let key = Self::unique_key(&self.recipe_index, "recipe", &recipe.name)?;
        self.recipe_index.insert(key, self.recipes.len());
        self.recipes.push(recipe);
        Ok(())
    }

    /// Add an ingredient whose recipe and product already exist
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> Result<(), CatalogError> {
        self.recipe(&ingredient.recipe)
            .ok_or_else(|| Self::not_found("recipe", &ingredient.recipe))?;
        self.product(&ingredient.product)
            .ok_or_else(|| Self::not_found("product", &ingredient.product))?;
        Quantity::try_new(ingredient.quantity.magnitude, ingredient.quantity.unit)
            .map_err(|source| CatalogError::Ingredient {
                recipe: ingredient.recipe.clone(),
                product: ingredient.product.clone(),
                source,
            })?;
        self.ingredients.push(ingredient);
        Ok(())
    }

    fn add_ingredient_entry(&mut self, recipe: &str, entry: IngredientEntry) -> Result<(), CatalogError> {
        let quantity = UNITS.lookup(&entry.unit)
            .and_then(|unit| Quantity::try_new(entry.quantity, unit))
            .map_err(|source| CatalogError::Ingredient {
                recipe: recipe.to_string(),
                product: entry.product.clone(),
                source,
            })?;
        self.add_ingredient(Ingredient {
            recipe: recipe.to_string(),
            product: entry.product,
            quantity,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.category_index.get(&NameKey::new(name)).map(|&i| &self.categories[i])
    }

    pub fn store(&self, name: &str) -> Option<&Store> {
        self.store_index.get(&NameKey::new(name)).map(|&i| &self.stores[i])
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.product_index.get(&NameKey::new(name)).map(|&i| &self.products[i])
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipe_index.get(&NameKey::new(name)).map(|&i| &self.recipes[i])
    }

    /// Ingredients belonging to one recipe, in insertion order
    pub fn recipe_ingredients(&self, recipe: &str) -> Vec<&Ingredient> {
        let key = NameKey::new(recipe);
        self.ingredients.iter()
            .filter(|i| NameKey::new(&i.recipe) == key)
            .collect()
    }

    /// Per-dimension totals for one product
    pub fn product_totals(&self, product: &str) -> Result<Vec<Quantity>, CatalogError> {
        let canonical = self.product(product)
            .ok_or_else(|| Self::not_found("product", product))?;
        product_totals(self, &canonical.name)
    }

    /// Totals for every product, in insertion order
    pub fn all_totals(&self) -> Result<Vec<(&Product, Vec<Quantity>)>, CatalogError> {
        self.products.iter()
            .map(|p| Ok((p, product_totals(self, &p.name)?)))
            .collect()
    }

    fn unique_key(
        index: &HashMap<NameKey, usize>,
        kind: &'static str,
        name: &str,
    ) -> Result<NameKey, CatalogError> {
        let key = NameKey::new(name);
        if key.is_empty() {
            return Err(CatalogError::EmptyName { kind });
        }
        if index.contains_key(&key) {
            return Err(CatalogError::Duplicate { kind, name: name.to_string() });
        }
        Ok(key)
    }

    fn not_found(kind: &'static str, name: &str) -> CatalogError {
        CatalogError::NotFound { kind, name: name.to_string() }
    }
}

impl IngredientSource for Catalog {
    fn product_names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.name.clone()).collect()
    }

    fn ingredients_for(&self, product: &str) -> Vec<&Ingredient> {
        let key = NameKey::new(product);
        self.ingredients.iter()
            .filter(|i| NameKey::new(&i.product) == key)
            .collect()
    }
}
