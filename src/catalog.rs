//! Catalog - Products and Categories consumed by the composer
//!
//! The composer only reads the catalog. Writes belong to the product editor.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

pub type ProductId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, alias = "price_petit")]
    pub price_small: Option<f64>,
    #[serde(default, alias = "price_moyen")]
    pub price_medium: Option<f64>,
    #[serde(default, alias = "price_grand")]
    pub price_large: Option<f64>,
    #[serde(default, alias = "image_isolee_url")]
    pub image_isolated: Option<String>,
    #[serde(default, alias = "image_lifestyle_url")]
    pub image_lifestyle: Option<String>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            description: String::new(),
            price: None,
            price_small: None,
            price_medium: None,
            price_large: None,
            image_isolated: None,
            image_lifestyle: None,
        }
    }

    /// Case-insensitive substring match on the product name
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "icon_id")]
    pub icon_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of catalog records (hosted database, file, fixture)
pub trait CatalogStore {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError>;
    fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `{ "products": [...], "categories": [...] }` file.
    /// A missing file yields an empty catalog.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let catalog: Self = serde_json::from_str(&content)?;
        info!(
            path = %path.display(),
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            "catalog file loaded"
        );
        Ok(catalog)
    }

    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn add_category(&mut self, category: Category) {
        self.categories.push(category);
    }
}

impl CatalogStore for InMemoryCatalog {
    fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.clone())
    }
}

/// Latest known catalog state as seen by a composition session
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    categories: Vec<Category>,
    loading: bool,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self { products, categories, loading: false }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.products.iter().filter(|p| p.matches(query)).collect()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Accept a fetch result. Late results still win; a failure keeps the
    /// previous records.
    pub fn finish_load(
        &mut self,
        result: Result<(Vec<Product>, Vec<Category>), CatalogError>,
    ) -> Result<(), CatalogError> {
        self.loading = false;
        match result {
            Ok((products, categories)) => {
                info!(products = products.len(), "catalog snapshot accepted");
                self.products = products;
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching catalog: {}", e);
                Err(e)
            }
        }
    }
}

/// Fetch products and categories from a store in one go.
pub fn fetch_catalog(
    store: &dyn CatalogStore,
) -> Result<(Vec<Product>, Vec<Category>), CatalogError> {
    let products = store.list_products()?;
    let categories = store.list_categories()?;
    Ok((products, categories))
}
