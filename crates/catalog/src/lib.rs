use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use shared::domain::{Product, ProductId};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateProductId(ProductId),
    #[error("product {id} has invalid price {price}")]
    InvalidPrice { id: ProductId, price: f64 },
    #[error("product {id} has discount {discount}% outside 0..=100")]
    DiscountOutOfRange { id: ProductId, discount: u32 },
}

/// Supplies the ordered product list a session is built from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn load_products(&self) -> Result<Vec<Product>>;
    fn describe(&self) -> String;
}

pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductSource for StaticCatalog {
    async fn load_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("static catalog ({} products)", self.products.len())
    }
}

/// Reads either a bare JSON array of products or `{ "products": [...] }`.
pub struct JsonFileCatalog {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProductSource for JsonFileCatalog {
    async fn load_products(&self) -> Result<Vec<Product>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read catalog '{}'", self.path.display()))?;
        parse_catalog(&raw)
            .with_context(|| format!("failed to parse catalog '{}'", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("json catalog '{}'", self.path.display())
    }
}

pub fn parse_catalog(raw: &str) -> Result<Vec<Product>> {
    let document: CatalogDocument = serde_json::from_str(raw)?;
    Ok(match document {
        CatalogDocument::Bare(products) | CatalogDocument::Wrapped { products } => products,
    })
}

pub fn validate_products(products: &[Product]) -> std::result::Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id) {
            return Err(CatalogError::DuplicateProductId(product.id));
        }
        for price in [product.price, product.original_price] {
            if !price.is_finite() || price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: product.id,
                    price,
                });
            }
        }
        if product.discount_percentage > 100 {
            return Err(CatalogError::DiscountOutOfRange {
                id: product.id,
                discount: product.discount_percentage,
            });
        }
    }
    Ok(())
}

/// Loads and validates a catalog. Order is preserved as the session queue order.
pub async fn load_catalog(source: &dyn ProductSource) -> Result<Vec<Product>> {
    let products = source.load_products().await?;
    validate_products(&products)
        .with_context(|| format!("invalid catalog from {}", source.describe()))?;
    info!(
        "catalog: loaded {} products from {}",
        products.len(),
        source.describe()
    );
    Ok(products)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
