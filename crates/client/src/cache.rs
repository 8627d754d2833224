//! Cache types for catalog API responses.

use local_market_core::{
    AddonOffer, CategoryId, CustomProductDefinition, CustomProductId, Product, ProductId,
};

/// Cache key for fetched catalog entries.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    CustomProduct(CustomProductId),
    Product(ProductId),
    CategoryProducts(CategoryId),
    CategoryAddons(CategoryId),
}

impl CacheKey {
    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::CustomProduct(id) => format!("custom-products/{id}"),
            Self::Product(id) => format!("products/{id}"),
            Self::CategoryProducts(id) => format!("categories/{id}/products"),
            Self::CategoryAddons(id) => format!("categories/{id}/addons"),
        }
    }
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    CustomProduct(Box<CustomProductDefinition>),
    Product(Box<Product>),
    Products(Vec<Product>),
    Addons(Vec<AddonOffer>),
}
