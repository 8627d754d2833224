//! Catalog API client implementation.
//!
//! Plain JSON over `reqwest` 0.13. Responses are cached with `moka` for the
//! configured TTL.

use std::sync::Arc;

use local_market_core::{
    AddonOffer, CategoryId, CustomProductDefinition, CustomProductId, Product, ProductId,
};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::cache::{CacheKey, CacheValue};
use crate::config::ClientConfig;
use crate::error::CatalogError;

/// Characters of an error body kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 200;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("cached_entries", &self.inner.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                api_token: config.api_token.clone(),
                cache,
            }),
        })
    }

    /// Fetch and decode the JSON document behind `key`.
    async fn get_json<T: DeserializeOwned>(&self, key: CacheKey) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(&key.path())?;

        let mut request = self
            .inner
            .client
            .get(url.clone())
            .header("Accept", "application/json");
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }
        let response = request.send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let body: String = response_text.chars().take(ERROR_BODY_LIMIT).collect();
            tracing::error!(status = %status, body = %body, "Catalog API returned non-success status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(ERROR_BODY_LIMIT).collect::<String>(),
                "Failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Custom Product Methods
    // =========================================================================

    /// Get a custom-product definition.
    ///
    /// The definition is validated before it is cached or returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the definition is invalid.
    #[instrument(skip(self), fields(custom_product_id = %id))]
    pub async fn custom_product(
        &self,
        id: CustomProductId,
    ) -> Result<CustomProductDefinition, CatalogError> {
        let key = CacheKey::CustomProduct(id);
        if let Some(CacheValue::CustomProduct(definition)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for custom product");
            return Ok(*definition);
        }

        let mut definition: CustomProductDefinition = self.get_json(key).await?;
        definition.validate()?;
        definition.sort_steps();

        self.inner
            .cache
            .insert(key, CacheValue::CustomProduct(Box::new(definition.clone())))
            .await;
        Ok(definition)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a catalog product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.get_json(key).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Get the products listed in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn products_by_category(&self, id: CategoryId) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::CategoryProducts(id);
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for category products");
            return Ok(products);
        }

        let products: Vec<Product> = self.get_json(key).await?;
        debug!(count = products.len(), "Fetched category products");
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Get the add-ons offered with products of a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn addons(&self, category_id: CategoryId) -> Result<Vec<AddonOffer>, CatalogError> {
        let key = CacheKey::CategoryAddons(category_id);
        if let Some(CacheValue::Addons(offers)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for add-ons");
            return Ok(offers);
        }

        let offers: Vec<AddonOffer> = self.get_json(key).await?;
        debug!(count = offers.len(), "Fetched add-on offers");
        self.inner
            .cache
            .insert(key, CacheValue::Addons(offers.clone()))
            .await;
        Ok(offers)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}
