//! Catalog API fetch commands.
//!
//! # Environment Variables
//!
//! - `MARKET_API_BASE_URL` - Base URL of the catalog API
//! - `MARKET_API_TOKEN` - Optional bearer token

use local_market_client::{CatalogClient, ClientConfig};
use local_market_configurator::ProductPricing;
use local_market_core::{CategoryId, CustomProductId, ProductId};
use tracing::info;

use super::price::breakdown;

fn client() -> Result<CatalogClient, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(?config, "Loaded client configuration");
    Ok(CatalogClient::new(&config)?)
}

/// Fetch a custom-product definition and log its steps.
///
/// # Errors
///
/// Returns an error if configuration is missing or the fetch fails.
pub async fn custom_product(id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let definition = client()?.custom_product(CustomProductId::new(id)).await?;

    info!(
        name = %definition.name,
        strategy = %definition.pricing_strategy,
        "Custom product {}",
        definition.id
    );
    for step in &definition.steps {
        info!(
            "  Step {}: {} (choose {}, {} items)",
            step.step_number,
            step.name,
            step.required_item_count,
            step.available_items.len()
        );
    }
    Ok(())
}

/// Fetch a catalog product and log its price breakdown.
///
/// # Errors
///
/// Returns an error if configuration is missing or the fetch fails.
pub async fn product(id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let product = client()?.product(ProductId::new(id)).await?;

    info!("Product {}: {}", product.id, product.name);
    for line in breakdown(&ProductPricing::for_product(&product)) {
        info!("  {line}");
    }
    for variation in &product.variations {
        info!("  Variation {}: {}", variation.id, variation.name);
    }
    Ok(())
}

/// Fetch the products of a category and log one line each.
///
/// # Errors
///
/// Returns an error if configuration is missing or the fetch fails.
pub async fn category(id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let products = client()?.products_by_category(CategoryId::new(id)).await?;

    info!(count = products.len(), "Category {id}");
    for product in &products {
        let pricing = ProductPricing::for_product(product);
        info!("  {} {} ({})", product.id, product.name, pricing.unit_price);
    }
    Ok(())
}

/// Fetch the add-ons offered for a category and log their limits.
///
/// # Errors
///
/// Returns an error if configuration is missing or the fetch fails.
pub async fn addons(category: i32) -> Result<(), Box<dyn std::error::Error>> {
    let offers = client()?.addons(CategoryId::new(category)).await?;

    info!(count = offers.len(), "Add-ons for category {category}");
    for offer in &offers {
        info!(
            "  {} {} (max {})",
            offer.product.id,
            offer.product.name,
            offer.max_quantity()
        );
    }
    Ok(())
}
