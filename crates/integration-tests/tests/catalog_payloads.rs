//! Integration tests for catalog API payloads.
//!
//! These verify that JSON as served by the catalog API decodes into the
//! shared types, that malformed definitions are rejected at load time, and
//! that client failures surface as typed errors.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use local_market_client::{CatalogClient, CatalogError, ClientConfig};
use local_market_configurator::ProductPricing;
use local_market_core::{
    AddonOffer, CartLineItem, CustomProductDefinition, DefinitionError, LineProduct, LoadError,
    PricingStrategy, Product, ProductId,
};
use local_market_integration_tests::{BOWL_JSON, bowl, money};

// =============================================================================
// Definitions
// =============================================================================

#[test]
fn test_bowl_fixture_loads() {
    let definition = CustomProductDefinition::from_json(BOWL_JSON).unwrap();
    assert_eq!(definition.pricing_strategy, PricingStrategy::Sum);
    assert_eq!(definition.steps.len(), 3);
    assert!(definition.steps[2].is_optional());

    let acai = &definition.steps[0].available_items[0].product;
    assert_eq!(acai.promotional_price, Some(money(1800)));
    assert_eq!(acai.max_cart_quantity, 999);
}

#[test]
fn test_definition_round_trips_through_json() {
    let definition = bowl(PricingStrategy::Fixed);
    let json = serde_json::to_value(&definition).unwrap();
    assert_eq!(json["pricingStrategy"], "FIXED");
    assert_eq!(json["fixedPrice"], "29.90");

    let reloaded: CustomProductDefinition = serde_json::from_value(json).unwrap();
    assert_eq!(reloaded, definition);
}

#[test]
fn test_duplicate_steps_are_rejected() {
    let json = r#"{
        "id": 1,
        "name": "Broken",
        "pricingStrategy": "SUM",
        "steps": [
            {"stepNumber": 1, "name": "A"},
            {"stepNumber": 1, "name": "B"}
        ]
    }"#;
    let err = CustomProductDefinition::from_json(json).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Definition(DefinitionError::DuplicateStep(1))
    ));
}

#[test]
fn test_unknown_strategy_is_rejected() {
    let json = r#"{"id": 1, "name": "Broken", "pricingStrategy": "MEDIAN", "steps": []}"#;
    assert!(matches!(
        CustomProductDefinition::from_json(json),
        Err(LoadError::Json(_))
    ));
}

// =============================================================================
// Products and Add-ons
// =============================================================================

#[test]
fn test_product_payload_with_payment_terms() {
    let json = r#"{
        "id": 12,
        "name": "Cheese board",
        "basePrice": "120.00",
        "promotionalPrice": "96.00",
        "installmentCount": 4,
        "installmentsInterestFree": true,
        "cashDiscountPercent": "5",
        "maxCartQuantity": 3
    }"#;
    let product: Product = serde_json::from_str(json).unwrap();
    assert_eq!(product.max_cart_quantity, 3);
    assert!(!product.has_variation);

    let pricing = ProductPricing::for_product(&product);
    assert_eq!(pricing.unit_price, money(9600));
    assert_eq!(pricing.compare_at_price, Some(money(12000)));
    let installments = pricing.installments.unwrap();
    assert_eq!(installments.count, 4);
    assert_eq!(installments.amount, money(2400));
    assert!(installments.interest_free);
    assert_eq!(pricing.cash_price, Some(money(9120)));
}

#[test]
fn test_addon_offer_limit_uses_stock_and_cart_cap() {
    let json = r#"[
        {"product": {"id": 1, "name": "Sauce", "basePrice": "2.00", "maxCartQuantity": 3}, "availableQuantity": 10},
        {"product": {"id": 2, "name": "Fries", "basePrice": "9.00"}, "availableQuantity": 4}
    ]"#;
    let offers: Vec<AddonOffer> = serde_json::from_str(json).unwrap();
    assert_eq!(offers[0].max_quantity(), 3);
    assert_eq!(offers[1].max_quantity(), 4);
}

#[test]
fn test_cart_line_serializes_product_kind() {
    let line = CartLineItem {
        product: LineProduct::Catalog(ProductId::new(5)),
        name: "Tea".to_string(),
        variation: None,
        unit_price: money(650),
        quantity: 2,
        observation: String::new(),
        addons: Vec::new(),
        components: Vec::new(),
        parent_line_item_id: None,
    };
    let json = serde_json::to_value(&line).unwrap();
    assert_eq!(json["product"]["kind"], "catalog");
    assert_eq!(json["product"]["id"], 5);
    assert_eq!(line.base_total(), money(1300));
}

// =============================================================================
// Client Failures
// =============================================================================

#[tokio::test]
async fn test_unreachable_api_is_an_http_error() {
    // Reserve a port, then free it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base_url = format!("http://{addr}/").parse().unwrap();
    let client = CatalogClient::new(&ClientConfig::new(base_url)).unwrap();

    let err = client.product(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Http(_)));
}
