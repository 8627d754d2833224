//! Integration tests for Local Market.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p local-market-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `custom_product_flow` - Selection, completeness and pricing across a session
//! - `cart_commit` - Commit protocol against in-memory and failing carts
//! - `catalog_payloads` - Catalog API JSON payloads and client failures
//!
//! Shared fixtures live here so every test file builds the same catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

use local_market_configurator::{CartError, CartSink};
use local_market_core::{
    AddonOffer, CartLineItem, CustomProductDefinition, LineItemId, PricingStrategy, Product,
    ProductId,
};
use rust_decimal::Decimal;

/// A three-step bowl: one base, two toppings, optional extras.
pub const BOWL_JSON: &str = r#"{
    "id": 7,
    "name": "Build your bowl",
    "description": "Pick a base, two toppings and any extras",
    "pricingStrategy": "SUM",
    "steps": [
        {
            "stepNumber": 1,
            "name": "Base",
            "requiredItemCount": 1,
            "availableItems": [
                {"itemKey": "acai", "product": {"id": 101, "name": "Açaí", "basePrice": "20.00", "promotionalPrice": "18.00"}},
                {"itemKey": "cupuacu", "product": {"id": 102, "name": "Cupuaçu", "basePrice": "22.00"}}
            ]
        },
        {
            "stepNumber": 2,
            "name": "Toppings",
            "requiredItemCount": 2,
            "availableItems": [
                {"itemKey": "granola", "product": {"id": 201, "name": "Granola", "basePrice": "3.00"}},
                {"itemKey": "banana", "product": {"id": 202, "name": "Banana", "basePrice": "2.00"}},
                {"itemKey": "honey", "product": {"id": 203, "name": "Honey", "basePrice": "4.00"}}
            ]
        },
        {
            "stepNumber": 3,
            "name": "Extras",
            "availableItems": [
                {"itemKey": "nutella", "product": {"id": 301, "name": "Nutella", "basePrice": "6.00"}},
                {"itemKey": "paçoca", "product": {"id": 302, "name": "Paçoca", "basePrice": "1.50"}}
            ]
        }
    ]
}"#;

/// The bowl definition with the given pricing strategy.
///
/// # Panics
///
/// Panics if [`BOWL_JSON`] stops parsing.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn bowl(strategy: PricingStrategy) -> CustomProductDefinition {
    let mut definition = CustomProductDefinition::from_json(BOWL_JSON).unwrap();
    definition.pricing_strategy = strategy;
    if strategy == PricingStrategy::Fixed {
        definition.fixed_price = Some(money(2990));
    }
    definition
}

/// Add-ons offered with the bowl.
#[must_use]
pub fn bowl_addons() -> Vec<AddonOffer> {
    vec![
        AddonOffer {
            product: Product::new(ProductId::new(501), "Water", money(400)),
            available_quantity: 10,
        },
        AddonOffer {
            product: Product::new(ProductId::new(502), "Juice", money(900))
                .with_promotional_price(money(750)),
            available_quantity: 2,
        },
    ]
}

/// Amount from cents.
#[must_use]
pub fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Cart that accepts a fixed number of lines, then refuses the rest.
#[derive(Debug, Default)]
pub struct FlakyCart {
    accepted: Vec<(LineItemId, CartLineItem)>,
    capacity: usize,
}

impl FlakyCart {
    /// Cart that accepts `capacity` lines.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            accepted: Vec::new(),
            capacity,
        }
    }

    /// Change how many lines the cart accepts in total.
    pub const fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    /// Lines accepted so far.
    #[must_use]
    pub fn accepted(&self) -> &[(LineItemId, CartLineItem)] {
        &self.accepted
    }
}

impl CartSink for FlakyCart {
    fn add_line_item(&mut self, item: CartLineItem) -> Result<LineItemId, CartError> {
        if self.accepted.len() >= self.capacity {
            return Err(CartError::Rejected("cart unavailable".to_string()));
        }
        let id = LineItemId::generate();
        self.accepted.push((id, item));
        Ok(id)
    }
}
