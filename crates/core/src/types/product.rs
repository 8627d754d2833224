//! Catalog product types.
//!
//! These mirror the JSON payloads served by the catalog API (camelCase field
//! names, decimals as strings).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariationId};

/// Cart quantity limit applied when the catalog does not set one.
pub const DEFAULT_MAX_CART_QUANTITY: u32 = 999;

const fn default_max_cart_quantity() -> u32 {
    DEFAULT_MAX_CART_QUANTITY
}

/// Anything carrying a base price and an optional promotional override.
///
/// Products, variations and add-ons all implement this so that a single
/// price-resolution rule can be applied to each of them.
pub trait Priced {
    /// Regular list price.
    fn base_price(&self) -> Decimal;

    /// Promotional price, when one is active.
    fn promotional_price(&self) -> Option<Decimal>;
}

/// A product from the base catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Regular price.
    pub base_price: Decimal,
    /// Promotional price; overrides `base_price` when present.
    #[serde(default)]
    pub promotional_price: Option<Decimal>,
    /// Number of installments offered at checkout.
    #[serde(default)]
    pub installment_count: Option<u32>,
    /// Whether the installments carry no interest.
    #[serde(default)]
    pub installments_interest_free: bool,
    /// Discount applied for cash payment, in percent.
    #[serde(default)]
    pub cash_discount_percent: Option<Decimal>,
    /// Maximum quantity of this product allowed in one cart line.
    #[serde(default = "default_max_cart_quantity")]
    pub max_cart_quantity: u32,
    /// Whether a variation must be chosen before adding to the cart.
    #[serde(default)]
    pub has_variation: bool,
    /// Mutually exclusive options (size, flavor, ...), each with its own price.
    #[serde(default)]
    pub variations: Vec<Variation>,
}

impl Product {
    /// Create a product with only the required fields set.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            image: None,
            base_price,
            promotional_price: None,
            installment_count: None,
            installments_interest_free: false,
            cash_discount_percent: None,
            max_cart_quantity: DEFAULT_MAX_CART_QUANTITY,
            has_variation: false,
            variations: Vec::new(),
        }
    }

    /// Set the promotional price.
    #[must_use]
    pub fn with_promotional_price(mut self, price: Decimal) -> Self {
        self.promotional_price = Some(price);
        self
    }

    /// Look up one of this product's variations.
    #[must_use]
    pub fn variation(&self, id: VariationId) -> Option<&Variation> {
        self.variations.iter().find(|v| v.id == id)
    }
}

impl Priced for Product {
    fn base_price(&self) -> Decimal {
        self.base_price
    }

    fn promotional_price(&self) -> Option<Decimal> {
        self.promotional_price
    }
}

/// One mutually exclusive option of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    /// Variation ID.
    pub id: VariationId,
    /// Display name (e.g., "Large").
    pub name: String,
    /// Regular price of this option.
    pub base_price: Decimal,
    /// Promotional price of this option.
    #[serde(default)]
    pub promotional_price: Option<Decimal>,
}

impl Priced for Variation {
    fn base_price(&self) -> Decimal {
        self.base_price
    }

    fn promotional_price(&self) -> Option<Decimal> {
        self.promotional_price
    }
}

/// An add-on candidate returned by the add-on list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonOffer {
    /// The add-on product.
    pub product: Product,
    /// How many units of this add-on may be attached.
    pub available_quantity: u32,
}

impl AddonOffer {
    /// Highest quantity that may be selected for this add-on.
    #[must_use]
    pub fn max_quantity(&self) -> u32 {
        self.available_quantity.min(self.product.max_cart_quantity)
    }
}
