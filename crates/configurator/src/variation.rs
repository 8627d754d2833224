//! Mutually exclusive variation choice for catalog products.

use local_market_core::{Product, Variation, VariationId};
use rust_decimal::Decimal;

use crate::pricing::unit_price_of;

/// The variation chosen for a product, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariationSelection {
    chosen: Option<VariationId>,
}

impl VariationSelection {
    /// Create a selection with nothing chosen.
    #[must_use]
    pub const fn new() -> Self {
        Self { chosen: None }
    }

    /// Choose a variation of `product`, replacing any previous choice.
    ///
    /// Returns `false`, leaving the choice untouched, when the product has
    /// no such variation.
    pub fn select(&mut self, product: &Product, id: VariationId) -> bool {
        if product.variation(id).is_none() {
            return false;
        }
        self.chosen = Some(id);
        true
    }

    /// ID of the chosen variation.
    #[must_use]
    pub const fn chosen(&self) -> Option<VariationId> {
        self.chosen
    }

    /// The chosen variation, looked up on `product`.
    #[must_use]
    pub fn chosen_variation<'a>(&self, product: &'a Product) -> Option<&'a Variation> {
        self.chosen.and_then(|id| product.variation(id))
    }

    /// Whether the product can be added to the cart with this choice.
    #[must_use]
    pub fn is_satisfied(&self, product: &Product) -> bool {
        !product.has_variation || self.chosen_variation(product).is_some()
    }

    /// Unit price of the chosen variation, or of the product itself.
    #[must_use]
    pub fn unit_price(&self, product: &Product) -> Decimal {
        self.chosen_variation(product)
            .map_or_else(|| unit_price_of(product), unit_price_of)
    }
}
