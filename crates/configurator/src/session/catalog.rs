//! Session for a catalog product with an optional variation and add-ons.

use local_market_core::{
    AddonOffer, CartLineItem, LineProduct, Product, ProductId, SessionState, VariationId,
    VariationRef,
};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::{CommitProgress, CommitReceipt, clamp_quantity, commit_lines, report_addon_change};
use crate::addons::{AddonBasket, AddonChange};
use crate::cart::CartSink;
use crate::error::CommitError;
use crate::notify::{Notice, Notifier};
use crate::pricing::{self, ProductPricing};
use crate::variation::VariationSelection;

/// Configuration of one catalog product before it goes into the cart.
#[derive(Debug)]
pub struct ProductSession<N> {
    product: Product,
    variation: VariationSelection,
    addons: AddonBasket,
    quantity: u32,
    observation: String,
    committed: bool,
    progress: CommitProgress,
    notifier: N,
}

impl<N: Notifier> ProductSession<N> {
    /// Open a session for a product.
    #[must_use]
    pub fn new(product: Product, notifier: N) -> Self {
        Self {
            product,
            variation: VariationSelection::new(),
            addons: AddonBasket::default(),
            quantity: 1,
            observation: String::new(),
            committed: false,
            progress: CommitProgress::default(),
            notifier,
        }
    }

    /// Offer add-ons in this session.
    #[must_use]
    pub fn with_addon_offers(mut self, offers: Vec<AddonOffer>) -> Self {
        self.addons = AddonBasket::new(offers);
        self
    }

    /// The product being configured.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Add-on offers and quantities.
    #[must_use]
    pub const fn addons(&self) -> &AddonBasket {
        &self.addons
    }

    /// The notifier this session reports to.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Choose a variation, replacing any previous choice.
    ///
    /// Returns `false` for a variation the product does not have, or once
    /// the product line is in the cart.
    pub fn select_variation(&mut self, id: VariationId) -> bool {
        if self.committed || self.progress.is_started() {
            return false;
        }
        let selected = self.variation.select(&self.product, id);
        if !selected {
            warn!(product_id = %self.product.id, variation_id = %id, "Unknown variation ignored");
        }
        selected
    }

    /// ID of the chosen variation.
    #[must_use]
    pub const fn selected_variation(&self) -> Option<VariationId> {
        self.variation.chosen()
    }

    /// Whether the product may be added to the cart.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.variation.is_satisfied(&self.product)
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.committed {
            SessionState::Committed
        } else if self.is_complete() {
            SessionState::Complete
        } else {
            // Only a missing variation can hold a catalog product back
            SessionState::Empty
        }
    }

    /// Units of the product.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set the quantity, clamped to `1..=max_cart_quantity`.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = clamp_quantity(quantity, self.product.max_cart_quantity);
    }

    /// Add one unit, up to the product's cart limit.
    pub fn increment_quantity(&mut self) {
        self.set_quantity(self.quantity.saturating_add(1));
    }

    /// Remove one unit, never going below 1.
    pub fn decrement_quantity(&mut self) {
        self.set_quantity(self.quantity.saturating_sub(1));
    }

    /// Replace the shopper's note.
    pub fn set_observation(&mut self, observation: impl Into<String>) {
        self.observation = observation.into();
    }

    /// Add one unit of an add-on.
    pub fn increment_addon(&mut self, product_id: ProductId) -> AddonChange {
        let change = self.addons.increment(product_id);
        report_addon_change(&self.notifier, product_id, change);
        change
    }

    /// Remove one unit of an add-on.
    pub fn decrement_addon(&mut self, product_id: ProductId) -> AddonChange {
        self.addons.decrement(product_id)
    }

    /// Set an add-on's quantity.
    pub fn set_addon_quantity(&mut self, product_id: ProductId, quantity: u32) -> AddonChange {
        let change = self.addons.set_quantity(product_id, quantity);
        report_addon_change(&self.notifier, product_id, change);
        change
    }

    /// Price of one unit: the chosen variation's, else the product's.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.variation.unit_price(&self.product)
    }

    /// Price display bundle for the current choice.
    #[must_use]
    pub fn pricing(&self) -> ProductPricing {
        self.variation.chosen_variation(&self.product).map_or_else(
            || ProductPricing::for_product(&self.product),
            |variation| ProductPricing::for_priced(&self.product, variation),
        )
    }

    /// Line total: units plus add-ons.
    #[must_use]
    pub fn total(&self) -> Decimal {
        pricing::line_item_total(self.unit_price(), self.quantity, self.addons.priced())
    }

    /// The parent line this session would add to the cart.
    #[must_use]
    pub fn line_item(&self) -> CartLineItem {
        CartLineItem {
            product: LineProduct::Catalog(self.product.id),
            name: self.product.name.clone(),
            variation: self
                .variation
                .chosen_variation(&self.product)
                .map(|v| VariationRef {
                    id: v.id,
                    name: v.name.clone(),
                }),
            unit_price: self.unit_price(),
            quantity: self.quantity,
            observation: self.observation.clone(),
            addons: self.addons.summaries(),
            components: Vec::new(),
            parent_line_item_id: None,
        }
    }

    /// Hand the product and its add-ons to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session was already committed, a required
    /// variation is missing, or the cart refuses a line.
    pub fn commit<C: CartSink + ?Sized>(
        &mut self,
        cart: &mut C,
    ) -> Result<CommitReceipt, CommitError> {
        if self.committed {
            return Err(CommitError::AlreadyCommitted);
        }
        if !self.is_complete() {
            self.notifier.notify(Notice::VariationRequired {
                product: self.product.name.clone(),
            });
            return Err(CommitError::VariationRequired);
        }

        let total = self.total();
        let parent = self.line_item();
        let (line_item_id, addon_line_ids) =
            match commit_lines(cart, &mut self.progress, parent, &self.addons) {
                Ok(ids) => ids,
                Err(e) => {
                    if self.progress.is_started() {
                        warn!(
                            error = %e,
                            accepted_addons = self.progress.addons.len(),
                            "Commit interrupted after parent line"
                        );
                    }
                    return Err(e.into());
                }
            };
        self.committed = true;

        info!(
            product_id = %self.product.id,
            line_item_id = %line_item_id,
            addons = addon_line_ids.len(),
            total = %total,
            "Product committed to cart"
        );
        self.notifier.notify(Notice::AddedToCart {
            product: self.product.name.clone(),
            quantity: self.quantity,
        });

        Ok(CommitReceipt {
            line_item_id,
            addon_line_ids,
            total,
        })
    }
}
