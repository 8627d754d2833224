//! Session for a multi-step custom product.

use local_market_core::{
    AddonOffer, CartLineItem, CustomProductDefinition, DEFAULT_MAX_CART_QUANTITY, ItemKey,
    LineComponent, LineProduct, ProductId, SessionState,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::{CommitProgress, CommitReceipt, clamp_quantity, commit_lines, report_addon_change};
use crate::addons::{AddonBasket, AddonChange};
use crate::cart::CartSink;
use crate::error::CommitError;
use crate::evaluator::{self, MissingStep};
use crate::notify::{Notice, Notifier};
use crate::pricing;
use crate::selection::{SelectionState, ToggleOutcome};

/// Configuration of one custom product, from screen-open to commit.
#[derive(Debug)]
pub struct CustomProductSession<N> {
    definition: CustomProductDefinition,
    selection: SelectionState,
    addons: AddonBasket,
    quantity: u32,
    observation: String,
    committed: bool,
    progress: CommitProgress,
    notifier: N,
}

impl<N: Notifier> CustomProductSession<N> {
    /// Open a session over a validated definition.
    ///
    /// Steps are put in `step_number` order.
    #[must_use]
    pub fn new(mut definition: CustomProductDefinition, notifier: N) -> Self {
        definition.sort_steps();
        Self {
            definition,
            selection: SelectionState::new(),
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

    /// The definition being configured.
    #[must_use]
    pub const fn definition(&self) -> &CustomProductDefinition {
        &self.definition
    }

    /// Current selections.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
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

    // =========================================================================
    // Step selection
    // =========================================================================

    /// Select or deselect an item of a step.
    ///
    /// When the step is full, the earliest-selected item is replaced and a
    /// notice is emitted. Unknown steps or items, and toggles after commit,
    /// are ignored.
    pub fn toggle_item_selection(&mut self, step_number: u32, item_key: &ItemKey) -> ToggleOutcome {
        if self.committed || self.progress.is_started() {
            warn!(step_number, item_key = %item_key, "Toggle after commit ignored");
            return ToggleOutcome::Ignored;
        }

        let Some(step) = self.definition.step(step_number) else {
            warn!(step_number, "Toggle for unknown step ignored");
            return ToggleOutcome::Ignored;
        };
        if step.item(item_key).is_none() {
            warn!(step_number, item_key = %item_key, "Toggle for unknown item ignored");
            return ToggleOutcome::Ignored;
        }

        let outcome = self
            .selection
            .toggle(step_number, item_key, step.required_item_count);
        debug!(step_number, item_key = %item_key, ?outcome, "Selection toggled");

        if let ToggleOutcome::Replaced { evicted } = &outcome {
            self.notifier.notify(Notice::SelectionReplaced {
                step_number,
                evicted: evicted.clone(),
                selected: item_key.clone(),
            });
        }
        outcome
    }

    /// Whether an item is currently selected in a step.
    #[must_use]
    pub fn is_item_selected(&self, step_number: u32, item_key: &ItemKey) -> bool {
        self.selection.is_selected(step_number, item_key)
    }

    /// Number of items selected in a step.
    #[must_use]
    pub fn selected_count(&self, step_number: u32) -> u32 {
        self.selection.selected_count(step_number)
    }

    // =========================================================================
    // Completeness
    // =========================================================================

    /// Whether a step has all the items it requires. Unknown steps are not.
    #[must_use]
    pub fn is_step_complete(&self, step_number: u32) -> bool {
        self.definition
            .step(step_number)
            .is_some_and(|step| evaluator::is_step_complete(step, &self.selection))
    }

    /// Whether every step is complete; the gate for adding to the cart.
    #[must_use]
    pub fn is_product_complete(&self) -> bool {
        evaluator::is_product_complete(&self.definition, &self.selection)
    }

    /// Steps still missing items.
    #[must_use]
    pub fn incomplete_steps(&self) -> Vec<MissingStep> {
        evaluator::incomplete_steps(&self.definition, &self.selection)
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        evaluator::session_state(&self.definition, &self.selection, self.committed)
    }

    // =========================================================================
    // Quantity, observation and add-ons
    // =========================================================================

    /// Units of the configured product.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set the quantity, clamped to `1..=999`.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = clamp_quantity(quantity, DEFAULT_MAX_CART_QUANTITY);
    }

    /// Add one unit.
    pub fn increment_quantity(&mut self) {
        self.set_quantity(self.quantity.saturating_add(1));
    }

    /// Remove one unit, never going below 1.
    pub fn decrement_quantity(&mut self) {
        self.set_quantity(self.quantity.saturating_sub(1));
    }

    /// Shopper's note for the line.
    #[must_use]
    pub fn observation(&self) -> &str {
        &self.observation
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

    /// Selected quantity of an add-on.
    #[must_use]
    pub fn addon_quantity(&self, product_id: ProductId) -> u32 {
        self.addons.quantity(product_id)
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Price of one configured unit under the definition's strategy.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        pricing::custom_product_total(&self.definition, &self.selection)
    }

    /// Line total: units plus add-ons.
    #[must_use]
    pub fn total(&self) -> Decimal {
        pricing::line_item_total(self.unit_price(), self.quantity, self.addons.priced())
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// The parent line this session would add to the cart.
    #[must_use]
    pub fn line_item(&self) -> CartLineItem {
        let selection = &self.selection;
        let components = self
            .definition
            .steps
            .iter()
            .flat_map(move |step| {
                selection
                    .selected_keys(step.step_number)
                    .filter_map(move |key| step.item(key))
                    .map(move |item| LineComponent {
                        step_number: step.step_number,
                        item_key: item.item_key.clone(),
                        product_id: item.product.id,
                    })
            })
            .collect();

        CartLineItem {
            product: LineProduct::Custom(self.definition.id),
            name: self.definition.name.clone(),
            variation: None,
            unit_price: self.unit_price(),
            quantity: self.quantity,
            observation: self.observation.clone(),
            addons: self.addons.summaries(),
            components,
            parent_line_item_id: None,
        }
    }

    /// Hand the configured product and its add-ons to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session was already committed, a required
    /// step is incomplete (nothing is sent to the cart), or the cart refuses
    /// a line. Lines accepted before a refusal are kept and not re-sent on
    /// the next attempt.
    pub fn commit<C: CartSink + ?Sized>(
        &mut self,
        cart: &mut C,
    ) -> Result<CommitReceipt, CommitError> {
        if self.committed {
            return Err(CommitError::AlreadyCommitted);
        }

        let missing = self.incomplete_steps();
        if !missing.is_empty() {
            self.notifier.notify(Notice::StepsIncomplete {
                steps: missing.iter().map(|m| m.name.clone()).collect(),
            });
            return Err(CommitError::Incomplete {
                missing_steps: missing.iter().map(|m| m.step_number).collect(),
            });
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
            custom_product_id = %self.definition.id,
            line_item_id = %line_item_id,
            addons = addon_line_ids.len(),
            total = %total,
            "Custom product committed to cart"
        );
        self.notifier.notify(Notice::AddedToCart {
            product: self.definition.name.clone(),
            quantity: self.quantity,
        });

        Ok(CommitReceipt {
            line_item_id,
            addon_line_ids,
            total,
        })
    }
}
