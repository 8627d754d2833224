//! Add-on quantities attached to a line.

use std::collections::BTreeMap;

use local_market_core::{AddonLine, AddonOffer, Product, ProductId};

/// Selected quantity per add-on product.
///
/// A quantity of zero is the same as the add-on being absent, so zero
/// entries are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonSelection {
    quantities: BTreeMap<ProductId, u32>,
}

impl AddonSelection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected quantity of an add-on; 0 when absent.
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.quantities.get(&product_id).copied().unwrap_or(0)
    }

    /// Set an add-on's quantity; 0 removes it.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.quantities.remove(&product_id);
        } else {
            self.quantities.insert(product_id, quantity);
        }
    }

    /// Iterate over selected add-ons and their quantities.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.quantities.iter().map(|(id, qty)| (*id, *qty))
    }

    /// Whether no add-on is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Remove every add-on.
    pub fn clear(&mut self) {
        self.quantities.clear();
    }
}

/// Result of changing an add-on's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddonChange {
    /// The quantity is now the contained value.
    Changed(u32),
    /// The quantity is already at the add-on's limit.
    LimitReached(u32),
    /// Nothing changed: the add-on is not offered, or is already at zero.
    Unchanged,
}

/// The add-ons offered to a session together with the chosen quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonBasket {
    offers: Vec<AddonOffer>,
    selection: AddonSelection,
}

impl AddonBasket {
    /// Create a basket over the given offers with nothing selected.
    #[must_use]
    pub fn new(offers: Vec<AddonOffer>) -> Self {
        Self {
            offers,
            selection: AddonSelection::new(),
        }
    }

    /// The offered add-ons.
    #[must_use]
    pub fn offers(&self) -> &[AddonOffer] {
        &self.offers
    }

    /// The chosen quantities.
    #[must_use]
    pub const fn selection(&self) -> &AddonSelection {
        &self.selection
    }

    fn offer(&self, product_id: ProductId) -> Option<&AddonOffer> {
        self.offers.iter().find(|o| o.product.id == product_id)
    }

    /// Add one unit of an add-on, up to its limit.
    pub fn increment(&mut self, product_id: ProductId) -> AddonChange {
        let Some(max) = self.offer(product_id).map(AddonOffer::max_quantity) else {
            return AddonChange::Unchanged;
        };
        let current = self.selection.quantity(product_id);
        if current >= max {
            return AddonChange::LimitReached(max);
        }
        self.selection.set_quantity(product_id, current + 1);
        AddonChange::Changed(current + 1)
    }

    /// Remove one unit of an add-on.
    pub fn decrement(&mut self, product_id: ProductId) -> AddonChange {
        let current = self.selection.quantity(product_id);
        if current == 0 {
            return AddonChange::Unchanged;
        }
        self.selection.set_quantity(product_id, current - 1);
        AddonChange::Changed(current - 1)
    }

    /// Set an add-on's quantity, clamped to its limit.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> AddonChange {
        let Some(max) = self.offer(product_id).map(AddonOffer::max_quantity) else {
            return AddonChange::Unchanged;
        };
        if quantity > max {
            self.selection.set_quantity(product_id, max);
            return AddonChange::LimitReached(max);
        }
        self.selection.set_quantity(product_id, quantity);
        AddonChange::Changed(quantity)
    }

    /// Selected quantity of an add-on; 0 when absent.
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.selection.quantity(product_id)
    }

    /// Selected add-on products with their quantities, in offer order.
    pub fn priced(&self) -> impl Iterator<Item = (&Product, u32)> {
        self.offers.iter().filter_map(|offer| {
            let qty = self.selection.quantity(offer.product.id);
            (qty > 0).then_some((&offer.product, qty))
        })
    }

    /// Summaries of the selected add-ons for the parent line.
    #[must_use]
    pub fn summaries(&self) -> Vec<AddonLine> {
        self.priced()
            .map(|(product, quantity)| AddonLine {
                product_id: product.id,
                name: product.name.clone(),
                quantity,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn offer(id: i32, available: u32) -> AddonOffer {
        AddonOffer {
            product: Product::new(ProductId::new(id), format!("Addon {id}"), Decimal::ONE),
            available_quantity: available,
        }
    }

    #[test]
    fn test_zero_quantity_is_absence() {
        let mut selection = AddonSelection::new();
        selection.set_quantity(ProductId::new(1), 2);
        assert_eq!(selection.quantity(ProductId::new(1)), 2);

        selection.set_quantity(ProductId::new(1), 0);
        assert!(selection.is_empty());
        assert_eq!(selection.quantity(ProductId::new(1)), 0);
    }

    #[test]
    fn test_increment_stops_at_available_quantity() {
        let mut basket = AddonBasket::new(vec![offer(1, 2)]);
        let id = ProductId::new(1);
        assert_eq!(basket.increment(id), AddonChange::Changed(1));
        assert_eq!(basket.increment(id), AddonChange::Changed(2));
        assert_eq!(basket.increment(id), AddonChange::LimitReached(2));
        assert_eq!(basket.quantity(id), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes() {
        let mut basket = AddonBasket::new(vec![offer(1, 5)]);
        let id = ProductId::new(1);
        basket.increment(id);
        assert_eq!(basket.decrement(id), AddonChange::Changed(0));
        assert_eq!(basket.decrement(id), AddonChange::Unchanged);
        assert!(basket.selection().is_empty());
    }

    #[test]
    fn test_unknown_addon_is_ignored() {
        let mut basket = AddonBasket::new(vec![offer(1, 5)]);
        assert_eq!(basket.increment(ProductId::new(99)), AddonChange::Unchanged);
        assert_eq!(basket.set_quantity(ProductId::new(99), 3), AddonChange::Unchanged);
        assert!(basket.selection().is_empty());
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut basket = AddonBasket::new(vec![offer(1, 3)]);
        assert_eq!(
            basket.set_quantity(ProductId::new(1), 10),
            AddonChange::LimitReached(3)
        );
        assert_eq!(basket.quantity(ProductId::new(1)), 3);
    }

    #[test]
    fn test_priced_follows_offer_order() {
        let mut basket = AddonBasket::new(vec![offer(5, 9), offer(2, 9), offer(7, 9)]);
        basket.set_quantity(ProductId::new(7), 1);
        basket.set_quantity(ProductId::new(5), 2);

        let ids: Vec<(i32, u32)> = basket.priced().map(|(p, q)| (p.id.as_i32(), q)).collect();
        assert_eq!(ids, vec![(5, 2), (7, 1)]);

        let summaries = basket.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "Addon 5");
    }
}
