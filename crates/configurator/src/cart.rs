//! Cart collaborator.
//!
//! Sessions hand finished lines to a [`CartSink`]. A parent line is added
//! first; each add-on follows as its own line pointing back at the parent's
//! ID so the cart can group them.

use chrono::{DateTime, Utc};
use local_market_core::{CartLineItem, LineItemId};
use rust_decimal::Decimal;

use crate::error::CartError;

/// Receiver of finished cart lines.
pub trait CartSink {
    /// Add a line and return the ID the cart assigned to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart refuses the line.
    fn add_line_item(&mut self, item: CartLineItem) -> Result<LineItemId, CartError>;
}

impl<C: CartSink + ?Sized> CartSink for &mut C {
    fn add_line_item(&mut self, item: CartLineItem) -> Result<LineItemId, CartError> {
        (**self).add_line_item(item)
    }
}

/// A line held by [`MemoryCart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    /// Assigned line ID.
    pub id: LineItemId,
    /// The line itself.
    pub item: CartLineItem,
    /// When the line was added.
    pub added_at: DateTime<Utc>,
}

/// In-memory cart, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCart {
    entries: Vec<CartEntry>,
}

impl MemoryCart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines, parents and add-ons, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a line by ID.
    #[must_use]
    pub fn get(&self, id: LineItemId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Lines that are not add-ons.
    pub fn top_level(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter().filter(|e| !e.item.is_addon())
    }

    /// Add-on lines grouped under `parent`.
    pub fn addons_of(&self, parent: LineItemId) -> impl Iterator<Item = &CartEntry> {
        self.entries
            .iter()
            .filter(move |e| e.item.parent_line_item_id == Some(parent))
    }

    /// Total of a top-level line including its add-on lines.
    #[must_use]
    pub fn line_total(&self, id: LineItemId) -> Option<Decimal> {
        let parent = self.get(id)?;
        let addons: Decimal = self.addons_of(id).map(|e| e.item.base_total()).sum();
        Some(parent.item.base_total() + addons)
    }

    /// Total of every line in the cart.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.entries.iter().map(|e| e.item.base_total()).sum()
    }

    /// Remove a line together with its add-ons.
    ///
    /// Returns `false` if no such line exists.
    pub fn remove(&mut self, id: LineItemId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| e.id != id && e.item.parent_line_item_id != Some(id));
        self.entries.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl CartSink for MemoryCart {
    fn add_line_item(&mut self, item: CartLineItem) -> Result<LineItemId, CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity(item.quantity));
        }
        if let Some(parent) = item
            .parent_line_item_id
            .filter(|parent| self.get(*parent).is_none())
        {
            return Err(CartError::UnknownParent(parent));
        }

        let id = LineItemId::generate();
        tracing::debug!(
            line_item_id = %id,
            name = %item.name,
            quantity = item.quantity,
            "Line added to cart"
        );
        self.entries.push(CartEntry {
            id,
            item,
            added_at: Utc::now(),
        });
        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use local_market_core::{LineProduct, ProductId};

    use super::*;

    fn line(id: i32, cents: i64, quantity: u32, parent: Option<LineItemId>) -> CartLineItem {
        CartLineItem {
            product: LineProduct::Catalog(ProductId::new(id)),
            name: format!("Product {id}"),
            variation: None,
            unit_price: Decimal::new(cents, 2),
            quantity,
            observation: String::new(),
            addons: Vec::new(),
            components: Vec::new(),
            parent_line_item_id: parent,
        }
    }

    #[test]
    fn test_add_and_group_addons() {
        let mut cart = MemoryCart::new();
        let parent = cart.add_line_item(line(1, 2500, 2, None)).unwrap();
        let addon = cart.add_line_item(line(2, 500, 3, Some(parent))).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.top_level().count(), 1);
        let grouped: Vec<LineItemId> = cart.addons_of(parent).map(|e| e.id).collect();
        assert_eq!(grouped, vec![addon]);
        assert_eq!(cart.line_total(parent), Some(Decimal::new(6500, 2)));
        assert_eq!(cart.subtotal(), Decimal::new(6500, 2));
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let mut cart = MemoryCart::new();
        assert_eq!(
            cart.add_line_item(line(1, 100, 0, None)),
            Err(CartError::InvalidQuantity(0))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_rejects_unknown_parent() {
        let mut cart = MemoryCart::new();
        let missing = LineItemId::generate();
        assert_eq!(
            cart.add_line_item(line(2, 100, 1, Some(missing))),
            Err(CartError::UnknownParent(missing))
        );
    }

    #[test]
    fn test_remove_drops_addons() {
        let mut cart = MemoryCart::new();
        let parent = cart.add_line_item(line(1, 1000, 1, None)).unwrap();
        cart.add_line_item(line(2, 100, 1, Some(parent))).unwrap();
        let other = cart.add_line_item(line(3, 300, 1, None)).unwrap();

        assert!(cart.remove(parent));
        assert_eq!(cart.len(), 1);
        assert!(cart.get(other).is_some());
        assert!(!cart.remove(parent));
    }
}
