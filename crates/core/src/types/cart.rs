//! Cart line items handed to the cart collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CustomProductId, ItemKey, LineItemId, ProductId, VariationId};

/// What a cart line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum LineProduct {
    /// A base catalog product (also used for add-ons).
    Catalog(ProductId),
    /// A configured custom product.
    Custom(CustomProductId),
}

/// The variation chosen for a catalog line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationRef {
    /// Variation ID.
    pub id: VariationId,
    /// Variation display name.
    pub name: String,
}

/// Summary of an add-on attached to a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonLine {
    /// The add-on product.
    pub product_id: ProductId,
    /// Add-on display name.
    pub name: String,
    /// Number of add-on units.
    pub quantity: u32,
}

/// An item chosen in one step of a custom product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineComponent {
    /// Step the item was chosen in.
    pub step_number: u32,
    /// Key of the chosen item.
    pub item_key: ItemKey,
    /// Catalog product behind the item.
    pub product_id: ProductId,
}

/// A finalized line item.
///
/// Once produced, the line is owned by the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// What is being bought.
    pub product: LineProduct,
    /// Display name of the product.
    pub name: String,
    /// Chosen variation, for catalog products that have one.
    pub variation: Option<VariationRef>,
    /// Price of one unit after promotional override.
    pub unit_price: Decimal,
    /// Number of units, at least 1.
    pub quantity: u32,
    /// Free-text note from the shopper.
    pub observation: String,
    /// Add-ons attached to this line.
    pub addons: Vec<AddonLine>,
    /// Items chosen per step, for custom products.
    pub components: Vec<LineComponent>,
    /// Line this one is grouped under, for add-on lines.
    pub parent_line_item_id: Option<LineItemId>,
}

impl CartLineItem {
    /// Price of the line's own units, excluding add-on lines.
    #[must_use]
    pub fn base_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Whether this line is an add-on grouped under another line.
    #[must_use]
    pub const fn is_addon(&self) -> bool {
        self.parent_line_item_id.is_some()
    }
}
