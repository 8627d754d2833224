//! Configuration sessions.
//!
//! A session lives from the moment a product's configuration screen opens
//! until its line is committed to the cart or the session is dropped.
//! Dropping a session before commit leaves the cart untouched. A commit the
//! cart refuses partway can be retried; lines already accepted are not sent
//! again.
//!
//! - [`CustomProductSession`] - multi-step custom products
//! - [`ProductSession`] - catalog products with a variation and add-ons

mod catalog;
mod custom;

pub use catalog::ProductSession;
pub use custom::CustomProductSession;

use local_market_core::{CartLineItem, LineItemId, LineProduct, ProductId};
use rust_decimal::Decimal;

use crate::addons::{AddonBasket, AddonChange};
use crate::cart::CartSink;
use crate::error::CartError;
use crate::notify::{Notice, Notifier};
use crate::pricing::unit_price_of;

/// What a successful commit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// ID of the parent line.
    pub line_item_id: LineItemId,
    /// IDs of the add-on lines, in offer order.
    pub addon_line_ids: Vec<LineItemId>,
    /// Line total including add-ons.
    pub total: Decimal,
}

/// Clamp a requested quantity into `1..=max`.
const fn clamp_quantity(quantity: u32, max: u32) -> u32 {
    let max = if max == 0 { 1 } else { max };
    if quantity == 0 {
        1
    } else if quantity > max {
        max
    } else {
        quantity
    }
}

/// Emit the notice matching an add-on change, if any.
fn report_addon_change<N: Notifier>(notifier: &N, product_id: ProductId, change: AddonChange) {
    if let AddonChange::LimitReached(limit) = change {
        notifier.notify(Notice::AddonLimitReached { product_id, limit });
    }
}

/// Lines the cart already accepted during an interrupted commit.
///
/// A retry resumes from here, so each line reaches the cart exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CommitProgress {
    parent: Option<LineItemId>,
    addons: Vec<(ProductId, LineItemId)>,
}

impl CommitProgress {
    /// Whether the parent line is already in the cart.
    const fn is_started(&self) -> bool {
        self.parent.is_some()
    }

    fn has_addon(&self, product_id: ProductId) -> bool {
        self.addons.iter().any(|(id, _)| *id == product_id)
    }
}

/// Add the parent line, then one line per selected add-on pointing at it.
///
/// Lines recorded in `progress` are skipped; every accepted line is
/// recorded before the next one is sent.
fn commit_lines<C: CartSink + ?Sized>(
    cart: &mut C,
    progress: &mut CommitProgress,
    parent: CartLineItem,
    addons: &AddonBasket,
) -> Result<(LineItemId, Vec<LineItemId>), CartError> {
    let parent_id = match progress.parent {
        Some(id) => id,
        None => {
            let id = cart.add_line_item(parent)?;
            progress.parent = Some(id);
            id
        }
    };

    for (product, quantity) in addons.priced() {
        if progress.has_addon(product.id) {
            continue;
        }
        let id = cart.add_line_item(CartLineItem {
            product: LineProduct::Catalog(product.id),
            name: product.name.clone(),
            variation: None,
            unit_price: unit_price_of(product),
            quantity,
            observation: String::new(),
            addons: Vec::new(),
            components: Vec::new(),
            parent_line_item_id: Some(parent_id),
        })?;
        progress.addons.push((product.id, id));
    }

    Ok((
        parent_id,
        progress.addons.iter().map(|(_, id)| *id).collect(),
    ))
}
