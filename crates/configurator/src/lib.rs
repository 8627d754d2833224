//! Local Market Configurator - custom-product selection and pricing engine.
//!
//! A configuration session walks a shopper through the steps of a custom
//! product (or the variation and add-ons of a catalog product), keeps the
//! per-step selections within their limits, reports what is still missing,
//! derives prices on demand and finally hands finished lines to a cart.
//!
//! # Architecture
//!
//! Everything here is synchronous and owned by a single session value.
//! Derived values (completeness, totals) are plain functions over the
//! session's state, recomputed whenever they are asked for. The cart and the
//! notification channel are collaborators passed in by the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use local_market_configurator::{CustomProductSession, MemoryCart, TracingNotifier};
//!
//! let mut session = CustomProductSession::new(definition, TracingNotifier);
//! session.toggle_item_selection(1, &"thin-crust".into());
//! session.toggle_item_selection(2, &"mozzarella".into());
//!
//! if session.is_product_complete() {
//!     let mut cart = MemoryCart::new();
//!     let receipt = session.commit(&mut cart)?;
//! }
//! ```
//!
//! # Modules
//!
//! - [`selection`] - Per-step selection store with FIFO eviction
//! - [`evaluator`] - Step and product completeness
//! - [`pricing`] - Price resolution and aggregation
//! - [`addons`] - Add-on quantities
//! - [`variation`] - Mutually exclusive variation choice
//! - [`session`] - Configuration sessions and the commit protocol
//! - [`cart`] - Cart collaborator trait and an in-memory cart
//! - [`notify`] - Transient shopper notices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod addons;
pub mod cart;
pub mod error;
pub mod evaluator;
pub mod notify;
pub mod pricing;
pub mod selection;
pub mod session;
pub mod variation;

pub use addons::{AddonBasket, AddonChange, AddonSelection};
pub use cart::{CartEntry, CartSink, MemoryCart};
pub use error::{CartError, CommitError};
pub use evaluator::MissingStep;
pub use notify::{Notice, Notifier, RecordingNotifier, TracingNotifier};
pub use pricing::{InstallmentOffer, ProductPricing, unit_price_of};
pub use selection::{SelectionState, ToggleOutcome};
pub use session::{CommitReceipt, CustomProductSession, ProductSession};
pub use variation::VariationSelection;
