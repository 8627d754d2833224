//! Error types for the configurator.

use local_market_core::LineItemId;
use thiserror::Error;

/// Errors a cart may report when a line is added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Lines must carry at least one unit.
    #[error("line quantity must be at least 1 (got {0})")]
    InvalidQuantity(u32),

    /// An add-on referenced a parent line the cart does not hold.
    #[error("parent line {0} not found in cart")]
    UnknownParent(LineItemId),

    /// The cart refused the line for its own reasons.
    #[error("cart rejected line: {0}")]
    Rejected(String),
}

/// Errors returned when committing a session to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// Required steps still lack selections.
    #[error("steps still incomplete: {missing_steps:?}")]
    Incomplete {
        /// Step numbers missing selections, in definition order.
        missing_steps: Vec<u32>,
    },

    /// The product requires a variation and none is chosen.
    #[error("a variation must be chosen")]
    VariationRequired,

    /// The session was already handed to the cart.
    #[error("session already committed")]
    AlreadyCommitted,

    /// The cart refused a line.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),
}
