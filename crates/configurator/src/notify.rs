//! Transient messages for the shopper.
//!
//! Sessions report replaced selections, validation failures and successful
//! commits through a [`Notifier`]. Delivery is fire and forget.

use std::cell::RefCell;

use local_market_core::{ItemKey, NoticeLevel, ProductId};
use serde::Serialize;

/// A message a session wants shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// A full step replaced its oldest choice.
    SelectionReplaced {
        /// Step that was full.
        step_number: u32,
        /// Item that was dropped.
        evicted: ItemKey,
        /// Item that took its place.
        selected: ItemKey,
    },
    /// Commit refused because required steps are missing items.
    StepsIncomplete {
        /// Names of the steps still missing items, in order.
        steps: Vec<String>,
    },
    /// Commit refused because no variation is chosen.
    VariationRequired {
        /// Product name.
        product: String,
    },
    /// An add-on is already at its maximum quantity.
    AddonLimitReached {
        /// The add-on product.
        product_id: ProductId,
        /// The quantity limit.
        limit: u32,
    },
    /// A line was added to the cart.
    AddedToCart {
        /// Product name.
        product: String,
        /// Units added.
        quantity: u32,
    },
}

impl Notice {
    /// Severity used to style the message.
    #[must_use]
    pub const fn level(&self) -> NoticeLevel {
        match self {
            Self::SelectionReplaced { .. } | Self::AddonLimitReached { .. } => NoticeLevel::Info,
            Self::StepsIncomplete { .. } | Self::VariationRequired { .. } => NoticeLevel::Warning,
            Self::AddedToCart { .. } => NoticeLevel::Success,
        }
    }

    /// Human-readable text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::SelectionReplaced { .. } => "Selection limit reached, item replaced".to_string(),
            Self::StepsIncomplete { steps } => {
                format!("Complete the remaining steps: {}", steps.join(", "))
            }
            Self::VariationRequired { product } => format!("Choose an option for {product}"),
            Self::AddonLimitReached { limit, .. } => {
                format!("Add-on limit reached ({limit} max)")
            }
            Self::AddedToCart { product, quantity } => {
                format!("{quantity}x {product} added to cart")
            }
        }
    }
}

/// Channel that shows transient messages.
pub trait Notifier {
    /// Show a message. No acknowledgment is expected.
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Notifier that writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        let message = notice.message();
        match notice.level() {
            NoticeLevel::Info | NoticeLevel::Success => {
                tracing::info!(?notice, "{message}");
            }
            NoticeLevel::Warning => tracing::warn!(?notice, "{message}"),
        }
    }
}

/// Notifier that keeps every notice, for callers that render them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of the notices received so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Remove and return the notices received so far.
    pub fn take(&self) -> Vec<Notice> {
        self.notices.take()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let replaced = Notice::SelectionReplaced {
            step_number: 1,
            evicted: ItemKey::new("a"),
            selected: ItemKey::new("b"),
        };
        assert_eq!(replaced.level(), NoticeLevel::Info);
        assert_eq!(replaced.message(), "Selection limit reached, item replaced");

        let incomplete = Notice::StepsIncomplete {
            steps: vec!["Base".to_string(), "Toppings".to_string()],
        };
        assert_eq!(incomplete.level(), NoticeLevel::Warning);
        assert_eq!(
            incomplete.message(),
            "Complete the remaining steps: Base, Toppings"
        );
    }

    #[test]
    fn test_recording_notifier_through_reference() {
        let recorder = RecordingNotifier::new();
        let by_ref = &recorder;
        by_ref.notify(Notice::AddedToCart {
            product: "Açaí".to_string(),
            quantity: 2,
        });
        assert_eq!(recorder.notices().len(), 1);
        assert_eq!(recorder.take().len(), 1);
        assert!(recorder.notices().is_empty());
    }

    #[test]
    fn test_notice_serializes_with_tag() {
        let json = serde_json::to_value(Notice::AddonLimitReached {
            product_id: ProductId::new(3),
            limit: 2,
        })
        .unwrap();
        assert_eq!(json["type"], "addon_limit_reached");
        assert_eq!(json["limit"], 2);
    }
}
