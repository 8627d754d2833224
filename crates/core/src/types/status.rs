//! Status and strategy enums.

use serde::{Deserialize, Serialize};

/// Rule used to derive a custom product's price from its selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingStrategy {
    /// Cheapest selected item.
    Lowest,
    /// Arithmetic mean of the selected items.
    Average,
    /// Most expensive selected item.
    Highest,
    /// The definition's fixed price, whatever is selected.
    Fixed,
    /// Sum of every selected item.
    Sum,
}

impl std::fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lowest => write!(f, "LOWEST"),
            Self::Average => write!(f, "AVERAGE"),
            Self::Highest => write!(f, "HIGHEST"),
            Self::Fixed => write!(f, "FIXED"),
            Self::Sum => write!(f, "SUM"),
        }
    }
}

impl std::str::FromStr for PricingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOWEST" => Ok(Self::Lowest),
            "AVERAGE" => Ok(Self::Average),
            "HIGHEST" => Ok(Self::Highest),
            "FIXED" => Ok(Self::Fixed),
            "SUM" => Ok(Self::Sum),
            _ => Err(format!("invalid pricing strategy: {s}")),
        }
    }
}

/// Lifecycle of a configuration session.
///
/// `Empty -> Partial <-> Complete -> Committed`. Only `Complete` permits the
/// commit transition; `Committed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// Just opened, nothing selected.
    #[default]
    Empty,
    /// Some selections made, but a required step is still missing items.
    Partial,
    /// Every required step is satisfied; the line may be added to the cart.
    Complete,
    /// Handed off to the cart.
    Committed,
}

impl SessionState {
    /// Whether the "add to cart" action is enabled.
    #[must_use]
    pub const fn can_commit(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Severity of a transient message shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// Informational, e.g. a replaced selection.
    Info,
    /// Something the shopper must fix before continuing.
    Warning,
    /// A completed action.
    Success,
}
