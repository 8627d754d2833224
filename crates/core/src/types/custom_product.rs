//! Multi-step ("custom") product definitions.
//!
//! A definition is loaded once per product and never mutated. It lists the
//! steps a shopper walks through, how many items each step expects, and the
//! strategy used to derive the product's price from the chosen items.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{CustomProductId, ItemKey};
use super::product::Product;
use super::status::PricingStrategy;

/// Structural problems that make a fetched definition unusable.
///
/// A step that asks for more items than it offers is deliberately absent:
/// that is surfaced as a step that can never be completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Step numbers are 1-based.
    #[error("step number must be at least 1 (got {0})")]
    InvalidStepNumber(u32),
    /// Two steps share the same number.
    #[error("duplicate step number {0}")]
    DuplicateStep(u32),
    /// Two items of one step share the same key.
    #[error("duplicate item key '{item_key}' in step {step_number}")]
    DuplicateItem {
        /// Step containing the duplicate.
        step_number: u32,
        /// The repeated key.
        item_key: ItemKey,
    },
    /// A fixed-price product without a fixed price.
    #[error("pricing strategy FIXED requires a fixed price")]
    MissingFixedPrice,
}

/// A selectable item within a step, backed by a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepItem {
    /// Key unique within the step's available items.
    pub item_key: ItemKey,
    /// The product this item represents.
    pub product: Product,
}

/// One stage of a custom product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    /// 1-based step number; defines display and iteration order.
    pub step_number: u32,
    /// Step title.
    pub name: String,
    /// Optional step instructions.
    #[serde(default)]
    pub description: String,
    /// Exact number of items the step expects. Zero marks an optional step.
    #[serde(default)]
    pub required_item_count: u32,
    /// Items offered in display order.
    #[serde(default)]
    pub available_items: Vec<StepItem>,
}

impl StepDefinition {
    /// Look up an item offered by this step.
    #[must_use]
    pub fn item(&self, key: &ItemKey) -> Option<&StepItem> {
        self.available_items.iter().find(|item| &item.item_key == key)
    }

    /// Whether the step places no requirement on the shopper.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.required_item_count == 0
    }
}

/// A configurable product assembled from per-step selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomProductDefinition {
    /// Custom product ID.
    pub id: CustomProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// How the price is derived from the selections.
    pub pricing_strategy: PricingStrategy,
    /// Price used by [`PricingStrategy::Fixed`].
    #[serde(default)]
    pub fixed_price: Option<Decimal>,
    /// Steps, iterated in `step_number` order once [`sort_steps`](Self::sort_steps) ran.
    pub steps: Vec<StepDefinition>,
}

impl CustomProductDefinition {
    /// Look up a step by its number.
    #[must_use]
    pub fn step(&self, step_number: u32) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.step_number == step_number)
    }

    /// Order steps by `step_number`; every consumer iterates `steps` in
    /// vector order.
    pub fn sort_steps(&mut self) {
        self.steps.sort_by_key(|step| step.step_number);
    }

    /// Check the structural rules a definition must satisfy before a
    /// configuration session may be started from it.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in step order.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.pricing_strategy == PricingStrategy::Fixed && self.fixed_price.is_none() {
            return Err(DefinitionError::MissingFixedPrice);
        }

        let mut seen_steps = HashSet::new();
        for step in &self.steps {
            if step.step_number == 0 {
                return Err(DefinitionError::InvalidStepNumber(step.step_number));
            }
            if !seen_steps.insert(step.step_number) {
                return Err(DefinitionError::DuplicateStep(step.step_number));
            }

            let mut seen_items = HashSet::new();
            for item in &step.available_items {
                if !seen_items.insert(&item.item_key) {
                    return Err(DefinitionError::DuplicateItem {
                        step_number: step.step_number,
                        item_key: item.item_key.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse a definition from JSON, validate it and order its steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the definition fails
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let mut definition: Self = serde_json::from_str(json)?;
        definition.validate()?;
        definition.sort_steps();
        Ok(definition)
    }
}

/// Errors that can occur when loading a definition from JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Payload could not be parsed.
    #[error("invalid definition JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Payload parsed but is structurally invalid.
    #[error("invalid definition: {0}")]
    Definition(#[from] DefinitionError),
}
