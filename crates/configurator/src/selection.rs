//! Per-step selection store.
//!
//! Each step keeps its chosen item keys in selection order. When a step is
//! full, choosing another item evicts the one chosen earliest, so the number
//! of chosen items never exceeds the step's requirement.

use std::collections::{BTreeMap, VecDeque};

use local_market_core::ItemKey;

/// What a toggle did to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The item was added.
    Selected,
    /// The item was already chosen and has been removed.
    Deselected,
    /// The step was full; `evicted` made room for the new item.
    Replaced {
        /// The earliest-selected item, now removed.
        evicted: ItemKey,
    },
    /// Nothing changed (unknown step or item, or a committed session).
    Ignored,
}

/// Chosen item keys per step number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    steps: BTreeMap<u32, VecDeque<ItemKey>>,
}

impl SelectionState {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `item_key` within a step that expects `required_item_count`
    /// items.
    ///
    /// A requirement of zero leaves the step unconstrained.
    pub fn toggle(
        &mut self,
        step_number: u32,
        item_key: &ItemKey,
        required_item_count: u32,
    ) -> ToggleOutcome {
        let chosen = self.steps.entry(step_number).or_default();

        if let Some(pos) = chosen.iter().position(|k| k == item_key) {
            chosen.remove(pos);
            return ToggleOutcome::Deselected;
        }

        let full = required_item_count > 0 && count_of(chosen) >= required_item_count;
        if full {
            // Oldest choice makes room for the new one
            let evicted = chosen.pop_front();
            chosen.push_back(item_key.clone());
            return evicted.map_or(ToggleOutcome::Selected, |evicted| ToggleOutcome::Replaced {
                evicted,
            });
        }

        chosen.push_back(item_key.clone());
        ToggleOutcome::Selected
    }

    /// Whether `item_key` is currently chosen in the step.
    #[must_use]
    pub fn is_selected(&self, step_number: u32, item_key: &ItemKey) -> bool {
        self.steps
            .get(&step_number)
            .is_some_and(|chosen| chosen.contains(item_key))
    }

    /// Number of items chosen in the step; 0 for untouched steps.
    #[must_use]
    pub fn selected_count(&self, step_number: u32) -> u32 {
        self.steps.get(&step_number).map_or(0, count_of)
    }

    /// Keys chosen in the step, oldest first.
    pub fn selected_keys(&self, step_number: u32) -> impl Iterator<Item = &ItemKey> {
        self.steps.get(&step_number).into_iter().flatten()
    }

    /// Every chosen key with its step number, ordered by step then by
    /// selection order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ItemKey)> {
        self.steps
            .iter()
            .flat_map(|(step, chosen)| chosen.iter().map(move |key| (*step, key)))
    }

    /// Drop every choice made in a step.
    pub fn clear_step(&mut self, step_number: u32) {
        self.steps.remove(&step_number);
    }

    /// Total number of chosen items across all steps.
    #[must_use]
    pub fn total_selected(&self) -> usize {
        self.steps.values().map(VecDeque::len).sum()
    }

    /// Whether nothing is chosen in any step.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.values().all(VecDeque::is_empty)
    }
}

fn count_of(chosen: &VecDeque<ItemKey>) -> u32 {
    u32::try_from(chosen.len()).unwrap_or(u32::MAX)
}
