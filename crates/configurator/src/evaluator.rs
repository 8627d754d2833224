//! Completion and validation of a selection against its definition.

use local_market_core::{CustomProductDefinition, SessionState, StepDefinition};
use serde::Serialize;

use crate::selection::SelectionState;

/// A required step that still lacks selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingStep {
    /// Step number.
    pub step_number: u32,
    /// Step title, for the "steps remaining" message.
    pub name: String,
    /// Items still to be chosen.
    pub remaining: u32,
}

/// Whether the step has as many selections as it requires.
///
/// Optional steps are always complete. A step requiring more items than it
/// offers never is.
#[must_use]
pub fn is_step_complete(step: &StepDefinition, selection: &SelectionState) -> bool {
    selection.selected_count(step.step_number) >= step.required_item_count
}

/// Whether every step of the definition is complete.
#[must_use]
pub fn is_product_complete(
    definition: &CustomProductDefinition,
    selection: &SelectionState,
) -> bool {
    definition
        .steps
        .iter()
        .all(|step| is_step_complete(step, selection))
}

/// Required steps still missing selections, in definition order.
#[must_use]
pub fn incomplete_steps(
    definition: &CustomProductDefinition,
    selection: &SelectionState,
) -> Vec<MissingStep> {
    definition
        .steps
        .iter()
        .filter(|step| !is_step_complete(step, selection))
        .map(|step| MissingStep {
            step_number: step.step_number,
            name: step.name.clone(),
            remaining: step
                .required_item_count
                .saturating_sub(selection.selected_count(step.step_number)),
        })
        .collect()
}

/// Lifecycle state of a custom-product session.
///
/// A definition with only optional steps is complete before anything is
/// chosen.
#[must_use]
pub fn session_state(
    definition: &CustomProductDefinition,
    selection: &SelectionState,
    committed: bool,
) -> SessionState {
    if committed {
        SessionState::Committed
    } else if is_product_complete(definition, selection) {
        SessionState::Complete
    } else if selection.is_empty() {
        SessionState::Empty
    } else {
        SessionState::Partial
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use local_market_core::{
        CustomProductId, ItemKey, PricingStrategy, Product, ProductId, StepItem,
    };
    use rust_decimal::Decimal;

    use super::*;

    fn step(step_number: u32, required: u32, keys: &[&str]) -> StepDefinition {
        StepDefinition {
            step_number,
            name: format!("Step {step_number}"),
            description: String::new(),
            required_item_count: required,
            available_items: keys
                .iter()
                .map(|k| StepItem {
                    item_key: ItemKey::new(*k),
                    product: Product::new(ProductId::new(1), *k, Decimal::ONE),
                })
                .collect(),
        }
    }

    fn definition() -> CustomProductDefinition {
        CustomProductDefinition {
            id: CustomProductId::new(1),
            name: "Poke".to_string(),
            description: String::new(),
            image: None,
            pricing_strategy: PricingStrategy::Sum,
            fixed_price: None,
            steps: vec![
                step(1, 1, &["rice", "greens"]),
                step(2, 2, &["salmon", "tuna", "tofu"]),
                step(3, 0, &["sesame"]),
            ],
        }
    }

    fn pick(selection: &mut SelectionState, def: &CustomProductDefinition, step: u32, k: &str) {
        let required = def.step(step).unwrap().required_item_count;
        selection.toggle(step, &ItemKey::new(k), required);
    }

    #[test]
    fn test_optional_step_is_always_complete() {
        let def = definition();
        let selection = SelectionState::new();
        assert!(is_step_complete(def.step(3).unwrap(), &selection));
    }

    #[test]
    fn test_product_complete_requires_every_step() {
        let def = definition();
        let mut selection = SelectionState::new();
        assert_eq!(session_state(&def, &selection, false), SessionState::Empty);

        pick(&mut selection, &def, 1, "rice");
        assert!(!is_product_complete(&def, &selection));
        assert_eq!(session_state(&def, &selection, false), SessionState::Partial);

        pick(&mut selection, &def, 2, "salmon");
        pick(&mut selection, &def, 2, "tofu");
        assert!(is_product_complete(&def, &selection));
        assert_eq!(session_state(&def, &selection, false), SessionState::Complete);

        // Deselecting from a complete step drops back to partial
        pick(&mut selection, &def, 2, "tofu");
        assert!(!is_product_complete(&def, &selection));
        assert_eq!(session_state(&def, &selection, false), SessionState::Partial);
    }

    #[test]
    fn test_incomplete_steps_lists_remaining_counts() {
        let def = definition();
        let mut selection = SelectionState::new();
        pick(&mut selection, &def, 2, "tuna");

        let missing = incomplete_steps(&def, &selection);
        assert_eq!(
            missing,
            vec![
                MissingStep {
                    step_number: 1,
                    name: "Step 1".to_string(),
                    remaining: 1,
                },
                MissingStep {
                    step_number: 2,
                    name: "Step 2".to_string(),
                    remaining: 1,
                },
            ]
        );
    }

    #[test]
    fn test_step_without_items_is_permanently_incomplete() {
        let mut def = definition();
        def.steps.push(step(4, 1, &[]));
        let mut selection = SelectionState::new();
        pick(&mut selection, &def, 1, "rice");
        pick(&mut selection, &def, 2, "salmon");
        pick(&mut selection, &def, 2, "tuna");

        assert!(!is_product_complete(&def, &selection));
        let missing = incomplete_steps(&def, &selection);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].step_number, 4);
    }

    #[test]
    fn test_all_optional_definition_starts_complete() {
        let mut def = definition();
        def.steps = vec![step(1, 0, &["a"])];
        assert_eq!(
            session_state(&def, &SelectionState::new(), false),
            SessionState::Complete
        );
    }

    #[test]
    fn test_committed_overrides_everything() {
        let def = definition();
        assert_eq!(
            session_state(&def, &SelectionState::new(), true),
            SessionState::Committed
        );
    }
}
