//! Price resolution and aggregation.
//!
//! All arithmetic keeps full decimal precision; rounding to the currency's
//! minor unit happens only when a [`Price`](local_market_core::Price) is
//! formatted.

use local_market_core::{CustomProductDefinition, Priced, PricingStrategy, Product};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::selection::SelectionState;

/// Price of one unit: the promotional price when set, else the base price.
///
/// This is the only price-resolution rule; products, variations, add-ons and
/// step items all go through it.
#[must_use]
pub fn unit_price_of<P: Priced + ?Sized>(item: &P) -> Decimal {
    item.promotional_price().unwrap_or_else(|| item.base_price())
}

/// Unit prices of every selected item, in step then selection order.
///
/// Keys that are not part of the definition are skipped.
#[must_use]
pub fn selected_unit_prices(
    definition: &CustomProductDefinition,
    selection: &SelectionState,
) -> Vec<Decimal> {
    definition
        .steps
        .iter()
        .flat_map(|step| {
            selection
                .selected_keys(step.step_number)
                .filter_map(|key| step.item(key))
                .map(|item| unit_price_of(&item.product))
        })
        .collect()
}

/// Price of one unit of a custom product under its pricing strategy.
///
/// `LOWEST`, `HIGHEST` and `AVERAGE` over an empty selection are zero.
#[must_use]
pub fn custom_product_total(
    definition: &CustomProductDefinition,
    selection: &SelectionState,
) -> Decimal {
    let prices = || selected_unit_prices(definition, selection);
    match definition.pricing_strategy {
        PricingStrategy::Fixed => definition.fixed_price.unwrap_or(Decimal::ZERO),
        PricingStrategy::Sum => prices().into_iter().sum(),
        PricingStrategy::Lowest => prices().into_iter().min().unwrap_or(Decimal::ZERO),
        PricingStrategy::Highest => prices().into_iter().max().unwrap_or(Decimal::ZERO),
        PricingStrategy::Average => average(&prices()),
    }
}

fn average(prices: &[Decimal]) -> Decimal {
    if prices.is_empty() {
        return Decimal::ZERO;
    }
    prices.iter().sum::<Decimal>() / Decimal::from(prices.len())
}

/// Total of a cart line: `unit_price × quantity` plus every add-on's unit
/// price times its own quantity.
///
/// Add-on quantities are not multiplied by the line quantity.
#[must_use]
pub fn line_item_total<'a, I>(unit_price: Decimal, quantity: u32, addons: I) -> Decimal
where
    I: IntoIterator<Item = (&'a Product, u32)>,
{
    let addon_total: Decimal = addons
        .into_iter()
        .map(|(product, qty)| unit_price_of(product) * Decimal::from(qty))
        .sum();
    unit_price * Decimal::from(quantity) + addon_total
}

/// Amount of each installment: `unit_price / installment_count`.
///
/// Remainder cents are not redistributed. Returns `None` for a count of 0.
#[must_use]
pub fn installment_amount(unit_price: Decimal, installment_count: u32) -> Option<Decimal> {
    if installment_count == 0 {
        return None;
    }
    Some(unit_price / Decimal::from(installment_count))
}

/// Price when paying cash: `unit_price × (1 − discount_percent / 100)`.
#[must_use]
pub fn cash_discount_price(unit_price: Decimal, discount_percent: Decimal) -> Decimal {
    unit_price * (Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED)
}

/// Installment offer shown next to a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallmentOffer {
    /// Number of installments.
    pub count: u32,
    /// Amount of each installment.
    pub amount: Decimal,
    /// Whether no interest is charged.
    pub interest_free: bool,
}

/// Everything a product card shows about price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPricing {
    /// Resolved price of one unit.
    pub unit_price: Decimal,
    /// Base price shown struck through while a promotion is active.
    pub compare_at_price: Option<Decimal>,
    /// Installment offer, if the product has one.
    pub installments: Option<InstallmentOffer>,
    /// Price when paying cash, if a cash discount applies.
    pub cash_price: Option<Decimal>,
}

impl ProductPricing {
    /// Pricing of a catalog product at its own resolved price.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self::for_priced(product, product)
    }

    /// Pricing of `priced` (the product itself or one of its variations),
    /// using the payment terms of `product`.
    #[must_use]
    pub fn for_priced<P: Priced + ?Sized>(product: &Product, priced: &P) -> Self {
        let unit_price = unit_price_of(priced);
        let compare_at_price = priced
            .promotional_price()
            .filter(|promo| *promo < priced.base_price())
            .map(|_| priced.base_price());

        let installments = product.installment_count.and_then(|count| {
            installment_amount(unit_price, count).map(|amount| InstallmentOffer {
                count,
                amount,
                interest_free: product.installments_interest_free,
            })
        });

        let cash_price = product
            .cash_discount_percent
            .filter(|pct| !pct.is_zero())
            .map(|pct| cash_discount_price(unit_price, pct));

        Self {
            unit_price,
            compare_at_price,
            installments,
            cash_price,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use local_market_core::{
        CustomProductId, ItemKey, ProductId, StepDefinition, StepItem, Variation, VariationId,
    };

    use super::*;

    fn money(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn product(id: i32, price: Decimal) -> Product {
        Product::new(ProductId::new(id), format!("Product {id}"), price)
    }

    fn item(key: &str, price: Decimal) -> StepItem {
        StepItem {
            item_key: ItemKey::new(key),
            product: product(1, price),
        }
    }

    /// Three steps offering items priced 10, 20 and 30.
    fn definition(strategy: PricingStrategy) -> CustomProductDefinition {
        let step = |n: u32, items: Vec<StepItem>| StepDefinition {
            step_number: n,
            name: format!("Step {n}"),
            description: String::new(),
            required_item_count: 1,
            available_items: items,
        };
        CustomProductDefinition {
            id: CustomProductId::new(1),
            name: "Combo".to_string(),
            description: String::new(),
            image: None,
            pricing_strategy: strategy,
            fixed_price: None,
            steps: vec![
                step(1, vec![item("a", money(1000)), item("x", money(9900))]),
                step(2, vec![item("b", money(2000))]),
                step(3, vec![item("c", money(3000))]),
            ],
        }
    }

    fn all_selected() -> SelectionState {
        let mut selection = SelectionState::new();
        selection.toggle(1, &ItemKey::new("a"), 1);
        selection.toggle(2, &ItemKey::new("b"), 1);
        selection.toggle(3, &ItemKey::new("c"), 1);
        selection
    }

    #[test]
    fn test_unit_price_prefers_promotion() {
        let regular = product(1, money(1000));
        assert_eq!(unit_price_of(&regular), money(1000));

        let promo = product(1, money(1000)).with_promotional_price(money(800));
        assert_eq!(unit_price_of(&promo), money(800));

        let variation = Variation {
            id: VariationId::new(1),
            name: "Large".to_string(),
            base_price: money(1500),
            promotional_price: Some(money(1200)),
        };
        assert_eq!(unit_price_of(&variation), money(1200));
    }

    #[test]
    fn test_strategies_over_three_items() {
        let selection = all_selected();
        let cases = [
            (PricingStrategy::Sum, money(6000)),
            (PricingStrategy::Lowest, money(1000)),
            (PricingStrategy::Highest, money(3000)),
            (PricingStrategy::Average, money(2000)),
        ];
        for (strategy, expected) in cases {
            assert_eq!(
                custom_product_total(&definition(strategy), &selection),
                expected,
                "{strategy}"
            );
        }
    }

    #[test]
    fn test_fixed_ignores_selections() {
        let mut def = definition(PricingStrategy::Fixed);
        def.fixed_price = Some(money(1500));
        assert_eq!(custom_product_total(&def, &all_selected()), money(1500));
        assert_eq!(custom_product_total(&def, &SelectionState::new()), money(1500));
    }

    #[test]
    fn test_empty_selection_aggregates_to_zero() {
        let selection = SelectionState::new();
        for strategy in [
            PricingStrategy::Lowest,
            PricingStrategy::Highest,
            PricingStrategy::Average,
            PricingStrategy::Sum,
        ] {
            assert_eq!(
                custom_product_total(&definition(strategy), &selection),
                Decimal::ZERO
            );
        }
    }

    #[test]
    fn test_step_items_use_promotional_price() {
        let mut def = definition(PricingStrategy::Sum);
        def.steps[0].available_items[0].product.promotional_price = Some(money(500));
        assert_eq!(custom_product_total(&def, &all_selected()), money(5500));
    }

    #[test]
    fn test_average_keeps_precision() {
        let mut selection = SelectionState::new();
        selection.toggle(1, &ItemKey::new("a"), 1);
        selection.toggle(2, &ItemKey::new("b"), 1);
        let mut def = definition(PricingStrategy::Average);
        def.steps[1].available_items[0].product.base_price = money(2001);
        // (10.00 + 20.01) / 2 = 15.005, not pre-rounded
        assert_eq!(custom_product_total(&def, &selection), Decimal::new(15005, 3));
    }

    #[test]
    fn test_line_total_with_addons() {
        let addon = product(9, money(500));
        let total = line_item_total(money(2500), 2, [(&addon, 3)]);
        assert_eq!(total, money(6500));
    }

    #[test]
    fn test_line_total_addon_uses_promotional_price() {
        let addon = product(9, money(500)).with_promotional_price(money(400));
        let total = line_item_total(money(1000), 1, [(&addon, 2)]);
        assert_eq!(total, money(1800));
    }

    #[test]
    fn test_installment_amount() {
        assert_eq!(installment_amount(money(3000), 3), Some(money(1000)));
        assert_eq!(installment_amount(money(3000), 0), None);
        // No remainder-cent correction
        let amount = installment_amount(money(1000), 3).unwrap();
        assert!(amount * Decimal::from(3) <= money(1000));
    }

    #[test]
    fn test_cash_discount_price() {
        assert_eq!(
            cash_discount_price(money(10000), Decimal::from(5)),
            money(9500)
        );
        assert_eq!(cash_discount_price(money(4000), Decimal::ZERO), money(4000));
    }

    #[test]
    fn test_product_pricing_bundle() {
        let mut p = product(1, money(12000)).with_promotional_price(money(9000));
        p.installment_count = Some(3);
        p.installments_interest_free = true;
        p.cash_discount_percent = Some(Decimal::from(10));

        let pricing = ProductPricing::for_product(&p);
        assert_eq!(pricing.unit_price, money(9000));
        assert_eq!(pricing.compare_at_price, Some(money(12000)));
        assert_eq!(
            pricing.installments,
            Some(InstallmentOffer {
                count: 3,
                amount: money(3000),
                interest_free: true,
            })
        );
        assert_eq!(pricing.cash_price, Some(money(8100)));
    }

    #[test]
    fn test_product_pricing_without_terms() {
        let pricing = ProductPricing::for_product(&product(1, money(500)));
        assert_eq!(pricing.unit_price, money(500));
        assert_eq!(pricing.compare_at_price, None);
        assert_eq!(pricing.installments, None);
        assert_eq!(pricing.cash_price, None);
    }
}
