//! Price breakdown of an ad-hoc product.
//!
//! # Usage
//!
//! ```bash
//! lm-cli price --base 120.00 --promo 99.90 --installments 3 --interest-free --cash-discount 5
//! ```

use local_market_configurator::ProductPricing;
use local_market_core::{CurrencyCode, Price, Product, ProductId};
use rust_decimal::Decimal;
use tracing::info;

/// Arguments of the `price` command.
#[derive(Debug, Clone)]
pub struct PriceArgs {
    pub base: Decimal,
    pub promo: Option<Decimal>,
    pub installments: Option<u32>,
    pub interest_free: bool,
    pub cash_discount: Option<Decimal>,
}

impl PriceArgs {
    fn product(&self) -> Product {
        let mut product = Product::new(ProductId::new(0), "ad-hoc", self.base);
        product.promotional_price = self.promo;
        product.installment_count = self.installments;
        product.installments_interest_free = self.interest_free;
        product.cash_discount_percent = self.cash_discount;
        product
    }
}

/// Log how the product's price would be displayed.
pub fn show(args: &PriceArgs) {
    let pricing = ProductPricing::for_product(&args.product());
    for line in breakdown(&pricing) {
        info!("{line}");
    }
}

/// Display lines for a pricing bundle.
pub(crate) fn breakdown(pricing: &ProductPricing) -> Vec<String> {
    let price = |amount| Price::new(amount, CurrencyCode::default());

    let mut lines = Vec::new();
    match pricing.compare_at_price {
        Some(was) => lines.push(format!(
            "Price: {} (was {})",
            price(pricing.unit_price),
            price(was)
        )),
        None => lines.push(format!("Price: {}", price(pricing.unit_price))),
    }
    if let Some(offer) = &pricing.installments {
        let terms = if offer.interest_free {
            "interest free"
        } else {
            "with interest"
        };
        lines.push(format!(
            "Installments: {}x {} {terms}",
            offer.count,
            price(offer.amount)
        ));
    }
    if let Some(cash) = pricing.cash_price {
        lines.push(format!("Cash: {}", price(cash)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_with_all_terms() {
        let args = PriceArgs {
            base: Decimal::new(12000, 2),
            promo: Some(Decimal::new(9990, 2)),
            installments: Some(3),
            interest_free: true,
            cash_discount: Some(Decimal::new(10, 0)),
        };
        let lines = breakdown(&ProductPricing::for_product(&args.product()));
        assert_eq!(
            lines,
            vec![
                "Price: R$99.90 (was R$120.00)".to_string(),
                "Installments: 3x R$33.30 interest free".to_string(),
                "Cash: R$89.91".to_string(),
            ]
        );
    }

    #[test]
    fn test_breakdown_plain_price() {
        let args = PriceArgs {
            base: Decimal::new(500, 2),
            promo: None,
            installments: None,
            interest_free: false,
            cash_discount: None,
        };
        let lines = breakdown(&ProductPricing::for_product(&args.product()));
        assert_eq!(lines, vec!["Price: R$5.00".to_string()]);
    }
}
