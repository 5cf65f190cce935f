//! Totals Aggregator
//!
//! Folds already priced lines into [`OrderTotals`]. Line amounts are never
//! re-derived here, so order-level and line-level numbers cannot drift.
//! Only rows that pass the completeness check count; a half-typed row is
//! priced for display but stays out of the order figures.

use rust_decimal::Decimal;
use shared::models::OrderTotals;

use super::line_calculator::{ItemCountBasis, LinePricing, PricingMode};
use super::normalizer::LineItem;

/// One row after normalization and pricing
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub item: LineItem,
    pub pricing: LinePricing,
    /// Passed the row completeness check
    pub is_complete: bool,
}

/// Sum the complete lines into order totals (unrounded)
pub fn aggregate(lines: &[PricedLine], mode: &PricingMode) -> OrderTotals {
    lines
        .iter()
        .filter(|line| line.is_complete)
        .fold(OrderTotals::default(), |mut totals, line| {
            totals.total_amount += line.pricing.final_amount;
            totals.total_quantity += line.item.quantity;
            totals.total_discount += line.pricing.discount_amount;
            totals.total_tax += line.pricing.tax_amount;
            totals.total_items += match mode.item_count {
                ItemCountBasis::ExpandedUnits => line.pricing.total_units,
                ItemCountBasis::CompleteRows => Decimal::ONE,
            };
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price_line;

    fn priced(quantity: i64, rate: i64, units_per_pack: u32, mode: &PricingMode) -> PricedLine {
        let item = LineItem {
            quantity: Decimal::from(quantity),
            free_quantity: Decimal::ZERO,
            units_per_pack,
            mrp: Decimal::from(rate * 2),
            rate: Decimal::from(rate),
            discount_percent: Decimal::from(10),
            scheme_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            gst_percent: Decimal::from(5),
        };
        let pricing = price_line(&item, mode);
        PricedLine {
            item,
            pricing,
            is_complete: true,
        }
    }

    #[test]
    fn test_purchase_counts_expanded_units() {
        let mode = PricingMode::PURCHASE;
        let lines = vec![priced(2, 10, 10, &mode), priced(3, 5, 15, &mode)];

        let totals = aggregate(&lines, &mode);

        assert_eq!(totals.total_items, Decimal::from(65));
        assert_eq!(totals.total_quantity, Decimal::from(5));
        assert_eq!(
            totals.total_amount,
            lines[0].pricing.final_amount + lines[1].pricing.final_amount
        );
    }

    #[test]
    fn test_sell_counts_complete_rows_only() {
        let mode = PricingMode::SELL;
        let lines = vec![priced(2, 10, 10, &mode), priced(1, 5, 1, &mode)];

        let totals = aggregate(&lines, &mode);

        assert_eq!(totals.total_items, Decimal::from(2));
        assert_eq!(totals.total_quantity, Decimal::from(3));
        // 20 × 10% + 5 × 10%
        assert_eq!(totals.total_discount, Decimal::new(25, 1));
    }

    #[test]
    fn test_incomplete_lines_stay_out_of_totals() {
        for mode in [PricingMode::PURCHASE, PricingMode::SELL, PricingMode::CARD] {
            let complete = priced(2, 10, 10, &mode);
            let mut partial = priced(4, 25, 10, &mode);
            partial.is_complete = false;

            let totals = aggregate(&[complete.clone(), partial], &mode);

            assert_eq!(totals, aggregate(&[complete], &mode));
        }
    }

    #[test]
    fn test_oversized_discount_never_yields_negative_tax() {
        let mode = PricingMode::CARD;
        let mut line = priced(1, 5, 1, &mode);
        line.item.discount_amount = Decimal::from(100);
        line.pricing = price_line(&line.item, &mode);
        let lines = vec![line, priced(2, 10, 1, &mode)];

        let totals = aggregate(&lines, &mode);

        assert!(totals.total_tax >= Decimal::ZERO);
        // 5 clamped + 0 on the undiscounted line
        assert_eq!(totals.total_discount, Decimal::from(5));
        // 20 + 5% on the second line only
        assert_eq!(totals.total_amount, Decimal::from(21));
        assert_eq!(totals.total_tax, Decimal::ONE);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let mode = PricingMode::CARD;
        let lines = vec![priced(7, 3, 1, &mode), priced(1, 99, 1, &mode)];

        assert_eq!(aggregate(&lines, &mode), aggregate(&lines, &mode));
        assert_eq!(aggregate(&[], &mode), OrderTotals::default());
    }
}
