//! Line Price Calculator
//!
//! One parameterized calculation for every order flow:
//! - Purchase grid: pack-unit expansion, discount as a percentage of gross
//! - Sell grid: per container, discount as a percentage of quantity × rate
//! - Card purchase form: scheme percentage plus a flat currency discount
//!
//! All intermediates stay unrounded; call [`LinePricing::rounded`] at the
//! display / persistence boundary.

use rust_decimal::prelude::*;
use serde::Serialize;
use shared::util::round_money;

use super::normalizer::LineItem;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// How the line discount is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    /// `gross × discount_percent`
    PercentOfGross,
    /// `quantity × rate × discount_percent` (free containers are not discounted)
    PercentOfRate,
    /// `gross × scheme_percent + discount_amount` (flat currency)
    Absolute,
}

/// What the margin is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginBasis {
    /// MRP value of all units against the gross paid
    GrossAgainstMrp,
    /// Taxed cost per container (free containers included) against MRP
    LandedCostPerUnit,
}

/// How a line contributes to `OrderTotals::total_items`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCountBasis {
    ExpandedUnits,
    CompleteRows,
}

/// Pricing configuration of one order flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingMode {
    pub discount_mode: DiscountMode,
    /// Bill every unit inside the containers instead of the containers
    pub pack_expansion: bool,
    pub margin_basis: MarginBasis,
    pub item_count: ItemCountBasis,
}

impl PricingMode {
    /// Purchase order grid
    pub const PURCHASE: Self = Self {
        discount_mode: DiscountMode::PercentOfGross,
        pack_expansion: true,
        margin_basis: MarginBasis::GrossAgainstMrp,
        item_count: ItemCountBasis::ExpandedUnits,
    };

    /// Sell order grid
    pub const SELL: Self = Self {
        discount_mode: DiscountMode::PercentOfRate,
        pack_expansion: false,
        margin_basis: MarginBasis::LandedCostPerUnit,
        item_count: ItemCountBasis::CompleteRows,
    };

    /// Quick "add purchase" card
    pub const CARD: Self = Self {
        discount_mode: DiscountMode::Absolute,
        pack_expansion: false,
        margin_basis: MarginBasis::LandedCostPerUnit,
        item_count: ItemCountBasis::CompleteRows,
    };
}

/// Result of line price calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinePricing {
    /// quantity + free quantity
    pub total_containers: Decimal,
    /// Containers × units per pack (× 1 without pack expansion)
    pub total_units: Decimal,
    /// Billed quantity × rate
    pub gross_amount: Decimal,
    /// Never more than the gross amount
    pub discount_amount: Decimal,
    /// Gross minus discount, never negative
    pub net_amount: Decimal,
    pub tax_amount: Decimal,
    /// Net plus tax, never negative
    pub final_amount: Decimal,
    /// Zero when there is nothing to divide by
    pub cost_per_unit: Decimal,
    /// Zero when MRP or units are zero
    pub margin_percent: Decimal,
}

impl LinePricing {
    /// Values rounded to 2 dp for display / persistence
    pub fn rounded(&self) -> Self {
        Self {
            total_containers: self.total_containers,
            total_units: self.total_units,
            gross_amount: round_money(self.gross_amount),
            discount_amount: round_money(self.discount_amount),
            net_amount: round_money(self.net_amount),
            tax_amount: round_money(self.tax_amount),
            final_amount: round_money(self.final_amount),
            cost_per_unit: round_money(self.cost_per_unit),
            margin_percent: round_money(self.margin_percent),
        }
    }
}

/// Price one normalized line under the given mode
pub fn price_line(item: &LineItem, mode: &PricingMode) -> LinePricing {
    let total_containers = item.quantity + item.free_quantity;
    let units_per_container = if mode.pack_expansion {
        Decimal::from(item.units_per_pack)
    } else {
        Decimal::ONE
    };
    let total_units = total_containers * units_per_container;

    // Expanded purchases bill the free containers too
    let billed = if mode.pack_expansion {
        total_units
    } else {
        item.quantity
    };
    let gross_amount = billed * item.rate;

    let requested_discount = match mode.discount_mode {
        DiscountMode::PercentOfGross => gross_amount * item.discount_percent / HUNDRED,
        DiscountMode::PercentOfRate => {
            item.quantity * item.rate * item.discount_percent / HUNDRED
        }
        DiscountMode::Absolute => {
            gross_amount * item.scheme_percent / HUNDRED + item.discount_amount
        }
    };
    // A discount larger than the bill zeroes the line; tax is never refunded
    let discount_amount = requested_discount.min(gross_amount);

    let net_amount = gross_amount - discount_amount;
    let tax_amount = net_amount * item.gst_percent / HUNDRED;
    let final_amount = net_amount + tax_amount;

    let (cost_per_unit, margin_percent) = match mode.margin_basis {
        MarginBasis::GrossAgainstMrp => {
            let mrp_value = total_units * item.mrp;
            if total_units > Decimal::ZERO && mrp_value > Decimal::ZERO {
                (
                    gross_amount / total_units,
                    (mrp_value - gross_amount) / mrp_value * HUNDRED,
                )
            } else {
                (Decimal::ZERO, Decimal::ZERO)
            }
        }
        MarginBasis::LandedCostPerUnit => {
            let cost_per_unit = if total_containers > Decimal::ZERO {
                final_amount / total_containers
            } else {
                Decimal::ZERO
            };
            let margin = if item.mrp > Decimal::ZERO && total_containers > Decimal::ZERO {
                (item.mrp - cost_per_unit) / item.mrp * HUNDRED
            } else {
                Decimal::ZERO
            };
            (cost_per_unit, margin)
        }
    };

    LinePricing {
        total_containers,
        total_units,
        gross_amount,
        discount_amount,
        net_amount,
        tax_amount,
        final_amount,
        cost_per_unit,
        margin_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> LineItem {
        LineItem {
            quantity: Decimal::ZERO,
            free_quantity: Decimal::ZERO,
            units_per_pack: 1,
            mrp: Decimal::ZERO,
            rate: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            scheme_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            gst_percent: Decimal::from(5),
        }
    }

    #[test]
    fn test_purchase_expands_pack_units() {
        let line = LineItem {
            quantity: Decimal::from(10),
            free_quantity: Decimal::from(2),
            units_per_pack: 10,
            rate: Decimal::from(2),
            discount_percent: Decimal::from(10),
            mrp: Decimal::from(4),
            ..item()
        };

        let result = price_line(&line, &PricingMode::PURCHASE);

        assert_eq!(result.total_units, Decimal::from(120));
        assert_eq!(result.gross_amount, Decimal::from(240));
        assert_eq!(result.discount_amount, Decimal::from(24));
        assert_eq!(result.net_amount, Decimal::from(216));
        assert_eq!(result.tax_amount, Decimal::new(108, 1));
        assert_eq!(result.final_amount, Decimal::new(2268, 1));
        assert_eq!(result.rounded().final_amount, Decimal::new(22680, 2));
        // 480 MRP value against 240 paid
        assert_eq!(result.margin_percent, Decimal::from(50));
    }

    #[test]
    fn test_card_scheme_and_flat_discount() {
        let line = LineItem {
            quantity: Decimal::from(10),
            rate: Decimal::from(5),
            scheme_percent: Decimal::from(10),
            discount_amount: Decimal::from(5),
            ..item()
        };

        let result = price_line(&line, &PricingMode::CARD);

        assert_eq!(result.gross_amount, Decimal::from(50));
        assert_eq!(result.net_amount, Decimal::from(40));
        assert_eq!(result.tax_amount, Decimal::from(2));
        assert_eq!(result.rounded().final_amount, Decimal::new(4200, 2));
    }

    #[test]
    fn test_card_discount_clamped_to_gross() {
        let line = LineItem {
            quantity: Decimal::from(1),
            rate: Decimal::from(5),
            discount_amount: Decimal::from(100),
            ..item()
        };

        let result = price_line(&line, &PricingMode::CARD);

        assert_eq!(result.discount_amount, Decimal::from(5));
        assert_eq!(result.net_amount, Decimal::ZERO);
        assert_eq!(result.tax_amount, Decimal::ZERO);
        assert_eq!(result.final_amount, Decimal::ZERO);
    }

    #[test]
    fn test_sell_discount_excludes_free_containers() {
        let line = LineItem {
            quantity: Decimal::from(10),
            free_quantity: Decimal::from(2),
            units_per_pack: 10,
            rate: Decimal::from(5),
            discount_percent: Decimal::from(10),
            mrp: Decimal::from(8),
            ..item()
        };

        let result = price_line(&line, &PricingMode::SELL);

        assert_eq!(result.total_units, Decimal::from(12));
        assert_eq!(result.discount_amount, Decimal::from(5));
        assert_eq!(result.net_amount, Decimal::from(45));
        assert_eq!(result.final_amount, Decimal::new(4725, 2));
        assert_eq!(result.cost_per_unit, Decimal::new(39375, 4));
        assert_eq!(result.margin_percent, Decimal::new(5078125, 5));
        assert_eq!(result.rounded().margin_percent, Decimal::new(5078, 2));
    }

    #[test]
    fn test_margin_zero_without_mrp_or_units() {
        let no_mrp = LineItem {
            quantity: Decimal::from(3),
            rate: Decimal::from(5),
            ..item()
        };
        for mode in [PricingMode::PURCHASE, PricingMode::SELL, PricingMode::CARD] {
            assert_eq!(price_line(&no_mrp, &mode).margin_percent, Decimal::ZERO);
        }

        let no_units = LineItem {
            mrp: Decimal::from(10),
            rate: Decimal::from(5),
            ..item()
        };
        for mode in [PricingMode::PURCHASE, PricingMode::SELL, PricingMode::CARD] {
            let result = price_line(&no_units, &mode);
            assert_eq!(result.margin_percent, Decimal::ZERO);
            assert_eq!(result.cost_per_unit, Decimal::ZERO);
        }
    }

    #[test]
    fn test_final_amount_never_negative() {
        let cases = [
            (Decimal::from(100), Decimal::ZERO),
            (Decimal::from(100), Decimal::from(250)),
            (Decimal::ZERO, Decimal::from(1_000_000)),
        ];
        for (scheme, flat) in cases {
            let line = LineItem {
                quantity: Decimal::from(2),
                rate: Decimal::new(1999, 2),
                scheme_percent: scheme,
                discount_amount: flat,
                ..item()
            };
            let result = price_line(&line, &PricingMode::CARD);
            assert!(result.final_amount >= Decimal::ZERO);
            assert!(result.tax_amount >= Decimal::ZERO);
            assert!(result.discount_amount <= result.gross_amount);
        }
    }

    #[test]
    fn test_intermediates_not_rounded() {
        let line = LineItem {
            quantity: Decimal::from(3),
            rate: Decimal::new(333, 2),
            discount_percent: Decimal::new(75, 1),
            units_per_pack: 1,
            ..item()
        };

        let result = price_line(&line, &PricingMode::PURCHASE);

        // 9.99 × 7.5% = 0.74925
        assert_eq!(result.discount_amount, Decimal::new(74925, 5));
        assert_eq!(result.rounded().discount_amount, Decimal::new(75, 2));
    }
}
