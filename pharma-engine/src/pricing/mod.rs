//! Pricing Engine
//!
//! Raw form row → [`normalizer`] → [`line_calculator`] → [`totals`].
//!
//! Uses rust_decimal throughout; rounding happens only at the boundary.

pub mod line_calculator;
pub mod normalizer;
pub mod totals;

pub use line_calculator::{
    DiscountMode, ItemCountBasis, LinePricing, MarginBasis, PricingMode, price_line,
};
pub use normalizer::{LineItem, normalize_number, parse_decimal, parse_pack, to_decimal};
pub use totals::{PricedLine, aggregate};
