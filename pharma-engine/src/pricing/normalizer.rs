//! Field Normalizer
//!
//! Turns raw form text into the numeric values the calculator works with.
//! Nothing here fails: blank or unparsable numbers become zero and an
//! unreadable pack descriptor becomes one unit per container.

use rust_decimal::prelude::*;
use shared::models::LineItemFormData;

/// Largest value accepted for any numeric field; anything above reads as zero
pub(crate) const MAX_FIELD_VALUE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Separators accepted between the two pack tokens (`1×10`, `1x10`, `2*5`)
const PACK_SEPARATORS: [char; 4] = ['×', 'x', 'X', '*'];

/// `×` as it arrives after a UTF-8 / Windows-1252 mix-up
const MOJIBAKE_TIMES: &str = "Ã—";

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Parse a user-typed number, tolerating `₹`, thousands separators and
/// surrounding spaces. Returns `None` for blank or unparsable text.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('₹')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

/// Numeric value used for computation: missing, unparsable, negative or
/// absurdly large input counts as zero.
pub fn normalize_number(raw: &str) -> Decimal {
    match parse_decimal(raw) {
        Some(value) if value >= Decimal::ZERO && value <= MAX_FIELD_VALUE => value,
        _ => Decimal::ZERO,
    }
}

/// Parse a whole number field (expiry month / year)
pub fn parse_whole(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Units per container from a pack descriptor.
///
/// Exactly two integer tokens multiply (`1×10` → 10, `2*5` → 10); anything
/// else, including a zero product, is one unit per container.
pub fn parse_pack(raw: &str) -> u32 {
    let normalized = raw.replace(MOJIBAKE_TIMES, "×");
    let tokens: Vec<&str> = normalized
        .split(|c: char| PACK_SEPARATORS.contains(&c))
        .map(str::trim)
        .collect();

    if let [first, second] = tokens.as_slice()
        && let (Ok(a), Ok(b)) = (first.parse::<u32>(), second.parse::<u32>())
    {
        let units = a.saturating_mul(b);
        if units >= 1 {
            return units;
        }
    }
    1
}

/// Normalized numeric view of one line
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub quantity: Decimal,
    pub free_quantity: Decimal,
    pub units_per_pack: u32,
    pub mrp: Decimal,
    pub rate: Decimal,
    pub discount_percent: Decimal,
    pub scheme_percent: Decimal,
    pub discount_amount: Decimal,
    pub gst_percent: Decimal,
}

impl LineItem {
    /// Normalize a raw row. A blank GST field takes `default_gst`; an
    /// explicit `0` stays zero.
    pub fn from_form(form: &LineItemFormData, default_gst: Decimal) -> Self {
        let gst_percent = if form.gst_percent.trim().is_empty() {
            default_gst
        } else {
            normalize_number(&form.gst_percent)
        };

        Self {
            quantity: normalize_number(&form.quantity),
            free_quantity: normalize_number(&form.free_quantity),
            units_per_pack: parse_pack(&form.pack),
            mrp: normalize_number(&form.mrp),
            rate: normalize_number(&form.rate),
            discount_percent: normalize_number(&form.discount_percent),
            scheme_percent: normalize_number(&form.scheme_percent),
            discount_amount: normalize_number(&form.discount_amount),
            gst_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_parsing() {
        assert_eq!(parse_pack("1×10"), 10);
        assert_eq!(parse_pack("2*5"), 10);
        assert_eq!(parse_pack("1x15"), 15);
        assert_eq!(parse_pack("10X1"), 10);
        assert_eq!(parse_pack(" 3 × 4 "), 12);
        assert_eq!(parse_pack("1Ã—10"), 10);
    }

    #[test]
    fn test_pack_defaults_to_one() {
        assert_eq!(parse_pack("garbage"), 1);
        assert_eq!(parse_pack(""), 1);
        assert_eq!(parse_pack("10"), 1);
        assert_eq!(parse_pack("1x2x3"), 1);
        assert_eq!(parse_pack("0x10"), 1);
        assert_eq!(parse_pack("1.5x10"), 1);
        assert_eq!(parse_pack("10ml"), 1);
    }

    #[test]
    fn test_normalize_blank_and_garbage_to_zero() {
        assert_eq!(normalize_number(""), Decimal::ZERO);
        assert_eq!(normalize_number("   "), Decimal::ZERO);
        assert_eq!(normalize_number("abc"), Decimal::ZERO);
        assert_eq!(normalize_number("-5"), Decimal::ZERO);
        assert_eq!(normalize_number("99999999999"), Decimal::ZERO);
    }

    #[test]
    fn test_normalize_tolerates_currency_and_separators() {
        assert_eq!(normalize_number("₹1,250.50"), Decimal::new(125050, 2));
        assert_eq!(normalize_number(" 12 "), Decimal::from(12));
        assert_eq!(normalize_number("1e2"), Decimal::from(100));
    }

    #[test]
    fn test_parse_decimal_distinguishes_missing() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("x"), None);
        assert_eq!(parse_decimal("0"), Some(Decimal::ZERO));
        assert_eq!(parse_decimal("-1"), Some(Decimal::from(-1)));
    }

    #[test]
    fn test_to_decimal_precision() {
        let sum = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(sum, Decimal::new(3, 1));
    }

    #[test]
    fn test_line_item_gst_default_only_when_blank() {
        let five = Decimal::from(5);
        let mut form = LineItemFormData {
            quantity: "10".into(),
            pack: "1x10".into(),
            rate: "2".into(),
            ..Default::default()
        };

        let item = LineItem::from_form(&form, five);
        assert_eq!(item.gst_percent, five);
        assert_eq!(item.units_per_pack, 10);
        assert_eq!(item.free_quantity, Decimal::ZERO);

        form.gst_percent = "0".into();
        let item = LineItem::from_form(&form, five);
        assert_eq!(item.gst_percent, Decimal::ZERO);

        form.gst_percent = "12".into();
        let item = LineItem::from_form(&form, five);
        assert_eq!(item.gst_percent, Decimal::from(12));
    }
}
