//! Line item models
//!
//! [`LineItemFormData`] is the raw row of an entry form or an imported file.
//! Every value is kept as text so that an untouched field (`""`) stays
//! distinguishable from an explicit `0`. [`OrderLine`] is the normalized,
//! priced row that is sent to the API.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::util::round_money;

/// Raw line item as entered in a purchase or sell form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItemFormData {
    /// Medicine picked from search (absent for free-typed names)
    pub medicine_id: Option<i64>,
    #[serde(deserialize_with = "form_value")]
    pub product_name: String,
    #[serde(deserialize_with = "form_value")]
    pub batch: String,
    #[serde(deserialize_with = "form_value")]
    pub expiry_month: String,
    /// Two-digit year
    #[serde(deserialize_with = "form_value")]
    pub expiry_year: String,
    /// Pack descriptor, e.g. `1×10`
    #[serde(deserialize_with = "form_value")]
    pub pack: String,
    #[serde(deserialize_with = "form_value")]
    pub quantity: String,
    #[serde(deserialize_with = "form_value")]
    pub free_quantity: String,
    #[serde(deserialize_with = "form_value")]
    pub mrp: String,
    #[serde(deserialize_with = "form_value")]
    pub rate: String,
    /// "Disc %" column of the purchase and sell grids
    #[serde(deserialize_with = "form_value")]
    pub discount_percent: String,
    /// Scheme discount % of the card form
    #[serde(deserialize_with = "form_value")]
    pub scheme_percent: String,
    /// Flat currency discount of the card form
    #[serde(deserialize_with = "form_value")]
    pub discount_amount: String,
    #[serde(deserialize_with = "form_value")]
    pub gst_percent: String,
}

/// Accept a string, number, boolean or `null` form value and keep it as text.
///
/// `null` becomes the empty string so it reads as "untouched".
pub fn form_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    })
}

/// Priced, normalized line as persisted by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub medicine_id: Option<i64>,
    pub product_name: String,
    pub batch: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub pack: String,
    pub units_per_pack: u32,
    pub quantity: Decimal,
    pub free_quantity: Decimal,
    pub mrp: Decimal,
    pub rate: Decimal,
    pub discount_percent: Decimal,
    pub scheme_percent: Decimal,
    pub discount_amount: Decimal,
    pub gst_percent: Decimal,
    /// Final line amount, rounded to 2 dp
    pub amount: Decimal,
    /// Margin against MRP, rounded to 2 dp
    pub margin_percent: Decimal,
}

/// Aggregate over the lines of one order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub total_amount: Decimal,
    /// Expanded units (purchase) or complete rows (sell / card purchase)
    pub total_items: Decimal,
    pub total_quantity: Decimal,
    pub total_discount: Decimal,
    pub total_tax: Decimal,
}

impl OrderTotals {
    /// Totals rounded to 2 dp for display / persistence
    pub fn rounded(&self) -> Self {
        Self {
            total_amount: round_money(self.total_amount),
            total_items: self.total_items,
            total_quantity: self.total_quantity,
            total_discount: round_money(self.total_discount),
            total_tax: round_money(self.total_tax),
        }
    }
}
