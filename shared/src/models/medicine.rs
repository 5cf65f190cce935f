//! Medicine, batch and stock models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Medicine search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
    pub manufacturer: Option<String>,
    /// Pack descriptor, e.g. `1×15`
    pub pack: Option<String>,
    pub gst_percent: Option<Decimal>,
}

/// One batch of a medicine known to the stock ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineBatch {
    pub medicine_id: i64,
    pub batch: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub pack: Option<String>,
    pub mrp: Decimal,
    pub rate: Decimal,
    /// Units on hand
    pub stock: Decimal,
}

/// Stock position per medicine and batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub medicine_id: i64,
    pub medicine_name: String,
    pub batch: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub quantity: Decimal,
    pub mrp: Decimal,
}
