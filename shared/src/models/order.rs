//! Purchase and sell order models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::line_item::{OrderLine, OrderTotals};

/// Screen a purchase was entered on; decides how its lines are priced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseEntry {
    /// Purchase order grid (pack expansion, discount on gross)
    #[default]
    Grid,
    /// Quick "add purchase" card (scheme + flat discount)
    Card,
}

/// Persisted purchase order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: i64,
    pub distributor_id: i64,
    pub distributor_name: Option<String>,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    /// Orders saved before the field existed were all grid entries
    #[serde(default)]
    pub entry: PurchaseEntry,
    pub items: Vec<OrderLine>,
    pub totals: OrderTotals,
    pub created_at: i64,
}

/// Create / update purchase order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderCreate {
    pub distributor_id: i64,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub entry: PurchaseEntry,
    pub items: Vec<OrderLine>,
    pub totals: OrderTotals,
}

/// Answer of the duplicate invoice check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCheck {
    pub exists: bool,
}

/// Create sell order payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellOrderCreate {
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub items: Vec<OrderLine>,
    pub totals: OrderTotals,
}

/// Persisted sell order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellOrder {
    pub id: i64,
    pub bill_number: String,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub items: Vec<OrderLine>,
    pub totals: OrderTotals,
    pub created_at: i64,
}
