//! Order-entry draft
//!
//! The in-memory editing session of one purchase or sell order. Rows stay
//! raw; every derived number is recomputed from them on demand.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    LineItemFormData, OrderLine, OrderTotals, PurchaseEntry, PurchaseOrder, PurchaseOrderCreate,
    SellOrderCreate,
};
use shared::util::round_money;

use crate::pricing::normalizer::parse_whole;
use crate::pricing::{LineItem, PricedLine, PricingMode, aggregate, price_line};
use crate::validation::{RowValidation, has_any_data, validate_row};

/// Kind of order being entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Purchase order grid
    Purchase,
    /// Quick "add purchase" card
    CardPurchase,
    Sell,
}

impl OrderKind {
    pub fn pricing_mode(&self) -> PricingMode {
        match self {
            OrderKind::Purchase => PricingMode::PURCHASE,
            OrderKind::CardPurchase => PricingMode::CARD,
            OrderKind::Sell => PricingMode::SELL,
        }
    }

    pub fn is_purchase(&self) -> bool {
        matches!(self, OrderKind::Purchase | OrderKind::CardPurchase)
    }

    /// Kind a saved purchase reopens as
    pub fn from_purchase_entry(entry: PurchaseEntry) -> Self {
        match entry {
            PurchaseEntry::Grid => OrderKind::Purchase,
            PurchaseEntry::Card => OrderKind::CardPurchase,
        }
    }

    fn purchase_entry(&self) -> PurchaseEntry {
        match self {
            OrderKind::CardPurchase => PurchaseEntry::Card,
            OrderKind::Purchase | OrderKind::Sell => PurchaseEntry::Grid,
        }
    }
}

/// Request produced by a successful [`OrderDraft::prepare_submission`]
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    CreatePurchase(PurchaseOrderCreate),
    UpdatePurchase { id: i64, order: PurchaseOrderCreate },
    CreateSell(SellOrderCreate),
}

/// Duplicate invoice reported by the API for a distributor / invoice pair
#[derive(Debug, Clone, PartialEq, Eq)]
struct InvoiceConflict {
    distributor_id: i64,
    invoice_number: String,
}

#[derive(Debug, Clone)]
pub struct OrderDraft {
    kind: OrderKind,
    default_gst: Decimal,
    rows: Vec<LineItemFormData>,
    distributor_id: Option<i64>,
    invoice_number: String,
    invoice_date: Option<NaiveDate>,
    customer_id: Option<i64>,
    customer_name: Option<String>,
    editing_order_id: Option<i64>,
    duplicate_invoice: Option<InvoiceConflict>,
}

impl OrderDraft {
    pub fn new(kind: OrderKind, default_gst: Decimal) -> Self {
        Self {
            kind,
            default_gst,
            rows: Vec::new(),
            distributor_id: None,
            invoice_number: String::new(),
            invoice_date: None,
            customer_id: None,
            customer_name: None,
            editing_order_id: None,
            duplicate_invoice: None,
        }
    }

    /// Open an existing purchase order for editing, priced the way it was entered
    pub fn from_purchase_order(order: &PurchaseOrder, default_gst: Decimal) -> Self {
        let mut draft = Self::new(OrderKind::from_purchase_entry(order.entry), default_gst);
        draft.distributor_id = Some(order.distributor_id);
        draft.invoice_number = order.invoice_number.clone();
        draft.invoice_date = Some(order.invoice_date);
        draft.editing_order_id = Some(order.id);
        draft.rows = order.items.iter().map(form_from_line).collect();
        draft
    }

    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    pub fn pricing_mode(&self) -> PricingMode {
        self.kind.pricing_mode()
    }

    pub fn editing_order_id(&self) -> Option<i64> {
        self.editing_order_id
    }

    // ========== Rows ==========

    pub fn rows(&self) -> &[LineItemFormData] {
        &self.rows
    }

    /// Append a row; incomplete rows are refused with their field errors
    pub fn add_row(
        &mut self,
        row: LineItemFormData,
        today: NaiveDate,
    ) -> Result<usize, RowValidation> {
        let validation = validate_row(&row, today);
        if !validation.is_valid {
            return Err(validation);
        }
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Append an imported row without the completeness gate; imported rows
    /// are reviewed and fixed in place before submission.
    pub fn push_imported_row(&mut self, row: LineItemFormData) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Replace a row in place (rows being edited may be incomplete)
    pub fn update_row(&mut self, index: usize, row: LineItemFormData) -> AppResult<()> {
        let slot = self
            .rows
            .get_mut(index)
            .ok_or_else(|| row_not_found(index))?;
        *slot = row;
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> AppResult<LineItemFormData> {
        if index >= self.rows.len() {
            return Err(row_not_found(index));
        }
        Ok(self.rows.remove(index))
    }

    /// Normalize and price every row that has any data
    pub fn priced_lines(&self, today: NaiveDate) -> Vec<PricedLine> {
        let mode = self.pricing_mode();
        self.rows
            .iter()
            .filter(|row| has_any_data(row))
            .map(|row| {
                let item = LineItem::from_form(row, self.default_gst);
                let pricing = price_line(&item, &mode);
                PricedLine {
                    item,
                    pricing,
                    is_complete: validate_row(row, today).is_valid,
                }
            })
            .collect()
    }

    /// Unrounded order totals over the complete rows, recomputed from the rows
    pub fn totals(&self, today: NaiveDate) -> OrderTotals {
        aggregate(&self.priced_lines(today), &self.pricing_mode())
    }

    // ========== Header ==========

    pub fn distributor_id(&self) -> Option<i64> {
        self.distributor_id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn set_distributor(&mut self, distributor_id: Option<i64>) {
        if self.distributor_id != distributor_id {
            self.distributor_id = distributor_id;
            self.duplicate_invoice = None;
        }
    }

    pub fn set_invoice_number(&mut self, invoice_number: impl Into<String>) {
        let invoice_number = invoice_number.into();
        if self.invoice_number != invoice_number {
            self.invoice_number = invoice_number;
            self.duplicate_invoice = None;
        }
    }

    pub fn set_invoice_date(&mut self, date: NaiveDate) {
        self.invoice_date = Some(date);
    }

    pub fn set_customer(&mut self, customer_id: Option<i64>, customer_name: Option<String>) {
        self.customer_id = customer_id;
        self.customer_name = customer_name.filter(|n| !n.trim().is_empty());
    }

    /// Record a duplicate invoice for the current header.
    pub fn mark_duplicate_invoice(&mut self) {
        if let Some(distributor_id) = self.distributor_id {
            self.duplicate_invoice = Some(InvoiceConflict {
                distributor_id,
                invoice_number: self.invoice_number.clone(),
            });
        }
    }

    /// Record a duplicate only if the header still matches the checked pair.
    ///
    /// A check answered after the user edited the header is stale.
    pub fn mark_duplicate_invoice_for(&mut self, invoice_number: &str, distributor_id: i64) -> bool {
        if self.invoice_number == invoice_number && self.distributor_id == Some(distributor_id) {
            self.mark_duplicate_invoice();
            true
        } else {
            false
        }
    }

    pub fn has_duplicate_invoice(&self) -> bool {
        self.duplicate_invoice.is_some()
    }

    // ========== Submission ==========

    /// Build the API request for this draft without modifying it.
    ///
    /// Blank rows are dropped silently; partially filled rows are rejected
    /// with their row numbers and field errors.
    pub fn prepare_submission(&self, today: NaiveDate) -> AppResult<Submission> {
        let mode = self.pricing_mode();
        let filled: Vec<(usize, &LineItemFormData)> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| has_any_data(row))
            .collect();

        let invalid: Vec<serde_json::Value> = filled
            .iter()
            .filter_map(|(index, row)| {
                let validation = validate_row(row, today);
                (!validation.is_valid).then(|| {
                    json!({
                        "row": index + 1,
                        "errors": validation.errors,
                    })
                })
            })
            .collect();

        if !invalid.is_empty() {
            let rows: Vec<_> = invalid.iter().filter_map(|v| v.get("row").cloned()).collect();
            return Err(AppError::with_message(
                ErrorCode::RowIncomplete,
                format!("{} row(s) are incomplete", invalid.len()),
            )
            .with_detail("rows", rows)
            .with_detail("errors", invalid));
        }

        if filled.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let mut priced = Vec::with_capacity(filled.len());
        let mut items = Vec::with_capacity(filled.len());
        for (_, row) in &filled {
            let item = LineItem::from_form(row, self.default_gst);
            let pricing = price_line(&item, &mode);
            items.push(order_line(row, &item, &pricing));
            priced.push(PricedLine {
                item,
                pricing,
                is_complete: true,
            });
        }
        let totals = aggregate(&priced, &mode).rounded();

        if !self.kind.is_purchase() {
            return Ok(Submission::CreateSell(SellOrderCreate {
                customer_id: self.customer_id,
                customer_name: self.customer_name.clone(),
                items,
                totals,
            }));
        }

        let distributor_id = self
            .distributor_id
            .ok_or_else(|| AppError::new(ErrorCode::DistributorRequired))?;
        let invoice_number = self.invoice_number.trim();
        if invoice_number.is_empty() {
            return Err(AppError::new(ErrorCode::InvoiceNumberRequired));
        }
        if self.duplicate_invoice.is_some() {
            return Err(AppError::with_message(
                ErrorCode::DuplicateInvoice,
                format!("Invoice {invoice_number} already exists for this distributor"),
            )
            .with_detail("invoice_number", invoice_number)
            .with_detail("distributor_id", distributor_id));
        }

        let order = PurchaseOrderCreate {
            distributor_id,
            invoice_number: invoice_number.to_string(),
            invoice_date: self.invoice_date.unwrap_or(today),
            entry: self.kind.purchase_entry(),
            items,
            totals,
        };

        Ok(match self.editing_order_id {
            Some(id) => Submission::UpdatePurchase { id, order },
            None => Submission::CreatePurchase(order),
        })
    }
}

fn row_not_found(index: usize) -> AppError {
    AppError::with_message(ErrorCode::NotFound, format!("Row {} does not exist", index + 1))
}

/// Persisted line for a validated row; amounts rounded to 2 dp
fn order_line(
    row: &LineItemFormData,
    item: &LineItem,
    pricing: &crate::pricing::LinePricing,
) -> OrderLine {
    let rounded = pricing.rounded();
    OrderLine {
        medicine_id: row.medicine_id,
        product_name: row.product_name.trim().to_string(),
        batch: row.batch.trim().to_string(),
        expiry_month: parse_whole(&row.expiry_month).unwrap_or_default(),
        expiry_year: parse_whole(&row.expiry_year).unwrap_or_default(),
        pack: row.pack.trim().to_string(),
        units_per_pack: item.units_per_pack,
        quantity: item.quantity,
        free_quantity: item.free_quantity,
        mrp: round_money(item.mrp),
        rate: round_money(item.rate),
        discount_percent: item.discount_percent,
        scheme_percent: item.scheme_percent,
        discount_amount: round_money(item.discount_amount),
        gst_percent: item.gst_percent,
        amount: rounded.final_amount,
        margin_percent: rounded.margin_percent,
    }
}

/// Raw form row of a persisted line, for editing
fn form_from_line(line: &OrderLine) -> LineItemFormData {
    LineItemFormData {
        medicine_id: line.medicine_id,
        product_name: line.product_name.clone(),
        batch: line.batch.clone(),
        expiry_month: line.expiry_month.to_string(),
        expiry_year: format!("{:02}", line.expiry_year),
        pack: line.pack.clone(),
        quantity: line.quantity.to_string(),
        free_quantity: line.free_quantity.to_string(),
        mrp: line.mrp.to_string(),
        rate: line.rate.to_string(),
        discount_percent: line.discount_percent.to_string(),
        scheme_percent: line.scheme_percent.to_string(),
        discount_amount: line.discount_amount.to_string(),
        gst_percent: line.gst_percent.to_string(),
    }
}
