//! Row Completeness Validator
//!
//! Decides whether a raw entry row is submittable and produces the
//! inline error message of every failing field. Works on the raw text so
//! that an untouched field can be told apart from an explicit `0`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::LineItemFormData;

use crate::pricing::normalizer::{MAX_FIELD_VALUE, parse_decimal, parse_whole};

/// Two-digit years below this pivot are 20xx, the rest 19xx
const CENTURY_PIVOT: u32 = 50;

/// Field of an entry row that can carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineField {
    ProductName,
    Batch,
    ExpiryMonth,
    ExpiryYear,
    Pack,
    Quantity,
    FreeQuantity,
    Mrp,
    Rate,
}

impl LineField {
    pub fn label(&self) -> &'static str {
        match self {
            LineField::ProductName => "Product name",
            LineField::Batch => "Batch",
            LineField::ExpiryMonth => "Expiry month",
            LineField::ExpiryYear => "Expiry year",
            LineField::Pack => "Pack",
            LineField::Quantity => "Quantity",
            LineField::FreeQuantity => "Free quantity",
            LineField::Mrp => "MRP",
            LineField::Rate => "Rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: LineField,
    pub message: String,
}

impl FieldError {
    fn new(field: LineField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Outcome of validating one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowValidation {
    pub is_valid: bool,
    /// At most one error per field, in field order
    pub errors: Vec<FieldError>,
}

impl RowValidation {
    /// Inline message for a field, if it failed
    pub fn error_for(&self, field: LineField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Full year of a two-digit expiry year
pub fn expiry_full_year(two_digit: u32) -> i32 {
    let year = if two_digit < CENTURY_PIVOT {
        2000 + two_digit
    } else {
        1900 + two_digit
    };
    year as i32
}

// ── Field rules ─────────────────────────────────────────────────────

fn required_text(value: &str, field: LineField) -> Option<FieldError> {
    value
        .trim()
        .is_empty()
        .then(|| FieldError::new(field, format!("{} is required", field.label())))
}

/// `strictly_positive` separates quantity / price (`> 0`) from free quantity (`>= 0`)
fn required_number(value: &str, field: LineField, strictly_positive: bool) -> Option<FieldError> {
    if value.trim().is_empty() {
        return Some(FieldError::new(field, format!("{} is required", field.label())));
    }
    let Some(number) = parse_decimal(value) else {
        return Some(FieldError::new(field, format!("{} must be a number", field.label())));
    };
    if strictly_positive && number <= Decimal::ZERO {
        return Some(FieldError::new(
            field,
            format!("{} must be greater than 0", field.label()),
        ));
    }
    if number < Decimal::ZERO {
        return Some(FieldError::new(
            field,
            format!("{} cannot be negative", field.label()),
        ));
    }
    if number > MAX_FIELD_VALUE {
        return Some(FieldError::new(
            field,
            format!("{} must not exceed {}", field.label(), MAX_FIELD_VALUE),
        ));
    }
    None
}

fn expiry_errors(form: &LineItemFormData, today: NaiveDate, errors: &mut Vec<FieldError>) {
    let month = if form.expiry_month.trim().is_empty() {
        errors.push(FieldError::new(LineField::ExpiryMonth, "Expiry month is required"));
        None
    } else {
        match parse_whole(&form.expiry_month) {
            Some(m) if (1..=12).contains(&m) => Some(m),
            _ => {
                errors.push(FieldError::new(LineField::ExpiryMonth, "Month must be 1-12"));
                None
            }
        }
    };

    let year = if form.expiry_year.trim().is_empty() {
        errors.push(FieldError::new(LineField::ExpiryYear, "Expiry year is required"));
        None
    } else {
        match parse_whole(&form.expiry_year) {
            Some(y) if y <= 99 => Some(y),
            _ => {
                errors.push(FieldError::new(LineField::ExpiryYear, "Year must be 00-99"));
                None
            }
        }
    };

    if let (Some(month), Some(year)) = (month, year) {
        let expiry = (expiry_full_year(year), month);
        if expiry < (today.year(), today.month()) {
            errors.push(FieldError::new(LineField::ExpiryYear, "Expiry date is in the past"));
        }
    }
}

// ── Row predicates ──────────────────────────────────────────────────

/// Validate a raw row against the required-field rules as of `today`
pub fn validate_row(form: &LineItemFormData, today: NaiveDate) -> RowValidation {
    let mut errors = Vec::new();

    errors.extend(required_text(&form.product_name, LineField::ProductName));
    errors.extend(required_text(&form.batch, LineField::Batch));
    expiry_errors(form, today, &mut errors);
    errors.extend(required_text(&form.pack, LineField::Pack));
    errors.extend(required_number(&form.quantity, LineField::Quantity, true));
    errors.extend(required_number(&form.free_quantity, LineField::FreeQuantity, false));
    errors.extend(required_number(&form.mrp, LineField::Mrp, true));
    errors.extend(required_number(&form.rate, LineField::Rate, true));

    RowValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn is_row_complete(form: &LineItemFormData, today: NaiveDate) -> bool {
    validate_row(form, today).is_valid
}

/// Whether anything was entered in the row.
///
/// GST is ignored since it is pre-filled; a numeric field holding `0`
/// counts as untouched.
pub fn has_any_data(form: &LineItemFormData) -> bool {
    let text_fields = [
        &form.product_name,
        &form.batch,
        &form.expiry_month,
        &form.expiry_year,
        &form.pack,
    ];
    let numeric_fields = [
        &form.quantity,
        &form.free_quantity,
        &form.mrp,
        &form.rate,
        &form.discount_percent,
        &form.scheme_percent,
        &form.discount_amount,
    ];

    form.medicine_id.is_some()
        || text_fields.iter().any(|v| !v.trim().is_empty())
        || numeric_fields
            .iter()
            .any(|v| !v.trim().is_empty() && parse_decimal(v) != Some(Decimal::ZERO))
}
