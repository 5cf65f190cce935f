//! File import
//!
//! Reads distributor invoices exported as CSV / TSV or as `.xls` / `.xlsx`
//! workbooks into raw entry rows. Both end up as string records; column
//! headers are matched through [`columns::ColumnMap`] and values are kept as
//! text, so they go through the same normalizer and validator as rows typed
//! by hand.

pub mod columns;

use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook_from_rs};
use csv::{ReaderBuilder, StringRecord, Trim};
use regex::Regex;
use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::LineItemFormData;

use crate::validation::has_any_data;
pub use columns::{ColumnMap, ImportField};

/// Rows searched for the header line (invoices often start with a letterhead)
const HEADER_SCAN_LIMIT: usize = 10;

/// Minimum recognized columns for a header line
const MIN_HEADER_COLUMNS: usize = 2;

const UTF8_BOM: char = '\u{feff}';

static NUMERIC_EXPIRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\s*[/\-.\s]\s*(\d{4}|\d{2})$").expect("valid expiry pattern")
});

static NAMED_EXPIRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{3,9})\.?\s*[/\-.\s]?\s*(\d{4}|\d{2})$").expect("valid expiry pattern")
});

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// File formats recognized by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Tsv,
    Pdf,
    /// Excel 97-2003 workbook
    Xls,
    /// Office Open XML workbook
    Xlsx,
    Unknown,
}

impl ImportFormat {
    fn delimiter(&self) -> Option<u8> {
        match self {
            ImportFormat::Csv => Some(b','),
            ImportFormat::Tsv => Some(b'\t'),
            _ => None,
        }
    }
}

pub fn detect_format(file_name: &str) -> ImportFormat {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("csv") => ImportFormat::Csv,
        Some("tsv" | "txt") => ImportFormat::Tsv,
        Some("pdf") => ImportFormat::Pdf,
        Some("xls") => ImportFormat::Xls,
        Some("xlsx") => ImportFormat::Xlsx,
        _ => ImportFormat::Unknown,
    }
}

/// Non-fatal problem with one imported line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportWarning {
    /// 1-based line in the file
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportedRows {
    pub rows: Vec<LineItemFormData>,
    pub warnings: Vec<ImportWarning>,
    /// Data lines that carried nothing and were skipped
    pub skipped: usize,
}

/// Month number from a name or abbreviation (`Aug`, `august`)
fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

fn two_digit_year(year: &str) -> Option<u32> {
    let year: u32 = year.parse().ok()?;
    Some(year % 100)
}

/// Parse expiry text such as `08/27`, `8-27`, `08/2027`, `08.27` or
/// `Aug-27` into `(month, two-digit year)`.
pub fn parse_expiry_text(text: &str) -> Option<(u32, u32)> {
    let text = text.trim();
    let (month, year) = if let Some(caps) = NUMERIC_EXPIRY.captures(text) {
        (caps[1].parse::<u32>().ok()?, two_digit_year(&caps[2])?)
    } else if let Some(caps) = NAMED_EXPIRY.captures(text) {
        (month_from_name(&caps[1])?, two_digit_year(&caps[2])?)
    } else {
        return None;
    };
    (1..=12).contains(&month).then_some((month, year))
}

/// Import a file by name and content
pub fn import_file(file_name: &str, bytes: &[u8]) -> AppResult<ImportedRows> {
    let format = detect_format(file_name);
    match format {
        ImportFormat::Pdf => {
            return Err(AppError::with_message(
                ErrorCode::ImportNotSupported,
                "PDF import is not supported yet",
            ));
        }
        ImportFormat::Unknown => {
            return Err(AppError::with_message(
                ErrorCode::UnsupportedFileFormat,
                format!("Unsupported file format: {file_name}"),
            )
            .with_detail("file", file_name));
        }
        ImportFormat::Csv | ImportFormat::Tsv | ImportFormat::Xls | ImportFormat::Xlsx => {}
    }

    let imported = match format.delimiter() {
        Some(delimiter) => import_delimited(bytes, delimiter)?,
        None => import_spreadsheet(bytes, format)?,
    };
    tracing::info!(
        file = file_name,
        rows = imported.rows.len(),
        warnings = imported.warnings.len(),
        "File imported"
    );
    Ok(imported)
}

/// Parse delimited text into raw rows
pub fn import_delimited(bytes: &[u8], delimiter: u8) -> AppResult<ImportedRows> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_start_matches(UTF8_BOM);
    if text.trim().is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, _>>()
        .map_err(parse_failed)?;

    rows_from_records(&records)
}

/// Read the first worksheet of an `.xls` / `.xlsx` workbook into raw rows
pub fn import_spreadsheet(bytes: &[u8], format: ImportFormat) -> AppResult<ImportedRows> {
    if bytes.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    let cursor = Cursor::new(bytes);
    let sheet = match format {
        ImportFormat::Xlsx => {
            let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(parse_failed)?;
            workbook.worksheet_range_at(0).map(|r| r.map_err(parse_failed))
        }
        ImportFormat::Xls => {
            let mut workbook: Xls<_> = open_workbook_from_rs(cursor).map_err(parse_failed)?;
            workbook.worksheet_range_at(0).map(|r| r.map_err(parse_failed))
        }
        other => {
            return Err(AppError::with_message(
                ErrorCode::UnsupportedFileFormat,
                format!("{other:?} is not a spreadsheet format"),
            ));
        }
    };
    let sheet = sheet.ok_or_else(|| AppError::new(ErrorCode::EmptyFile))??;

    let records = sheet_records(&sheet);
    if records.iter().all(|record| record.iter().all(str::is_empty)) {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    rows_from_records(&records)
}

fn parse_failed(err: impl std::fmt::Display) -> AppError {
    AppError::with_message(ErrorCode::ImportParseFailed, err.to_string())
}

/// One string record per sheet row, starting at sheet row 1 so that
/// warnings point at the row number shown by the spreadsheet program
fn sheet_records(sheet: &Range<Data>) -> Vec<StringRecord> {
    let leading = sheet.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut records = vec![StringRecord::new(); leading];
    records.extend(
        sheet
            .rows()
            .map(|cells| cells.iter().map(cell_text).collect::<StringRecord>()),
    );
    records
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        // Expiry columns are often typed as dates; hand them on as `MM/YY`
        Data::DateTime(value) => value
            .as_datetime()
            .map(|dt| dt.format("%m/%y").to_string())
            .unwrap_or_else(|| value.as_f64().to_string()),
        other => other.to_string().trim().to_string(),
    }
}

/// Locate the header line and turn the records below it into raw rows
fn rows_from_records(records: &[StringRecord]) -> AppResult<ImportedRows> {
    let (header_index, map) = records
        .iter()
        .take(HEADER_SCAN_LIMIT)
        .enumerate()
        .map(|(i, record)| (i, ColumnMap::from_headers(&record.iter().collect::<Vec<_>>())))
        .find(|(_, map)| map.len() >= MIN_HEADER_COLUMNS && map.contains(ImportField::ProductName))
        .ok_or_else(|| AppError::new(ErrorCode::ImportHeaderMissing))?;

    let mut imported = ImportedRows::default();
    for (index, record) in records.iter().enumerate().skip(header_index + 1) {
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);
        let row = form_from_record(record, &map, line, &mut imported.warnings);
        if has_any_data(&row) {
            imported.rows.push(row);
        } else {
            imported.skipped += 1;
        }
    }

    if imported.rows.is_empty() {
        tracing::warn!("Import found a header but no data rows");
    }
    Ok(imported)
}

fn form_from_record(
    record: &StringRecord,
    map: &ColumnMap,
    line: u64,
    warnings: &mut Vec<ImportWarning>,
) -> LineItemFormData {
    let cell = |field: ImportField| -> String {
        map.get(field)
            .and_then(|i| record.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let mut row = LineItemFormData {
        product_name: cell(ImportField::ProductName),
        batch: cell(ImportField::Batch),
        pack: cell(ImportField::Pack),
        quantity: cell(ImportField::Quantity),
        free_quantity: cell(ImportField::FreeQuantity),
        mrp: cell(ImportField::Mrp),
        rate: cell(ImportField::Rate),
        discount_percent: cell(ImportField::DiscountPercent),
        scheme_percent: cell(ImportField::SchemePercent),
        discount_amount: cell(ImportField::DiscountAmount),
        gst_percent: cell(ImportField::GstPercent),
        ..Default::default()
    };

    let expiry = cell(ImportField::Expiry);
    if !expiry.is_empty() {
        match parse_expiry_text(&expiry) {
            Some((month, year)) => {
                row.expiry_month = month.to_string();
                row.expiry_year = format!("{year:02}");
            }
            None => warnings.push(ImportWarning {
                line,
                message: format!("Unrecognized expiry '{expiry}'"),
            }),
        }
    }

    let month = cell(ImportField::ExpiryMonth);
    if !month.is_empty() {
        match month.parse::<u32>().ok().or_else(|| month_from_name(&month)) {
            Some(m) => row.expiry_month = m.to_string(),
            None => warnings.push(ImportWarning {
                line,
                message: format!("Unrecognized expiry month '{month}'"),
            }),
        }
    }

    let year = cell(ImportField::ExpiryYear);
    if !year.is_empty() {
        match two_digit_year(&year) {
            Some(y) => row.expiry_year = format!("{y:02}"),
            None => warnings.push(ImportWarning {
                line,
                message: format!("Unrecognized expiry year '{year}'"),
            }),
        }
    }

    row
}
