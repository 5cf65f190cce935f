// pharma-engine/tests/import_flow.rs
// Imported invoice → draft → priced submission

use chrono::NaiveDate;
use pharma_engine::{ErrorCode, OrderDraft, OrderKind, Submission, import_file};
use rust_decimal::Decimal;
use std::io::Write;

const INVOICE: &str = "\
Product Name,Packing,Batch No,Expiry,Qty,Free,M.R.P,Rate,Disc %,GST %
Pan 40,1×15,PN7781,11/28,4,0,155.00,7.20,5,
Azithral 500,1x5,AZ1102,03/2027,2,1,\"1,119.00\",98.50,0,12
,,,,,,,,,
";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[test]
fn test_imported_invoice_prices_like_typed_rows() {
    let imported = import_file("sai-pharma.csv", INVOICE.as_bytes()).unwrap();
    assert_eq!(imported.rows.len(), 2);
    assert!(imported.warnings.is_empty());

    let mut draft = OrderDraft::new(OrderKind::Purchase, Decimal::from(5));
    draft.set_distributor(Some(7));
    draft.set_invoice_number("SP/2026/0912");
    for row in imported.rows {
        draft.add_row(row, today()).unwrap();
    }

    let Submission::CreatePurchase(order) = draft.prepare_submission(today()).unwrap() else {
        panic!("expected a purchase");
    };

    // Blank GST falls back to 5%: 432 − 5% = 410.40, +5% = 430.92
    assert_eq!(order.items[0].gst_percent, Decimal::from(5));
    assert_eq!(order.items[0].amount, Decimal::new(43092, 2));
    // 15 units × 98.50 = 1477.50, +12% = 1654.80
    assert_eq!(order.items[1].gst_percent, Decimal::from(12));
    assert_eq!(order.items[1].amount, Decimal::new(165480, 2));
    assert_eq!(order.items[1].mrp, Decimal::from(1119));
    assert_eq!(order.items[1].expiry_year, 27);

    assert_eq!(order.totals.total_items, Decimal::from(75));
    assert_eq!(order.totals.total_amount, Decimal::new(208572, 2));
}

#[test]
fn test_import_from_disk_file() {
    let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
    writeln!(file, "Medicine\tStrips\tRate\tMRP").unwrap();
    writeln!(file, "Dolo 650\t10\t21\t30.5").unwrap();

    let path = file.path().to_string_lossy().to_string();
    let bytes = std::fs::read(file.path()).unwrap();
    let imported = import_file(&path, &bytes).unwrap();

    assert_eq!(imported.rows.len(), 1);
    assert_eq!(imported.rows[0].quantity, "10");
    assert_eq!(imported.rows[0].mrp, "30.5");
}

#[test]
fn test_partial_imported_row_blocks_submission() {
    let csv = "Item,Qty,Rate\nCrocin,3,\n";
    let imported = import_file("partial.csv", csv.as_bytes()).unwrap();

    let mut draft = OrderDraft::new(OrderKind::CardPurchase, Decimal::from(5));
    draft.set_distributor(Some(1));
    draft.set_invoice_number("C-1");
    for row in imported.rows {
        draft.push_imported_row(row);
    }

    let err = draft.prepare_submission(today()).unwrap_err();
    assert_eq!(err.code, ErrorCode::RowIncomplete);
    assert_eq!(draft.rows().len(), 1);
}

#[test]
fn test_xlsx_invoice_prices_like_csv() {
    // Two letterhead rows, a date-formatted expiry cell and numeric cells
    let bytes = include_bytes!("fixtures/sai-pharma.xlsx");
    let imported = import_file("sai-pharma.xlsx", bytes).unwrap();
    assert_eq!(imported.rows.len(), 2);
    assert!(imported.warnings.is_empty());

    let pan = &imported.rows[0];
    assert_eq!(pan.product_name, "Pan 40");
    assert_eq!(pan.expiry_month, "11");
    assert_eq!(pan.expiry_year, "28");
    assert_eq!(pan.quantity, "4");
    assert_eq!(pan.rate, "7.2");

    let mut draft = OrderDraft::new(OrderKind::Purchase, Decimal::from(5));
    draft.set_distributor(Some(7));
    draft.set_invoice_number("SP/2026/0913");
    for row in imported.rows {
        draft.add_row(row, today()).unwrap();
    }

    let Submission::CreatePurchase(order) = draft.prepare_submission(today()).unwrap() else {
        panic!("expected a purchase");
    };
    assert_eq!(order.items[0].amount, Decimal::new(43092, 2));
    assert_eq!(order.items[1].amount, Decimal::new(165480, 2));
    assert_eq!(order.totals.total_amount, Decimal::new(208572, 2));
}
