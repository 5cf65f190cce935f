use std::process::ExitCode;

use anyhow::Context;
use pharma_engine::{
    OrderDraft, OrderKind, has_any_data, import_file, setup_environment, validate_row,
};
use shared::util::today;

const USAGE: &str = "usage: pharma-engine <file> [purchase|sell|card]";

fn parse_kind(arg: Option<&str>) -> anyhow::Result<OrderKind> {
    match arg.map(str::to_ascii_lowercase).as_deref() {
        None | Some("purchase") => Ok(OrderKind::Purchase),
        Some("sell") => Ok(OrderKind::Sell),
        Some("card") => Ok(OrderKind::CardPurchase),
        Some(other) => anyhow::bail!("unknown order kind '{other}'\n{USAGE}"),
    }
}

fn run() -> anyhow::Result<()> {
    let config = setup_environment()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = args.first().context(USAGE)?;
    let kind = parse_kind(args.get(1).map(String::as_str))?;

    let bytes = std::fs::read(path).with_context(|| format!("failed to read {path}"))?;
    let imported = import_file(path, &bytes).map_err(|e| anyhow::anyhow!("[{}] {}", e.code, e))?;

    for warning in &imported.warnings {
        tracing::warn!(line = warning.line, "{}", warning.message);
    }

    let today = today();
    let mut draft = OrderDraft::new(kind, config.default_gst_percent);
    for (index, row) in imported.rows.into_iter().enumerate() {
        let validation = validate_row(&row, today);
        if !validation.is_valid {
            let problems: Vec<String> = validation
                .errors
                .iter()
                .map(|e| e.message.clone())
                .collect();
            println!("row {:>3}  incomplete: {}", index + 1, problems.join("; "));
        }
        // Incomplete rows are priced for the table but left out of the totals
        draft.push_imported_row(row);
    }

    println!(
        "{:>3}  {:<28} {:>8} {:>8} {:>10} {:>9} {:>9} {:>10} {:>8}",
        "#", "product", "qty", "units", "gross", "disc", "tax", "amount", "margin%"
    );
    // `*` marks rows that are not counted in the totals
    let filled = draft.rows().iter().filter(|row| has_any_data(row));
    for (index, (row, line)) in filled.zip(draft.priced_lines(today)).enumerate() {
        let pricing = line.pricing.rounded();
        println!(
            "{:>3}{} {:<28} {:>8} {:>8} {:>10} {:>9} {:>9} {:>10} {:>8}",
            index + 1,
            if line.is_complete { ' ' } else { '*' },
            row.product_name,
            line.item.quantity,
            pricing.total_units,
            pricing.gross_amount,
            pricing.discount_amount,
            pricing.tax_amount,
            pricing.final_amount,
            pricing.margin_percent,
        );
    }

    let totals = draft.totals(today).rounded();
    println!();
    println!("items     {}", totals.total_items);
    println!("quantity  {}", totals.total_quantity);
    println!("discount  {:.2}", totals.total_discount);
    println!("tax       {:.2}", totals.total_tax);
    println!("total     {:.2}", totals.total_amount);

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
