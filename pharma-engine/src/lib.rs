//! Pharma Engine - order entry core of the pharmacy point of sale
//!
//! # Module structure
//!
//! ```text
//! pharma-engine/src/
//! ├── core/          # Config, engine state
//! ├── pricing/       # Field normalizer, line calculator, totals
//! ├── validation.rs  # Row completeness
//! ├── entry/         # Order drafts and submission
//! ├── search.rs      # Debounced medicine / batch search
//! ├── import/        # CSV / TSV / Excel invoice import
//! └── utils/         # Logging
//! ```
//!
//! Raw form rows flow one way: normalizer → line calculator → totals. The
//! validator runs beside them and gates row-add and submission.

pub mod core;
pub mod entry;
pub mod import;
pub mod pricing;
pub mod search;
pub mod utils;
pub mod validation;

pub use core::{Config, EngineState};
pub use entry::{EntryService, OrderDraft, OrderKind, Submission, SubmittedOrder};
pub use import::{ImportedRows, import_file};
pub use pricing::{LineItem, LinePricing, PricedLine, PricingMode, aggregate, price_line};
pub use validation::{RowValidation, has_any_data, is_row_complete, validate_row};

pub use shared::error::{AppError, AppResult, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and start logging according to the environment
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_dir.as_deref())?;
    Ok(config)
}
