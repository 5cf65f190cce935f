//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Party errors
/// - 4xxx: Purchase errors
/// - 5xxx: Sell errors
/// - 6xxx: Medicine / stock errors
/// - 7xxx: Import errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Distributor / customer errors (3xxx)
    Party,
    /// Purchase order errors (4xxx)
    Purchase,
    /// Sell order errors (5xxx)
    Sell,
    /// Medicine and stock errors (6xxx)
    Medicine,
    /// File import errors (7xxx)
    Import,
    /// System errors (8xxx, 9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Party,
            4000..5000 => Self::Purchase,
            5000..6000 => Self::Sell,
            6000..7000 => Self::Medicine,
            7000..8000 => Self::Import,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Party => "party",
            Self::Purchase => "purchase",
            Self::Sell => "sell",
            Self::Medicine => "medicine",
            Self::Import => "import",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
