//! Unified error codes for the pharmacy workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Party errors (distributors, customers)
//! - 4xxx: Purchase order errors
//! - 6xxx: Medicine and stock errors
//! - 7xxx: File import errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Datastore key missing from the session
    DatastoreKeyMissing = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Parties ====================
    /// Customer not found
    CustomerNotFound = 3101,

    // ==================== 4xxx: Purchase ====================
    /// Purchase order not found
    PurchaseOrderNotFound = 4001,
    /// Invoice number already used for this distributor
    DuplicateInvoice = 4002,
    /// Order has no submittable rows
    OrderEmpty = 4003,
    /// One or more rows are partially filled
    RowIncomplete = 4004,
    /// Distributor must be selected
    DistributorRequired = 4005,
    /// Invoice number must be entered
    InvoiceNumberRequired = 4006,

    // ==================== 6xxx: Medicine / Stock ====================
    /// Medicine not found
    MedicineNotFound = 6001,

    // ==================== 7xxx: Import ====================
    /// Unsupported file format
    UnsupportedFileFormat = 7001,
    /// Empty file provided
    EmptyFile = 7002,
    /// File has no recognisable header row
    ImportHeaderMissing = 7003,
    /// Format recognised but not implemented yet
    ImportNotSupported = 7004,
    /// File could not be parsed
    ImportParseFailed = 7005,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout
    TimeoutError = 9004,
    /// Local storage error
    StorageError = 9401,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::DatastoreKeyMissing => "Datastore key is missing",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Parties
            ErrorCode::CustomerNotFound => "Customer not found",

            // Purchase
            ErrorCode::PurchaseOrderNotFound => "Purchase order not found",
            ErrorCode::DuplicateInvoice => {
                "Invoice number already exists for this distributor"
            }
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::RowIncomplete => "Some rows are incomplete",
            ErrorCode::DistributorRequired => "Distributor is required",
            ErrorCode::InvoiceNumberRequired => "Invoice number is required",

            // Medicine / Stock
            ErrorCode::MedicineNotFound => "Medicine not found",

            // Import
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::ImportHeaderMissing => "No recognisable header row",
            ErrorCode::ImportNotSupported => "Import for this format is not supported yet",
            ErrorCode::ImportParseFailed => "File could not be parsed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::StorageError => "Local storage error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::DatastoreKeyMissing),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Parties
            3101 => Ok(ErrorCode::CustomerNotFound),

            // Purchase
            4001 => Ok(ErrorCode::PurchaseOrderNotFound),
            4002 => Ok(ErrorCode::DuplicateInvoice),
            4003 => Ok(ErrorCode::OrderEmpty),
            4004 => Ok(ErrorCode::RowIncomplete),
            4005 => Ok(ErrorCode::DistributorRequired),
            4006 => Ok(ErrorCode::InvoiceNumberRequired),

            // Medicine / Stock
            6001 => Ok(ErrorCode::MedicineNotFound),

            // Import
            7001 => Ok(ErrorCode::UnsupportedFileFormat),
            7002 => Ok(ErrorCode::EmptyFile),
            7003 => Ok(ErrorCode::ImportHeaderMissing),
            7004 => Ok(ErrorCode::ImportNotSupported),
            7005 => Ok(ErrorCode::ImportParseFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9401 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::DuplicateInvoice.code(), 4002);
        assert_eq!(ErrorCode::ImportNotSupported.code(), 7004);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(4002), Ok(ErrorCode::DuplicateInvoice));
        assert_eq!(ErrorCode::try_from(7001), Ok(ErrorCode::UnsupportedFileFormat));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::DuplicateInvoice).unwrap();
        assert_eq!(json, "4002");
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::RowIncomplete), "4004");
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::CustomerNotFound,
            ErrorCode::OrderEmpty,
            ErrorCode::EmptyFile,
            ErrorCode::StorageError,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}
