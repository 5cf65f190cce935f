//! Shared types for the pharmacy point-of-sale workspace
//!
//! Common types used across multiple crates including domain DTOs,
//! error types and response structures.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
