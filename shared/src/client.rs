//! Client-related types shared between the engine and the API client
//!
//! Auth request/response types used in API communication.

use serde::{Deserialize, Serialize};

// Re-export ApiResponse from the error module
pub use crate::error::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
    /// Key selecting the pharmacy's datastore; sent with every request
    #[serde(default)]
    pub datastore_key: String,
}

/// Logged-in user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub role: String,
    pub pharmacy_name: Option<String>,
}
