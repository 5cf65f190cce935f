//! Pharma Client - HTTP client for the remote pharmacy API
//!
//! Provides authenticated calls for distributors, customers, medicine search,
//! stock, purchase orders and sell orders.

pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod http;

pub use api::PharmacyApi;
pub use config::ClientConfig;
pub use credential::{
    Credential, CredentialStorage, CredentialsProvider, StaticCredentials, StoredCredentials,
};
pub use error::{ClientError, ClientResult};
pub use http::{DATASTORE_KEY_HEADER, HttpClient};

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, LoginResponse, UserProfile};
