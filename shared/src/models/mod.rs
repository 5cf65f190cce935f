//! Data models
//!
//! Shared between the entry engine and the API client.
//! All IDs are `i64` as issued by the remote API.

pub mod customer;
pub mod distributor;
pub mod line_item;
pub mod medicine;
pub mod order;

// Re-exports
pub use customer::*;
pub use distributor::*;
pub use line_item::*;
pub use medicine::*;
pub use order::*;
