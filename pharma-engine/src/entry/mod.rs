//! Order entry: editing sessions and their submission to the API

pub mod draft;
pub mod service;

pub use draft::{OrderDraft, OrderKind, Submission};
pub use service::{EntryService, SubmittedOrder};
