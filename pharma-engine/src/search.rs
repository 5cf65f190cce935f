//! Debounced live search
//!
//! Medicine search and batch lookup race against typing. Every keystroke
//! issues a token; a request waits out the debounce window and is dropped
//! if a newer one was issued meanwhile. A response only reaches the visible
//! option list while its token is still the latest (last write wins).

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use pharma_client::{ClientResult, PharmacyApi};
use shared::models::{Medicine, MedicineBatch};
use tokio::time::Duration;

/// Request token issuer
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            latest: AtomicU64::new(0),
        }
    }

    /// Start a new request, superseding every earlier one
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }

    /// Wait out the window; `false` when a newer request arrived meanwhile
    pub async fn settle(&self, token: u64) -> bool {
        if !self.window.is_zero() {
            tokio::time::sleep(self.window).await;
        }
        self.is_latest(token)
    }
}

/// What happened to one search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Options replaced with this many results
    Applied(usize),
    /// A newer request took over; nothing changed
    Superseded,
}

/// Option list fed by debounced requests
#[derive(Debug)]
pub struct LiveSearch<T> {
    debouncer: Debouncer,
    options: RwLock<Vec<T>>,
}

impl<T: Clone> LiveSearch<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(window),
            options: RwLock::new(Vec::new()),
        }
    }

    /// Currently visible options
    pub fn options(&self) -> Vec<T> {
        self.options.read().clone()
    }

    /// Drop pending requests and empty the list
    pub fn clear(&self) {
        let _token = self.debouncer.issue();
        self.options.write().clear();
    }

    /// Debounce, fetch, and apply the result if still the latest request.
    ///
    /// A failed fetch is logged and leaves an empty list.
    pub async fn run<F, Fut>(&self, what: &str, fetch: F) -> SearchOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Vec<T>>>,
    {
        let token = self.debouncer.issue();
        if !self.debouncer.settle(token).await {
            return SearchOutcome::Superseded;
        }

        let results = match fetch().await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("{} failed: {}", what, e);
                Vec::new()
            }
        };

        let mut options = self.options.write();
        if !self.debouncer.is_latest(token) {
            tracing::debug!(token, "Discarding stale {} response", what);
            return SearchOutcome::Superseded;
        }
        let count = results.len();
        *options = results;
        SearchOutcome::Applied(count)
    }
}

/// Medicine name search
#[derive(Clone)]
pub struct MedicineSearch {
    api: Arc<dyn PharmacyApi>,
    state: Arc<LiveSearch<Medicine>>,
}

impl MedicineSearch {
    pub fn new(api: Arc<dyn PharmacyApi>, window: Duration) -> Self {
        Self {
            api,
            state: Arc::new(LiveSearch::new(window)),
        }
    }

    pub async fn search(&self, term: &str) -> SearchOutcome {
        let term = term.trim();
        if term.is_empty() {
            self.state.clear();
            return SearchOutcome::Applied(0);
        }
        self.state
            .run("Medicine search", || self.api.search_medicines(term))
            .await
    }

    pub fn options(&self) -> Vec<Medicine> {
        self.state.options()
    }
}

/// Batch lookup of one medicine
#[derive(Clone)]
pub struct BatchLookup {
    api: Arc<dyn PharmacyApi>,
    state: Arc<LiveSearch<MedicineBatch>>,
}

impl BatchLookup {
    pub fn new(api: Arc<dyn PharmacyApi>, window: Duration) -> Self {
        Self {
            api,
            state: Arc::new(LiveSearch::new(window)),
        }
    }

    /// Batches of `medicine_id` matching `term` (blank term lists all)
    pub async fn lookup(&self, medicine_id: i64, term: &str) -> SearchOutcome {
        let term = term.trim();
        self.state
            .run("Batch lookup", || self.api.search_batches(medicine_id, term))
            .await
    }

    pub fn options(&self) -> Vec<MedicineBatch> {
        self.state.options()
    }
}
