use std::sync::Arc;

use pharma_client::{
    ClientError, Credential, CredentialStorage, HttpClient, PharmacyApi, StoredCredentials,
    UserProfile,
};
use shared::error::{AppError, AppResult};

use crate::core::Config;
use crate::entry::{EntryService, OrderDraft, OrderKind};
use crate::search::{BatchLookup, MedicineSearch};

/// File name of the persisted session inside `DATA_DIR`
const SESSION_FILE: &str = "session.json";

/// Wired-up engine: configuration, session, API client and the services
/// built on top of it.
#[derive(Clone)]
pub struct EngineState {
    pub config: Config,
    credentials: Arc<StoredCredentials>,
    api: Arc<dyn PharmacyApi>,
    pub entry: EntryService,
    pub medicines: MedicineSearch,
    pub batches: BatchLookup,
}

impl std::fmt::Debug for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineState")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl EngineState {
    /// Open the stored session and build the HTTP client
    pub fn initialize(config: Config) -> AppResult<Self> {
        let storage = CredentialStorage::new(&config.data_dir, SESSION_FILE);
        let credentials = Arc::new(StoredCredentials::open(storage));
        let client = HttpClient::new(&config.client_config(), credentials.clone())
            .map_err(AppError::from)?;
        tracing::info!(
            api = %config.api_base_url,
            logged_in = credentials.is_logged_in(),
            "Engine initialized"
        );
        Ok(Self::with_api(config, credentials, Arc::new(client)))
    }

    /// Build the state over any API implementation
    pub fn with_api(
        config: Config,
        credentials: Arc<StoredCredentials>,
        api: Arc<dyn PharmacyApi>,
    ) -> Self {
        let window = config.search_debounce();
        Self {
            entry: EntryService::new(api.clone()),
            medicines: MedicineSearch::new(api.clone(), window),
            batches: BatchLookup::new(api.clone(), window),
            config,
            credentials,
            api,
        }
    }

    pub fn api(&self) -> &Arc<dyn PharmacyApi> {
        &self.api
    }

    /// Log in and persist the session
    pub async fn login(&self, username: &str, password: &str) -> AppResult<UserProfile> {
        let response = self.api.login(username, password).await.map_err(|e| {
            tracing::warn!(username, "Login failed: {}", e);
            match e {
                ClientError::Unauthorized => {
                    AppError::new(shared::ErrorCode::InvalidCredentials)
                }
                other => AppError::from(other),
            }
        })?;
        // Every data request is scoped by the datastore key; a session
        // without one would only collect 401s
        if response.datastore_key.trim().is_empty() {
            tracing::warn!(username, "Login response carried no datastore key");
            return Err(AppError::new(shared::ErrorCode::DatastoreKeyMissing));
        }
        self.credentials
            .store(Credential::from_login(&response))
            .map_err(|e| AppError::storage(e.to_string()))?;
        tracing::info!(username, "Logged in");
        Ok(response.user)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.credentials
            .clear()
            .map_err(|e| AppError::storage(e.to_string()))
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.credentials.user()
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.is_logged_in()
    }

    /// Fresh draft using the configured default GST
    pub fn new_draft(&self, kind: OrderKind) -> OrderDraft {
        OrderDraft::new(kind, self.config.default_gst_percent)
    }

    /// Load a saved purchase order into a draft for editing
    pub async fn edit_purchase_order(&self, id: i64) -> AppResult<OrderDraft> {
        let order = self.api.get_purchase_order(id).await.map_err(AppError::from)?;
        Ok(OrderDraft::from_purchase_order(
            &order,
            self.config.default_gst_percent,
        ))
    }
}
