// pharma-client/src/credential.rs
// Session credentials: injected provider + JSON file storage

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::client::{LoginResponse, UserProfile};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of the credentials attached to every API request.
///
/// The HTTP client never reads ambient state; whoever constructs it decides
/// where the token and datastore key come from.
pub trait CredentialsProvider: Send + Sync + fmt::Debug {
    /// Bearer token, if logged in
    fn token(&self) -> Option<String>;

    /// Datastore key header value, if known
    fn datastore_key(&self) -> Option<String>;

    /// Called when the API answers 401; the session must not be reused.
    fn on_unauthorized(&self) {}
}

/// Fixed credentials (tests, scripts)
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
    datastore_key: Option<String>,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>, datastore_key: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            datastore_key: Some(datastore_key.into()),
        }
    }

    /// No credentials at all (login only)
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl CredentialsProvider for StaticCredentials {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn datastore_key(&self) -> Option<String> {
        self.datastore_key.clone()
    }
}

/// Persisted client session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub user: UserProfile,
    pub datastore_key: String,
    pub expires_at: Option<u64>,
}

impl Credential {
    pub fn from_login(login: &LoginResponse) -> Self {
        Self {
            token: login.token.clone(),
            user: login.user.clone(),
            datastore_key: login.datastore_key.clone(),
            expires_at: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        if let Some(expires_at) = self.expires_at {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            return now > expires_at;
        }
        false
    }
}

/// 凭证存储 (JSON file)
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, credential: &Credential) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)
    }

    /// Load the stored session; unreadable or corrupt files count as absent.
    pub fn load(&self) -> Option<Credential> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Session kept in memory and mirrored to a [`CredentialStorage`] file.
pub struct StoredCredentials {
    storage: CredentialStorage,
    current: RwLock<Option<Credential>>,
}

impl StoredCredentials {
    /// Open the store, picking up a previously saved, unexpired session.
    pub fn open(storage: CredentialStorage) -> Self {
        let current = storage.load().filter(|c| !c.is_expired());
        Self {
            storage,
            current: RwLock::new(current),
        }
    }

    /// Persist a fresh session after login
    pub fn store(&self, credential: Credential) -> std::io::Result<()> {
        self.storage.save(&credential)?;
        *self.current.write() = Some(credential);
        Ok(())
    }

    /// Drop the session from memory and disk
    pub fn clear(&self) -> std::io::Result<()> {
        *self.current.write() = None;
        self.storage.delete()
    }

    pub fn current(&self) -> Option<Credential> {
        self.current.read().clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.current.read().as_ref().map(|c| c.user.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.read().is_some()
    }
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("path", &self.storage.path())
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl CredentialsProvider for StoredCredentials {
    fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|c| c.token.clone())
    }

    fn datastore_key(&self) -> Option<String> {
        self.current.read().as_ref().map(|c| c.datastore_key.clone())
    }

    fn on_unauthorized(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
    }
}
