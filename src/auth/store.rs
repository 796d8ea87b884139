//! Durable credential storage.
//!
//! The access token, token type and current-user record are persisted as a
//! JSON file in a per-user data directory so a session survives process
//! restarts. Absent credentials simply mean "unauthenticated".

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::models::User;

/// Credential file name in the storage directory
const CREDENTIALS_FILE: &str = "credentials.json";

/// Token type used when the backend omits one
const DEFAULT_TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredCredentials {
    access_token: Option<String>,
    token_type: Option<String>,
    user: Option<User>,
}

/// Process-wide credential state backed by a JSON file.
///
/// Cloning is cheap; clones share the same state and file.
#[derive(Clone)]
pub struct CredentialStore {
    path: PathBuf,
    state: Arc<RwLock<StoredCredentials>>,
}

impl CredentialStore {
    /// Open the store in the platform's per-user data directory.
    pub fn open() -> StoreResult<Self> {
        let dirs = ProjectDirs::from("", "", "tourbook").ok_or(StoreError::NoStorageDir)?;
        Ok(Self::with_dir(dirs.data_dir().to_path_buf()))
    }

    /// Open the store in a specific directory. Useful for tests and for
    /// embedders that manage their own storage location.
    pub fn with_dir(dir: PathBuf) -> Self {
        let path = dir.join(CREDENTIALS_FILE);
        let state = Self::load(&path);
        Self {
            path,
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Best-effort load; a missing or unreadable file means unauthenticated.
    fn load(path: &PathBuf) -> StoredCredentials {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unparseable credential file");
                StoredCredentials::default()
            }),
            Err(_) => StoredCredentials::default(),
        }
    }

    fn persist(&self, state: &StoredCredentials) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Store the token pair returned by a successful login.
    pub fn set_token(&self, access_token: &str, token_type: &str) -> StoreResult<()> {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.access_token = Some(access_token.to_string());
            state.token_type = Some(token_type.to_string());
            state.clone()
        };
        self.persist(&snapshot)
    }

    /// Store the current-user record alongside the token.
    pub fn set_user(&self, user: User) -> StoreResult<()> {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.user = Some(user);
            state.clone()
        };
        self.persist(&snapshot)
    }

    /// Forget all credentials and delete the backing file.
    pub fn clear(&self) -> StoreResult<()> {
        if let Ok(mut state) = self.state.write() {
            *state = StoredCredentials::default();
        }
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// `Authorization` header value, present iff an access token is stored.
    pub fn auth_header(&self) -> Option<String> {
        let state = self.state.read().ok()?;
        let token = state.access_token.as_deref()?;
        let token_type = state.token_type.as_deref().unwrap_or(DEFAULT_TOKEN_TYPE);
        Some(format!("{} {}", token_type, token))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .map(|s| s.access_token.is_some())
            .unwrap_or(false)
    }

    pub fn is_superuser(&self) -> bool {
        self.state
            .read()
            .ok()
            .and_then(|s| s.user.as_ref().map(|u| u.is_superuser))
            .unwrap_or(false)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read().ok()?.user.clone()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let authenticated = self.is_authenticated();
        f.debug_struct("CredentialStore")
            .field("path", &self.path)
            .field("authenticated", &authenticated)
            .finish()
    }
}
