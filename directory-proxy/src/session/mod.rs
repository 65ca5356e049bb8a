//! Per-session directory credentials.
//!
//! Handlers only ever "load the triple for this caller" or "replace the
//! triple for this caller"; [`CredentialStore`] is that contract. The cookie
//! session used in production and the in-memory store used in tests both
//! implement it.

use crate::error::ProxyError;
use crate::services::token::TokenScope;
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use std::sync::Mutex;
use tower_sessions::Session;

const ORG_ID_KEY: &str = "org_id";
const APP_SECRET_KEY: &str = "app_secret";
const DIRECTORY_SECRET_KEY: &str = "directory_secret";

/// The organization id plus the two secrets that mint read and write tokens.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub org_id: Option<String>,
    pub app_secret: Option<Secret<String>>,
    pub directory_secret: Option<Secret<String>>,
}

impl Credentials {
    pub fn new(org_id: String, app_secret: String, directory_secret: String) -> Self {
        Self {
            org_id: Some(org_id),
            app_secret: Some(Secret::new(app_secret)),
            directory_secret: Some(Secret::new(directory_secret)),
        }
    }

    /// Organization id and the secret for `scope`, or `SessionExpired` if
    /// either is absent or blank.
    pub fn for_scope(&self, scope: TokenScope) -> Result<(&str, &Secret<String>), ProxyError> {
        let secret = match scope {
            TokenScope::Read => self.app_secret.as_ref(),
            TokenScope::Write => self.directory_secret.as_ref(),
        };

        match (self.org_id.as_deref(), secret) {
            (Some(org_id), Some(secret))
                if !org_id.is_empty() && !secret.expose_secret().is_empty() =>
            {
                Ok((org_id, secret))
            }
            _ => Err(ProxyError::SessionExpired(scope)),
        }
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Credentials, ProxyError>;

    /// Replace all three values at once.
    async fn store(&self, credentials: &Credentials) -> Result<(), ProxyError>;
}

#[async_trait]
impl CredentialStore for Session {
    async fn load(&self) -> Result<Credentials, ProxyError> {
        // Values are written as JSON `null` when absent.
        let org_id = self.get::<Option<String>>(ORG_ID_KEY).await?.flatten();
        let app_secret = self.get::<Option<String>>(APP_SECRET_KEY).await?.flatten();
        let directory_secret = self
            .get::<Option<String>>(DIRECTORY_SECRET_KEY)
            .await?
            .flatten();

        Ok(Credentials {
            org_id,
            app_secret: app_secret.map(Secret::new),
            directory_secret: directory_secret.map(Secret::new),
        })
    }

    async fn store(&self, credentials: &Credentials) -> Result<(), ProxyError> {
        let expose = |secret: &Option<Secret<String>>| {
            secret.as_ref().map(|s| s.expose_secret().clone())
        };

        self.insert(ORG_ID_KEY, credentials.org_id.clone()).await?;
        self.insert(APP_SECRET_KEY, expose(&credentials.app_secret))
            .await?;
        self.insert(DIRECTORY_SECRET_KEY, expose(&credentials.directory_secret))
            .await?;
        Ok(())
    }
}

/// Process-local store holding a single caller's credentials.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credentials: Mutex<Credentials>,
}

impl InMemoryCredentialStore {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Mutex::new(credentials),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Credentials, ProxyError> {
        self.credentials
            .lock()
            .map(|guard| guard.clone())
            .map_err(|e| ProxyError::Session(e.to_string()))
    }

    async fn store(&self, credentials: &Credentials) -> Result<(), ProxyError> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|e| ProxyError::Session(e.to_string()))?;
        *guard = credentials.clone();
        Ok(())
    }
}
