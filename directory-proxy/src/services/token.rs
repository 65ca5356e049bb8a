//! Credential exchange against the directory's `gettoken` endpoint.

use crate::services::api::{take_field, DirectoryApi};
use crate::services::error::DirectoryError;
use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// Which secret a token is minted from, and therefore what it may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    /// Application secret: department and user reads.
    Read,
    /// Directory (address-book) secret: user create/update/delete.
    Write,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::Read => "read",
            TokenScope::Write => "write",
        }
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-lived bearer credential. Never stored; expiry is the directory's concern.
pub struct AccessToken {
    scope: TokenScope,
    value: Secret<String>,
}

impl AccessToken {
    pub fn new(scope: TokenScope, value: String) -> Self {
        Self {
            scope,
            value: Secret::new(value),
        }
    }

    pub fn scope(&self) -> TokenScope {
        self.scope
    }

    pub(crate) fn expose(&self) -> &str {
        self.value.expose_secret()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("scope", &self.scope)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone)]
pub struct TokenExchange {
    api: DirectoryApi,
}

impl TokenExchange {
    pub fn new(api: DirectoryApi) -> Self {
        Self { api }
    }

    /// Exchange `org_id` + `secret` for a fresh token. One call, no retry, no cache.
    pub async fn fetch_token(
        &self,
        org_id: &str,
        secret: &Secret<String>,
        scope: TokenScope,
    ) -> Result<AccessToken, DirectoryError> {
        tracing::info!(scope = %scope, "Fetching access token");

        let body = self
            .api
            .get(
                "gettoken",
                "/cgi-bin/gettoken",
                &[("corpid", org_id), ("corpsecret", secret.expose_secret())],
            )
            .await?;

        let token: String = take_field(body, "access_token")?;
        tracing::info!(scope = %scope, "Access token obtained");

        Ok(AccessToken::new(scope, token))
    }
}
