use crate::services::error::DirectoryError;
use crate::services::token::TokenScope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of one proxied request, named by the stage that failed.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("session expired: no {0} credentials stored, connect again")]
    SessionExpired(TokenScope),

    #[error("failed to fetch {scope} token: {source}")]
    TokenFetch {
        scope: TokenScope,
        #[source]
        source: DirectoryError,
    },

    #[error("{operation} failed: {source}")]
    DirectoryCall {
        operation: &'static str,
        #[source]
        source: DirectoryError,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("session store error: {0}")]
    Session(String),
}

impl ProxyError {
    pub fn directory(operation: &'static str) -> impl FnOnce(DirectoryError) -> Self {
        move |source| ProxyError::DirectoryCall { operation, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::SessionExpired(_) => StatusCode::UNAUTHORIZED,
            ProxyError::TokenFetch { .. } | ProxyError::DirectoryCall { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ProxyError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for ProxyError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProxyError::InvalidRequest(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for ProxyError {
    fn from(err: tower_sessions::session::Error) -> Self {
        ProxyError::Session(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            ProxyError::Session(_) => tracing::error!(error = %self, "Request failed"),
            _ => tracing::warn!(error = %self, "Request failed"),
        }

        (
            self.status_code(),
            Json(json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}
