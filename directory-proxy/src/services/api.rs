//! HTTP transport to the directory service.
//!
//! Every endpoint of the directory API answers with a JSON body carrying an
//! integer `errcode` (0 on success) and an `errmsg`. This module turns each
//! response into `Result<Value, DirectoryError>` so that no caller ever has to
//! inspect a status code embedded in a "successful" transport response.

use crate::config::DirectorySettings;
use crate::services::error::DirectoryError;
use metrics::counter;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use service_core::error::AppError;
use service_core::observability::TracedClientExt;
use std::time::Duration;

/// Shared reqwest client bound to one directory service base URL.
#[derive(Clone)]
pub struct DirectoryApi {
    client: Client,
    base_url: String,
}

impl DirectoryApi {
    pub fn new(settings: &DirectorySettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build directory HTTP client: {}", e);
                AppError::InternalError(e.into())
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` with query parameters and return the checked body.
    pub(crate) async fn get<Q>(
        &self,
        operation: &'static str,
        path: &str,
        query: &Q,
    ) -> Result<Value, DirectoryError>
    where
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let result = self.client.traced_get(&url).query(query).send().await;
        self.finish(operation, result).await
    }

    /// POST a JSON `body` to `path` and return the checked body.
    pub(crate) async fn post<Q>(
        &self,
        operation: &'static str,
        path: &str,
        query: &Q,
        body: &Value,
    ) -> Result<Value, DirectoryError>
    where
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let result = self
            .client
            .traced_post(&url)
            .query(query)
            .json(body)
            .send()
            .await;
        self.finish(operation, result).await
    }

    async fn finish(
        &self,
        operation: &'static str,
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<Value, DirectoryError> {
        let outcome = read_body(result).await.and_then(check_status);

        match &outcome {
            Ok(_) => {
                tracing::debug!(operation, "Directory call succeeded");
                counter!("directory_api_requests_total", "operation" => operation, "outcome" => "ok")
                    .increment(1);
            }
            Err(e) => {
                // URLs are not logged: they carry secrets and access tokens.
                tracing::error!(operation, kind = e.kind(), error = %e, "Directory call failed");
                counter!("directory_api_requests_total", "operation" => operation, "outcome" => e.kind())
                    .increment(1);
            }
        }

        outcome
    }
}

async fn read_body(
    result: Result<reqwest::Response, reqwest::Error>,
) -> Result<Value, DirectoryError> {
    let response = result.map_err(|e| DirectoryError::Transport(e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DirectoryError::HttpStatus(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| DirectoryError::Transport(e.without_url().to_string()))?;

    serde_json::from_str(&body).map_err(|e| DirectoryError::Decode(e.to_string()))
}

/// Map a non-zero `errcode` to [`DirectoryError::Api`].
pub(crate) fn check_status(body: Value) -> Result<Value, DirectoryError> {
    let code = body
        .get("errcode")
        .and_then(Value::as_i64)
        .ok_or(DirectoryError::MissingStatus)?;

    if code != 0 {
        let message = body
            .get("errmsg")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(DirectoryError::Api { code, message });
    }

    Ok(body)
}

/// Take `field` out of a checked body and deserialize it.
///
/// An absent field is [`DirectoryError::MissingField`]; an empty array is a
/// valid empty result.
pub(crate) fn take_field<T>(mut body: Value, field: &'static str) -> Result<T, DirectoryError>
where
    T: serde::de::DeserializeOwned,
{
    let value = body
        .get_mut(field)
        .map(Value::take)
        .ok_or(DirectoryError::MissingField(field))?;

    serde_json::from_value(value).map_err(|e| DirectoryError::Decode(e.to_string()))
}
