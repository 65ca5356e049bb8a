//! Write-scoped directory operations. Payloads are forwarded verbatim.

use crate::services::api::DirectoryApi;
use crate::services::error::DirectoryError;
use crate::services::token::AccessToken;
use serde_json::Value;

#[derive(Clone)]
pub struct DirectoryWriter {
    api: DirectoryApi,
}

impl DirectoryWriter {
    pub fn new(api: DirectoryApi) -> Self {
        Self { api }
    }

    pub async fn create_user(&self, token: &AccessToken, user: &Value) -> Result<(), DirectoryError> {
        self.api
            .post(
                "user_create",
                "/cgi-bin/user/create",
                &[("access_token", token.expose())],
                user,
            )
            .await?;
        Ok(())
    }

    pub async fn update_user(&self, token: &AccessToken, user: &Value) -> Result<(), DirectoryError> {
        self.api
            .post(
                "user_update",
                "/cgi-bin/user/update",
                &[("access_token", token.expose())],
                user,
            )
            .await?;
        Ok(())
    }

    pub async fn delete_user(&self, token: &AccessToken, user_id: &str) -> Result<(), DirectoryError> {
        self.api
            .get(
                "user_delete",
                "/cgi-bin/user/delete",
                &[("access_token", token.expose()), ("userid", user_id)],
            )
            .await?;
        Ok(())
    }
}
