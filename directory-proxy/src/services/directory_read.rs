//! Read-scoped directory operations.

use crate::models::{Department, UserDetail, UserSummary};
use crate::services::api::{take_field, DirectoryApi};
use crate::services::error::DirectoryError;
use crate::services::token::AccessToken;

#[derive(Clone)]
pub struct DirectoryReader {
    api: DirectoryApi,
}

impl DirectoryReader {
    pub fn new(api: DirectoryApi) -> Self {
        Self { api }
    }

    /// The whole department tree in one call.
    pub async fn list_departments(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<Department>, DirectoryError> {
        let body = self
            .api
            .get(
                "department_list",
                "/cgi-bin/department/list",
                &[("access_token", token.expose())],
            )
            .await?;

        let departments: Vec<Department> = take_field(body, "department")?;
        tracing::info!(count = departments.len(), "Fetched departments");
        Ok(departments)
    }

    /// Direct members of `department_id`; sub-departments are not descended into.
    pub async fn list_users(
        &self,
        token: &AccessToken,
        department_id: u64,
    ) -> Result<Vec<UserSummary>, DirectoryError> {
        let department_id = department_id.to_string();
        let body = self
            .api
            .get(
                "user_simplelist",
                "/cgi-bin/user/simplelist",
                &[
                    ("access_token", token.expose()),
                    ("department_id", department_id.as_str()),
                ],
            )
            .await?;

        let users: Vec<UserSummary> = take_field(body, "userlist")?;
        tracing::info!(department_id = %department_id, count = users.len(), "Fetched department members");
        Ok(users)
    }

    pub async fn get_user_detail(
        &self,
        token: &AccessToken,
        user_id: &str,
    ) -> Result<UserDetail, DirectoryError> {
        let body = self
            .api
            .get(
                "user_get",
                "/cgi-bin/user/get",
                &[("access_token", token.expose()), ("userid", user_id)],
            )
            .await?;

        serde_json::from_value::<UserDetail>(body)
            .map(UserDetail::without_status)
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}
