//! Request and response bodies of the JSON API.
//!
//! Every response is an envelope `{ "success": bool, ... }`; failures are
//! rendered by [`crate::error::ProxyError`].

use crate::models::{Department, UserDetail, UserSummary};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ConnectRequest {
    #[serde(alias = "corp_id")]
    #[validate(length(min = 1, message = "org_id is required"))]
    pub org_id: String,

    #[validate(length(min = 1, message = "app_secret is required"))]
    pub app_secret: String,

    #[serde(alias = "txl_secret")]
    #[validate(length(min = 1, message = "directory_secret is required"))]
    pub directory_secret: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteUserRequest {
    #[serde(alias = "userid")]
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,
}

/// `{ "success": true, ...data }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub departments: Vec<Department>,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<UserSummary>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct UserDetailResponse {
    pub user: UserDetail,
}

/// Writes answer with the bare envelope.
#[derive(Debug, Serialize)]
pub struct Empty {}
