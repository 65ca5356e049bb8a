//! JSON API over the caller's address book.
//!
//! Handlers pass the cookie session to [`crate::services::AddressBook`] as the
//! credential store and wrap the result in the `{success, ...}` envelope.

use crate::dtos::{
    ConnectRequest, ConnectResponse, DeleteUserRequest, Empty, Envelope, UserDetailResponse,
    UserPage,
};
use crate::error::ProxyError;
use crate::pagination::PageQuery;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::Value;
use tower_sessions::Session;
use validator::Validate;

type ApiResult<T> = Result<Json<Envelope<T>>, ProxyError>;

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ProxyError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ProxyError::InvalidRequest(rejection.body_text()))
}

pub async fn connect(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<ConnectRequest>, JsonRejection>,
) -> ApiResult<ConnectResponse> {
    tracing::info!("Received connect request");
    let request = json_body(payload)?;

    let response = state.address_book.connect(&session, request).await?;
    Ok(Json(Envelope::ok(response)))
}

pub async fn department_users(
    State(state): State<AppState>,
    session: Session,
    department_id: Result<Path<u64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<UserPage> {
    let Path(department_id) =
        department_id.map_err(|rejection| ProxyError::InvalidRequest(rejection.body_text()))?;

    let query = query.map(|Query(query)| query).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "Ignoring malformed paging parameters");
        PageQuery::default()
    });

    let page = state
        .address_book
        .department_users(&session, department_id, query)
        .await?;
    Ok(Json(Envelope::ok(page)))
}

pub async fn user_detail(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
) -> ApiResult<UserDetailResponse> {
    let user = state.address_book.user_detail(&session, &user_id).await?;
    Ok(Json(Envelope::ok(UserDetailResponse { user })))
}

pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Empty> {
    let user = json_body(payload)?;
    state.address_book.create_user(&session, &user).await?;
    Ok(Json(Envelope::ok(Empty {})))
}

pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Empty> {
    let user = json_body(payload)?;
    state.address_book.update_user(&session, &user).await?;
    Ok(Json(Envelope::ok(Empty {})))
}

pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<DeleteUserRequest>, JsonRejection>,
) -> ApiResult<Empty> {
    let request = json_body(payload)?;
    request.validate()?;

    state
        .address_book
        .delete_user(&session, &request.user_id)
        .await?;
    Ok(Json(Envelope::ok(Empty {})))
}
