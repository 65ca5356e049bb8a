use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        state.metrics.render(),
    )
}
