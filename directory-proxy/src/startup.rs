//! Router construction and server lifecycle.

use crate::config::{SessionSettings, Settings};
use crate::handlers::{
    app::{health_check, readiness_check},
    directory::{connect, create_user, delete_user, department_users, update_user, user_detail},
    metrics::metrics,
};
use crate::services::{metrics::init_metrics, AddressBook, DirectoryApi};
use crate::AppState;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Wire the directory API client into application state.
pub fn build_state(settings: &Settings, metrics: PrometheusHandle) -> Result<AppState, AppError> {
    let api = DirectoryApi::new(&settings.directory)?;
    tracing::info!(base_url = %api.base_url(), "Directory API client initialized");

    let address_book = AddressBook::new(
        api,
        settings.directory.root_department_id,
        settings.pagination.default_limit,
    );

    Ok(AppState::new(address_book, metrics))
}

pub fn build_router(state: AppState, session: &SessionSettings) -> Router {
    // Credentials live only in process memory, keyed by the session cookie.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(session.secure_cookie)
        .with_expiry(Expiry::OnInactivity(Duration::hours(session.inactivity_hours)));

    let api = Router::new()
        .route("/connect", post(connect))
        .route("/users/:department_id", get(department_users))
        .route("/user/:user_id", get(user_detail))
        .route(
            "/user",
            post(create_user).put(update_user).delete(delete_user),
        );

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .nest("/api", api)
        .route_layer(from_fn(metrics_middleware))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application: install the metrics recorder, create clients and
    /// bind the listener (port 0 picks a random port).
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let metrics = init_metrics()?;
        let state = build_state(&settings, metrics)?;
        let router = build_router(state, &settings.session);

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), AppError> {
        tracing::info!("Starting directory-proxy on port {}", self.port);
        axum::serve(self.listener, self.router).await.map_err(|e| {
            tracing::error!("Server error: {}", e);
            AppError::from(e)
        })
    }
}
