#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use directory_proxy::config::{
    DirectorySettings, PaginationSettings, ServerSettings, SessionSettings, Settings,
};
use directory_proxy::services::metrics::detached_handle;
use directory_proxy::services::DirectoryApi;
use directory_proxy::startup::{build_router, build_state};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ORG_ID: &str = "ww-test-org";
pub const APP_SECRET: &str = "app-secret";
pub const DIRECTORY_SECRET: &str = "directory-secret";
pub const READ_TOKEN: &str = "read-token";
pub const WRITE_TOKEN: &str = "write-token";

pub fn test_settings(base_url: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        directory: DirectorySettings {
            base_url: base_url.to_string(),
            timeout_secs: 1,
            root_department_id: 1,
        },
        session: SessionSettings::default(),
        pagination: PaginationSettings::default(),
    }
}

pub fn test_api(base_url: &str) -> DirectoryApi {
    DirectoryApi::new(&test_settings(base_url).directory).expect("Failed to build directory api")
}

/// Router wired to a wiremock directory service, carrying the session cookie
/// between requests like a browser would.
pub struct TestApp {
    pub router: Router,
    pub directory: MockServer,
    cookie: Option<String>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let directory = MockServer::start().await;
        let settings = test_settings(&directory.uri());
        let state =
            build_state(&settings, detached_handle()).expect("Failed to build application state");
        let router = build_router(state, &settings.session);

        Self {
            router,
            directory,
            cookie: None,
        }
    }

    pub async fn request(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    pub async fn connect(&mut self) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/connect",
            Some(json!({
                "org_id": ORG_ID,
                "app_secret": APP_SECRET,
                "directory_secret": DIRECTORY_SECRET,
            })),
        )
        .await
    }

    /// Paths the fake directory has been called on, in order.
    pub async fn directory_calls(&self) -> Vec<String> {
        received_paths(&self.directory).await
    }
}

pub async fn received_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

pub fn ok(mut body: Value) -> ResponseTemplate {
    body["errcode"] = json!(0);
    body["errmsg"] = json!("ok");
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn api_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "errcode": code, "errmsg": message }))
}

pub async fn mock_token(server: &MockServer, secret: &str, token: &str) {
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .and(query_param("corpid", ORG_ID))
        .and(query_param("corpsecret", secret))
        .respond_with(ok(json!({ "access_token": token, "expires_in": 7200 })))
        .mount(server)
        .await;
}

pub async fn mock_departments(server: &MockServer, departments: Value) {
    Mock::given(method("GET"))
        .and(path("/cgi-bin/department/list"))
        .and(query_param("access_token", READ_TOKEN))
        .respond_with(ok(json!({ "department": departments })))
        .mount(server)
        .await;
}

pub async fn mock_members(server: &MockServer, department_id: u64, users: Value) {
    Mock::given(method("GET"))
        .and(path("/cgi-bin/user/simplelist"))
        .and(query_param("access_token", READ_TOKEN))
        .and(query_param("department_id", department_id.to_string().as_str()))
        .respond_with(ok(json!({ "userlist": users })))
        .mount(server)
        .await;
}

pub fn sample_departments() -> Value {
    json!([
        { "id": 1, "name": "Head Office", "parentid": 0, "order": 100000000 },
        { "id": 5, "name": "Engineering", "parentid": 1, "order": 99999000 }
    ])
}

pub fn sample_users(department_id: u64, count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "userid": format!("user{:02}", i),
                    "name": format!("User {}", i),
                    "department": [department_id],
                    "open_userid": format!("open{:02}", i),
                })
            })
            .collect(),
    )
}
