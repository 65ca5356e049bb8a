mod common;

use common::*;
use directory_proxy::dtos::ConnectRequest;
use directory_proxy::error::ProxyError;
use directory_proxy::pagination::PageQuery;
use directory_proxy::services::{AddressBook, DirectoryError, TokenScope};
use directory_proxy::session::{CredentialStore, Credentials, InMemoryCredentialStore};
use secrecy::{ExposeSecret, Secret};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

fn address_book(server: &MockServer) -> AddressBook {
    AddressBook::new(test_api(&server.uri()), 1, 15)
}

fn connected_store() -> InMemoryCredentialStore {
    InMemoryCredentialStore::new(Credentials::new(
        ORG_ID.to_string(),
        APP_SECRET.to_string(),
        DIRECTORY_SECRET.to_string(),
    ))
}

#[tokio::test]
async fn missing_session_makes_no_network_call() {
    let server = MockServer::start().await;
    let book = address_book(&server);
    let store = InMemoryCredentialStore::default();

    let err = book
        .department_users(&store, 5, PageQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::SessionExpired(TokenScope::Read)));

    let err = book.delete_user(&store, "lisi").await.unwrap_err();
    assert!(matches!(err, ProxyError::SessionExpired(TokenScope::Write)));

    assert!(received_paths(&server).await.is_empty());
}

#[tokio::test]
async fn write_needs_directory_secret_even_with_app_secret() {
    let server = MockServer::start().await;
    let store = InMemoryCredentialStore::new(Credentials {
        org_id: Some(ORG_ID.to_string()),
        app_secret: Some(Secret::new(APP_SECRET.to_string())),
        directory_secret: None,
    });

    let err = address_book(&server)
        .create_user(&store, &json!({ "userid": "lisi" }))
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::SessionExpired(TokenScope::Write)));
    assert!(received_paths(&server).await.is_empty());
}

#[tokio::test]
async fn token_failure_stops_before_directory_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(api_error(40001, "invalid credential"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/user/simplelist"))
        .respond_with(ok(json!({ "userlist": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let err = address_book(&server)
        .department_users(&connected_store(), 5, PageQuery::default())
        .await
        .unwrap_err();

    match &err {
        ProxyError::TokenFetch { scope, source } => {
            assert_eq!(*scope, TokenScope::Read);
            assert!(matches!(source, DirectoryError::Api { code: 40001, .. }));
        }
        other => panic!("expected token failure, got {other:?}"),
    }
    assert!(err.to_string().contains("code: 40001, invalid credential"));
    assert_eq!(received_paths(&server).await, vec!["/cgi-bin/gettoken"]);
}

#[tokio::test]
async fn directory_failure_is_reported_as_its_own_stage() {
    let server = MockServer::start().await;
    mock_token(&server, APP_SECRET, READ_TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/user/simplelist"))
        .respond_with(api_error(60123, "invalid party id"))
        .mount(&server)
        .await;

    let err = address_book(&server)
        .department_users(&connected_store(), 999, PageQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::DirectoryCall { .. }));
    assert_eq!(
        err.to_string(),
        "listing department members failed: code: 60123, invalid party id"
    );
}

#[tokio::test]
async fn department_users_paginates_full_membership() {
    let server = MockServer::start().await;
    mock_token(&server, APP_SECRET, READ_TOKEN).await;
    mock_members(&server, 5, sample_users(5, 25)).await;

    let page = address_book(&server)
        .department_users(
            &connected_store(),
            5,
            PageQuery {
                page: Some("2".to_string()),
                limit: Some("10".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(page.users.len(), 10);
    assert_eq!(page.users[0].userid(), Some("user10"));
    assert_eq!(page.users[9].userid(), Some("user19"));
}

#[tokio::test]
async fn department_users_uses_default_limit() {
    let server = MockServer::start().await;
    mock_token(&server, APP_SECRET, READ_TOKEN).await;
    mock_members(&server, 5, sample_users(5, 25)).await;

    let page = address_book(&server)
        .department_users(&connected_store(), 5, PageQuery::default())
        .await
        .unwrap();

    assert_eq!((page.page, page.limit), (1, 15));
    assert_eq!(page.users.len(), 15);
    assert_eq!(page.total, 25);
}

#[tokio::test]
async fn connect_stores_credentials_before_loading() {
    let server = MockServer::start().await;
    mock_token(&server, APP_SECRET, READ_TOKEN).await;
    mock_departments(&server, sample_departments()).await;
    mock_members(&server, 1, sample_users(1, 3)).await;

    let store = InMemoryCredentialStore::default();
    let response = address_book(&server)
        .connect(
            &store,
            ConnectRequest {
                org_id: ORG_ID.to_string(),
                app_secret: APP_SECRET.to_string(),
                directory_secret: DIRECTORY_SECRET.to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(response.departments.len(), 2);
    assert_eq!(response.users.len(), 3);

    let stored = store.load().await.unwrap();
    assert_eq!(stored.org_id.as_deref(), Some(ORG_ID));
    assert_eq!(
        stored.directory_secret.unwrap().expose_secret(),
        DIRECTORY_SECRET
    );
}

#[tokio::test]
async fn connect_rejects_blank_secrets_without_storing() {
    let server = MockServer::start().await;
    let store = InMemoryCredentialStore::default();

    let err = address_book(&server)
        .connect(
            &store,
            ConnectRequest {
                org_id: ORG_ID.to_string(),
                app_secret: String::new(),
                directory_secret: DIRECTORY_SECRET.to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ProxyError::InvalidRequest(_)));
    assert!(store.load().await.unwrap().org_id.is_none());
    assert!(received_paths(&server).await.is_empty());
}

#[tokio::test]
async fn writes_use_the_directory_secret() {
    let server = MockServer::start().await;
    mock_token(&server, DIRECTORY_SECRET, WRITE_TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/cgi-bin/user/delete"))
        .respond_with(ok(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    address_book(&server)
        .delete_user(&connected_store(), "lisi")
        .await
        .unwrap();
}
