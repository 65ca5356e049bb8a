//! Address-book operations as seen by one caller.
//!
//! Each operation follows the same sequence: load the caller's credentials,
//! fail with `SessionExpired` if the secret for the needed scope is missing,
//! exchange it for a fresh token, then make the directory call. Nothing is
//! cached between or within requests.

use crate::dtos::{ConnectRequest, ConnectResponse, UserPage};
use crate::error::ProxyError;
use crate::models::UserDetail;
use crate::pagination::{paginate, PageQuery};
use crate::services::api::DirectoryApi;
use crate::services::directory_read::DirectoryReader;
use crate::services::directory_write::DirectoryWriter;
use crate::services::token::{AccessToken, TokenExchange, TokenScope};
use crate::session::{CredentialStore, Credentials};
use serde_json::Value;
use validator::Validate;

#[derive(Clone)]
pub struct AddressBook {
    tokens: TokenExchange,
    reader: DirectoryReader,
    writer: DirectoryWriter,
    root_department_id: u64,
    default_page_limit: usize,
}

impl AddressBook {
    pub fn new(api: DirectoryApi, root_department_id: u64, default_page_limit: usize) -> Self {
        Self {
            tokens: TokenExchange::new(api.clone()),
            reader: DirectoryReader::new(api.clone()),
            writer: DirectoryWriter::new(api),
            root_department_id,
            default_page_limit,
        }
    }

    async fn token<S>(&self, store: &S, scope: TokenScope) -> Result<AccessToken, ProxyError>
    where
        S: CredentialStore + ?Sized,
    {
        let credentials = store.load().await?;
        self.token_for(&credentials, scope).await
    }

    async fn token_for(
        &self,
        credentials: &Credentials,
        scope: TokenScope,
    ) -> Result<AccessToken, ProxyError> {
        let (org_id, secret) = credentials.for_scope(scope)?;

        self.tokens
            .fetch_token(org_id, secret, scope)
            .await
            .map_err(|source| ProxyError::TokenFetch { scope, source })
    }

    /// Validate and store the caller's credentials, then load the department
    /// tree and the members of the root department.
    ///
    /// The credentials are kept even when the directory rejects them, so a
    /// later call reports the directory's error rather than an expired session.
    pub async fn connect<S>(
        &self,
        store: &S,
        request: ConnectRequest,
    ) -> Result<ConnectResponse, ProxyError>
    where
        S: CredentialStore + ?Sized,
    {
        request.validate()?;

        let credentials = Credentials::new(
            request.org_id,
            request.app_secret,
            request.directory_secret,
        );
        store.store(&credentials).await?;
        tracing::info!("Stored directory credentials for session");

        let token = self.token_for(&credentials, TokenScope::Read).await?;

        let departments = self
            .reader
            .list_departments(&token)
            .await
            .map_err(ProxyError::directory("listing departments"))?;

        let users = self
            .reader
            .list_users(&token, self.root_department_id)
            .await
            .map_err(ProxyError::directory("listing root department members"))?;

        tracing::info!(
            departments = departments.len(),
            users = users.len(),
            "Connected to directory"
        );

        Ok(ConnectResponse { departments, users })
    }

    /// One page of the direct members of `department_id`.
    pub async fn department_users<S>(
        &self,
        store: &S,
        department_id: u64,
        query: PageQuery,
    ) -> Result<UserPage, ProxyError>
    where
        S: CredentialStore + ?Sized,
    {
        let (page, limit) = query.resolve(self.default_page_limit);
        let token = self.token(store, TokenScope::Read).await?;

        let all_users = self
            .reader
            .list_users(&token, department_id)
            .await
            .map_err(ProxyError::directory("listing department members"))?;

        let (users, total) = paginate(&all_users, page, limit);
        tracing::debug!(department_id, page, limit, total, "Paginated department members");

        Ok(UserPage {
            users,
            total,
            page,
            limit,
        })
    }

    pub async fn user_detail<S>(&self, store: &S, user_id: &str) -> Result<UserDetail, ProxyError>
    where
        S: CredentialStore + ?Sized,
    {
        let token = self.token(store, TokenScope::Read).await?;

        self.reader
            .get_user_detail(&token, user_id)
            .await
            .map_err(ProxyError::directory("fetching user detail"))
    }

    pub async fn create_user<S>(&self, store: &S, user: &Value) -> Result<(), ProxyError>
    where
        S: CredentialStore + ?Sized,
    {
        let token = self.token(store, TokenScope::Write).await?;

        self.writer
            .create_user(&token, user)
            .await
            .map_err(ProxyError::directory("creating user"))?;
        tracing::info!("User created");
        Ok(())
    }

    pub async fn update_user<S>(&self, store: &S, user: &Value) -> Result<(), ProxyError>
    where
        S: CredentialStore + ?Sized,
    {
        let token = self.token(store, TokenScope::Write).await?;

        self.writer
            .update_user(&token, user)
            .await
            .map_err(ProxyError::directory("updating user"))?;
        tracing::info!("User updated");
        Ok(())
    }

    pub async fn delete_user<S>(&self, store: &S, user_id: &str) -> Result<(), ProxyError>
    where
        S: CredentialStore + ?Sized,
    {
        let token = self.token(store, TokenScope::Write).await?;
        tracing::debug!(scope = %token.scope(), user_id, "Deleting user");

        self.writer
            .delete_user(&token, user_id)
            .await
            .map_err(ProxyError::directory("deleting user"))?;
        tracing::info!(user_id, "User deleted");
        Ok(())
    }
}
