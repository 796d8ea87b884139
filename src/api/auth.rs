//! Authentication facade.
//!
//! Auth data is never cached; the predicates read local credential state
//! only and never touch the network.

use std::sync::Arc;

use reqwest::Method;
use tracing::info;

use crate::error::ApiResult;
use crate::gateway::HttpGateway;
use crate::models::{LoginRequest, TokenResponse, User};

#[derive(Debug)]
pub struct AuthApi {
    gateway: Arc<HttpGateway>,
}

impl AuthApi {
    pub(crate) fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    /// Authenticate and persist the session.
    ///
    /// On success the token is stored first so the follow-up current-user
    /// fetch goes out authenticated; the user record is then persisted
    /// alongside it.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let token: TokenResponse = self
            .gateway
            .send_json(Method::POST, "/login", &request)
            .await?;

        self.gateway
            .credentials()
            .set_token(&token.access_token, &token.token_type)?;

        let user: User = self.gateway.get("/users/me").await?;
        self.gateway.credentials().set_user(user.clone())?;

        info!(email = %user.email, "logged in");
        Ok(user)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, email: &str, password: &str) -> ApiResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.gateway.send_json(Method::POST, "/register", &request).await
    }

    /// Fetch the authenticated user from the backend. Never cached.
    pub async fn current_user(&self) -> ApiResult<User> {
        self.gateway.get("/users/me").await
    }

    /// Whether the backend currently recognizes us as an administrator.
    /// Any failure, including an expired session, reads as `false`.
    pub async fn check_admin_access(&self) -> bool {
        self.current_user()
            .await
            .map(|user| user.is_superuser)
            .unwrap_or(false)
    }

    /// Forget the session locally: credentials gone, cache emptied. No
    /// network call is made.
    pub fn logout(&self) -> ApiResult<()> {
        self.gateway.credentials().clear()?;
        self.gateway.cache().clear();
        info!("logged out");
        Ok(())
    }

    /// Whether an access token is stored. Local check only.
    pub fn is_authenticated(&self) -> bool {
        self.gateway.credentials().is_authenticated()
    }

    /// Whether the stored user record is a superuser. Local check only.
    pub fn is_superuser(&self) -> bool {
        self.gateway.credentials().is_superuser()
    }

    /// The stored user record, if any.
    pub fn stored_user(&self) -> Option<User> {
        self.gateway.credentials().current_user()
    }
}
