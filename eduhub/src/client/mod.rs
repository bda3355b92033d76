//! HTTP client and configuration.

mod auth;
mod http;

pub use auth::AuthTokens;
pub use http::{HttpConfig, Role, BASE_URL_ENV, DEFAULT_BASE_URL};

use crate::api::{MessageApi, NotificationApi, RosterApi};
use crate::cache::CacheStorage;
use crate::error::{Error, Result};
use http::{build_client, HttpExecutor};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating an [`EduClient`].
pub struct EduClientBuilder {
    auth: Option<AuthTokens>,
    http_config: HttpConfig,
    cache: Option<Arc<dyn CacheStorage>>,
}

impl std::fmt::Debug for EduClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EduClientBuilder")
            .field("auth", &self.auth.as_ref().map(|a| &a.uid))
            .field("http_config", &self.http_config)
            .field("cache", &self.cache.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Default for EduClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EduClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            auth: None,
            http_config: HttpConfig::default(),
            cache: None,
        }
    }

    /// Set authentication from an access token and user ID.
    pub fn auth(mut self, access: impl Into<String>, uid: impl Into<String>) -> Self {
        self.auth = Some(AuthTokens::new(access, uid));
        self
    }

    /// Set authentication from AuthTokens.
    pub fn with_auth(mut self, auth: AuthTokens) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.http_config.base_url = url.into();
        self
    }

    /// Set the session role.
    pub fn role(mut self, role: Role) -> Self {
        self.http_config.role = role;
        self
    }

    /// Set custom user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.http_config.user_agent = Some(ua.into());
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = timeout;
        self
    }

    /// Set read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.read_timeout = timeout;
        self
    }

    /// Set cache storage.
    pub fn cache(mut self, storage: Arc<dyn CacheStorage>) -> Self {
        self.cache = Some(storage);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<EduClient> {
        let http_client = build_client(&self.http_config)?;

        Ok(EduClient {
            inner: Arc::new(ClientInner {
                http: http_client,
                config: self.http_config,
                auth: self.auth,
                cache: self.cache,
            }),
        })
    }
}

/// Internal client state.
pub(crate) struct ClientInner {
    pub http: reqwest::Client,
    pub config: HttpConfig,
    pub auth: Option<AuthTokens>,
    /// Cache storage for client-side conveniences
    pub cache: Option<Arc<dyn CacheStorage>>,
}

impl ClientInner {
    /// Get auth info or error.
    pub fn require_auth(&self) -> Result<&AuthTokens> {
        self.auth.as_ref().ok_or(Error::AuthRequired)
    }

    /// Get the bearer token or error.
    pub fn token(&self) -> Result<&str> {
        Ok(self.require_auth()?.access.as_str())
    }

    /// Create HTTP executor.
    pub fn executor(&self) -> HttpExecutor<'_> {
        HttpExecutor::new(&self.http, &self.config)
    }

    /// Execute an authenticated GET request.
    pub async fn get_authed(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value> {
        let token = self.token()?;
        self.executor().get(path, query, Some(token)).await
    }

    /// Execute an authenticated POST request.
    pub async fn post_authed(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let token = self.token()?;
        self.executor().post(path, body, Some(token)).await
    }

    /// Execute an authenticated PATCH request.
    pub async fn patch_authed(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let token = self.token()?;
        self.executor().patch(path, body, Some(token)).await
    }

    /// Execute an authenticated DELETE request.
    pub async fn delete_authed(&self, path: &str) -> Result<serde_json::Value> {
        let token = self.token()?;
        self.executor().delete(path, Some(token)).await
    }
}

/// Client for the EduHub platform API.
#[derive(Clone)]
pub struct EduClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl EduClient {
    /// Create a new client builder.
    pub fn builder() -> EduClientBuilder {
        EduClientBuilder::new()
    }

    /// Get the notification API.
    pub fn notifications(&self) -> NotificationApi {
        NotificationApi::new(self.inner.clone())
    }

    /// Get the message API.
    pub fn messages(&self) -> MessageApi {
        MessageApi::new(self.inner.clone())
    }

    /// Get the roster API.
    pub fn roster(&self) -> RosterApi {
        RosterApi::new(self.inner.clone())
    }

    /// Check if the client is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.inner.auth.is_some()
    }

    /// Get the current authentication tokens.
    pub fn auth_tokens(&self) -> Option<&AuthTokens> {
        self.inner.auth.as_ref()
    }

    /// Get the current user ID if authenticated.
    pub fn current_uid(&self) -> Option<&str> {
        self.inner.auth.as_ref().map(|a| a.uid.as_str())
    }

    /// Get the configured cache storage, if any.
    pub fn cache(&self) -> Option<Arc<dyn CacheStorage>> {
        self.inner.cache.clone()
    }

    /// Recent-search store over the configured cache, if any.
    pub fn recent_searches(&self) -> Option<crate::store::RecentSearches> {
        self.inner
            .cache
            .clone()
            .map(crate::store::RecentSearches::new)
    }

    /// Get the session role.
    pub fn role(&self) -> Role {
        self.inner.config.role
    }
}

impl std::fmt::Debug for EduClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EduClient")
            .field("authenticated", &self.is_authenticated())
            .field("role", &self.inner.config.role)
            .field("base_url", &self.inner.config.base_url)
            .finish()
    }
}
