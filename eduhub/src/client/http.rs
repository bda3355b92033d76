//! HTTP client configuration and request execution.

use crate::error::{Error, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use url::Url;

/// Default EduHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.eduhub.local/api/";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "EDUHUB_API_URL";

/// Role of the current session, used for role-scoped endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Student,
    Tutor,
    Admin,
}

impl Role {
    /// Path prefix for role-scoped routes, e.g. `tutor/messages/`.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Tutor => "tutor",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "tutor" => Ok(Role::Tutor),
            "admin" => Ok(Role::Admin),
            other => Err(Error::validation(format!("unknown role: {other}"))),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL for API requests.
    pub base_url: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Read timeout.
    pub read_timeout: Duration,
    /// Session role for role-scoped routes.
    pub role: Role,
    /// Custom user agent.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(20),
            role: Role::default(),
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Resolve a relative API path to a full URL.
    pub fn resolve_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(Error::Url);
        }

        Url::parse(&self.base_url)
            .and_then(|b| b.join(path))
            .map_err(Error::Url)
    }
}

/// Build a reqwest client with the given configuration.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .gzip(true)
        .build()
        .map_err(Error::Network)
}

/// HTTP request executor.
pub struct HttpExecutor<'a> {
    client: &'a Client,
    config: &'a HttpConfig,
}

impl<'a> HttpExecutor<'a> {
    /// Create a new executor.
    pub fn new(client: &'a Client, config: &'a HttpConfig) -> Self {
        Self { client, config }
    }

    /// Build a request with common headers.
    fn build_request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header("Accept", "application/json");

        if let Some(ua) = &self.config.user_agent {
            request = request.header("User-Agent", ua.as_str());
        }
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        request
    }

    /// Execute a GET request and return the JSON body.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<serde_json::Value> {
        let url = self.config.resolve_url(path)?;
        let query: Vec<(&str, &str)> = query.iter().filter(|(_, v)| !v.is_empty()).copied().collect();

        let request = self.build_request(Method::GET, url, token).query(&query);

        let response = request.send().await.map_err(Error::Network)?;
        self.handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.send_json(Method::POST, path, body, token).await
    }

    /// Execute a PATCH request with a JSON body.
    pub async fn patch(
        &self,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.send_json(Method::PATCH, path, body, token).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<serde_json::Value> {
        let url = self.config.resolve_url(path)?;
        let request = self.build_request(Method::DELETE, url, token);

        let response = request.send().await.map_err(Error::Network)?;
        self.handle_response(response).await
    }

    async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: &serde_json::Value,
        token: Option<&str>,
    ) -> Result<serde_json::Value> {
        let url = self.config.resolve_url(path)?;
        let request = self.build_request(method, url, token).json(body);

        let response = request.send().await.map_err(Error::Network)?;
        self.handle_response(response).await
    }

    /// Handle response, mapping non-success statuses to API errors.
    async fn handle_response(&self, response: Response) -> Result<serde_json::Value> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(Error::Network)?;

        if !status.is_success() {
            let message = extract_error_detail(&bytes)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_owned());
            return Err(Error::api(status.as_u16(), message));
        }

        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(Error::Json)
    }
}

/// Pull a human-readable message from an API error body.
///
/// The platform returns either `{"detail": "..."}` or a field-error
/// map; anything else falls back to the raw body.
fn extract_error_detail(bytes: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
    if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
        return Some(detail.to_owned());
    }
    if let Some(map) = value.as_object() {
        let mut parts: Vec<String> = map
            .iter()
            .map(|(field, errors)| format!("{field}: {errors}"))
            .collect();
        parts.sort();
        if !parts.is_empty() {
            return Some(parts.join("; "));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let config = HttpConfig {
            base_url: "https://api.example.edu/api/".to_owned(),
            ..Default::default()
        };

        let url = config.resolve_url("notifications/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.edu/api/notifications/");

        let absolute = config.resolve_url("https://other.example.edu/x").unwrap();
        assert_eq!(absolute.as_str(), "https://other.example.edu/x");
    }

    #[test]
    fn test_role_route_prefix() {
        assert_eq!(Role::Tutor.route_prefix(), "tutor");
        assert_eq!(Role::Student.route_prefix(), "student");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("tutor".parse::<Role>().unwrap(), Role::Tutor);
        assert_eq!("Student".parse::<Role>().unwrap(), Role::Student);
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_extract_error_detail() {
        assert_eq!(
            extract_error_detail(br#"{"detail": "Not found."}"#),
            Some("Not found.".to_owned())
        );
        assert_eq!(
            extract_error_detail(br#"{"content": ["This field is required."]}"#),
            Some(r#"content: ["This field is required."]"#.to_owned())
        );
        assert_eq!(extract_error_detail(b"<html>"), None);
    }
}
