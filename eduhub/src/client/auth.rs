//! Authentication state management.

/// Authentication tokens for the EduHub API.
///
/// The platform issues an access/refresh token pair. Refreshing is
/// handled by an external auth service; this library only carries the
/// tokens and attaches the access token to requests.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    /// Bearer access token.
    pub access: String,
    /// Refresh token.
    pub refresh: Option<String>,
    /// User ID of the session owner.
    pub uid: String,
}

impl AuthTokens {
    /// Create new auth tokens.
    pub fn new(access: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: None,
            uid: uid.into(),
        }
    }

    /// Attach a refresh token.
    pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }

    /// Check if auth looks valid.
    pub fn is_valid(&self) -> bool {
        !self.access.is_empty() && !self.uid.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_tokens_validity() {
        let valid = AuthTokens::new("access123", "42");
        assert!(valid.is_valid());
        assert!(valid.refresh.is_none());

        let with_refresh = AuthTokens::new("access123", "42").with_refresh("refresh456");
        assert_eq!(with_refresh.refresh.as_deref(), Some("refresh456"));

        assert!(!AuthTokens::new("", "42").is_valid());
        assert!(!AuthTokens::new("access123", "").is_valid());
    }
}
