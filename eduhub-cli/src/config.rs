//! Configuration management for the EduHub CLI.

use crate::storage::FileCache;
use anyhow::{Context, Result};
use eduhub::{AuthTokens, EduClient, Role};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Authentication credentials.
    pub auth: Option<AuthConfig>,
    /// API base URL override.
    pub base_url: Option<String>,
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: Option<String>,
    /// User ID.
    pub uid: String,
    /// Session role (student/tutor/admin).
    pub role: String,
}

/// Get the configuration file path.
pub fn config_path() -> Result<PathBuf> {
    let exe_path = env::current_exe().context("Could not determine executable path")?;
    let exe_dir = exe_path
        .parent()
        .context("Could not determine executable directory")?;

    Ok(exe_dir.join("eduhub.toml"))
}

/// Get the cache file path.
pub fn cache_path() -> Result<PathBuf> {
    let exe_path = env::current_exe().context("Could not determine executable path")?;
    let exe_dir = exe_path
        .parent()
        .context("Could not determine executable directory")?;

    Ok(exe_dir.join("eduhub_cache.json"))
}

/// Load configuration from file.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).context("Failed to read config file")?;

    toml::from_str(&content).context("Failed to parse config file")
}

/// Save configuration to file.
pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&path, content).context("Failed to write config file")?;

    Ok(())
}

/// Build an EduHub client that requires authentication.
pub fn build_authed_client() -> Result<EduClient> {
    let config = load_config()?;

    let auth = config
        .auth
        .context("Authentication required. Run 'eduhub auth login' first.")?;

    let role: Role = auth
        .role
        .parse()
        .map_err(|e| anyhow::anyhow!("{e} in config file"))?;

    let mut tokens = AuthTokens::new(&auth.access_token, &auth.uid);
    if let Some(refresh) = &auth.refresh_token {
        tokens = tokens.with_refresh(refresh);
    }

    let mut builder = EduClient::builder()
        .with_auth(tokens)
        .role(role)
        .cache(Arc::new(FileCache::open(cache_path()?)));
    if let Some(base_url) = &config.base_url {
        builder = builder.base_url(base_url);
    }

    builder.build().context("Failed to build EduHub client")
}
