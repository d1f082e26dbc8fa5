//! Configuration for the qiita-mcp binary.
//!
//! Provides the [`QiitaConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `QIITA_MCP_CONFIG` environment variable
//! 3. XDG default: `~/.config/qiita-mcp/config.toml`
//! 4. Built-in defaults
//!
//! `QIITA_MCP_*` variables overlay the file. The access token is finally
//! taken from `QIITA_API_ACCESS_TOKEN` when that variable is set.

use confyg::{Confygery, env};
use qiita_core::traits::ConfigProvider;
use qiita_core::{DEFAULT_BASE_URL, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable holding the Qiita bearer token.
pub const TOKEN_ENV: &str = "QIITA_API_ACCESS_TOKEN";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "QIITA_MCP_CONFIG";

const REDACTED: &str = "<redacted>";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the qiita-mcp binary.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QiitaConfig {
    /// Project name, advertised as the MCP server name.
    pub project_name: String,

    /// Upstream API configuration.
    pub api: ApiConfig,
}

/// Upstream API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Qiita API.
    pub base_url: String,

    /// Bearer token. Not validated; absence fails upstream.
    pub access_token: Option<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for QiitaConfig {
    fn default() -> Self {
        Self {
            project_name: "qiita-api-mcp".to_string(),
            api: ApiConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
        }
    }
}

impl fmt::Debug for QiitaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QiitaConfig")
            .field("project_name", &self.project_name)
            .field("api", &self.api)
            .finish()
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| REDACTED))
            .finish()
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl QiitaConfig {
    /// Builds the effective configuration for this process.
    ///
    /// Layers, lowest first: built-in defaults, the TOML file (if present),
    /// `QIITA_MCP_*` variables, then `QIITA_API_ACCESS_TOKEN`.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load), reading the token variable through
    /// `lookup` instead of the process environment.
    pub fn load_with<F>(config_path: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layers =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path).filter(|p| p.exists()) {
            layers
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file {}: {e}", path.display())))?;
        }

        let mut env_opts = env::Options::with_top_level("QIITA_MCP");
        env_opts.add_section("api");
        layers
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = layers
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config.with_token_override(lookup(TOKEN_ENV)))
    }

    /// Replace the access token when `token` is set and non-empty.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.api.access_token = Some(token);
        }
        self
    }

    /// Picks the file to read: `--config`, then `QIITA_MCP_CONFIG`, then
    /// [`default_config_path`](Self::default_config_path).
    ///
    /// The returned path may not exist.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        explicit
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    /// `<config dir>/qiita-mcp/config.toml`, e.g. `~/.config/qiita-mcp/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("qiita-mcp").join("config.toml"))
    }

    /// A copy safe to print: the access token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api.access_token.is_some() {
            copy.api.access_token = Some(REDACTED.to_string());
        }
        copy
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for QiitaConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn access_token(&self) -> &str {
        self.api.access_token.as_deref().unwrap_or("")
    }
}

// ============================================================================
// Tests
// ============================================================================
