use crate::enums::UnknownTokenPolicy;
use crate::session::Provider;
use anyhow::{Context, Result, bail};
use declarative::RetryConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use zabbix_api::{HttpTransport, ZabbixClient};

pub const URL_ENV: &str = "ZABBIX_URL";
pub const TOKEN_ENV: &str = "ZABBIX_API_TOKEN";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("zabbix-reconcile"))
}

/// Default config file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).with_context(|| format!("Could not expand path: {path}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

// ============================================================================
// Provider Config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Frontend URL; the JSON-RPC endpoint is derived from it
    pub url: String,
    pub api_token: String,
    pub request_timeout_secs: Option<u64>,
    /// Deadline for one resource operation, retries included
    pub operation_timeout_secs: Option<u64>,
    pub state_file: Option<String>,
    pub enum_policy: UnknownTokenPolicy,
    pub retry: RetrySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub backoff_factor: f64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        let retry = RetryConfig::default();
        Self {
            max_attempts: retry.max_attempts,
            base_delay_ms: retry.base_delay.as_millis() as u64,
            backoff_factor: retry.backoff_factor,
            max_delay_ms: retry.max_delay.as_millis() as u64,
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        let mut retry = RetryConfig::new(
            self.max_attempts.max(1),
            Duration::from_millis(self.base_delay_ms),
            self.backoff_factor,
        );
        retry.max_delay = Duration::from_millis(self.max_delay_ms);
        retry
    }
}

impl ProviderConfig {
    /// Load the config file, then apply environment overrides
    ///
    /// A missing file at the default location is not an error: url and token
    /// may come from the environment alone. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = default_config_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    log::debug!("No config file at {}, using defaults", path.display());
                    Self::default()
                }
            }
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override url and token from the environment
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(URL_ENV).filter(|v| !v.is_empty()) {
            self.url = url;
        }
        if let Some(token) = var(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.api_token = token;
        }
    }

    /// Check the fields needed to reach the API
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("No API url configured; set `url` in the config file or {URL_ENV}");
        }
        if self.api_token.is_empty() {
            bail!("No API token configured; set `api_token` in the config file or {TOKEN_ENV}");
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            bail!("API url must start with http:// or https://: {}", self.url);
        }
        Ok(())
    }

    /// State file path, defaulting next to the config
    pub fn state_path(&self) -> Result<PathBuf> {
        match &self.state_file {
            Some(path) => expand_path(path),
            None => Ok(config_dir()?.join("state.json")),
        }
    }

    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout_secs.map(Duration::from_secs)
    }

    /// Build the provider every resource shares
    pub fn provider(&self) -> Result<Provider> {
        self.validate()?;
        let transport = HttpTransport::new(&self.url, self.api_token.as_str());
        log::debug!("Using API endpoint {}", transport.endpoint());

        let client = ZabbixClient::new(Arc::new(transport))
            .with_timeout(self.request_timeout_secs.map(Duration::from_secs));
        Ok(Provider::new(client)
            .with_retry(self.retry.to_retry_config())
            .with_enum_policy(self.enum_policy))
    }
}

// ============================================================================
// Tests
// ============================================================================
