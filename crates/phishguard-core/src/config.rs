use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::query::ApiKey;

/// Environment variable that supplies the reputation API key.
/// Takes precedence over the config file.
pub const API_KEY_ENV: &str = "PHISHGUARD_API_KEY";

/// Hosted reputation endpoint; the API key and target URL are appended per lookup.
pub const DEFAULT_BASE_URL: &str = "https://ipqualityscore.com/api/json/url";

/// What happens after a verdict is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Presentation {
    /// Ask before opening the link, whatever the verdict.
    #[default]
    Manual,
    /// Open the link right away when it is judged genuine.
    AutoRedirect,
}

/// Global configuration loaded from `~/.config/phishguard/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct PhishguardConfig {
    /// Base URL of the reputation endpoint (without the key segment).
    pub base_url: String,
    /// API key. Prefer the `PHISHGUARD_API_KEY` environment variable over storing it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    pub timeout_secs: u64,
    #[serde(default)]
    pub presentation: Presentation,
    /// Command used to open a URL once the user proceeds (URL is passed as the last argument).
    #[serde(default = "default_browser")]
    pub browser: String,
}

fn default_browser() -> String {
    "xdg-open".to_string()
}

impl Default for PhishguardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            connect_timeout_secs: 10,
            timeout_secs: 20,
            presentation: Presentation::Manual,
            browser: default_browser(),
        }
    }
}

// The key must never end up in logs; `load_or_init` callers debug-print the config.
impl fmt::Debug for PhishguardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhishguardConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("timeout_secs", &self.timeout_secs)
            .field("presentation", &self.presentation)
            .field("browser", &self.browser)
            .finish()
    }
}

impl PhishguardConfig {
    /// Resolve the API key from `PHISHGUARD_API_KEY`, falling back to the config file entry.
    pub fn resolve_api_key(&self) -> Result<ApiKey> {
        self.resolve_api_key_from(std::env::var(API_KEY_ENV).ok())
    }

    /// Like `resolve_api_key` with the environment value passed in explicitly.
    pub fn resolve_api_key_from(&self, env_value: Option<String>) -> Result<ApiKey> {
        let raw = env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .with_context(|| {
                format!("no API key configured: set {API_KEY_ENV} or `api_key` in the config file")
            })?;
        Ok(ApiKey::new(raw)?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishguard")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PhishguardConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, writing defaults there first if it does not exist.
pub fn load_or_init_at(path: &Path) -> Result<PhishguardConfig> {
    if !path.exists() {
        let default_cfg = PhishguardConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PhishguardConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
