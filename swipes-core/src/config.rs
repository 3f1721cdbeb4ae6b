//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "api": { "baseUrl": "...", "loginBaseUrl": "...", "timeoutSecs": 30 },
//!   "session": { "revalidateTemporary": false }
//! }
//! ```
//! Every field is optional and unknown keys are ignored. Environment
//! variables override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

use crate::adapters::http::{CBORD_PRODUCTION_URL, DEFAULT_TIMEOUT};
use crate::services::session::CBORD_LOGIN_URL;

/// Data directory override
pub const DATA_DIR_ENV: &str = "SWIPES_DIR";
/// Services API base URL override (staging, mock servers)
pub const BASE_URL_ENV: &str = "CBORD_BASE_URL";
/// Login page host override
pub const LOGIN_BASE_URL_ENV: &str = "CBORD_LOGIN_BASE_URL";
/// Request timeout override, in seconds
pub const TIMEOUT_ENV: &str = "CBORD_TIMEOUT_SECS";
/// Revalidate a persisted temporary session on init
pub const REVALIDATE_ENV: &str = "SWIPES_REVALIDATE_TEMPORARY_SESSION";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    session: SessionSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    base_url: Option<String>,
    login_base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSettings {
    #[serde(default)]
    revalidate_temporary: bool,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub login_base_url: String,
    pub timeout: Duration,
    pub revalidate_temporary_session: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: CBORD_PRODUCTION_URL.to_string(),
            login_base_url: CBORD_LOGIN_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            revalidate_temporary_session: false,
        }
    }
}

impl Config {
    /// Load config from the data directory, then apply env overrides
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let base_url = env_var(BASE_URL_ENV)
            .or(raw.api.base_url)
            .unwrap_or_else(|| CBORD_PRODUCTION_URL.to_string());

        let login_base_url = env_var(LOGIN_BASE_URL_ENV)
            .or(raw.api.login_base_url)
            .unwrap_or_else(|| CBORD_LOGIN_URL.to_string());
        Url::parse(&login_base_url)
            .with_context(|| format!("Invalid login base URL: {}", login_base_url))?;

        let timeout = match env_var(TIMEOUT_ENV) {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .with_context(|| format!("{} must be a whole number of seconds", TIMEOUT_ENV))?,
            ),
            None => raw
                .api
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        };
        if timeout.is_zero() {
            anyhow::bail!("Request timeout must be greater than zero");
        }

        let revalidate_temporary_session = match env_var(REVALIDATE_ENV) {
            Some(value) => parse_flag(REVALIDATE_ENV, &value)?,
            None => raw.session.revalidate_temporary,
        };

        Ok(Self {
            base_url,
            login_base_url,
            timeout,
            revalidate_temporary_session,
        })
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {:?}", settings_path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid settings file {:?}", settings_path))
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => anyhow::bail!("{} must be true/false, 1/0 or yes/no, got {:?}", name, other),
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Data directory: `SWIPES_DIR`, else `~/.swipes`
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env_var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".swipes"))
        .context("Could not find home directory; set SWIPES_DIR")
}
