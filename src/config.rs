//! Runtime configuration read from environment variables.

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_UPLOAD_WEBHOOK: &str = "http://localhost:5678/webhook/pdf-upload";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

const API_BASE_VAR: &str = "VETLENS_API_BASE";
const UPLOAD_WEBHOOK_VAR: &str = "VETLENS_UPLOAD_WEBHOOK";
const ASSETS_DIR_VAR: &str = "VETLENS_ASSETS_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_base: String,
    pub upload_webhook: String,
    pub assets_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upload_webhook: DEFAULT_UPLOAD_WEBHOOK.to_string(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl DashboardConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `VETLENS_API_BASE`: diagnosis API base URL, default `http://localhost:8000`
    /// - `VETLENS_UPLOAD_WEBHOOK`: PDF ingestion webhook URL
    /// - `VETLENS_ASSETS_DIR`: directory holding the viewer illustrations
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base = url_var(&lookup, API_BASE_VAR, DEFAULT_API_BASE)?;
        let upload_webhook = url_var(&lookup, UPLOAD_WEBHOOK_VAR, DEFAULT_UPLOAD_WEBHOOK)?;
        let assets_dir = lookup(ASSETS_DIR_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR), PathBuf::from);

        Ok(Self {
            api_base,
            upload_webhook,
            assets_dir,
        })
    }
}

fn url_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    let raw = lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string());

    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl { var, value: raw });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
