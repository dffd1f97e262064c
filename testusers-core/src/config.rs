//! Configuration management
//!
//! Settings live in `settings.json` inside the testusers directory:
//! ```json
//! {
//!   "appId": "1234567890",
//!   "appSecret": "...",
//!   "graphUrl": "https://graph.facebook.com",
//!   "apiVersion": "v19.0",
//!   "timeoutSecs": 30,
//!   "pageSize": 50
//! }
//! ```
//! Environment variables override the file so CI jobs can run without one.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::graph::{DEFAULT_TIMEOUT_SECS, GRAPH_PRODUCTION_URL};
use crate::domain::result::{Error, Result as DomainResult};
use crate::ports::AppCredentials;

pub const APP_ID_ENV: &str = "TESTUSERS_APP_ID";
pub const APP_SECRET_ENV: &str = "TESTUSERS_APP_SECRET";
pub const APP_TOKEN_ENV: &str = "TESTUSERS_APP_TOKEN";
pub const GRAPH_URL_ENV: &str = "TESTUSERS_GRAPH_URL";
pub const API_VERSION_ENV: &str = "TESTUSERS_API_VERSION";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    graph_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub app_access_token: Option<String>,
    pub graph_url: String,
    pub api_version: Option<String>,
    pub timeout_secs: u64,
    /// Page size requested when listing test users
    pub page_size: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            app_secret: None,
            app_access_token: None,
            graph_url: GRAPH_PRODUCTION_URL.to_string(),
            api_version: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: None,
        }
    }
}

impl Config {
    /// Load config from the testusers directory, applying environment overrides
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_with(dir, |name| std::env::var(name).ok())
    }

    /// Load config using `env` to look up override variables
    pub fn load_with<F>(dir: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = read_settings(&dir.join("settings.json"))?;
        let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            app_id: lookup(APP_ID_ENV).or(raw.app_id),
            app_secret: lookup(APP_SECRET_ENV).or(raw.app_secret),
            app_access_token: lookup(APP_TOKEN_ENV).or(raw.app_access_token),
            graph_url: lookup(GRAPH_URL_ENV)
                .or(raw.graph_url)
                .unwrap_or(defaults.graph_url),
            api_version: lookup(API_VERSION_ENV).or(raw.api_version),
            timeout_secs: raw.timeout_secs.unwrap_or(defaults.timeout_secs),
            page_size: raw.page_size,
        })
    }

    /// Save config to the testusers directory
    /// Preserves other settings this tool doesn't manage
    pub fn save(&self, dir: &Path) -> Result<()> {
        self.save_with(dir, |name| std::env::var(name).ok())
    }

    /// Save config, leaving out values that only came from `env`
    ///
    /// A field still equal to its override variable keeps whatever the file
    /// held before, so secrets injected through the environment never land
    /// on disk.
    pub fn save_with<F>(&self, dir: &Path, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings_path = dir.join("settings.json");
        let mut settings = read_settings(&settings_path)?;
        let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let keep = |name: &str, value: &Option<String>, on_file: Option<String>| {
            match (value, lookup(name)) {
                (Some(v), Some(from_env)) if *v == from_env => on_file,
                _ => value.clone(),
            }
        };

        settings.app_id = keep(APP_ID_ENV, &self.app_id, settings.app_id.take());
        settings.app_secret = keep(APP_SECRET_ENV, &self.app_secret, settings.app_secret.take());
        settings.app_access_token = keep(
            APP_TOKEN_ENV,
            &self.app_access_token,
            settings.app_access_token.take(),
        );
        let graph_url = Some(self.graph_url.clone()).filter(|u| u != GRAPH_PRODUCTION_URL);
        settings.graph_url = keep(GRAPH_URL_ENV, &graph_url, settings.graph_url.take());
        settings.api_version = keep(API_VERSION_ENV, &self.api_version, settings.api_version.take());
        settings.timeout_secs = Some(self.timeout_secs).filter(|t| *t != DEFAULT_TIMEOUT_SECS);
        settings.page_size = self.page_size;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)
            .with_context(|| format!("Failed to write {:?}", settings_path))?;
        Ok(())
    }

    /// Application credentials for app-level calls
    pub fn credentials(&self) -> DomainResult<AppCredentials> {
        let app_id = self
            .app_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "no app id configured; run 'tu setup' or set {}",
                    APP_ID_ENV
                ))
            })?;

        let mut creds = AppCredentials::new(app_id);
        creds.app_secret = self.app_secret.clone();
        creds.access_token = self.app_access_token.clone();
        Ok(creds)
    }
}

fn read_settings(path: &Path) -> Result<SettingsFile> {
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid settings file {:?}", path))
}
