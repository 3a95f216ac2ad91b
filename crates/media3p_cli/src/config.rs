use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use media3p_core::ProviderType;
use media3p_engine::{ApiSettings, StalePolicy};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILENAME: &str = "media3p.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StalePolicySetting {
    #[default]
    Supersede,
    ReportAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub page_size: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub providers: Vec<String>,
    pub stale_policy: StalePolicySetting,
    pub log_file: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            api_key: api.api_key,
            page_size: api.page_size,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_bytes: api.max_bytes,
            providers: vec!["unsplash".to_string(), "coverr".to_string()],
            stale_policy: StalePolicySetting::default(),
            log_file: None,
        }
    }
}

impl CliConfig {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            page_size: self.page_size,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
        }
    }

    pub fn stale_policy(&self) -> StalePolicy {
        match self.stale_policy {
            StalePolicySetting::Supersede => StalePolicy::Supersede,
            StalePolicySetting::ReportAll => StalePolicy::ReportAll,
        }
    }

    /// Configured provider tabs, with `selected` moved to the front so it
    /// starts active. It is added if the config does not list it.
    pub fn providers_with_selected(&self, selected: &ProviderType) -> Vec<ProviderType> {
        let mut providers = vec![selected.clone()];
        providers.extend(
            self.providers
                .iter()
                .map(|raw| ProviderType::from(raw.as_str()))
                .filter(|provider| provider != selected),
        );
        providers
    }
}

/// Loads the config from `path`, or from `./media3p.ron` when no path is given.
///
/// A missing default file yields the defaults; a missing explicit file is an error.
/// The returned path is the file actually read, `None` when defaults were used.
/// Nothing is logged here since this runs before logging is initialized.
pub fn load(path: Option<&Path>) -> Result<(CliConfig, Option<PathBuf>), ConfigError> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if !explicit && err.kind() == std::io::ErrorKind::NotFound => {
            return Ok((CliConfig::default(), None));
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.clone(),
        message: err.to_string(),
    })?;
    Ok((config, Some(path)))
}
