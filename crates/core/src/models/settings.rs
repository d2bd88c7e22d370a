use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// Directory name used under the platform config/data locations.
pub const APP_DIR_NAME: &str = "activity-journal";

/// Default endpoint of the suggestion service.
pub const DEFAULT_API_BASE_URL: &str = "https://www.boredapi.com/api/activity";

/// User-configurable settings, read from `config.toml`.
/// Every field has a default so a partial (or missing) file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Endpoint that returns one random activity per request.
    pub api_base_url: String,

    /// HTTP client timeout for a single fetch.
    pub request_timeout_secs: u64,

    /// How long a "no activity found" / "service unavailable" notice stays visible.
    pub notice_seconds: u64,

    /// Where the activity list (and logs) live. `None` = platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            notice_seconds: 3,
            data_dir: None,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, CoreError> {
        let settings: Settings = toml::from_str(text)?;
        if settings.api_base_url.trim().is_empty() {
            return Err(CoreError::Config("api_base_url must not be empty".into()));
        }
        Ok(settings)
    }

    /// Load settings from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Platform location of the config file, e.g. `~/.config/activity-journal/config.toml`.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
    }

    /// Resolved data directory: the configured one, else the platform data dir,
    /// else the current directory.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join(APP_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
        })
    }
}
