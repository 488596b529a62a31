//! evdir configuration.
//!
//! Read from ~/.config/evdir/config.toml, with `EVDIR_*` environment
//! variables layered on top (e.g. `EVDIR_API_BASE_URL`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT, SEARCH_DEBOUNCE};
use crate::error::{EvdirError, EvdirResult};
use crate::event::TimestampUnit;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_debounce_ms() -> u64 {
    SEARCH_DEBOUNCE.as_millis() as u64
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EvdirConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Unit of `start_time`/`end_time` in API responses.
    #[serde(default)]
    pub timestamp_unit: TimestampUnit,

    /// Where the login flag is kept. Defaults to the platform data dir.
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for EvdirConfig {
    fn default() -> Self {
        EvdirConfig {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            timestamp_unit: TimestampUnit::default(),
            session_file: None,
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl EvdirConfig {
    pub fn config_path() -> EvdirResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EvdirError::Config("Could not determine config directory".into()))?
            .join("evdir");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented template on first run.
    pub fn load() -> EvdirResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EvdirResult<Self> {
        let config: EvdirConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EVDIR").try_parsing(true))
            .build()
            .map_err(|e| EvdirError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EvdirError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EvdirResult<()> {
        let url = url::Url::parse(&self.api_base_url).map_err(|e| {
            EvdirError::Config(format!("Invalid api_base_url '{}': {e}", self.api_base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(EvdirError::Config(format!(
                "api_base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(EvdirError::Config("request_timeout_secs must be at least 1".into()));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Resolved session file path, with `~` expanded.
    pub fn session_path(&self) -> EvdirResult<PathBuf> {
        match &self.session_file {
            Some(path) => {
                let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
                Ok(PathBuf::from(expanded))
            }
            None => Ok(dirs::data_dir()
                .ok_or_else(|| EvdirError::Config("Could not determine data directory".into()))?
                .join("evdir")
                .join("session")),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EvdirResult<()> {
        let contents = format!(
            "\
# evdir configuration

# Events API to read from:
# api_base_url = \"{}\"

# Give up on a request after this many seconds:
# request_timeout_secs = {}

# Unit of start_time/end_time in API responses: \"auto\", \"seconds\" or \"milliseconds\"
# timestamp_unit = \"auto\"

# Where the login flag is stored:
# session_file = \"~/.local/share/evdir/session\"

# Quiet period before a search query is applied in `evdir browse`:
# debounce_ms = {}
",
            DEFAULT_API_BASE_URL,
            DEFAULT_REQUEST_TIMEOUT.as_secs(),
            SEARCH_DEBOUNCE.as_millis(),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EvdirError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EvdirError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evdir/config.toml");

        EvdirConfig::create_default_config(&path).unwrap();
        let config = EvdirConfig::load_from(&path).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.timestamp_unit, TimestampUnit::Auto);
        assert_eq!(config.debounce(), SEARCH_DEBOUNCE);
    }

    #[test]
    fn reads_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base_url = \"http://localhost:8080\"\n\
             timestamp_unit = \"seconds\"\n\
             session_file = \"/tmp/evdir-session\"\n",
        )
        .unwrap();

        let config = EvdirConfig::load_from(&path).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.timestamp_unit, TimestampUnit::Seconds);
        assert_eq!(config.session_path().unwrap(), PathBuf::from("/tmp/evdir-session"));
    }

    #[test]
    fn rejects_non_http_url() {
        let config = EvdirConfig {
            api_base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EvdirError::Config(_))));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = EvdirConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
