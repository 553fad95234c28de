//! Application configuration.
//!
//! Values come from a RON file, then `RECIPE_API_*` environment variables,
//! then command-line flags, each layer overriding the previous one.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, LogDestination};
use recipe_core::FailurePresentation;
use recipe_engine::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILENAME: &str = "recipe_app.ron";
const ENV_TOKEN: &str = "RECIPE_API_TOKEN";
const ENV_BASE_URL: &str = "RECIPE_API_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PresentationSetting {
    #[default]
    Legacy,
    Distinct,
}

impl From<PresentationSetting> for FailurePresentation {
    fn from(setting: PresentationSetting) -> Self {
        match setting {
            PresentationSetting::Legacy => FailurePresentation::Legacy,
            PresentationSetting::Distinct => FailurePresentation::Distinct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogSetting {
    #[default]
    Terminal,
    File,
    Both,
}

impl From<LogSetting> for LogDestination {
    fn from(setting: LogSetting) -> Self {
        match setting {
            LogSetting::Terminal => LogDestination::Terminal,
            LogSetting::File => LogDestination::File,
            LogSetting::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub auth_token: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub failure_presentation: PresentationSetting,
    pub log_destination: LogSetting,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            auth_token: String::new(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_bytes: client.max_bytes,
            failure_presentation: PresentationSetting::default(),
            log_destination: LogSetting::default(),
            log_file: PathBuf::from("./recipe_app.log"),
        }
    }
}

impl AppConfig {
    /// Loads `path`, or `recipe_app.ron` in the working directory when no path is given.
    /// Only the implicit default file may be missing.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        engine_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Applies `RECIPE_API_TOKEN` and `RECIPE_API_BASE_URL`; blank values are ignored.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(token) = non_blank(ENV_TOKEN) {
            self.auth_token = token;
        }
        if let Some(base_url) = non_blank(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        self
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
        }
    }

    /// How long the app waits for an answer before giving up on a load.
    pub fn load_deadline(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .saturating_add(self.request_timeout_secs)
                .saturating_add(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(auth_token: "Token abc", failure_presentation: Distinct, log_destination: Both)"#
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.auth_token, "Token abc");
        assert_eq!(config.failure_presentation, PresentationSetting::Distinct);
        assert_eq!(config.log_destination, LogSetting::Both);
        assert_eq!(config.base_url, AppConfig::default().base_url);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(dir.path().join("nope.ron").as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "(auth_token: 42").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn env_overrides_skip_blank_values() {
        let env: HashMap<&str, &str> = [
            ("RECIPE_API_TOKEN", "Token env"),
            ("RECIPE_API_BASE_URL", "  "),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::default()
            .with_env_overrides(|key| env.get(key).map(|value| value.to_string()));
        assert_eq!(config.auth_token, "Token env");
        assert_eq!(config.base_url, AppConfig::default().base_url);
    }

    #[test]
    fn client_settings_follow_config() {
        let config = AppConfig {
            request_timeout_secs: 3,
            max_bytes: 99,
            ..AppConfig::default()
        };
        let settings = config.client_settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.max_bytes, 99);
    }

    #[test]
    fn huge_timeouts_saturate_load_deadline() {
        let config = AppConfig {
            connect_timeout_secs: u64::MAX,
            request_timeout_secs: u64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(config.load_deadline(), Duration::from_secs(u64::MAX));

        let config = AppConfig {
            connect_timeout_secs: 2,
            request_timeout_secs: 5,
            ..AppConfig::default()
        };
        assert_eq!(config.load_deadline(), Duration::from_secs(8));
    }
}
