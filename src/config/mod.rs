//! Layered settings for the native front-end
//!
//! Precedence, lowest first: built-in defaults, the TOML file, `USERDESK_*`
//! environment variables (`USERDESK_API__BASE_URL`, `USERDESK_LOG__LEVEL`, ...),
//! then command-line flags.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;
use crate::notify::DEFAULT_TTL_MS;

pub const DEFAULT_API_URL: &str = "https://699319588f29113acd3ff867.mockapi.io/user-crud/user-crud";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub notifications: NotificationSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Collection endpoint; records live at `<base_url>/<id>`
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationSettings {
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSettings {
    /// `tracing` level filter: error, warn, info, debug or trace
    pub level: String,
}

impl Settings {
    /// Settings for a CLI invocation: `--config` file (optional), environment,
    /// then flag overrides.
    pub fn new_with_cli(cli: &Cli) -> Result<Self, SettingsError> {
        let mut settings = Self::from_file(Some(&cli.config))?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;
        Ok(settings)
    }

    /// Defaults, then `path` if it exists, then the environment. The result
    /// is not validated; call [`Self::validate`] once all overrides are in.
    pub fn from_file(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("api.base_url", DEFAULT_API_URL)?
            .set_default("notifications.ttl_ms", DEFAULT_TTL_MS as i64)?
            .set_default("log.level", "info")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("USERDESK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(url) = &cli.api_url {
            self.api.base_url = url.clone();
        }
        if cli.verbose {
            self.log.level = "debug".to_string();
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| SettingsError::InvalidValue {
            field: "api.base_url".into(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.notifications.ttl_ms == 0 {
            return Err(SettingsError::InvalidValue {
                field: "notifications.ttl_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }

        if !matches!(
            self.log.level.to_ascii_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(SettingsError::InvalidValue {
                field: "log.level".into(),
                reason: format!("unknown level '{}'", self.log.level),
            });
        }

        Ok(())
    }

    /// Effective settings as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
