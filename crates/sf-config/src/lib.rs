//! # sf-config
//!
//! Layered settings: built-in defaults, then an optional `sportify.toml`,
//! then `SPORTIFY__SECTION__KEY` environment variables (a `.env` file is
//! loaded first if present).

use std::path::PathBuf;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "SPORTIFY";
pub const CONFIG_FILE: &str = "sportify";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub submission: SubmissionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the `file` backend; one JSON file per slot.
    pub data_dir: PathBuf,
    pub sqlite_url: String,
    pub slot_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    /// Where applications are POSTed.
    pub endpoint: String,
    /// Unset means the HTTP client's own default applies.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// Reads `.env`, `sportify.toml` (optional) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        let cfg = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::finish(cfg)
    }

    /// Defaults overlaid with a TOML document; no file or environment access.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let cfg = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::finish(cfg)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }

    fn finish(cfg: Config) -> Result<Self, ConfigError> {
        let app: AppConfig = cfg.try_deserialize()?;
        app.check()?;
        Ok(app)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.storage.slot_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.slot_key must not be empty".into()));
        }
        let endpoint = self.submission.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "submission.endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }
        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("storage.backend", "file")?
        .set_default("storage.data_dir", "./data")?
        .set_default("storage.sqlite_url", "sqlite:sportify.db")?
        .set_default("storage.slot_key", "sportify_sponsors")?
        .set_default("submission.endpoint", "http://localhost:8080/api/sponsors")?
        .set_default("log.format", "pretty")
}
