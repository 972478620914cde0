//! # configs
//!
//! Runtime settings for the forum API. Sources, lowest priority first:
//! built-in defaults, `config/default.toml`, `config/{FORUM_ENV}.toml`,
//! then `FORUM__SECTION__KEY` environment variables (a `.env` file is
//! loaded into the environment first if present).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("missing required setting `{0}`")]
    Missing(&'static str),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(deserialize_with = "secret")]
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    /// Shared HS256 key for access tokens.
    #[serde(deserialize_with = "secret")]
    pub access_token_key: SecretString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    pub format: LogFormat,
    /// `EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

/// `FORUM__SECTION__KEY` variables, e.g. `FORUM__SERVER__PORT=8080`.
fn environment() -> Environment {
    Environment::with_prefix("FORUM")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

impl Settings {
    /// Loads `.env`, config files and environment.
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        let profile = std::env::var("FORUM_ENV").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            .add_source(environment());
        Self::build(builder)
    }

    /// Settings from a TOML document layered over the defaults.
    pub fn from_toml(document: &str) -> Result<Self, SettingsError> {
        Self::build(Config::builder().add_source(File::from_str(document, FileFormat::Toml)))
    }

    fn build(sources: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = sources
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("storage.backend", "memory")?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 5)?
            .set_default("auth.access_token_key", "")?
            .set_default("log.format", "pretty")?
            .set_default("log.filter", "info")?
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.auth.access_token_key.expose_secret().is_empty() {
            return Err(SettingsError::Missing("auth.access_token_key"));
        }
        if self.storage.backend == StorageBackend::Postgres
            && self.database.url.expose_secret().is_empty()
        {
            return Err(SettingsError::Missing("database.url"));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
