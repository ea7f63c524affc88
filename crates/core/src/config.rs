//! Process configuration, built once at startup and passed down explicitly.

use std::path::PathBuf;

use crate::constants::{DEFAULT_DB_PATH, DEFAULT_HOST, DEFAULT_PORT, SQLITE_POOL_MAX_CONNECTIONS};
use crate::env_config::{env_flag, env_parse_with_default};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging settings handed to the subscriber setup in the binary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Raise the default level from `info` to `debug`.
    pub debug: bool,
}

impl LoggingConfig {
    /// `ENV=production` selects JSON output, `DEBUG=true` enables debug level.
    #[must_use]
    pub fn from_env() -> Self {
        let production = std::env::var("ENV").is_ok_and(|v| v.eq_ignore_ascii_case("production"));
        Self::new(production, env_flag("DEBUG"))
    }

    #[must_use]
    pub fn new(production: bool, debug: bool) -> Self {
        let format = if production { LogFormat::Json } else { LogFormat::Pretty };
        Self { format, debug }
    }

    /// Default filter directive when `RUST_LOG` is not set.
    #[must_use]
    pub const fn default_directive(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub pool_size: u32,
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            pool_size: SQLITE_POOL_MAX_CONNECTIONS,
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `DB_PATH`, `HEALTH_GAUGE_DB_POOL_SIZE`, `ENV` and `DEBUG`.
    #[must_use]
    pub fn from_env() -> Self {
        let host = std::env::var("HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let db_path = std::env::var("DB_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);
        Self {
            host,
            port: env_parse_with_default("PORT", DEFAULT_PORT),
            db_path,
            pool_size: env_parse_with_default(
                "HEALTH_GAUGE_DB_POOL_SIZE",
                SQLITE_POOL_MAX_CONNECTIONS,
            )
            .max(1),
            logging: LoggingConfig::from_env(),
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
