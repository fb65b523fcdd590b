//! Configuration loading and representation.
//!
//! Values come from environment variables, read once at startup:
//!
//! | variable                      | default        |
//! |-------------------------------|----------------|
//! | `STOCKDESK_BIND_ADDR`         | `0.0.0.0:8080` |
//! | `STOCKDESK_LOG_FORMAT`        | `json`         |
//! | `STOCKDESK_MAX_UPLOAD_BYTES`  | `2097152`      |
//! | `STOCKDESK_SESSION_IDLE_SECS` | `3600`         |

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use stockdesk_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "STOCKDESK_BIND_ADDR";
pub const LOG_FORMAT_VAR: &str = "STOCKDESK_LOG_FORMAT";
pub const MAX_UPLOAD_BYTES_VAR: &str = "STOCKDESK_MAX_UPLOAD_BYTES";
pub const SESSION_IDLE_SECS_VAR: &str = "STOCKDESK_SESSION_IDLE_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;
const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for {var}: {message}")]
pub struct ConfigError {
    var: &'static str,
    message: String,
}

impl ConfigError {
    fn new(var: &'static str, message: impl ToString) -> Self {
        Self {
            var,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    /// Largest accepted CSV upload body.
    pub max_upload_bytes: usize,
    /// Sessions untouched for this long are dropped.
    pub session_idle_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::Json,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            session_idle_timeout: DEFAULT_SESSION_IDLE,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup` (unset variables return `None`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::new(BIND_ADDR_VAR, e))?;

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(v) => v.parse().map_err(|e| ConfigError::new(LOG_FORMAT_VAR, e))?,
            None => LogFormat::default(),
        };

        let max_upload_bytes = match lookup(MAX_UPLOAD_BYTES_VAR) {
            Some(v) => positive(MAX_UPLOAD_BYTES_VAR, &v)?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let session_idle_timeout = match lookup(SESSION_IDLE_SECS_VAR) {
            Some(v) => Duration::from_secs(positive(SESSION_IDLE_SECS_VAR, &v)?),
            None => DEFAULT_SESSION_IDLE,
        };

        Ok(Self {
            bind_addr,
            log_format,
            max_upload_bytes,
            session_idle_timeout,
        })
    }
}

fn positive<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr + PartialEq + Default,
    T::Err: ToString,
{
    let n = value.trim().parse::<T>().map_err(|e| ConfigError::new(var, e))?;
    if n == T::default() {
        return Err(ConfigError::new(var, "must be greater than zero"));
    }
    Ok(n)
}
