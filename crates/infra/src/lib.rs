//! Infrastructure layer: CSV codec, session registry, configuration.

pub mod config;
pub mod csv_codec;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use csv_codec::CsvError;
pub use session::{InMemorySessionStore, Session, SessionError, SessionHandle, SessionStore};
