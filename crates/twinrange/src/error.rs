#![forbid(unsafe_code)]

//! Facade error type.

use std::fmt;

use twinrange_widgets::ConfigError;

/// Top-level error type for twinrange hosts.
#[derive(Debug)]
pub enum Error {
    /// The domain or initial values are unusable.
    Config(ConfigError),
    /// I/O failure while reading a configuration file.
    Io(std::io::Error),
    /// TOML parse failure.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse failure.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// A domain source could not produce a domain.
    Source(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
            #[cfg(feature = "config")]
            Self::Toml(err) => write!(f, "TOML parse error: {err}"),
            #[cfg(feature = "config")]
            Self::Json(err) => write!(f, "JSON parse error: {err}"),
            Self::Source(msg) => write!(f, "domain source failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
            #[cfg(feature = "config")]
            Self::Toml(err) => Some(err),
            #[cfg(feature = "config")]
            Self::Json(err) => Some(err),
            Self::Source(_) => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "config")]
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Toml(err)
    }
}

#[cfg(feature = "config")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Standard result type for twinrange APIs.
pub type Result<T> = std::result::Result<T, Error>;
