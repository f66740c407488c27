//! Structured error types for configuration resolution.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Config file exists but could not be read
    ConfigFileReadError,
    /// Config file contents are not valid for the format
    ConfigFileSyntaxError,
    /// A required value is not defined in the config
    ConfigFileDataError,
    /// A resolver setting could not be understood
    InvalidSetting,
}

/// Failure reported by a format parser.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("document is null")]
    NullDocument,
}

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{}", missing_path_message(.path, .config.as_deref()))]
    MissingPath {
        path: String,
        config: Option<PathBuf>,
    },

    #[error("unknown config format: '{0}' (expected: auto, yaml, json)")]
    InvalidFormat(String),

    #[error("invalid override rule: {0}")]
    InvalidOverride(String),
}

impl ConfigError {
    /// The programmatic code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Read { .. } => ErrorCode::ConfigFileReadError,
            ConfigError::Parse { .. } => ErrorCode::ConfigFileSyntaxError,
            ConfigError::MissingPath { .. } => ErrorCode::ConfigFileDataError,
            ConfigError::InvalidFormat(_) | ConfigError::InvalidOverride(_) => {
                ErrorCode::InvalidSetting
            }
        }
    }

    /// The config file involved, when known.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => {
                Some(path.as_path())
            }
            ConfigError::MissingPath { config, .. } => config.as_deref(),
            ConfigError::InvalidFormat(_) | ConfigError::InvalidOverride(_) => None,
        }
    }
}

fn missing_path_message(path: &str, config: Option<&Path>) -> String {
    match config {
        Some(config) => format!(
            "not defined in config file. path: \"{}\", config: \"{}\"",
            path,
            config.display()
        ),
        None => format!("not defined in config file. path: \"{}\"", path),
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
