//! Error types for configuration.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::{de, ser};

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A setting has a value that cannot be used.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// Dotted name of the setting, e.g. `matcher.special_label`.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Failed to render the effective configuration.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] ser::Error),
}
