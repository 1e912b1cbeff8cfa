//! Configuration error types.

use iris_common::UnknownVariant;
use std::path::PathBuf;

/// Errors raised while loading, validating or saving configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML, YAML or JSON.
    #[error("failed to parse configuration file {path}: {reason}")]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The file extension names no supported format.
    #[error("unsupported configuration format: {0} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    /// An environment override held an unusable value.
    #[error("invalid value for {var}: {source}")]
    Override {
        /// Environment variable name.
        var: &'static str,
        /// Parse failure.
        #[source]
        source: UnknownVariant,
    },

    /// A field failed validation.
    #[error("invalid configuration: {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The configuration could not be written back to disk.
    #[error("failed to save configuration file {path}: {reason}")]
    Persist {
        /// Target file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
