//! Tool error types using thiserror.

use iris_config::ConfigError;
use iris_i18n::I18nError;

/// Errors reported by the catalog tool.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog error.
    #[error(transparent)]
    I18n(#[from] I18nError),

    /// One or more catalogs failed to load.
    #[error("{0} catalog(s) failed to load")]
    LoadFailures(usize),

    /// Coverage gaps found in strict mode.
    #[error("{0} locale(s) differ from the reference catalog")]
    CoverageGaps(usize),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the catalog tool.
pub type ToolResult<T> = Result<T, ToolError>;
