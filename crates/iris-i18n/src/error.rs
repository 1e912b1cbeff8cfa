//! Error types for catalog operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying message catalogs
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a locale tag
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// No catalog resource exists for the locale
    #[error("No catalog found for locale {locale} (searched: {})", display_paths(.searched))]
    ResourceNotFound {
        locale: String,
        searched: Vec<PathBuf>,
    },

    /// The key is absent from the catalog
    #[error("Message not found: {context}/{key}")]
    MissingKey { context: String, key: String },

    /// A placeholder references an argument that was not supplied
    #[error("Placeholder {{{index}}} has no argument ({provided} provided)")]
    FormatArgumentMismatch { index: usize, provided: usize },

    /// A catalog file is malformed
    #[error("Failed to parse catalog {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// The same key appears twice in one context
    #[error("Duplicate key '{key}' in context '{context}'")]
    DuplicateKey { context: String, key: String },

    /// The file extension names no supported catalog format
    #[error("Unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl I18nError {
    /// Attach a file path to a parse failure reported without one
    pub(crate) fn parse_error(path: Option<&std::path::Path>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.map_or_else(|| PathBuf::from("<memory>"), std::path::Path::to_path_buf),
            reason: reason.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
