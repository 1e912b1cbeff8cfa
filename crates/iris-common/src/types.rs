//! Common type definitions shared by the configuration and catalog crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// What a lookup does when the key is absent from the active catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Fail with a missing-key error.
    Error,
    /// Return the key itself as the display text.
    #[default]
    ReturnKey,
}

impl MissingKeyPolicy {
    /// Configuration spelling of this policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::ReturnKey => "return_key",
        }
    }
}

impl fmt::Display for MissingKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingKeyPolicy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "error" => Ok(Self::Error),
            "return_key" | "key" => Ok(Self::ReturnKey),
            _ => Err(UnknownVariant::new("missing key policy", s)),
        }
    }
}

/// Serialization of a catalog resource on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// Qt Linguist `TS` XML.
    Ts,
    /// JSON object of key to text, optionally grouped by context.
    Json,
}

impl CatalogFormat {
    /// Formats in resolution order.
    pub const ALL: [Self; 2] = [Self::Ts, Self::Json];

    /// File extension without the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Json => "json",
        }
    }

    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A string did not name any variant of a known enum.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    /// Creates a new error for `value` of the given kind.
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}
