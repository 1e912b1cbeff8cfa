//! Configuration schema definitions.

use iris_common::MissingKeyPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog loading and lookup configuration.
    pub i18n: I18nConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Catalog loading and lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Directory holding `<locale>.ts` / `<locale>.json` catalogs.
    pub translations_dir: PathBuf,
    /// Locale loaded when nothing better is available.
    pub default_locale: String,
    /// Explicit locale to use instead of detection.
    pub locale: Option<String>,
    /// Whether to try the system locale from `LC_ALL`/`LC_MESSAGES`/`LANG`.
    pub detect_system_locale: bool,
    /// Whether `en_IN` may resolve to `en` when no `en_IN` catalog exists.
    pub region_fallback: bool,
    /// Context used by lookups that do not name one.
    pub context: String,
    /// Behavior of lookups for absent keys.
    pub missing_key_policy: MissingKeyPolicy,
    /// Whether translations marked `unfinished` are served.
    pub include_unfinished: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}
