//! Default values.

use crate::schema::*;
use iris_common::MissingKeyPolicy;
use std::path::PathBuf;

/// Locale the wallet ships with.
pub const DEFAULT_LOCALE: &str = "en_IN";

/// Context every wallet string is filed under.
pub const DEFAULT_CONTEXT: &str = "iris_wallet_desktop";

/// Directory catalogs are read from, relative to the working directory.
pub const DEFAULT_TRANSLATIONS_DIR: &str = "translations";

impl Default for Config {
    fn default() -> Self {
        Self {
            i18n: I18nConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            translations_dir: PathBuf::from(DEFAULT_TRANSLATIONS_DIR),
            default_locale: DEFAULT_LOCALE.to_string(),
            locale: None,
            detect_system_locale: true,
            region_fallback: true,
            context: DEFAULT_CONTEXT.to_string(),
            missing_key_policy: MissingKeyPolicy::ReturnKey,
            include_unfinished: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}
