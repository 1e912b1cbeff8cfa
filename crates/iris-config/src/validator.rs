//! Runtime validation of loaded configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{Config, I18nConfig};
use unic_langid::LanguageIdentifier;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> ConfigResult<()> {
        Self::validate_i18n(&config.i18n)?;

        if config.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "logging.filter",
                reason: "filter cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    fn validate_i18n(i18n: &I18nConfig) -> ConfigResult<()> {
        if i18n.translations_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "i18n.translations_dir",
                reason: "path cannot be empty".to_string(),
            });
        }

        if i18n.context.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "i18n.context",
                reason: "context name cannot be empty".to_string(),
            });
        }

        check_locale("i18n.default_locale", &i18n.default_locale)?;
        if let Some(locale) = &i18n.locale {
            check_locale("i18n.locale", locale)?;
        }

        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate(self)
    }
}

/// Accepts `en_IN`, `en-IN` and POSIX forms such as `en_IN.UTF-8`.
fn check_locale(field: &'static str, tag: &str) -> ConfigResult<()> {
    let bare = tag.split(['.', '@']).next().unwrap_or_default().trim();
    if bare.is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "locale cannot be empty".to_string(),
        });
    }

    let langid = bare
        .parse::<LanguageIdentifier>()
        .map_err(|e| ConfigError::Invalid {
            field,
            reason: format!("'{tag}' is not a valid locale: {e}"),
        })?;
    if langid.language.as_str() == "und" {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("'{tag}' names no language"),
        });
    }
    Ok(())
}
