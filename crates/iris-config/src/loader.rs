//! Configuration loading and persistence with atomic file operations.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::Config;
use iris_common::{env_var_nonempty, MissingKeyPolicy};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Overrides `i18n.translations_dir`.
pub const ENV_TRANSLATIONS_DIR: &str = "IRIS_TRANSLATIONS_DIR";
/// Overrides `i18n.locale`.
pub const ENV_LOCALE: &str = "IRIS_LOCALE";
/// Overrides `i18n.default_locale`.
pub const ENV_DEFAULT_LOCALE: &str = "IRIS_DEFAULT_LOCALE";
/// Overrides `i18n.missing_key_policy`.
pub const ENV_MISSING_KEY_POLICY: &str = "IRIS_MISSING_KEY_POLICY";
/// Overrides `logging.filter`.
pub const ENV_LOG: &str = "IRIS_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Configuration loader with atomic file operations.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file, applies environment overrides and validates it.
    pub fn load(&self) -> ConfigResult<Config> {
        let mut config = self.load_file()?;
        apply_env_overrides(&mut config)?;
        config.validate()?;
        info!(path = %self.path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Loads configuration from file without overrides or validation.
    pub fn load_file(&self) -> ConfigResult<Config> {
        let format = FileFormat::from_path(&self.path)?;
        debug!(path = %self.path.display(), ?format, "Reading configuration file");

        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        parse(&content, format).map_err(|reason| ConfigError::Parse {
            path: self.path.clone(),
            reason,
        })
    }

    /// Saves configuration to file atomically.
    ///
    /// The document is written to a temporary file next to the target and
    /// renamed over it, so readers never observe a partial file.
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        let format = FileFormat::from_path(&self.path)?;
        let persist_err = |reason: String| ConfigError::Persist {
            path: self.path.clone(),
            reason,
        };

        let body = serialize(config, format).map_err(persist_err)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| persist_err(e.to_string()))?;
        tmp.write_all(body.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| persist_err(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| persist_err(e.error.to_string()))?;

        info!(path = %self.path.display(), "Saved configuration");
        Ok(())
    }
}

/// Loads configuration from `path` if given, otherwise starts from the
/// defaults. Overrides and validation apply in both cases.
pub fn load_config(path: Option<&Path>) -> ConfigResult<Config> {
    match path {
        Some(path) => ConfigLoader::new(path).load(),
        None => {
            let mut config = Config::default();
            apply_env_overrides(&mut config)?;
            config.validate()?;
            debug!("Using default configuration");
            Ok(config)
        }
    }
}

/// Applies the `IRIS_*` environment variables on top of `config`.
pub fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    apply_overrides(config, env_var_nonempty)
}

/// Applies overrides read through `lookup`, which maps a variable name to its value.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ENV_TRANSLATIONS_DIR) {
        debug!(var = ENV_TRANSLATIONS_DIR, %dir, "Applying override");
        config.i18n.translations_dir = PathBuf::from(dir);
    }
    if let Some(locale) = lookup(ENV_LOCALE) {
        debug!(var = ENV_LOCALE, %locale, "Applying override");
        config.i18n.locale = Some(locale);
    }
    if let Some(locale) = lookup(ENV_DEFAULT_LOCALE) {
        debug!(var = ENV_DEFAULT_LOCALE, %locale, "Applying override");
        config.i18n.default_locale = locale;
    }
    if let Some(policy) = lookup(ENV_MISSING_KEY_POLICY) {
        config.i18n.missing_key_policy =
            policy
                .parse::<MissingKeyPolicy>()
                .map_err(|source| ConfigError::Override {
                    var: ENV_MISSING_KEY_POLICY,
                    source,
                })?;
    }
    if let Some(filter) = lookup(ENV_LOG) {
        config.logging.filter = filter;
    }
    Ok(())
}

fn parse(content: &str, format: FileFormat) -> Result<Config, String> {
    match format {
        FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

fn serialize(config: &Config, format: FileFormat) -> Result<String, String> {
    match format {
        FileFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
        FileFormat::Yaml => serde_yaml::to_string(config).map_err(|e| e.to_string()),
        FileFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
    }
}
