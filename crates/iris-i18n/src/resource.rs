//! Resource management for catalog files

use crate::catalog::Catalog;
use crate::codec::{self, ParseOptions};
use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleTag;
use iris_common::CatalogFormat;
use iris_config::I18nConfig;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Locates and loads catalog files from a translations directory
#[derive(Debug)]
pub struct ResourceManager {
    /// Base directory for catalog resources
    base_dir: PathBuf,
    /// Whether `en_IN` may be served from `en`
    region_fallback: bool,
    /// Options handed to the readers
    options: ParseOptions,
    /// Locales that have been loaded successfully
    loaded_locales: RwLock<BTreeSet<LocaleTag>>,
}

impl ResourceManager {
    /// Create a new ResourceManager with region fallback enabled
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            region_fallback: true,
            options: ParseOptions::default(),
            loaded_locales: RwLock::new(BTreeSet::new()),
        }
    }

    /// Create a ResourceManager from configuration
    pub fn from_config(config: &I18nConfig) -> Self {
        Self::new(&config.translations_dir)
            .with_region_fallback(config.region_fallback)
            .with_options(ParseOptions::from(config))
    }

    /// Enable or disable `en_IN` → `en` fallback
    #[must_use]
    pub fn with_region_fallback(mut self, enabled: bool) -> Self {
        self.region_fallback = enabled;
        self
    }

    /// Replace the reader options
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Candidate files for a locale, in resolution order
    pub fn candidates(&self, locale: &LocaleTag) -> Vec<PathBuf> {
        let tags = if self.region_fallback {
            locale.fallback_chain()
        } else {
            vec![locale.clone()]
        };

        tags.iter()
            .flat_map(|tag| {
                CatalogFormat::ALL
                    .into_iter()
                    .map(move |format| self.base_dir.join(format!("{}.{}", tag.name(), format.extension())))
            })
            .collect()
    }

    /// First existing file for a locale
    pub fn locate(&self, locale: &LocaleTag) -> Option<PathBuf> {
        self.candidates(locale).into_iter().find(|path| path.is_file())
    }

    /// Load the catalog for the given locale
    ///
    /// # Errors
    ///
    /// [`I18nError::ResourceNotFound`] if no candidate file exists. A
    /// missing locale never yields an empty catalog.
    pub fn load_catalog(&self, locale: &LocaleTag) -> I18nResult<Catalog> {
        let candidates = self.candidates(locale);
        let Some(path) = candidates.iter().find(|path| path.is_file()) else {
            warn!(%locale, dir = %self.base_dir.display(), "No catalog file for locale");
            return Err(I18nError::ResourceNotFound {
                locale: locale.name(),
                searched: candidates,
            });
        };

        let resolved = resolved_locale(path).unwrap_or_else(|| locale.clone());
        if &resolved != locale {
            info!(requested = %locale, %resolved, "Serving locale from fallback catalog");
        }

        let catalog = codec::read_file(path, resolved, &self.options)?;
        self.loaded_locales.write().insert(locale.clone());
        info!(%locale, path = %path.display(), entries = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Locales with a catalog file in the base directory
    pub fn available_locales(&self) -> I18nResult<Vec<LocaleTag>> {
        let mut locales = BTreeSet::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if CatalogFormat::from_path(&path).is_none() || !path.is_file() {
                continue;
            }
            match resolved_locale(&path) {
                Some(locale) => {
                    locales.insert(locale);
                }
                None => debug!(path = %path.display(), "Ignoring file without a locale name"),
            }
        }
        Ok(locales.into_iter().collect())
    }

    /// Locales loaded through this manager
    pub fn loaded_locales(&self) -> Vec<LocaleTag> {
        self.loaded_locales.read().iter().cloned().collect()
    }

    /// Check if a catalog has been loaded for the given locale
    pub fn is_loaded(&self, locale: &LocaleTag) -> bool {
        self.loaded_locales.read().contains(locale)
    }

    /// Forget which locales have been loaded
    pub fn clear_loaded(&self) {
        self.loaded_locales.write().clear();
        debug!("Cleared loaded locale set");
    }

    /// Get the base directory for resources
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new(iris_config::DEFAULT_TRANSLATIONS_DIR)
    }
}

/// Locale named by a catalog file's stem, e.g. `en_IN.ts` → `en_IN`
fn resolved_locale(path: &Path) -> Option<LocaleTag> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| LocaleTag::parse(stem).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_common::test_utils::catalog_fixtures::{ts_document, WALLET_CONTEXT};
    use iris_common::test_utils::{create_temp_dir, write_fixture};

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    #[test]
    fn test_candidates_order() {
        let manager = ResourceManager::new("t");
        let names: Vec<String> = manager
            .candidates(&tag("en_IN"))
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let expected: Vec<String> = ["en_IN.ts", "en_IN.json", "en.ts", "en.json"]
            .iter()
            .map(|f| Path::new("t").join(f).to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, expected);

        let strict = ResourceManager::new("t").with_region_fallback(false);
        assert_eq!(strict.candidates(&tag("en_IN")).len(), 2);
    }

    #[test]
    fn test_ts_preferred_over_json() {
        let dir = create_temp_dir();
        write_fixture(dir.path(), "en.ts", &ts_document(WALLET_CONTEXT, &[("k", "from ts")]));
        write_fixture(dir.path(), "en.json", r#"{ "k": "from json" }"#);

        let manager = ResourceManager::new(dir.path());
        let catalog = manager.load_catalog(&tag("en")).unwrap();
        assert_eq!(catalog.lookup(WALLET_CONTEXT, "k").unwrap(), "from ts");
        assert!(manager.is_loaded(&tag("en")));
    }

    #[test]
    fn test_region_fallback_resolves_to_language() {
        let dir = create_temp_dir();
        write_fixture(dir.path(), "de.json", r#"{ "accept": "Akzeptieren" }"#);

        let manager = ResourceManager::new(dir.path());
        let catalog = manager.load_catalog(&tag("de_AT")).unwrap();
        assert_eq!(catalog.locale(), &tag("de"));
        assert_eq!(catalog.lookup(WALLET_CONTEXT, "accept").unwrap(), "Akzeptieren");

        let strict = ResourceManager::new(dir.path()).with_region_fallback(false);
        assert!(matches!(
            strict.load_catalog(&tag("de_AT")),
            Err(I18nError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn test_available_locales_skips_other_files() {
        let dir = create_temp_dir();
        write_fixture(dir.path(), "en_IN.ts", "<TS/>");
        write_fixture(dir.path(), "it.json", "{}");
        write_fixture(dir.path(), "README.md", "docs");
        write_fixture(dir.path(), "en_IN.qm", "binary");
        write_fixture(dir.path(), "notes!.json", "{}");

        let manager = ResourceManager::new(dir.path());
        assert_eq!(manager.available_locales().unwrap(), [tag("en_IN"), tag("it")]);
    }
}
