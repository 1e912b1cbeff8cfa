//! Internationalization manager

use crate::catalog::Catalog;
use crate::error::{I18nError, I18nResult};
use crate::format;
use crate::locale::LocaleTag;
use crate::resource::ResourceManager;
use arc_swap::ArcSwap;
use iris_common::{preview, MissingKeyPolicy};
use iris_config::I18nConfig;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The catalog currently served, with the locale it was requested for
#[derive(Debug)]
struct Active {
    requested: LocaleTag,
    catalog: Arc<Catalog>,
}

/// Owns the active catalog and answers lookups against it
///
/// Lookups read the active catalog without locking. Switching locale loads
/// the new catalog first and swaps it in as a whole, so readers see either
/// the old catalog or the new one, never a mix.
#[derive(Debug)]
pub struct I18nManager {
    /// Locale to fall back to at startup
    default_locale: LocaleTag,
    /// Context used by lookups that do not name one
    context: String,
    /// Behavior for absent keys
    policy: MissingKeyPolicy,
    /// Resource manager for locating and reading catalog files
    resources: ResourceManager,
    /// Currently served catalog
    active: ArcSwap<Active>,
}

impl I18nManager {
    /// Create a manager and load the startup locale
    ///
    /// Tries the configured locale, then the system locale when detection is
    /// enabled, then the default locale. Fails only if the default locale
    /// cannot be loaded either.
    pub fn new(config: &I18nConfig) -> I18nResult<Self> {
        let resources = ResourceManager::from_config(config);
        let system = if config.detect_system_locale {
            LocaleTag::from_env()
        } else {
            None
        };
        Self::with_resources(config, resources, system)
    }

    /// Create a manager over an existing resource manager
    ///
    /// `system_locale` stands in for environment detection.
    pub fn with_resources(
        config: &I18nConfig,
        resources: ResourceManager,
        system_locale: Option<LocaleTag>,
    ) -> I18nResult<Self> {
        let default_locale = LocaleTag::parse(&config.default_locale)?;

        let mut candidates: Vec<LocaleTag> = Vec::new();
        if let Some(explicit) = &config.locale {
            match LocaleTag::parse(explicit) {
                Ok(tag) => candidates.push(tag),
                Err(e) => warn!(locale = %explicit, error = %e, "Ignoring configured locale"),
            }
        }
        candidates.extend(system_locale);
        candidates.push(default_locale.clone());
        candidates.dedup();

        let mut last_error = None;
        for candidate in candidates {
            match resources.load_catalog(&candidate) {
                Ok(catalog) => {
                    info!(
                        locale = %candidate,
                        default = %default_locale,
                        "I18nManager initialized"
                    );
                    return Ok(Self {
                        default_locale,
                        context: config.context.clone(),
                        policy: config.missing_key_policy,
                        resources,
                        active: ArcSwap::from_pointee(Active {
                            requested: candidate,
                            catalog: Arc::new(catalog),
                        }),
                    });
                }
                Err(e) => {
                    warn!(locale = %candidate, error = %e, "Could not load locale, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| I18nError::ResourceNotFound {
            locale: default_locale.name(),
            searched: Vec::new(),
        }))
    }

    /// Load a locale's catalog without activating it
    pub fn load(&self, locale: &LocaleTag) -> I18nResult<Arc<Catalog>> {
        self.resources.load_catalog(locale).map(Arc::new)
    }

    /// Snapshot of the active catalog
    ///
    /// The snapshot stays valid and unchanged across later switches.
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.active.load().catalog)
    }

    /// Locale the active catalog was requested for
    pub fn active_locale(&self) -> LocaleTag {
        self.active.load().requested.clone()
    }

    /// Load `locale` and make it active
    ///
    /// On failure the previously active catalog stays in place.
    pub fn switch_locale(&self, locale: &LocaleTag) -> I18nResult<Arc<Catalog>> {
        debug!(%locale, "Switching locale");
        let catalog = self.load(locale).inspect_err(|e| {
            warn!(%locale, error = %e, "Locale switch failed, keeping current catalog");
        })?;
        self.active.store(Arc::new(Active {
            requested: locale.clone(),
            catalog: Arc::clone(&catalog),
        }));
        info!(%locale, entries = catalog.len(), "Switched locale");
        Ok(catalog)
    }

    /// Re-read the active locale from disk
    pub fn reload(&self) -> I18nResult<Arc<Catalog>> {
        let locale = self.active_locale();
        debug!(%locale, "Reloading locale");
        self.switch_locale(&locale)
    }

    /// Look up `key` in the default context
    pub fn lookup(&self, key: &str) -> I18nResult<String> {
        self.lookup_in(&self.context, key)
    }

    /// Look up `key` in `context`, applying the missing-key policy
    pub fn lookup_in(&self, context: &str, key: &str) -> I18nResult<String> {
        let active = self.active.load();
        match active.catalog.get(context, key) {
            Some(text) => {
                debug!(%key, text = %preview(text, 48), "Resolved message");
                Ok(text.to_string())
            }
            None => self.on_missing(context, key, &active.requested),
        }
    }

    /// Look up `key` and substitute positional arguments
    ///
    /// Under [`MissingKeyPolicy::ReturnKey`] a missing key is returned as-is,
    /// without formatting.
    pub fn translate<A: Display>(&self, key: &str, args: &[A]) -> I18nResult<String> {
        self.translate_in(&self.context, key, args)
    }

    /// [`translate`](Self::translate) within a named context
    pub fn translate_in<A: Display>(
        &self,
        context: &str,
        key: &str,
        args: &[A],
    ) -> I18nResult<String> {
        let active = self.active.load();
        match active.catalog.get(context, key) {
            Some(text) => format::format(text, args),
            None => self.on_missing(context, key, &active.requested),
        }
    }

    /// Look up `key`, using `default` when it is absent, whatever the policy
    pub fn lookup_or(&self, key: &str, default: &str) -> String {
        let active = self.active.load();
        active.catalog.get(&self.context, key).map_or_else(
            || {
                warn!(%key, %default, "Message not found, using default");
                default.to_string()
            },
            str::to_string,
        )
    }

    /// Check if the active catalog has `key` in the default context
    pub fn has_message(&self, key: &str) -> bool {
        self.active.load().catalog.contains(&self.context, key)
    }

    fn on_missing(&self, context: &str, key: &str, locale: &LocaleTag) -> I18nResult<String> {
        match self.policy {
            MissingKeyPolicy::ReturnKey => {
                warn!(%locale, %context, %key, "Message not found, displaying key");
                Ok(key.to_string())
            }
            MissingKeyPolicy::Error => Err(I18nError::MissingKey {
                context: context.to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// Locales with a catalog file on disk
    pub fn available_locales(&self) -> I18nResult<Vec<LocaleTag>> {
        self.resources.available_locales()
    }

    /// Get the default locale
    pub fn default_locale(&self) -> &LocaleTag {
        &self.default_locale
    }

    /// Context used by [`lookup`](Self::lookup)
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Configured missing-key policy
    pub fn policy(&self) -> MissingKeyPolicy {
        self.policy
    }

    /// Underlying resource manager
    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }
}
