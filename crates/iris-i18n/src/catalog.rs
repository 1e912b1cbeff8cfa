//! In-memory message catalogs
//!
//! A [`Catalog`] holds every message of one locale, grouped by context in
//! source order. It is assembled once through [`CatalogBuilder`] and is
//! immutable afterwards, so a loaded catalog can be shared behind an `Arc`
//! by any number of readers.

use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleTag;
use iris_common::MissingKeyPolicy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A key and its localized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    key: String,
    text: String,
}

impl MessageEntry {
    /// Locale-invariant identifier
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display text, exactly as stored in the source
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Named group of messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    name: String,
    entries: Vec<MessageEntry>,
    index: HashMap<String, usize>,
}

impl Context {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Context name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text for `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].text.as_str())
    }

    /// Entries in source order
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    /// Keys in source order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(MessageEntry::key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the context has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All messages for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    locale: LocaleTag,
    source: Option<PathBuf>,
    contexts: Vec<Context>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Locale this catalog translates into
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// File the catalog was read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Contexts in source order
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Context by name
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.index.get(name).map(|&i| &self.contexts[i])
    }

    /// Text for `key` in `context`, if present
    pub fn get(&self, context: &str, key: &str) -> Option<&str> {
        self.context(context).and_then(|ctx| ctx.get(key))
    }

    /// Whether `context` contains `key`
    pub fn contains(&self, context: &str, key: &str) -> bool {
        self.get(context, key).is_some()
    }

    /// Text for `key` in `context`
    ///
    /// # Errors
    ///
    /// [`I18nError::MissingKey`] when the key is absent.
    pub fn lookup(&self, context: &str, key: &str) -> I18nResult<&str> {
        self.get(context, key).ok_or_else(|| I18nError::MissingKey {
            context: context.to_string(),
            key: key.to_string(),
        })
    }

    /// Text for `key` under `policy`: an absent key is either an error or
    /// displayed as-is
    pub fn resolve<'a>(
        &'a self,
        context: &str,
        key: &'a str,
        policy: MissingKeyPolicy,
    ) -> I18nResult<&'a str> {
        match (self.get(context, key), policy) {
            (Some(text), _) => Ok(text),
            (None, MissingKeyPolicy::ReturnKey) => Ok(key),
            (None, MissingKeyPolicy::Error) => Err(I18nError::MissingKey {
                context: context.to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// Every `(context, entry)` pair in source order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MessageEntry)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.entries.iter().map(move |entry| (ctx.name(), entry)))
    }

    /// Total number of entries across all contexts
    pub fn len(&self) -> usize {
        self.contexts.iter().map(Context::len).sum()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assembles a [`Catalog`], rejecting duplicate keys
#[derive(Debug)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    /// Start an empty catalog for `locale`
    pub fn new(locale: LocaleTag) -> Self {
        Self {
            catalog: Catalog {
                locale,
                source: None,
                contexts: Vec::new(),
                index: HashMap::new(),
            },
        }
    }

    /// Locale of the catalog being built
    pub fn locale(&self) -> &LocaleTag {
        &self.catalog.locale
    }

    /// Record the file the catalog is read from
    #[must_use]
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog.source = Some(path.into());
        self
    }

    /// Declare a context so it exists even without entries
    pub fn context(&mut self, name: &str) -> &mut Self {
        self.context_mut(name);
        self
    }

    /// Add a message
    ///
    /// # Errors
    ///
    /// [`I18nError::DuplicateKey`] when `key` is already in `context`.
    pub fn message(
        &mut self,
        context: &str,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> I18nResult<&mut Self> {
        let key = key.into();
        let ctx = self.context_mut(context);
        if ctx.index.contains_key(&key) {
            return Err(I18nError::DuplicateKey {
                context: context.to_string(),
                key,
            });
        }
        ctx.index.insert(key.clone(), ctx.entries.len());
        ctx.entries.push(MessageEntry {
            key,
            text: text.into(),
        });
        Ok(self)
    }

    fn context_mut(&mut self, name: &str) -> &mut Context {
        let catalog = &mut self.catalog;
        let i = match catalog.index.get(name) {
            Some(&i) => i,
            None => {
                catalog.contexts.push(Context::new(name.to_string()));
                let i = catalog.contexts.len() - 1;
                catalog.index.insert(name.to_string(), i);
                i
            }
        };
        &mut catalog.contexts[i]
    }

    /// Finish the catalog
    pub fn build(self) -> Catalog {
        self.catalog
    }
}
