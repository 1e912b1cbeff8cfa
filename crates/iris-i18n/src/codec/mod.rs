//! Catalog serialization
//!
//! Two on-disk forms are understood: Qt Linguist `TS` XML ([`ts`]) and a
//! JSON key→text map ([`json`]). Both produce the same [`Catalog`].

pub mod json;
pub mod ts;

use crate::catalog::Catalog;
use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleTag;
use iris_common::CatalogFormat;
use iris_config::{I18nConfig, DEFAULT_CONTEXT};
use std::path::Path;
use tracing::debug;

/// Options shared by the readers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Context for JSON entries that are not grouped under one
    pub default_context: String,
    /// Keep translations marked `unfinished`
    pub include_unfinished: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_context: DEFAULT_CONTEXT.to_string(),
            include_unfinished: true,
        }
    }
}

impl From<&I18nConfig> for ParseOptions {
    fn from(config: &I18nConfig) -> Self {
        Self {
            default_context: config.context.clone(),
            include_unfinished: config.include_unfinished,
        }
    }
}

/// Parse catalog text in the given format
pub fn parse(
    content: &str,
    format: CatalogFormat,
    locale: LocaleTag,
    options: &ParseOptions,
    source: Option<&Path>,
) -> I18nResult<Catalog> {
    match format {
        CatalogFormat::Ts => ts::parse(content, locale, options, source),
        CatalogFormat::Json => json::parse(content, locale, options, source),
    }
}

/// Serialize a catalog in the given format
pub fn write(catalog: &Catalog, format: CatalogFormat) -> I18nResult<String> {
    match format {
        CatalogFormat::Ts => Ok(ts::write(catalog)),
        CatalogFormat::Json => json::write(catalog),
    }
}

/// Read a catalog file, choosing the reader by extension
pub fn read_file(path: &Path, locale: LocaleTag, options: &ParseOptions) -> I18nResult<Catalog> {
    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| I18nError::UnsupportedFormat(path.to_path_buf()))?;
    debug!(path = %path.display(), %format, %locale, "Reading catalog");
    let content = std::fs::read_to_string(path)?;
    parse(&content, format, locale, options, Some(path))
}

/// Write a catalog file, choosing the writer by extension
pub fn write_file(catalog: &Catalog, path: &Path) -> I18nResult<()> {
    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| I18nError::UnsupportedFormat(path.to_path_buf()))?;
    std::fs::write(path, write(catalog, format)?)?;
    debug!(path = %path.display(), entries = catalog.len(), "Wrote catalog");
    Ok(())
}
