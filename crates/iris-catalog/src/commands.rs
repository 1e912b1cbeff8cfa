//! Command implementations.

use crate::cli::Command;
use crate::error::{ToolError, ToolResult};
use iris_config::Config;
use iris_i18n::codec::{self, ParseOptions};
use iris_i18n::format::format;
use iris_i18n::{Catalog, CoverageReport, I18nError, LocaleTag, ResourceManager};
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// Run one command against a loaded configuration.
pub fn run<W: Write>(config: &Config, command: &Command, out: &mut W) -> ToolResult<()> {
    match command {
        Command::Check { reference, strict } => check(config, reference.as_deref(), *strict, out),
        Command::Get {
            locale,
            key,
            args,
            context,
        } => get(config, locale, key, args, context.as_deref(), out),
        Command::Keys { locale } => keys(config, locale, out),
        Command::Convert {
            input,
            output,
            locale,
        } => convert(config, input, output, locale.as_deref(), out),
    }
}

/// Load every catalog in the translations directory and print coverage
/// against `reference`.
///
/// # Errors
///
/// [`ToolError::LoadFailures`] if any catalog fails to load, and in strict
/// mode [`ToolError::CoverageGaps`] if any locale differs from the
/// reference.
pub fn check<W: Write>(
    config: &Config,
    reference: Option<&str>,
    strict: bool,
    out: &mut W,
) -> ToolResult<()> {
    let resources = ResourceManager::from_config(&config.i18n).with_region_fallback(false);
    let reference = LocaleTag::parse(reference.unwrap_or(&config.i18n.default_locale))?;

    let mut catalogs = Vec::new();
    let mut failures = 0;
    for locale in resources.available_locales()? {
        match resources.load_catalog(&locale) {
            Ok(catalog) => catalogs.push(catalog),
            Err(e) => {
                error!(%locale, error = %e, "Catalog failed to load");
                writeln!(out, "error: {locale}: {e}")?;
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(ToolError::LoadFailures(failures));
    }

    let base = catalogs
        .iter()
        .find(|catalog| catalog.locale() == &reference)
        .ok_or_else(|| I18nError::ResourceNotFound {
            locale: reference.name(),
            searched: resources.candidates(&reference),
        })?;

    let report = CoverageReport::new(base, &catalogs);
    write!(out, "{report}")?;
    info!(
        reference = %report.reference,
        locales = report.locales.len(),
        complete = report.is_complete(),
        "Checked catalogs"
    );

    let gaps = report.locales.iter().filter(|diff| !diff.is_clean()).count();
    if strict && gaps > 0 {
        return Err(ToolError::CoverageGaps(gaps));
    }
    Ok(())
}

/// Print one message of `locale`, formatted with `args`.
///
/// A missing key follows the configured policy; under `return_key` the key
/// itself is printed.
pub fn get<W: Write>(
    config: &Config,
    locale: &str,
    key: &str,
    args: &[String],
    context: Option<&str>,
    out: &mut W,
) -> ToolResult<()> {
    let catalog = load(config, locale)?;
    let context = context.unwrap_or(&config.i18n.context);

    let text = match catalog.get(context, key) {
        Some(template) => format(template, args)?,
        None => catalog
            .resolve(context, key, config.i18n.missing_key_policy)?
            .to_string(),
    };
    writeln!(out, "{text}")?;
    Ok(())
}

/// Print every `context/key` of `locale` in catalog order.
pub fn keys<W: Write>(config: &Config, locale: &str, out: &mut W) -> ToolResult<()> {
    let catalog = load(config, locale)?;
    for (context, entry) in catalog.entries() {
        writeln!(out, "{context}/{}", entry.key())?;
    }
    Ok(())
}

/// Convert `input` to `output`, choosing both formats by extension.
///
/// The locale defaults to the input file name, e.g. `en_IN.ts` → `en_IN`.
pub fn convert<W: Write>(
    config: &Config,
    input: &Path,
    output: &Path,
    locale: Option<&str>,
    out: &mut W,
) -> ToolResult<()> {
    let locale = match locale {
        Some(tag) => LocaleTag::parse(tag)?,
        None => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            LocaleTag::parse(stem)?
        }
    };
    debug!(input = %input.display(), output = %output.display(), %locale, "Converting catalog");

    let catalog = codec::read_file(input, locale, &ParseOptions::from(&config.i18n))?;
    codec::write_file(&catalog, output)?;

    writeln!(
        out,
        "Converted {} message(s) from {} to {}",
        catalog.len(),
        input.display(),
        output.display()
    )?;
    Ok(())
}

fn load(config: &Config, locale: &str) -> ToolResult<Catalog> {
    let locale = LocaleTag::parse(locale)?;
    Ok(ResourceManager::from_config(&config.i18n).load_catalog(&locale)?)
}
