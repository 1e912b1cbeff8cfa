//! Translation coverage between catalogs
//!
//! Compares each locale against a reference catalog and reports keys the
//! locale lacks, keys only the locale has, and messages whose `{N}`
//! placeholders differ from the reference. Reports are informational; a gap
//! never prevents a catalog from loading.

use crate::catalog::Catalog;
use crate::format::placeholders;
use crate::locale::LocaleTag;
use std::collections::BTreeSet;
use std::fmt;

/// A message's position in a catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId {
    /// Context name
    pub context: String,
    /// Message key
    pub key: String,
}

impl MessageId {
    fn new(context: &str, key: &str) -> Self {
        Self {
            context: context.to_string(),
            key: key.to_string(),
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.context, self.key)
    }
}

/// A message whose placeholder indices differ from the reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatch {
    /// The message
    pub id: MessageId,
    /// Indices used by the reference text
    pub expected: BTreeSet<usize>,
    /// Indices used by the candidate text
    pub found: BTreeSet<usize>,
}

impl fmt::Display for PlaceholderMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}",
            self.id,
            indices(&self.expected),
            indices(&self.found)
        )
    }
}

fn indices(set: &BTreeSet<usize>) -> String {
    if set.is_empty() {
        return "no placeholders".to_string();
    }
    set.iter()
        .map(|i| format!("{{{i}}}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Differences between a reference catalog and one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDiff {
    /// Locale of the reference catalog
    pub reference: LocaleTag,
    /// Locale of the compared catalog
    pub candidate: LocaleTag,
    /// Number of messages in the reference
    pub reference_keys: usize,
    /// In the reference, absent from the candidate
    pub missing: Vec<MessageId>,
    /// In the candidate, absent from the reference
    pub extra: Vec<MessageId>,
    /// Present in both with different placeholder indices
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
}

impl CatalogDiff {
    /// Compare `candidate` against `reference`
    ///
    /// All lists are sorted by context, then key.
    pub fn between(reference: &Catalog, candidate: &Catalog) -> Self {
        let mut missing = Vec::new();
        let mut placeholder_mismatches = Vec::new();

        for (context, entry) in reference.entries() {
            match candidate.get(context, entry.key()) {
                None => missing.push(MessageId::new(context, entry.key())),
                Some(text) => {
                    let expected = placeholders(entry.text());
                    let found = placeholders(text);
                    if expected != found {
                        placeholder_mismatches.push(PlaceholderMismatch {
                            id: MessageId::new(context, entry.key()),
                            expected,
                            found,
                        });
                    }
                }
            }
        }

        let mut extra: Vec<MessageId> = candidate
            .entries()
            .filter(|(context, entry)| !reference.contains(context, entry.key()))
            .map(|(context, entry)| MessageId::new(context, entry.key()))
            .collect();

        missing.sort();
        extra.sort();
        placeholder_mismatches.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            reference: reference.locale().clone(),
            candidate: candidate.locale().clone(),
            reference_keys: reference.len(),
            missing,
            extra,
            placeholder_mismatches,
        }
    }

    /// Reference messages the candidate translates
    pub fn present(&self) -> usize {
        self.reference_keys - self.missing.len()
    }

    /// Share of reference messages translated, 0.0 to 100.0
    pub fn coverage_percent(&self) -> f32 {
        if self.reference_keys == 0 {
            return 100.0;
        }
        self.present() as f32 / self.reference_keys as f32 * 100.0
    }

    /// No missing keys, extra keys or placeholder mismatches
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.placeholder_mismatches.is_empty()
    }
}

/// Coverage of several locales against one reference
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// Locale every other catalog is compared with
    pub reference: LocaleTag,
    /// Number of messages in the reference
    pub total_keys: usize,
    /// One diff per compared locale, in the order given
    pub locales: Vec<CatalogDiff>,
}

impl CoverageReport {
    /// Build a report; candidates sharing the reference locale are skipped
    pub fn new<'a>(reference: &Catalog, candidates: impl IntoIterator<Item = &'a Catalog>) -> Self {
        let locales = candidates
            .into_iter()
            .filter(|candidate| candidate.locale() != reference.locale())
            .map(|candidate| CatalogDiff::between(reference, candidate))
            .collect();

        Self {
            reference: reference.locale().clone(),
            total_keys: reference.len(),
            locales,
        }
    }

    /// Diff for one locale
    pub fn diff(&self, locale: &LocaleTag) -> Option<&CatalogDiff> {
        self.locales.iter().find(|diff| &diff.candidate == locale)
    }

    /// Every compared locale is clean
    pub fn is_complete(&self) -> bool {
        self.locales.iter().all(CatalogDiff::is_clean)
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reference {} ({} messages)", self.reference, self.total_keys)?;
        if self.locales.is_empty() {
            return writeln!(f, "  no other locales");
        }
        for diff in &self.locales {
            writeln!(
                f,
                "  {}: {}/{} ({:.1}%)",
                diff.candidate,
                diff.present(),
                diff.reference_keys,
                diff.coverage_percent()
            )?;
            for id in &diff.missing {
                writeln!(f, "    missing {id}")?;
            }
            for id in &diff.extra {
                writeln!(f, "    extra {id}")?;
            }
            for mismatch in &diff.placeholder_mismatches {
                writeln!(f, "    placeholders {mismatch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;

    const CTX: &str = "iris_wallet_desktop";

    fn catalog(locale: &str, entries: &[(&str, &str)]) -> Catalog {
        let mut builder = CatalogBuilder::new(LocaleTag::parse(locale).unwrap());
        for (key, text) in entries {
            builder.message(CTX, *key, *text).unwrap();
        }
        builder.build()
    }

    fn reference() -> Catalog {
        catalog(
            "en_IN",
            &[
                ("accept", "Accept"),
                ("msat_lower_bound_limit", "The amount must be at least {0} sat"),
                ("channel_capacity_validation", "Between {0} sat and {1} sat."),
                ("exit", "Exit"),
            ],
        )
    }

    #[test]
    fn test_identical_catalogs_are_clean() {
        let en = reference();
        let mut copy = CatalogBuilder::new(LocaleTag::parse("en").unwrap());
        for (ctx, entry) in en.entries() {
            copy.message(ctx, entry.key(), entry.text()).unwrap();
        }
        let diff = CatalogDiff::between(&en, &copy.build());
        assert!(diff.is_clean());
        assert_eq!(diff.coverage_percent(), 100.0);
    }

    #[test]
    fn test_missing_extra_and_mismatch() {
        let it = catalog(
            "it",
            &[
                ("exit", "Esci"),
                ("channel_capacity_validation", "Tra {0} sat e {0} sat."),
                ("accept", "Accetta"),
                ("legacy", "Vecchio"),
            ],
        );
        let diff = CatalogDiff::between(&reference(), &it);

        assert_eq!(diff.missing, [MessageId::new(CTX, "msat_lower_bound_limit")]);
        assert_eq!(diff.extra, [MessageId::new(CTX, "legacy")]);
        assert_eq!(diff.placeholder_mismatches.len(), 1);
        let mismatch = &diff.placeholder_mismatches[0];
        assert_eq!(mismatch.id.key, "channel_capacity_validation");
        assert_eq!(mismatch.expected, BTreeSet::from([0, 1]));
        assert_eq!(mismatch.found, BTreeSet::from([0]));
        assert_eq!(diff.present(), 3);
        assert_eq!(diff.coverage_percent(), 75.0);
    }

    #[test]
    fn test_results_sorted_by_context_then_key() {
        let mut builder = CatalogBuilder::new(LocaleTag::parse("en_IN").unwrap());
        builder
            .message("zeta", "b", "B")
            .unwrap()
            .message("alpha", "z", "Z")
            .unwrap()
            .message("alpha", "a", "A")
            .unwrap();
        let full = builder.build();
        let empty = CatalogBuilder::new(LocaleTag::parse("de").unwrap()).build();

        let missing: Vec<String> = CatalogDiff::between(&full, &empty)
            .missing
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(missing, ["alpha/a", "alpha/z", "zeta/b"]);
    }

    #[test]
    fn test_report_skips_reference_locale() {
        let en = reference();
        let de = catalog("de", &[("accept", "Akzeptieren")]);
        let report = CoverageReport::new(&en, [&en, &de]);

        assert_eq!(report.total_keys, 4);
        assert_eq!(report.locales.len(), 1);
        assert!(!report.is_complete());
        let diff = report.diff(&LocaleTag::parse("de").unwrap()).unwrap();
        assert_eq!(diff.missing.len(), 3);

        let text = report.to_string();
        assert!(text.contains("de: 1/4 (25.0%)"));
        assert!(text.contains("missing iris_wallet_desktop/exit"));
    }

    #[test]
    fn test_empty_reference_is_fully_covered() {
        let empty = CatalogBuilder::new(LocaleTag::parse("en").unwrap()).build();
        let other = catalog("fr", &[("accept", "Accepter")]);
        let diff = CatalogDiff::between(&empty, &other);
        assert_eq!(diff.coverage_percent(), 100.0);
        assert_eq!(diff.extra.len(), 1);
        assert!(!diff.is_clean());
    }
}
