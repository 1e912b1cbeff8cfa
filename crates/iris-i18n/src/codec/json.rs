//! JSON catalogs
//!
//! Either a flat object, whose entries land in the default context:
//!
//! ```json
//! { "accept": "Accept", "decline": "Decline" }
//! ```
//!
//! or an object of contexts:
//!
//! ```json
//! { "iris_wallet_desktop": { "accept": "Accept" } }
//! ```
//!
//! Both forms may be mixed at the top level. Object order is kept, and a key
//! repeated within one context is rejected rather than silently overwritten.

use super::ParseOptions;
use crate::catalog::{Catalog, CatalogBuilder, Context};
use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleTag;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Object members in document order, duplicates included
#[derive(Debug)]
struct Members(Vec<(String, Node)>);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Node {
    Text(String),
    Group(Members),
}

impl<'de> Deserialize<'de> for Members {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = Members;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of strings or of objects of strings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, node)) = map.next_entry::<String, Node>()? {
                    members.push((key, node));
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

/// Parse a JSON catalog
pub fn parse(
    content: &str,
    locale: LocaleTag,
    options: &ParseOptions,
    source: Option<&Path>,
) -> I18nResult<Catalog> {
    let members: Members = serde_json::from_str(content)
        .map_err(|e| I18nError::parse_error(source, e.to_string()))?;

    let mut builder = CatalogBuilder::new(locale);
    if let Some(path) = source {
        builder = builder.source(path);
    }

    for (name, node) in members.0 {
        match node {
            Node::Text(text) => add(&mut builder, &options.default_context, name, text)?,
            Node::Group(group) => {
                builder.context(&name);
                for (key, inner) in group.0 {
                    let Node::Text(text) = inner else {
                        return Err(I18nError::parse_error(
                            source,
                            format!("'{name}/{key}' must be a string, contexts cannot nest"),
                        ));
                    };
                    add(&mut builder, &name, key, text)?;
                }
            }
        }
    }

    let catalog = builder.build();
    debug!(locale = %catalog.locale(), entries = catalog.len(), "Parsed JSON catalog");
    Ok(catalog)
}

fn add(builder: &mut CatalogBuilder, context: &str, key: String, text: String) -> I18nResult<()> {
    if text.is_empty() {
        debug!(%key, "Skipping untranslated message");
        return Ok(());
    }
    builder.message(context, key, text)?;
    Ok(())
}

struct CatalogJson<'a>(&'a Catalog);
struct ContextJson<'a>(&'a Context);

impl Serialize for CatalogJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.contexts().len()))?;
        for context in self.0.contexts() {
            map.serialize_entry(context.name(), &ContextJson(context))?;
        }
        map.end()
    }
}

impl Serialize for ContextJson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0.entries() {
            map.serialize_entry(entry.key(), entry.text())?;
        }
        map.end()
    }
}

/// Serialize a catalog as an object of contexts, in catalog order
pub fn write(catalog: &Catalog) -> I18nResult<String> {
    let mut out = serde_json::to_string_pretty(&CatalogJson(catalog))
        .map_err(|e| I18nError::parse_error(catalog.source(), e.to_string()))?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(doc: &str) -> I18nResult<Catalog> {
        parse(doc, LocaleTag::parse("en_IN").unwrap(), &ParseOptions::default(), None)
    }

    #[test]
    fn test_flat_object_uses_default_context() {
        let catalog = parse_str(r#"{ "accept": "Accept", "decline": "Decline" }"#).unwrap();
        assert_eq!(catalog.lookup("iris_wallet_desktop", "accept").unwrap(), "Accept");
        assert_eq!(catalog.contexts().len(), 1);
    }

    #[test]
    fn test_grouped_and_mixed_objects() {
        let catalog = parse_str(
            r#"{
                "exit": "Exit",
                "dialogs": { "ok": "OK", "cancel": "Cancel" }
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.lookup("iris_wallet_desktop", "exit").unwrap(), "Exit");
        assert_eq!(catalog.lookup("dialogs", "cancel").unwrap(), "Cancel");
    }

    #[test]
    fn test_order_is_preserved() {
        let catalog = parse_str(r#"{ "zeta": "Z", "alpha": "A", "mid": "M" }"#).unwrap();
        let keys: Vec<&str> = catalog.entries().map(|(_, e)| e.key()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let err = parse_str(r#"{ "accept": "Accept", "accept": "Yes" }"#).unwrap_err();
        assert!(matches!(err, I18nError::DuplicateKey { .. }));
    }

    #[test]
    fn test_bad_shapes_are_parse_errors() {
        for doc in [
            "[]",
            r#"{ "a": 1 }"#,
            r#"{ "ctx": { "inner": { "deep": "x" } } }"#,
            "{ not json",
        ] {
            assert!(
                matches!(parse_str(doc), Err(I18nError::Parse { .. })),
                "{doc} should be rejected"
            );
        }
    }

    #[test]
    fn test_multiline_text_survives_write() {
        let catalog = parse_str(r#"{ "terms": "TERMS\n\n    1 INTRODUCTION\n" }"#).unwrap();
        let written = write(&catalog).unwrap();
        assert!(written.contains("\"iris_wallet_desktop\""));
        assert_eq!(parse_str(&written).unwrap(), catalog);
    }
}
