//! Qt Linguist `TS` reader and writer
//!
//! ```text
//! <TS version="2.1">
//!   <context>
//!     <name>iris_wallet_desktop</name>
//!     <message>
//!       <source>accept</source>
//!       <translation>Accept</translation>
//!     </message>
//!   </context>
//! </TS>
//! ```
//!
//! Translation text is kept byte for byte apart from entity decoding, so
//! line breaks and indentation inside `<translation>` survive. Messages
//! typed `vanished` or `obsolete` are dropped, as are empty translations.
//! Numerus messages contribute their first `<numerusform>`.

use super::ParseOptions;
use crate::catalog::{Catalog, CatalogBuilder};
use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleTag;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, warn};

/// `type` attribute of a `<translation>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TranslationType {
    #[default]
    Finished,
    Unfinished,
    Vanished,
    Obsolete,
}

impl TranslationType {
    fn from_attr(value: &str) -> Self {
        match value {
            "unfinished" => Self::Unfinished,
            "vanished" => Self::Vanished,
            "obsolete" => Self::Obsolete,
            _ => Self::Finished,
        }
    }
}

/// Element whose text is being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    ContextName,
    Source,
    Translation,
    NumerusForm,
}

#[derive(Debug, Default)]
struct MessageDraft {
    numerus: bool,
    source: Option<String>,
    translation: Option<String>,
    kind: TranslationType,
    numerus_forms: Vec<String>,
}

#[derive(Debug, Default)]
struct ContextDraft {
    name: Option<String>,
    messages: Vec<(String, String)>,
}

struct TsParser<'a> {
    options: &'a ParseOptions,
    source: Option<&'a Path>,
    builder: CatalogBuilder,
    seen_root: bool,
    root_closed: bool,
    context: Option<ContextDraft>,
    message: Option<MessageDraft>,
    capture: Option<Capture>,
    buf: String,
    skipped: usize,
    /// Document text, kept for locating errors
    content: &'a str,
    /// Byte offset of the reader after the current event
    pos: usize,
}

/// Parse a `TS` document
pub fn parse(
    content: &str,
    locale: LocaleTag,
    options: &ParseOptions,
    source: Option<&Path>,
) -> I18nResult<Catalog> {
    let mut builder = CatalogBuilder::new(locale);
    if let Some(path) = source {
        builder = builder.source(path);
    }

    let mut parser = TsParser {
        options,
        source,
        builder,
        seen_root: false,
        root_closed: false,
        context: None,
        message: None,
        capture: None,
        buf: String::new(),
        skipped: 0,
        content,
        pos: 0,
    };

    let mut reader = Reader::from_str(content);
    loop {
        let event = reader.read_event();
        parser.pos = usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX);
        let event = event.map_err(|e| parser.error(e.to_string()))?;
        match event {
            Event::Start(e) => parser.start(&e, false)?,
            Event::Empty(e) => {
                parser.start(&e, true)?;
                parser.end(e.name().as_ref())?;
            }
            Event::End(e) => parser.end(e.name().as_ref())?,
            Event::Text(e) => {
                if parser.capture.is_some() {
                    let text = e.unescape().map_err(|err| parser.error(err.to_string()))?;
                    parser.buf.push_str(&text);
                }
            }
            Event::CData(e) => {
                if parser.capture.is_some() {
                    let raw = e.into_inner();
                    parser.buf.push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    parser.finish()
}

impl TsParser<'_> {
    /// Line numbers are only counted once something has gone wrong
    fn error(&self, reason: impl std::fmt::Display) -> I18nError {
        let line = line_of(self.content, self.pos);
        I18nError::parse_error(self.source, format!("line {line}: {reason}"))
    }

    fn begin_capture(&mut self, capture: Capture) {
        self.capture = Some(capture);
        self.buf.clear();
    }

    fn start(&mut self, e: &BytesStart<'_>, empty: bool) -> I18nResult<()> {
        match e.name().as_ref() {
            b"TS" => {
                self.seen_root = true;
                if let Some(language) = self.attr(e, "language")? {
                    self.check_language(&language);
                }
            }
            b"context" => {
                if !self.seen_root {
                    return Err(self.error("<context> outside <TS>"));
                }
                self.context = Some(ContextDraft::default());
            }
            b"name" if self.context.is_some() && self.message.is_none() => {
                self.begin_capture(Capture::ContextName);
            }
            b"message" => {
                if self.context.is_none() {
                    return Err(self.error("<message> outside <context>"));
                }
                let numerus = self.attr(e, "numerus")?.as_deref() == Some("yes");
                self.message = Some(MessageDraft {
                    numerus,
                    ..MessageDraft::default()
                });
            }
            b"source" if self.message.is_some() => self.begin_capture(Capture::Source),
            b"translation" if self.message.is_some() => {
                let kind = self
                    .attr(e, "type")?
                    .map_or(TranslationType::Finished, |t| TranslationType::from_attr(&t));
                let numerus = self.message.as_ref().is_some_and(|m| m.numerus);
                if let Some(message) = self.message.as_mut() {
                    message.kind = kind;
                }
                if numerus && !empty {
                    self.capture = None;
                } else {
                    self.begin_capture(Capture::Translation);
                }
            }
            b"numerusform" if self.message.as_ref().is_some_and(|m| m.numerus) => {
                self.begin_capture(Capture::NumerusForm);
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) -> I18nResult<()> {
        match name {
            b"name" if self.capture == Some(Capture::ContextName) => {
                let value = self.take_capture();
                if let Some(context) = self.context.as_mut() {
                    context.name = Some(value);
                }
            }
            b"source" if self.capture == Some(Capture::Source) => {
                let value = self.take_capture();
                if let Some(message) = self.message.as_mut() {
                    message.source = Some(value);
                }
            }
            b"numerusform" if self.capture == Some(Capture::NumerusForm) => {
                let value = self.take_capture();
                if let Some(message) = self.message.as_mut() {
                    message.numerus_forms.push(value);
                }
            }
            b"translation" => {
                let value = if self.capture == Some(Capture::Translation) {
                    self.take_capture()
                } else {
                    String::new()
                };
                if let Some(message) = self.message.as_mut() {
                    message.translation = Some(if message.numerus {
                        message.numerus_forms.first().cloned().unwrap_or_default()
                    } else {
                        value
                    });
                }
            }
            b"message" => self.finish_message()?,
            b"context" => self.finish_context()?,
            b"TS" => self.root_closed = true,
            _ => {}
        }
        Ok(())
    }

    fn take_capture(&mut self) -> String {
        self.capture = None;
        std::mem::take(&mut self.buf)
    }

    fn finish_message(&mut self) -> I18nResult<()> {
        let Some(message) = self.message.take() else {
            return Ok(());
        };
        let key = message
            .source
            .ok_or_else(|| self.error("<message> without <source>"))?;
        let text = message.translation.unwrap_or_default();

        let keep = match message.kind {
            TranslationType::Vanished | TranslationType::Obsolete => false,
            TranslationType::Unfinished => self.options.include_unfinished,
            TranslationType::Finished => true,
        };
        if !keep || text.is_empty() {
            debug!(%key, kind = ?message.kind, empty = text.is_empty(), "Skipping untranslated message");
            self.skipped += 1;
            return Ok(());
        }

        if let Some(context) = self.context.as_mut() {
            context.messages.push((key, text));
        }
        Ok(())
    }

    fn finish_context(&mut self) -> I18nResult<()> {
        let Some(context) = self.context.take() else {
            return Ok(());
        };
        let name = context
            .name
            .ok_or_else(|| self.error("<context> without <name>"))?;

        self.builder.context(&name);
        for (key, text) in context.messages {
            self.builder.message(&name, key, text)?;
        }
        Ok(())
    }

    fn finish(self) -> I18nResult<Catalog> {
        if !self.seen_root {
            return Err(self.error("missing <TS> root element"));
        }
        if !self.root_closed {
            return Err(self.error("unexpected end of document, <TS> is not closed"));
        }
        let catalog = self.builder.build();
        debug!(
            locale = %catalog.locale(),
            entries = catalog.len(),
            skipped = self.skipped,
            "Parsed TS catalog"
        );
        Ok(catalog)
    }

    fn attr(&self, e: &BytesStart<'_>, name: &str) -> I18nResult<Option<String>> {
        let attr = e
            .try_get_attribute(name)
            .map_err(|err| self.error(err.to_string()))?;
        attr.map(|a| {
            a.unescape_value()
                .map(Cow::into_owned)
                .map_err(|err| self.error(err.to_string()))
        })
        .transpose()
    }

    fn check_language(&self, language: &str) {
        let expected = self.builder.locale();
        match LocaleTag::parse(language) {
            Ok(declared) if &declared == expected => {}
            Ok(declared) => warn!(
                %declared,
                %expected,
                "TS language attribute disagrees with the catalog locale"
            ),
            Err(_) => warn!(language, "TS language attribute is not a valid locale"),
        }
    }
}

fn line_of(content: &str, byte: usize) -> usize {
    let end = byte.min(content.len());
    content.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Serialize a catalog as a `TS` document
pub fn write(catalog: &Catalog) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n");
    let _ = writeln!(
        out,
        "<TS version=\"2.1\" language=\"{}\">",
        escape(catalog.locale().name().as_str())
    );
    for context in catalog.contexts() {
        out.push_str("<context>\n");
        let _ = writeln!(out, "    <name>{}</name>", escape(context.name()));
        for entry in context.entries() {
            let _ = writeln!(
                out,
                "    <message>\n        <source>{}</source>\n        <translation>{}</translation>\n    </message>",
                escape(entry.key()),
                escape(entry.text())
            );
        }
        out.push_str("</context>\n");
    }
    out.push_str("</TS>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_common::test_utils::catalog_fixtures::{ts_document, WALLET_CONTEXT};

    fn en() -> LocaleTag {
        LocaleTag::parse("en_IN").unwrap()
    }

    fn parse_str(doc: &str) -> I18nResult<Catalog> {
        parse(doc, en(), &ParseOptions::default(), None)
    }

    #[test]
    fn test_parses_basic_document() {
        let doc = ts_document(WALLET_CONTEXT, &[("accept", "Accept"), ("decline", "Decline")]);
        let catalog = parse_str(&doc).unwrap();
        assert_eq!(catalog.lookup(WALLET_CONTEXT, "accept").unwrap(), "Accept");
        assert_eq!(catalog.lookup(WALLET_CONTEXT, "decline").unwrap(), "Decline");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_preserves_line_breaks_and_indentation() {
        let text = "\nFirst paragraph.\n\n    1 INTRODUCTION\n        1.1 Nested.\n        ";
        let doc = ts_document(WALLET_CONTEXT, &[("terms", text)]);
        let catalog = parse_str(&doc).unwrap();
        assert_eq!(catalog.lookup(WALLET_CONTEXT, "terms").unwrap(), text);
    }

    #[test]
    fn test_decodes_entities_and_cdata() {
        let doc = ts_document(
            WALLET_CONTEXT,
            &[
                ("amp", "Terms &amp; Conditions &lt;1&gt; &#8220;x&#8221;"),
                ("cdata", "<![CDATA[a < b & c]]>"),
            ],
        );
        let catalog = parse_str(&doc).unwrap();
        assert_eq!(
            catalog.lookup(WALLET_CONTEXT, "amp").unwrap(),
            "Terms & Conditions <1> “x”"
        );
        assert_eq!(catalog.lookup(WALLET_CONTEXT, "cdata").unwrap(), "a < b & c");
    }

    #[test]
    fn test_translation_types() {
        let doc = r#"<TS version="2.1">
<context>
    <name>ctx</name>
    <message>
        <location filename="ui.py" line="12"/>
        <source>done</source>
        <comment>button</comment>
        <translation>Done</translation>
    </message>
    <message>
        <source>wip</source>
        <translation type="unfinished">Work in progress</translation>
    </message>
    <message>
        <source>gone</source>
        <translation type="vanished">Gone</translation>
    </message>
    <message>
        <source>old</source>
        <translation type="obsolete">Old</translation>
    </message>
    <message>
        <source>empty</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>selfclosed</source>
        <translation type="unfinished"/>
    </message>
</context>
</TS>"#;
        let catalog = parse_str(doc).unwrap();
        let keys: Vec<&str> = catalog.context("ctx").unwrap().keys().collect();
        assert_eq!(keys, ["done", "wip"]);

        let strict = ParseOptions {
            include_unfinished: false,
            ..ParseOptions::default()
        };
        let catalog = parse(doc, en(), &strict, None).unwrap();
        let keys: Vec<&str> = catalog.context("ctx").unwrap().keys().collect();
        assert_eq!(keys, ["done"]);
    }

    #[test]
    fn test_numerus_uses_first_form() {
        let doc = r#"<TS version="2.1"><context><name>ctx</name>
<message numerus="yes">
    <source>assets</source>
    <translation>
        <numerusform>%n asset</numerusform>
        <numerusform>%n assets</numerusform>
    </translation>
</message>
</context></TS>"#;
        let catalog = parse_str(doc).unwrap();
        assert_eq!(catalog.lookup("ctx", "assets").unwrap(), "%n asset");
    }

    #[test]
    fn test_multiple_contexts() {
        let doc = iris_common::test_utils::catalog_fixtures::ts_document_multi(&[
            ("a", &[("ok", "OK")]),
            ("b", &[("ok", "Okay")]),
        ]);
        let catalog = parse_str(&doc).unwrap();
        assert_eq!(catalog.lookup("a", "ok").unwrap(), "OK");
        assert_eq!(catalog.lookup("b", "ok").unwrap(), "Okay");
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let doc = ts_document(WALLET_CONTEXT, &[("accept", "Accept"), ("accept", "Yes")]);
        let err = parse_str(&doc).unwrap_err();
        assert!(matches!(err, I18nError::DuplicateKey { ref key, .. } if key == "accept"));
    }

    #[test]
    fn test_structural_errors() {
        let cases = [
            "<context><name>x</name></context>",
            "<TS><context><message><translation>t</translation></message></context></TS>",
            "<TS><context><message><source>k</source></message></context></TS>",
            "<TS><context><name>x</name></TS>",
            "<TS version=\"2.1\"><context><name>x</name>",
            "",
        ];
        for doc in cases {
            assert!(
                matches!(parse_str(doc), Err(I18nError::Parse { .. })),
                "{doc:?} should fail to parse"
            );
        }
    }

    #[test]
    fn test_parse_error_reports_line() {
        let doc = "<TS>\n<context>\n<name>x</name>\n</message>\n</TS>";
        let err = parse_str(doc).unwrap_err();
        let I18nError::Parse { reason, .. } = err else {
            panic!("expected parse error");
        };
        assert!(reason.starts_with("line 4"), "{reason}");
    }

    #[test]
    fn test_structural_error_reports_line() {
        let doc = "<TS>\n<context>\n<name>x</name>\n<message>\n<translation>t</translation>\n</message>\n</context>\n</TS>";
        let I18nError::Parse { reason, .. } = parse_str(doc).unwrap_err() else {
            panic!("expected parse error");
        };
        assert_eq!(reason, "line 6: <message> without <source>");
    }

    #[test]
    fn test_large_catalog_parses_in_linear_time() {
        let owned: Vec<(String, String)> = (0..5000)
            .map(|i| {
                let text = format!("Message number {i} with some body text.\n{}", "x".repeat(160));
                (format!("key_{i}"), text)
            })
            .collect();
        let pairs: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let doc = ts_document(WALLET_CONTEXT, &pairs);

        let started = std::time::Instant::now();
        let catalog = parse_str(&doc).unwrap();
        let elapsed = started.elapsed();

        assert_eq!(catalog.len(), 5000);
        assert!(elapsed < std::time::Duration::from_secs(5), "took {elapsed:?}");
    }

    #[test]
    fn test_write_then_parse_keeps_entries() {
        let doc = ts_document(
            WALLET_CONTEXT,
            &[("a", "x &lt; y"), ("b", "\nline one\nline two\n"), ("c", "{0} sat")],
        );
        let catalog = parse_str(&doc).unwrap();
        let written = write(&catalog);
        assert!(written.contains("language=\"en_IN\""));
        assert_eq!(parse_str(&written).unwrap(), catalog);
    }
}
