//! Test utilities and shared fixtures for the catalog crates.
//!
//! Available to other crates through the `testing` feature.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `content` to `dir/name`, creating parent directories, and return the path.
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Path of the catalogs shipped at the workspace root.
pub fn shipped_translations_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../translations")
        .canonicalize()
        .expect("translations directory missing from workspace root")
}

/// Catalog document builders.
pub mod catalog_fixtures {
    use super::*;

    /// Context name used by the wallet's catalogs.
    pub const WALLET_CONTEXT: &str = "iris_wallet_desktop";

    /// Build a single-context `TS` document. Text is written verbatim, so
    /// callers escape markup themselves when a test needs it.
    pub fn ts_document(context: &str, entries: &[(&str, &str)]) -> String {
        let mut doc = String::from(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\">\n",
        );
        push_context(&mut doc, context, entries);
        doc.push_str("</TS>\n");
        doc
    }

    /// Build a `TS` document holding several contexts.
    pub fn ts_document_multi(contexts: &[(&str, &[(&str, &str)])]) -> String {
        let mut doc = String::from("<TS version=\"2.1\">\n");
        for (context, entries) in contexts {
            push_context(&mut doc, context, entries);
        }
        doc.push_str("</TS>\n");
        doc
    }

    fn push_context(doc: &mut String, context: &str, entries: &[(&str, &str)]) {
        let _ = writeln!(doc, "<context>\n    <name>{context}</name>");
        for (key, text) in entries {
            let _ = writeln!(
                doc,
                "    <message>\n        <source>{key}</source>\n        <translation>{text}</translation>\n    </message>"
            );
        }
        doc.push_str("</context>\n");
    }

    /// Wallet strings used across the test suites.
    pub fn wallet_entries() -> Vec<(&'static str, &'static str)> {
        vec![
            ("iris_wallet", "Iris Wallet"),
            ("accept", "Accept"),
            ("invalid_password", "Invalid password"),
            ("backup_success", "Backup completed successfully!"),
            (
                "msat_lower_bound_limit",
                "The amount is too low. It must be at least {0} sat",
            ),
            (
                "channel_capacity_validation",
                "The capacity of the channel must be between {0} sat and {1} sat.",
            ),
        ]
    }

    /// The wallet strings as a `TS` document.
    pub fn wallet_ts() -> String {
        ts_document(WALLET_CONTEXT, &wallet_entries())
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// A minimal valid configuration as TOML.
    pub fn minimal_config_toml() -> &'static str {
        r#"
[i18n]
translations_dir = "translations"
default_locale = "en_IN"
"#
    }

    /// A full configuration as YAML.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "i18n:\n",
            "  translations_dir: \"/opt/iris/translations\"\n",
            "  default_locale: \"en_IN\"\n",
            "  locale: \"de_DE\"\n",
            "  detect_system_locale: false\n",
            "  region_fallback: false\n",
            "  context: \"iris_wallet_desktop\"\n",
            "  missing_key_policy: \"error\"\n",
            "  include_unfinished: false\n",
            "logging:\n",
            "  filter: \"iris_i18n=trace\"\n",
            "  json: true\n",
        )
    }
}
