//! Integration tests for iris-common crate.

use iris_common::test_utils::{catalog_fixtures, shipped_translations_dir};
use iris_common::{preview, truncate_string, CatalogFormat, MissingKeyPolicy};
use std::path::Path;

#[test]
fn test_shipped_catalog_is_present() {
    let dir = shipped_translations_dir();
    let catalog = dir.join("en_IN.ts");
    assert!(catalog.is_file(), "missing {}", catalog.display());
    assert_eq!(CatalogFormat::from_path(&catalog), Some(CatalogFormat::Ts));
}

#[test]
fn test_policy_display_round_trips_through_from_str() {
    for policy in [MissingKeyPolicy::Error, MissingKeyPolicy::ReturnKey] {
        assert_eq!(policy.to_string().parse::<MissingKeyPolicy>(), Ok(policy));
    }
}

#[test]
fn test_format_extensions() {
    assert_eq!(CatalogFormat::Ts.extension(), "ts");
    assert_eq!(CatalogFormat::Json.to_string(), "json");
    assert_eq!(CatalogFormat::from_path(Path::new("x.yaml")), None);
}

#[test]
fn test_wallet_fixture_has_placeholders() {
    let entries = catalog_fixtures::wallet_entries();
    assert!(entries.iter().any(|(_, text)| text.contains("{0}")));
    assert!(catalog_fixtures::wallet_ts().contains("channel_capacity_validation"));
}

#[test]
fn test_preview_of_long_line_is_truncated() {
    let long = "x".repeat(200);
    assert_eq!(preview(&long, 10), truncate_string(&long, 10));
    assert_eq!(preview(&long, 10).len(), 10);
}
