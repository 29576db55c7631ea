// Integration tests for the command registry reader

use arlimit_core::{LimitError, RegistryReader};
use arlimit_store::FileRegistryReader;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_read_fixture_registry() {
    // Given: a registry with duplicates, a non-zero suffix and short records
    let reader = FileRegistryReader::new(fixtures_dir().join("ar.conf"));

    // When: we list commands
    let commands: Vec<String> = reader.list_commands().unwrap().into_iter().collect();

    // Then: only distinct, valid commands remain
    assert_eq!(
        commands,
        vec![
            "firewall-drop0".to_string(),
            "firewall-drop600".to_string(),
            "host-deny0".to_string(),
            "restart-wazuh0".to_string(),
        ]
    );
}

#[test]
fn test_missing_registry_is_missing_file_error() {
    let reader = FileRegistryReader::new(fixtures_dir().join("does-not-exist.conf"));

    assert!(matches!(
        reader.list_commands(),
        Err(LimitError::MissingFile { .. })
    ));
}
