// End-to-end reconciliation over real files

use arlimit_core::{LimitBundle, LimitReconciler};
use arlimit_store::{FileRegistryReader, YamlDocumentStore};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn read_yaml(path: &Path) -> serde_yaml::Value {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_initialize_seeds_document_from_registry() {
    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("ar_limit_conf.yaml");
    let reg_path = temp_dir.path().join("ar.conf");
    write(
        &doc_path,
        "active-response:\n  global-limit: 200\n  custom-limit: {}\n",
    );
    write(&reg_path, "scan0 - scan - 0\nblock0 - block - 0\n");

    let r = LimitReconciler::initialize(
        YamlDocumentStore::new(&doc_path),
        FileRegistryReader::new(&reg_path),
    );

    assert_eq!(r.get_limits(None).len(), 2);
    let saved = read_yaml(&doc_path);
    assert_eq!(saved["active-response"]["custom-limit"]["scan0"].as_u64(), Some(200));
    assert_eq!(saved["active-response"]["custom-limit"]["block0"].as_u64(), Some(200));
}

#[test]
fn test_missing_files_degrade_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("ar_limit_conf.yaml");

    let r = LimitReconciler::initialize(
        YamlDocumentStore::new(&doc_path),
        FileRegistryReader::new(temp_dir.path().join("missing.conf")),
    );

    assert!(r.get_limits(None).is_empty());
    assert_eq!(r.get_global_limit(), None);
    // the document is created with an empty custom-limit section
    let saved = read_yaml(&doc_path);
    assert!(saved["active-response"]["custom-limit"]
        .as_mapping()
        .map(|m| m.is_empty())
        .unwrap_or(false));
}

#[test]
fn test_mutations_are_flushed_after_each_call() {
    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("ar_limit_conf.yaml");
    let reg_path = temp_dir.path().join("ar.conf");
    write(&reg_path, "block-domain0 - block-domain - 0\nquick-scan0 - quick-scan - 0\n");

    let mut r = LimitReconciler::initialize(
        YamlDocumentStore::new(&doc_path),
        FileRegistryReader::new(&reg_path),
    );

    r.update_global_limit(300).unwrap();
    assert_eq!(read_yaml(&doc_path)["active-response"]["global-limit"].as_u64(), Some(300));

    let updates = [
        ("block-domain0".to_string(), Some(50)),
        ("quick-scan0".to_string(), Some(15)),
        ("new-command0".to_string(), Some(100)),
    ]
    .into_iter()
    .collect();
    r.update_limits(&updates).unwrap();

    let saved = read_yaml(&doc_path);
    let custom = &saved["active-response"]["custom-limit"];
    assert_eq!(custom["block-domain0"].as_u64(), Some(50));
    assert_eq!(custom["quick-scan0"].as_u64(), Some(15));
    assert!(custom.get("new-command0").is_none());

    let bundle = LimitBundle {
        custom_limits: [("quick-scan0".to_string(), Some(999))].into_iter().collect(),
        global_limit: Some(120),
    };
    r.apply_bundle(&bundle).unwrap();

    let saved = read_yaml(&doc_path);
    assert_eq!(saved["active-response"]["global-limit"].as_u64(), Some(120));
    assert_eq!(
        saved["active-response"]["custom-limit"]["quick-scan0"].as_u64(),
        Some(120)
    );
}

#[test]
fn test_commands_are_never_removed_on_reinitialize() {
    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("ar_limit_conf.yaml");
    let reg_path = temp_dir.path().join("ar.conf");
    write(&reg_path, "old0 - old - 0\n");

    drop(LimitReconciler::initialize(
        YamlDocumentStore::new(&doc_path),
        FileRegistryReader::new(&reg_path),
    ));

    write(&reg_path, "new0 - new - 0\n");
    let r = LimitReconciler::initialize(
        YamlDocumentStore::new(&doc_path),
        FileRegistryReader::new(&reg_path),
    );

    let limits = r.get_limits(None);
    assert!(limits.contains_key("old0"));
    assert!(limits.contains_key("new0"));
}

#[test]
fn test_numeric_command_names_survive_initialize() {
    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("ar_limit_conf.yaml");
    let reg_path = temp_dir.path().join("ar.conf");
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("ar_limit_conf_numeric_keys.yaml");
    fs::copy(fixture, &doc_path).unwrap();
    write(&reg_path, "100 - custom-script - 0\nblock0 - block - 0\n");

    let r = LimitReconciler::initialize(
        YamlDocumentStore::new(&doc_path),
        FileRegistryReader::new(&reg_path),
    );

    assert_eq!(r.get_global_limit(), Some(300));
    let limits = r.get_limits(None);
    assert_eq!(limits["100"], Some(5));
    assert_eq!(limits["scan0"], Some(7));
    assert_eq!(limits["block0"], Some(300));

    let saved = read_yaml(&doc_path);
    assert_eq!(saved["active-response"]["global-limit"].as_u64(), Some(300));
    assert_eq!(saved["active-response"]["custom-limit"]["100"].as_u64(), Some(5));
}

#[test]
fn test_unreadable_document_is_left_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("ar_limit_conf.yaml");
    let reg_path = temp_dir.path().join("ar.conf");
    let original: &[u8] = b"active-response:\n  global-limit: \xff\xfe\n";
    fs::write(&doc_path, original).unwrap();
    write(&reg_path, "scan0 - scan - 0\n");

    let mut r = LimitReconciler::initialize(
        YamlDocumentStore::new(&doc_path),
        FileRegistryReader::new(&reg_path),
    );

    assert_eq!(fs::read(&doc_path).unwrap(), original);
    assert!(matches!(
        r.update_global_limit(10),
        Err(arlimit_core::LimitError::Io { .. })
    ));
    assert_eq!(fs::read(&doc_path).unwrap(), original);
}
