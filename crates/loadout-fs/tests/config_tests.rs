use loadout_fs::{ConfigStore, Error, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct TestSettings {
    live_root: String,
    poll_interval_ms: u64,
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(&file_path, r#"live_root = "/games/tf"
poll_interval_ms = 2000"#).unwrap();

    let store = ConfigStore::new();
    let path = NormalizedPath::new(&file_path);
    let settings: TestSettings = store.load(&path).unwrap();

    assert_eq!(settings.live_root, "/games/tf");
    assert_eq!(settings.poll_interval_ms, 2000);
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("profile.json");
    fs::write(&file_path, r#"{"live_root": "/games/tf", "poll_interval_ms": 500}"#).unwrap();

    let store = ConfigStore::new();
    let path = NormalizedPath::new(&file_path);
    let settings: TestSettings = store.load(&path).unwrap();

    assert_eq!(settings.poll_interval_ms, 500);
}

#[test]
fn test_save_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    let path = NormalizedPath::new(&file_path);

    let settings = TestSettings { live_root: "/games/tf".into(), poll_interval_ms: 2000 };
    ConfigStore::new().save(&path, &settings).unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert!(content.contains("live_root = \"/games/tf\""));
    assert!(content.contains("poll_interval_ms = 2000"));
}

#[test]
fn test_save_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("profile.json");
    let path = NormalizedPath::new(&file_path);

    let settings = TestSettings { live_root: "x".into(), poll_interval_ms: 1 };
    ConfigStore::new().save(&path, &settings).unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert!(content.contains("\"live_root\""));
}

#[test]
fn test_unsupported_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.yaml");
    fs::write(&file_path, "live_root: x").unwrap();

    let path = NormalizedPath::new(&file_path);
    let result: loadout_fs::Result<TestSettings> = ConfigStore::new().load(&path);

    assert!(matches!(result, Err(Error::UnsupportedFormat { .. })));
}

#[test]
fn test_corrupt_json_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("profile.json");
    fs::write(&file_path, "{not json").unwrap();

    let path = NormalizedPath::new(&file_path);
    let result: loadout_fs::Result<TestSettings> = ConfigStore::new().load(&path);

    match result {
        Err(Error::ConfigParse { format, path, .. }) => {
            assert_eq!(format, "JSON");
            assert_eq!(path, file_path);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_roundtrip_toml() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("config.toml"));

    let original = TestSettings { live_root: "roundtrip".into(), poll_interval_ms: 123 };
    let store = ConfigStore::new();

    store.save(&path, &original).unwrap();
    let loaded: TestSettings = store.load(&path).unwrap();

    assert_eq!(original, loaded);
}
