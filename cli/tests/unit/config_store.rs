//! Configuration persistence and `config set` validation.
//!
//! IMPORTANT: the `YamlConfigStore` tests mutate `ORBDECK_CONFIG` and are
//! marked `#[serial]` to avoid races.

#![allow(clippy::expect_used, unsafe_code)]

use orbdeck::application::ports::ConfigStore;
use orbdeck::application::services::config_service;
use orbdeck::domain::{ConfigError, OrbdeckConfig};
use orbdeck::infra::config::{CONFIG_ENV, YamlConfigStore};
use serial_test::serial;
use tempfile::TempDir;

use crate::mocks::MemConfigStore;

fn point_config_at_tempdir() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("config.yaml");
    // SAFETY: every test calling this helper is #[serial].
    unsafe { std::env::set_var(CONFIG_ENV, &path) };
    (dir, path)
}

// ── YamlConfigStore ──────────────────────────────────────────────────────────

#[test]
#[serial]
fn missing_file_loads_defaults() {
    let (_dir, path) = point_config_at_tempdir();
    let store = YamlConfigStore;
    assert_eq!(store.path().expect("path"), path);
    let config = store.load().expect("load");
    assert_eq!(config, OrbdeckConfig::default());
    assert_eq!(config.orbctl.path, "orbctl");
    assert!(config.tools.require_confirmation);
}

#[test]
#[serial]
fn empty_file_loads_defaults() {
    let (_dir, path) = point_config_at_tempdir();
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "\n").expect("write");
    assert_eq!(YamlConfigStore.load().expect("load"), OrbdeckConfig::default());
}

#[test]
#[serial]
fn partial_file_fills_remaining_defaults() {
    let (_dir, path) = point_config_at_tempdir();
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "timeouts:\n  create_secs: 600\n").expect("write");
    let config = YamlConfigStore.load().expect("load");
    assert_eq!(config.timeouts.create_secs, 600);
    assert_eq!(config.timeouts.command_secs, 30);
    assert_eq!(config.terminal.app, "Terminal");
}

#[test]
#[serial]
fn save_then_load_keeps_values() {
    let (_dir, path) = point_config_at_tempdir();
    let store = YamlConfigStore;
    let mut config = OrbdeckConfig::default();
    config.terminal.app = "iTerm".to_string();
    config.tools.require_confirmation = false;
    store.save(&config).expect("save");
    assert!(path.exists());
    assert_eq!(store.load().expect("load"), config);
}

#[cfg(unix)]
#[test]
#[serial]
fn saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;
    let (_dir, path) = point_config_at_tempdir();
    YamlConfigStore
        .save(&OrbdeckConfig::default())
        .expect("save");
    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
#[serial]
fn unparseable_file_is_an_error() {
    let (_dir, path) = point_config_at_tempdir();
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, "timeouts: [unclosed").expect("write");
    let err = YamlConfigStore.load().expect_err("bad yaml");
    assert!(err.to_string().starts_with("cannot parse"));
}

// ── config_service ───────────────────────────────────────────────────────────

#[test]
fn set_value_persists_typed_setting() {
    let store = MemConfigStore::default();
    let config =
        config_service::set_config_value(&store, "timeouts.command_secs", "45").expect("set");
    assert_eq!(config.timeouts.command_secs, 45);
    assert_eq!(store.saved.borrow().as_ref(), Some(&config));
}

#[test]
fn set_value_rejects_unknown_key_without_saving() {
    let store = MemConfigStore::default();
    let err = config_service::set_config_value(&store, "security.level", "high")
        .expect_err("unknown key");
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownKey { .. })
    ));
    assert!(store.saved.borrow().is_none());
}

#[test]
fn set_value_rejects_bad_values() {
    let store = MemConfigStore::default();
    for (key, value) in [
        ("timeouts.create_secs", "0"),
        ("timeouts.create_secs", "soon"),
        ("tools.require_confirmation", "maybe"),
        ("terminal.app", "  "),
    ] {
        let err = config_service::set_config_value(&store, key, value).expect_err(key);
        assert!(
            matches!(err.downcast_ref::<ConfigError>(), Some(ConfigError::InvalidValue { .. })),
            "{key}={value}"
        );
    }
    assert!(store.saved.borrow().is_none());
}

#[test]
fn load_config_reads_through_the_store() {
    let store = MemConfigStore::default();
    config_service::set_config_value(&store, "orbctl.path", "/opt/orbstack/bin/orbctl")
        .expect("set");
    let config = config_service::load_config(&store).expect("load");
    assert_eq!(config.orbctl.path, "/opt/orbstack/bin/orbctl");
}
