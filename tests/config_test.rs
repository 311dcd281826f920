//! Tests for TOML configuration loading.

use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use unbeatable::AppConfig;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_config_loads() {
    let file = config_file(
        r#"
engine_first = true
seed = 42
log_filter = "debug,unbeatable_core=trace"
log_file = "/tmp/game.log"
selfplay_games = 7
"#,
    );

    let config = AppConfig::from_file(file.path()).unwrap();
    assert!(*config.engine_first());
    assert_eq!(*config.seed(), Some(42));
    assert_eq!(config.log_filter(), "debug,unbeatable_core=trace");
    assert_eq!(config.log_file(), &PathBuf::from("/tmp/game.log"));
    assert_eq!(*config.selfplay_games(), 7);
}

#[test]
fn test_missing_fields_take_defaults() {
    let file = config_file("seed = 3\n");
    let config = AppConfig::from_file(file.path()).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(*config.seed(), Some(3));
    assert_eq!(config.engine_first(), defaults.engine_first());
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.log_file(), &PathBuf::from("unbeatable.log"));
    assert_eq!(*config.selfplay_games(), 100);
}

#[test]
fn test_empty_file_is_defaults() {
    let file = config_file("");
    assert_eq!(AppConfig::from_file(file.path()).unwrap(), AppConfig::default());
}

#[test]
fn test_zero_games_rejected() {
    let file = config_file("selfplay_games = 0\n");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("selfplay_games"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_malformed_toml_rejected() {
    let file = config_file("engine_first = \"sometimes\"\n");
    let err = AppConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_explicit_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = AppConfig::load(Some(&missing)).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
    assert!(err.file.ends_with("config.rs"));
}

#[test]
fn test_cli_overrides_win() {
    let file = config_file("seed = 1\nengine_first = false\n");
    let config = AppConfig::from_file(file.path())
        .unwrap()
        .with_overrides(true, Some(9));
    assert!(*config.engine_first());
    assert_eq!(*config.seed(), Some(9));

    // Absent flags keep the file's values.
    let config = AppConfig::from_file(file.path())
        .unwrap()
        .with_overrides(false, None);
    assert!(!*config.engine_first());
    assert_eq!(*config.seed(), Some(1));
}
