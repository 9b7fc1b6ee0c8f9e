// Integration tests for the settings bootstrap and the backup pair
// invariant.

use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;
use winmaint::models::{Settings, SettingsError};
use winmaint::SettingsManager;

fn create_test_settings_manager() -> (SettingsManager, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let manager = SettingsManager::new(&config_path).unwrap();
    (manager, temp_dir)
}

#[test]
fn test_first_run_bootstraps_defaults() {
    let (manager, _temp_dir) = create_test_settings_manager();

    assert!(!manager.settings_path().exists());

    let settings = manager.load_or_init().unwrap();

    assert!(manager.settings_path().exists());
    assert_eq!(settings.sources.len(), settings.destinations.len());

    // The written file parses back to the same values.
    let reloaded = manager.load_or_init().unwrap();
    assert_eq!(reloaded.sources, settings.sources);
    assert_eq!(reloaded.task_delay_secs, settings.task_delay_secs);
}

#[test]
fn test_bootstrap_is_idempotent_over_existing_file() {
    let (manager, _temp_dir) = create_test_settings_manager();

    let custom = Settings {
        sources: vec!["C:\\Projects".into(), "C:\\Music".into()],
        destinations: vec!["E:\\Mirror\\Projects".into(), "E:\\Mirror\\Music".into()],
        exclusion_patterns: vec!["*.iso".into()],
        task_delay_secs: 9,
        ..Settings::default()
    };
    manager.save(&custom).unwrap();

    let bytes_before = fs::read(manager.settings_path()).unwrap();
    let loaded = manager.load_or_init().unwrap();
    let bytes_after = fs::read(manager.settings_path()).unwrap();

    // Rerunning the bootstrap must not overwrite or mutate a valid file.
    assert_eq!(bytes_before, bytes_after);
    assert_eq!(loaded.sources, custom.sources);
    assert_eq!(loaded.exclusion_patterns, custom.exclusion_patterns);
    assert_eq!(loaded.task_delay_secs, 9);
}

#[test]
fn test_malformed_file_is_fatal_for_the_session() {
    let (manager, _temp_dir) = create_test_settings_manager();

    fs::write(manager.settings_path(), "sources = oops").unwrap();

    let err = manager.load_or_init().unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Failed to parse settings"));

    // The broken file is left for the user to fix, not clobbered.
    assert_eq!(
        fs::read_to_string(manager.settings_path()).unwrap(),
        "sources = oops"
    );
}

#[test]
fn test_backup_pairs_follow_index_order() {
    let settings = Settings {
        sources: vec!["C:\\one".into(), "C:\\two".into(), "C:\\three".into()],
        destinations: vec!["D:\\one".into(), "D:\\two".into(), "D:\\three".into()],
        ..Settings::default()
    };

    let pairs = settings.backup_pairs().unwrap();
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0], ("C:\\one", "D:\\one"));
    assert_eq!(pairs[1], ("C:\\two", "D:\\two"));
    assert_eq!(pairs[2], ("C:\\three", "D:\\three"));
}

#[test]
fn test_mismatched_pairs_produce_single_descriptive_error() {
    let settings = Settings {
        sources: vec!["C:\\one".into(), "C:\\two".into(), "C:\\three".into()],
        destinations: vec!["D:\\one".into()],
        ..Settings::default()
    };

    let err = settings.backup_pairs().unwrap_err();
    assert!(matches!(
        err,
        SettingsError::MismatchedBackupPairs { sources: 3, destinations: 1 }
    ));
    assert!(err.to_string().contains("3 sources"));
    assert!(err.to_string().contains("1 destinations"));
}

#[test]
fn test_unknown_fields_do_not_break_loading() {
    let (manager, _temp_dir) = create_test_settings_manager();

    fs::write(
        manager.settings_path(),
        r#"{"sources": ["C:\\a"], "destinations": ["D:\\a"], "legacy_field": true}"#,
    )
    .unwrap();

    let settings = manager.load_or_init().unwrap();
    assert_eq!(settings.sources, vec!["C:\\a".to_string()]);
}
