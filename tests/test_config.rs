use std::path::PathBuf;

use pumpkin_patch::config::GameConfig;
use pumpkin_patch::error::GameError;
use pumpkin_patch::progress::Progress;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pumpkin_patch_{}_{}.json", name, std::process::id()))
}

// ── GameConfig ────────────────────────────────────────────────────────────────

#[test]
fn default_config_is_valid() {
    let config = GameConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.pumpkin_count, 5);
    assert_eq!(config.starting_lives, 3);
    assert_eq!(config.starting_round, 1);
}

#[test]
fn partial_config_file_keeps_defaults() {
    let path = temp_path("partial_config");
    std::fs::write(&path, r#"{ "pumpkin_count": 3, "round_duration_secs": 12.5 }"#).unwrap();

    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.pumpkin_count, 3);
    assert_eq!(config.round_duration_secs, 12.5);
    assert_eq!(config.starting_lives, GameConfig::DEFAULT_STARTING_LIVES);
    assert_eq!(config.clouds, GameConfig::default().clouds);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn invalid_values_are_rejected() {
    let mut config = GameConfig::default();
    config.pumpkin_count = 0;
    assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

    let mut config = GameConfig::default();
    config.starting_lives = 0;
    assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

    let mut config = GameConfig::default();
    config.round_duration_secs = -1.0;
    assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

    let mut config = GameConfig::default();
    config.round_duration_secs = f32::NAN;
    assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
}

#[test]
fn malformed_config_is_a_json_error() {
    let path = temp_path("malformed_config");
    std::fs::write(&path, "{ pumpkin_count: ").unwrap();
    assert!(matches!(GameConfig::load(&path), Err(GameError::Json(_))));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_config_is_an_io_error() {
    let path = temp_path("no_such_config");
    assert!(matches!(GameConfig::load(&path), Err(GameError::Io(_))));
}

// ── Progress ──────────────────────────────────────────────────────────────────

#[test]
fn missing_progress_file_starts_from_zero() {
    let path = temp_path("no_such_progress");
    assert_eq!(Progress::load(&path).unwrap(), Progress::default());
}

#[test]
fn progress_survives_save_and_load() {
    let path = temp_path("progress");
    let progress = Progress { high_round: 7 };
    progress.save(&path).unwrap();
    assert_eq!(Progress::load(&path).unwrap(), progress);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn record_keeps_the_best_round() {
    let mut progress = Progress::default();
    assert!(progress.record(4));
    assert!(!progress.record(2));
    assert!(!progress.record(4));
    assert_eq!(progress.high_round, 4);

    progress.reset();
    assert_eq!(progress.high_round, 0);
}
