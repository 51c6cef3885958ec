//! Unit tests for editor settings.

use floorgrid::EditorSettings;
use floorgrid::constants::{DEFAULT_BOARD_SIZE, MAX_HISTORY_OPERATIONS};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults_are_valid() {
    let settings = EditorSettings::default();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.board_size, DEFAULT_BOARD_SIZE);
    assert_eq!(settings.history_limit, MAX_HISTORY_OPERATIONS);
    assert_eq!(settings.region_name(3), "Region 3");
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"board_size": 24, "region_name_prefix": "Room"}"#).unwrap();

    let settings = EditorSettings::load_from(&path).unwrap();
    assert_eq!(settings.board_size, 24);
    assert_eq!(settings.region_name(1), "Room 1");
    assert_eq!(settings.cell_size, EditorSettings::default().cell_size);
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let settings = EditorSettings {
        board_size: 32,
        drag_threshold_px: 6.0,
        ..EditorSettings::default()
    };

    settings.save_to(&path).unwrap();
    assert_eq!(EditorSettings::load_from(&path).unwrap(), settings);
}

#[test]
fn test_invalid_values_are_rejected() {
    let bad_scale = EditorSettings { min_scale: 4.0, max_scale: 2.0, ..EditorSettings::default() };
    assert!(bad_scale.validate().is_err());

    let bad_board = EditorSettings { board_size: 0, ..EditorSettings::default() };
    assert!(bad_board.validate().is_err());

    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"history_limit": 0}"#).unwrap();
    let err = EditorSettings::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("history_limit"));
}

#[test]
fn test_malformed_json_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let err = EditorSettings::load_from(&path).unwrap_err();
    assert!(format!("{err:#}").contains("settings.json"));
}

#[test]
fn test_bounds_and_limits_follow_settings() {
    let settings = EditorSettings { board_size: 12, cell_size: 5.0, ..EditorSettings::default() };
    assert_eq!(settings.bounds().size, 12);
    assert_eq!(settings.board_world_size(), 60.0);
    assert_eq!(settings.scale_limits().min, settings.min_scale);
}
