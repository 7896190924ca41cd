#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_constants() {
    let cfg = EditorConfig::default();
    assert_eq!(cfg.min_scale, 0.1);
    assert_eq!(cfg.zoom_step, 0.01);
    assert_eq!(cfg.grid_pitch, 60.0);
    assert_eq!(cfg.coarse_grid_pitch, 120.0);
    assert_eq!(cfg.coarse_grid_below, 0.5);
    assert_eq!(cfg.outline_padding, 10.0);
    assert!(cfg.show_grid);
    assert!(cfg.show_debug_overlay);
    assert_eq!(cfg.default_font_face, "sans-serif");
}

#[test]
fn defaults_validate() {
    assert!(EditorConfig::default().validate().is_ok());
}

#[test]
fn empty_object_gives_defaults() {
    let cfg = EditorConfig::from_json("{}").unwrap();
    assert_eq!(cfg, EditorConfig::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = EditorConfig::from_json(r#"{"min_scale": 0.25, "show_debug_overlay": false}"#).unwrap();
    assert_eq!(cfg.min_scale, 0.25);
    assert!(!cfg.show_debug_overlay);
    assert_eq!(cfg.grid_pitch, 60.0);
}

#[test]
fn unknown_key_is_rejected() {
    let err = EditorConfig::from_json(r#"{"min_zoom": 0.5}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = EditorConfig::from_json("{not json").unwrap_err();
    assert!(err.to_string().starts_with("config parse failed"));
}

#[test]
fn zero_min_scale_is_invalid() {
    let err = EditorConfig::from_json(r#"{"min_scale": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("min_scale"));
}

#[test]
fn negative_grid_pitch_is_invalid() {
    let err = EditorConfig::from_json(r#"{"grid_pitch": -60}"#).unwrap_err();
    assert!(err.to_string().contains("grid_pitch"));
}

#[test]
fn negative_padding_is_invalid() {
    let cfg = EditorConfig { outline_padding: -1.0, ..EditorConfig::default() };
    assert!(cfg.validate().is_err());
}

#[test]
fn blank_font_face_is_invalid() {
    let err = EditorConfig::from_json(r#"{"default_font_face": "  "}"#).unwrap_err();
    assert!(err.to_string().contains("default_font_face"));
}

#[test]
fn zero_zoom_step_is_allowed() {
    assert!(EditorConfig::from_json(r#"{"zoom_step": 0}"#).is_ok());
}
