use std::io::Write;

use space_invaders::config::coerce_difficulty;
use space_invaders::consts::{DEFAULT_DIFFICULTY, EXTRA_HARD_DIFFICULTY};
use space_invaders::{Config, ConfigError};

#[test]
fn defaults() {
    let c = Config::default();
    assert_eq!(c.difficulty, DEFAULT_DIFFICULTY);
    assert!(!c.debug);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let c = Config::from_json(r#"{ "debug": true }"#).unwrap();
    assert_eq!(c.difficulty, DEFAULT_DIFFICULTY);
    assert!(c.debug);

    let c = Config::from_json(r#"{ "difficulty": 5 }"#).unwrap();
    assert_eq!(c, Config { difficulty: 5, debug: false });
}

#[test]
fn zero_difficulty_rejected() {
    let err = Config::from_json(r#"{ "difficulty": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDifficulty(0)));
}

#[test]
fn negative_difficulty_is_a_parse_error() {
    let err = Config::from_json(r#"{ "difficulty": -2 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!("space_invaders_cfg_{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, r#"{{ "difficulty": 2, "debug": true }}"#).unwrap();
    drop(file);

    let c = Config::load(&path).unwrap();
    assert_eq!(c, Config { difficulty: 2, debug: true });
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn resolved_config_serializes_as_loadable_json() {
    let c = Config { difficulty: 10, debug: true };
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), c);
}

#[test]
fn load_missing_file_reports_path() {
    let err = Config::load("/definitely/not/here.json").unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("here.json")),
        other => panic!("unexpected error: {other}"),
    }
}

// ── startup prompt ────────────────────────────────────────────────────────────

#[test]
fn prompt_accepts_one_to_five() {
    for d in 1..=5 {
        assert_eq!(coerce_difficulty(&d.to_string()), d);
    }
    assert_eq!(coerce_difficulty(" 3 \n"), 3);
}

#[test]
fn prompt_falls_back_to_extra_hard() {
    for input in ["", "0", "6", "-1", "abc", "2.5"] {
        assert_eq!(coerce_difficulty(input), EXTRA_HARD_DIFFICULTY, "input {input:?}");
    }
}
