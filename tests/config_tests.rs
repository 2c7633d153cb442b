use std::io::Write;

use draughtcargo::{load_config_from_json, EngineConfig, EngineError};
use tempfile::NamedTempFile;

fn write_json(body: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tempfile");
    f.write_all(body.as_bytes()).expect("write");
    f
}

#[test]
fn loads_full_config() {
    let f = write_json(r#"{"depth": 3, "pruning": false, "parallel": true, "seed": 99}"#);
    let cfg = load_config_from_json(f.path()).expect("valid config");
    assert_eq!(
        cfg,
        EngineConfig {
            depth: 3,
            pruning: false,
            parallel: true,
            seed: 99
        }
    );
    let search = cfg.search_config();
    assert_eq!(search.max_depth, 3);
    assert!(!search.pruning);
    assert!(search.parallel);
}

#[test]
fn empty_object_gives_defaults() {
    let f = write_json("{}");
    assert_eq!(load_config_from_json(f.path()), Ok(EngineConfig::default()));
}

#[test]
fn rejects_out_of_range_depth() {
    let f = write_json(r#"{"depth": 40}"#);
    assert!(matches!(load_config_from_json(f.path()), Err(EngineError::Config(_))));
}

#[test]
fn rejects_unknown_fields_and_bad_json() {
    let f = write_json(r#"{"dept": 3}"#);
    assert!(matches!(load_config_from_json(f.path()), Err(EngineError::Config(_))));
    let g = write_json("not json");
    assert!(matches!(load_config_from_json(g.path()), Err(EngineError::Config(_))));
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_config_from_json(dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().starts_with("config error"));
}
