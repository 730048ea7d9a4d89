use super::*;
use std::fs;

use crate::input::InputError;

#[test]
fn test_stage1_parses_scores_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let score = dir.path().join("score.txt");
    let meta = dir.path().join("meta.json");
    fs::write(&score, "0.91,0.89,0.90,0.92\n").unwrap();
    fs::write(&meta, r#"{"team":"Alpha","model":"GCN"}"#).unwrap();

    let out = run_stage1(&score, &meta, "alice").unwrap();
    assert_eq!(out.username, "alice");
    assert_eq!(out.scores.macro_f1, 0.91);
    assert_eq!(out.metadata.team, "Alpha");
    assert_eq!(out.metadata.run_id, "unknown");
}

#[test]
fn test_stage1_rejects_empty_username_before_reading_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_stage1(&dir.path().join("a"), &dir.path().join("b"), "").unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_stage1_fails_on_bad_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let score = dir.path().join("score.txt");
    let meta = dir.path().join("meta.json");
    fs::write(&score, "0.1,0.2,0.3,0.4\n").unwrap();
    fs::write(&meta, "team=Alpha").unwrap();
    assert!(matches!(
        run_stage1(&score, &meta, "alice"),
        Err(InputError::Parse(_))
    ));
}
