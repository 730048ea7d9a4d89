use super::*;
use std::fs;

#[test]
fn test_parse_score_line_in_fixed_order() {
    let rec = parse_score_line("0.91,0.89,0.90,0.92\n").unwrap();
    assert_eq!(rec.macro_f1, 0.91);
    assert_eq!(rec.accuracy, 0.89);
    assert_eq!(rec.precision, 0.90);
    assert_eq!(rec.recall, 0.92);
}

#[test]
fn test_parse_score_line_trims_fields() {
    let rec = parse_score_line("  0.5 , 0.6,0.7 ,1\r\n").unwrap();
    assert_eq!(
        [rec.macro_f1, rec.accuracy, rec.precision, rec.recall],
        [0.5, 0.6, 0.7, 1.0]
    );
}

#[test]
fn test_parse_score_line_rejects_wrong_arity() {
    assert!(matches!(
        parse_score_line("0.1,0.2,0.3"),
        Err(InputError::Parse(_))
    ));
    assert!(matches!(
        parse_score_line("0.1,0.2,0.3,0.4,0.5"),
        Err(InputError::Parse(_))
    ));
    assert!(matches!(parse_score_line(""), Err(InputError::Parse(_))));
}

#[test]
fn test_parse_score_line_rejects_non_numeric() {
    let err = parse_score_line("0.1,abc,0.3,0.4").unwrap_err();
    assert!(err.to_string().contains("accuracy"));
}

#[test]
fn test_load_scores_uses_first_line_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score.txt");
    fs::write(&path, "0.1,0.2,0.3,0.4\nnot,a,score,line\n").unwrap();
    let rec = load_scores(&path).unwrap();
    assert_eq!(rec.macro_f1, 0.1);
    assert_eq!(rec.recall, 0.4);
}

#[test]
fn test_load_scores_empty_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.txt");
    fs::write(&empty, "").unwrap();
    assert!(matches!(load_scores(&empty), Err(InputError::Parse(_))));

    let missing = dir.path().join("missing.txt");
    assert!(matches!(load_scores(&missing), Err(InputError::Io { .. })));
}
