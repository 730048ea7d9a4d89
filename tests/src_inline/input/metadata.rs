use super::*;

#[test]
fn test_parse_metadata_all_fields() {
    let meta =
        parse_metadata(r#"{"team":"Alpha","run_id":"r1","type":"gnn","model":"GCN"}"#).unwrap();
    assert_eq!(meta.team, "Alpha");
    assert_eq!(meta.run_id, "r1");
    assert_eq!(meta.run_type, "gnn");
    assert_eq!(meta.model, "GCN");
}

#[test]
fn test_missing_fields_fall_back_to_defaults() {
    let meta = parse_metadata(r#"{"team":"Alpha","extra":42}"#).unwrap();
    assert_eq!(meta.team, "Alpha");
    for (field, default) in METADATA_DEFAULTS {
        if field != MetadataField::Team {
            assert_eq!(meta.get(field), default);
        }
    }
}

#[test]
fn test_null_counts_as_absent_and_scalars_are_stringified() {
    let meta = parse_metadata(r#"{"team":null,"run_id":7,"type":true}"#).unwrap();
    assert_eq!(meta.team, "unknown");
    assert_eq!(meta.run_id, "7");
    assert_eq!(meta.run_type, "true");
    assert_eq!(meta.model, "unknown");
}

#[test]
fn test_rejects_non_object_and_nested_values() {
    assert!(matches!(parse_metadata("[1,2]"), Err(InputError::Parse(_))));
    assert!(matches!(parse_metadata("{not json"), Err(InputError::Parse(_))));
    assert!(matches!(
        parse_metadata(r#"{"model":{"name":"GCN"}}"#),
        Err(InputError::Parse(_))
    ));
}

#[test]
fn test_load_metadata_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_metadata(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
}
