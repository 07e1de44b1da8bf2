use pretty_assertions::assert_eq;
use serde_json::json;

use crate::error::JsonbError;
use crate::schema::{RecordHandle, TableDef};
use crate::transpiler::build_update_query;

fn friends() -> TableDef {
    TableDef::new("friends")
        .column("id", "bigint")
        .column("name", "varchar")
        .jsonb("props")
}

fn friends_with_timestamps() -> TableDef {
    friends().column("updated_at", "timestamp")
}

#[test]
fn test_single_leaf_write() {
    let record = RecordHandle::persisted(1i64, friends());
    let sql = build_update_query(&record, &json!({"props": {"age": 21}}), false).unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{age}', '21')::jsonb WHERE id = 1;"#
    );
}

#[test]
fn test_string_leaf_written_as_json_literal() {
    let record = RecordHandle::persisted(1i64, friends());
    let sql = build_update_query(&record, &json!({"props": {"ping": "pong"}}), false).unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{ping}', '"pong"')::jsonb WHERE id = 1;"#
    );
}

#[test]
fn test_array_leaf() {
    let record = RecordHandle::persisted(1i64, friends());
    let sql = build_update_query(&record, &json!({"props": {"tags": [1, 2, 3]}}), false).unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{tags}', '[1,2,3]')::jsonb WHERE id = 1;"#
    );
}

#[test]
fn test_nested_single_key_chain_is_path_sugar() {
    let record = RecordHandle::persisted(7i64, friends());
    let sql = build_update_query(&record, &json!({"props": {"x": {"y": {"z": 5}}}}), false).unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{x,y,z}', '5')::jsonb WHERE id = 7;"#
    );
}

#[test]
fn test_multi_key_object_is_merged_at_path() {
    let record = RecordHandle::persisted(1i64, friends());
    let sql = build_update_query(
        &record,
        &json!({"props": {"nested": {"a": 1, "b": 2}}}),
        false,
    )
    .unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{nested}', "props"->'nested' || '{"a":1,"b":2}')::jsonb WHERE id = 1;"#
    );
}

#[test]
fn test_sibling_keys_chain_jsonb_set_calls() {
    let record = RecordHandle::persisted(1i64, friends());
    let sql = build_update_query(&record, &json!({"props": {"a": 1, "b": 2}}), false).unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "friends" SET "props" = jsonb_set(jsonb_set("props"::jsonb, '{a}', '1')::jsonb, '{b}', '2')::jsonb WHERE id = 1;"#
    );
}

#[test]
fn test_empty_object_leaf_written_verbatim() {
    let record = RecordHandle::persisted(1i64, friends());
    let sql = build_update_query(&record, &json!({"props": {"slot": {}}}), false).unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{slot}', '{}')::jsonb WHERE id = 1;"#
    );
}

#[test]
fn test_multiple_columns_get_independent_assignments() {
    let table = friends().jsonb("settings");
    let record = RecordHandle::persisted(1i64, table);
    let sql = build_update_query(
        &record,
        &json!({"props": {"a": 1}, "settings": {"b": 2}}),
        false,
    )
    .unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{a}', '1')::jsonb,"settings" = jsonb_set("settings"::jsonb, '{b}', '2')::jsonb WHERE id = 1;"#
    );
}

#[test]
fn test_touch_appends_updated_at() {
    let record = RecordHandle::persisted(1i64, friends_with_timestamps());
    let sql = build_update_query(&record, &json!({"props": {"a": 1}}), true).unwrap();
    assert!(sql.starts_with(
        r#"UPDATE "friends" SET "props" = jsonb_set("props"::jsonb, '{a}', '1')::jsonb,"updated_at" = '"#
    ));
    assert!(sql.ends_with("' WHERE id = 1;"));
}

#[test]
fn test_touch_skipped_without_updated_at_column() {
    let record = RecordHandle::persisted(1i64, friends());
    let sql = build_update_query(&record, &json!({"props": {"a": 1}}), true).unwrap();
    assert!(!sql.contains("updated_at"));
}

#[test]
fn test_alias_resolves_to_db_column() {
    let table = friends().alias("properties", "props");
    let record = RecordHandle::persisted(1i64, table);
    let sql = build_update_query(&record, &json!({"properties": {"a": 1}}), false).unwrap();
    assert!(sql.contains(r#""props" = jsonb_set("props"::jsonb"#));
}

#[test]
fn test_uuid_primary_key_is_quoted() {
    let id: uuid::Uuid = "67e55044-10b1-426f-9247-bb680e5fe0c8".parse().unwrap();
    let record = RecordHandle::persisted(id, friends());
    let sql = build_update_query(&record, &json!({"props": {"a": 1}}), false).unwrap();
    assert!(sql.ends_with("WHERE id = '67e55044-10b1-426f-9247-bb680e5fe0c8';"));
}

#[test]
fn test_identical_input_compiles_identically() {
    let record = RecordHandle::persisted(1i64, friends());
    let payload = json!({"props": {"a": {"b": 1}}});
    let first = build_update_query(&record, &payload, false).unwrap();
    let second = build_update_query(&record, &payload, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rejects_non_jsonb_column() {
    let record = RecordHandle::persisted(1i64, friends());
    let err = build_update_query(&record, &json!({"name": {"a": 1}}), false).unwrap_err();
    assert!(matches!(err, JsonbError::InvalidColumnName { .. }));
}

#[test]
fn test_rejects_unknown_column() {
    let record = RecordHandle::persisted(1i64, friends());
    let err = build_update_query(&record, &json!({"invalid_field": {"a": 1}}), false).unwrap_err();
    assert!(matches!(err, JsonbError::InvalidColumnName { .. }));
}

#[test]
fn test_rejects_readonly_column() {
    let table = friends().readonly("audit", "jsonb");
    let record = RecordHandle::persisted(1i64, table);
    let err = build_update_query(&record, &json!({"audit": {"a": 1}}), false).unwrap_err();
    assert!(matches!(err, JsonbError::ReadOnlyAttribute(attr) if attr == "audit"));
}

#[test]
fn test_rejects_new_record() {
    let record = RecordHandle::new_record(friends());
    let err = build_update_query(&record, &json!({"props": {"a": 1}}), false).unwrap_err();
    assert!(matches!(err, JsonbError::RecordNotWritable("new")));
}

#[test]
fn test_rejects_destroyed_record() {
    let record = RecordHandle::destroyed(1i64, friends());
    let err = build_update_query(&record, &json!({"props": {"a": 1}}), false).unwrap_err();
    assert!(matches!(err, JsonbError::RecordNotWritable("destroyed")));
}

#[test]
fn test_rejects_non_object_payload() {
    let record = RecordHandle::persisted(1i64, friends());
    let err = build_update_query(&record, &json!([1, 2]), false).unwrap_err();
    assert!(matches!(err, JsonbError::MalformedPayload(_)));
}

#[test]
fn test_rejects_non_object_column_payload() {
    let record = RecordHandle::persisted(1i64, friends());
    let err = build_update_query(&record, &json!({"props": 5}), false).unwrap_err();
    assert!(matches!(err, JsonbError::MalformedPayload(_)));
}

#[test]
fn test_rejects_empty_column_payload() {
    // An empty entry map would otherwise compile to a no-op assignment.
    let record = RecordHandle::persisted(1i64, friends());
    let err = build_update_query(&record, &json!({"props": {}}), false).unwrap_err();
    assert!(matches!(err, JsonbError::MalformedPayload(_)));
}

#[test]
fn test_validation_precedes_any_sql() {
    // A bad column after a good one still fails the whole call.
    let record = RecordHandle::persisted(1i64, friends());
    let err =
        build_update_query(&record, &json!({"props": {"a": 1}, "name": {"b": 2}}), false)
            .unwrap_err();
    assert!(matches!(err, JsonbError::InvalidColumnName { .. }));
}
