//! End-to-end tests for configuration, path compilation and record filtering

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use typecast_core::{
    Error, PathSpec, Record, TargetType, TypecastConfig, TypecastFilter, ValueKind,
};

fn filter_from(config: Value) -> TypecastFilter {
    let config: TypecastConfig = serde_json::from_value(config).expect("valid config");
    TypecastFilter::new(&config).expect("filter builds")
}

fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record must be an object")
}

/// The visitor driven directly, with a whole document as root
fn cast_document(columns: Value, doc: Value) -> typecast_core::Result<Value> {
    let filter = filter_from(json!({ "columns": columns }));
    filter.visitor().visit_document(doc)
}

#[test]
fn test_user_age_becomes_integer() {
    let out = cast_document(
        json!([{"name": "$.user.age", "type": "long"}]),
        json!({"user": {"age": "42", "name": "Ann"}}),
    )
    .unwrap();
    assert_eq!(out, json!({"user": {"age": 42, "name": "Ann"}}));
}

#[test]
fn test_wildcard_tags_become_strings() {
    let out = cast_document(
        json!([{"name": "$.tags[*]", "type": "string"}]),
        json!({"tags": [1, 2, 3]}),
    )
    .unwrap();
    assert_eq!(out, json!({"tags": ["1", "2", "3"]}));
}

#[test]
fn test_index_specific_price_only() {
    let out = cast_document(
        json!([{"name": "$.items[0].price", "type": "double"}]),
        json!({"items": [{"price": "9.99"}, {"price": "10.00"}]}),
    )
    .unwrap();
    assert_eq!(out, json!({"items": [{"price": 9.99}, {"price": "10.00"}]}));
    assert_eq!(ValueKind::of(&out["items"][0]["price"]), ValueKind::Float);
}

#[test]
fn test_exact_over_wildcard_precedence() {
    let out = cast_document(
        json!([
            {"name": "$.a[*]", "type": "string"},
            {"name": "$.a[1]", "type": "boolean"}
        ]),
        json!({"a": [0, 1, 2]}),
    )
    .unwrap();
    assert_eq!(out, json!({"a": ["0", true, "2"]}));
}

#[test]
fn test_duplicate_declaration_last_wins() {
    let out = cast_document(
        json!([
            {"name": "$.n", "type": "string"},
            {"name": "$.n", "type": "double"}
        ]),
        json!({"n": 3}),
    )
    .unwrap();
    assert_eq!(out, json!({"n": 3.0}));
}

#[test]
fn test_json_column_in_record() {
    let filter = filter_from(json!({
        "columns": [
            {"name": "id", "type": "long"},
            {"name": "$.payload.created", "type": "timestamp"},
            {"name": "$.payload.flags[*]", "type": "boolean"}
        ],
        "default_timestamp_format": "%Y-%m-%dT%H:%M:%S%:z",
        "default_timezone": "+09:00"
    }));

    let out = filter
        .filter(record(json!({
            "id": 12.0,
            "payload": {"created": 0, "flags": ["yes", "off", 1]},
            "raw": {"created": 0}
        })))
        .unwrap();

    assert_eq!(
        Value::Object(out),
        json!({
            "id": 12,
            "payload": {"created": "1970-01-01T09:00:00+09:00", "flags": [true, false, true]},
            "raw": {"created": 0}
        })
    );
}

#[test]
fn test_lenient_and_strict_invalid_records() {
    let columns = json!([{"name": "$.payload.n", "type": "long"}]);
    let input = json!({"payload": {"n": "NaN-ish"}, "keep": 1});

    let lenient = filter_from(json!({"columns": columns}));
    let outcome = lenient.filter_with_outcome(record(input.clone())).unwrap();
    assert_eq!(Value::Object(outcome.record), json!({"payload": null, "keep": 1}));
    assert_eq!(outcome.invalid_columns, vec!["payload"]);

    let strict = filter_from(json!({"columns": columns, "stop_on_invalid_record": true}));
    let err = strict.filter(record(input)).unwrap_err();
    assert!(err.is_conversion());
    assert_eq!(err.path(), Some("$.payload.n"));
    assert!(matches!(err, Error::InvalidRecord { ref column, .. } if column == "payload"));
}

#[test]
fn test_compiled_spec_is_inspectable() {
    let spec = PathSpec::compile([
        ("$.a.b[0].c", TargetType::Long),
        ("$.a.d[*]", TargetType::String),
        ("plain", TargetType::Double),
    ]);
    assert_eq!(
        spec.prefixes(),
        vec!["$.a", "$.a.b", "$.a.b[0]", "$.a.b[0].c", "$.a.d", "$.a.d[*]"]
    );
    assert_eq!(
        spec.patterns(),
        vec![("$.a.b[0].c", TargetType::Long), ("$.a.d[*]", TargetType::String)]
    );
}
