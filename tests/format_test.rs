//! Integration tests for message formatting across format modes.

use std::collections::BTreeMap;

use rstest::rstest;
use serde::Serialize;
use serde_json::{json, Value};

use cprintf::util::testing::{self, strip_ansi};
use cprintf::{colored_string, Color, FormatMode, Message, Options};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[derive(Debug, Serialize)]
struct Job {
    name: String,
    retries: u32,
    tags: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct Account {
    zone: &'static str,
    id: u32,
    members: Vec<&'static str>,
}

#[rstest]
#[case(json!(null))]
#[case(json!(true))]
#[case(json!(-17))]
#[case(json!(2.5))]
#[case(json!("plain"))]
#[case(json!([]))]
#[case(json!({}))]
#[case(json!({"name": "Grüße", "nested": {"list": [1, "two", false, null, {"deep": 3.25}]}}))]
#[case(json!([[1, 2], {"a": []}, "日本語"]))]
fn given_structured_value_when_json_mode_then_parses_back_equal(#[case] value: Value) {
    let colored = colored_string(&value, Color::Info, &Options::new().format(FormatMode::Json));

    let parsed: Value = serde_json::from_str(&strip_ansi(&colored)).expect("valid json");

    assert_eq!(parsed, value);
}

#[test]
fn given_struct_when_auto_then_indented_json_in_field_order() {
    let job = Job {
        name: "backup".into(),
        retries: 3,
        tags: vec!["nightly"],
    };

    let text = Message::data(&job).render(FormatMode::Auto);

    assert_eq!(
        text,
        "{\n    \"name\": \"backup\",\n    \"retries\": 3,\n    \"tags\": [\n        \"nightly\"\n    ]\n}"
    );
}

#[test]
fn given_struct_with_unsorted_fields_when_auto_then_declaration_order_kept() {
    let account = Account {
        zone: "eu",
        id: 7,
        members: vec![],
    };

    let text = Message::data(&account).render(FormatMode::Auto);

    assert_eq!(text, "{\n    \"zone\": \"eu\",\n    \"id\": 7,\n    \"members\": []\n}");
}

#[test]
fn given_json_text_with_unsorted_keys_when_auto_then_key_order_kept() {
    let text = Message::from(r#"{"b": 1, "a": {"z": 2, "y": 3}}"#).render(FormatMode::Auto);

    assert_eq!(
        text,
        "{\n    \"b\": 1,\n    \"a\": {\n        \"z\": 2,\n        \"y\": 3\n    }\n}"
    );
}

#[test]
fn given_non_ascii_json_text_when_auto_then_unescaped() {
    let text = Message::from(r#"{"k":"日本","é":["ß"]}"#).render(FormatMode::Auto);

    assert_eq!(text, "{\n    \"k\": \"日本\",\n    \"é\": [\n        \"ß\"\n    ]\n}");
    assert!(!text.contains("\\u"));
}

#[test]
fn given_struct_when_pretty_then_debug_dump() {
    let job = Job {
        name: "backup".into(),
        retries: 3,
        tags: vec![],
    };

    let text = Message::data(&job).render(FormatMode::Pretty);

    assert_eq!(text, format!("{job:#?}"));
}

#[test]
fn given_struct_when_raw_then_single_line_debug() {
    let job = Job {
        name: "x".into(),
        retries: 0,
        tags: vec![],
    };

    assert_eq!(
        Message::data(&job).render(FormatMode::Raw),
        r#"Job { name: "x", retries: 0, tags: [] }"#
    );
}

#[rstest]
#[case("not json at all", "not json at all")]
#[case("{broken", "{broken")]
#[case("", "")]
#[case("[1,2]", "[\n    1,\n    2\n]")]
#[case("  42 ", "42")]
#[case("\"quoted\"", "\"quoted\"")]
#[case("12345678901234567890123", "12345678901234567890123")]
#[case("[-98765432109876543210, 0.10000000000000000001]", "[\n    -98765432109876543210,\n    0.10000000000000000001\n]")]
fn given_text_when_auto_then_json_reindented_or_unchanged(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(Message::from(input).render(FormatMode::Auto), expected);
}

#[test]
fn given_text_via_data_constructor_when_auto_then_treated_as_text() {
    let owned = String::from("{\"k\": 1}");
    assert!(Message::data(&owned).is_text());
    assert_eq!(
        Message::data(&owned).render(FormatMode::Auto),
        "{\n    \"k\": 1\n}"
    );
}

#[test]
fn given_unserializable_map_when_json_mode_then_falls_back_without_error() {
    let mut map: BTreeMap<Vec<u8>, &str> = BTreeMap::new();
    map.insert(vec![1, 2], "bytes");

    let text = Message::data(&map).render(FormatMode::Json);

    assert_eq!(text, format!("{map:#?}"));
}

#[test]
fn given_opaque_value_when_json_mode_then_debug_dump() {
    let value = std::time::Duration::from_millis(1500);

    assert_eq!(Message::opaque(&value).render(FormatMode::Json), "1.5s");
}
