use alloc::string::ToString;

use rstest::rstest;

use super::utils::{checked_parser, parse_chunks};
use crate::{Value, object};

#[rstest]
#[case::complete_object(&[r#"{"foo": "bar"}"#], object! { "foo" => "bar" })]
#[case::split_after_colon(&[r#"{"foo":"#, r#""bar"}"#], object! { "foo" => "bar" })]
#[case::value_in_flight(&[r#"{"foo": "bar"#], object! { "foo" => "bar" })]
#[case::nested_object(
    &[r#"{"outer": {"inner": "value"}}"#],
    object! { "outer" => object! { "inner" => "value" } },
)]
#[case::nested_value_in_flight(
    &[r#"{"outer": {"inner": "value"#],
    object! { "outer" => object! { "inner" => "value" } },
)]
#[case::split_before_value(
    &[r#"{"a": "b", "c":"#, r#" "d"}"#],
    object! { "a" => "b", "c" => "d" },
)]
#[case::three_keys_in_two_chunks(
    &[r#"{"key1": "val1", "key2":"#, r#" "val2", "key3": "val3"}"#],
    object! { "key1" => "val1", "key2" => "val2", "key3" => "val3" },
)]
#[case::value_in_flight_after_separator(
    &[r#"{"hello": "world", "test": "val"#],
    object! { "hello" => "world", "test" => "val" },
)]
#[case::key_in_flight(&[r#"{"foo"#], object! {})]
#[case::no_input(&[] as &[&str], object! {})]
fn scenarios(#[case] chunks: &[&str], #[case] expected: Value) {
    assert_eq!(parse_chunks(chunks), expected);
}

#[test]
fn snapshot_after_every_chunk() {
    let mut parser = checked_parser();
    let mut seen = alloc::vec::Vec::new();
    for chunk in [r#"{"title": "Inc"#, r#"remental", "meta": {"#, r#""by": "a"#, r#"b"}}"#] {
        seen.push(parser.consume(chunk).snapshot().to_string());
    }
    assert_eq!(
        seen,
        [
            r#"{"title":"Inc"}"#,
            r#"{"title":"Incremental","meta":{}}"#,
            r#"{"title":"Incremental","meta":{"by":"a"}}"#,
            r#"{"title":"Incremental","meta":{"by":"ab"}}"#,
        ]
    );
}

#[test]
fn snapshot_before_any_input_is_an_empty_object() {
    let parser = checked_parser();
    assert_eq!(parser.snapshot(), Value::default());
    assert!(parser.root().is_empty());
    assert_eq!(parser.depth(), 0);
    assert!(!parser.is_in_string());
}
