use alloc::{format, string::String, vec::Vec};

use rstest::rstest;

use super::utils::{checked_parser, parse_chunks};
use crate::{Value, object};

#[rstest]
#[case::surplus_closing_braces(r#"}}{"a": "b"}}}"#, object! { "a" => "b" })]
#[case::text_around_the_document("```json\n{\"a\": \"b\"}\n```", object! { "a" => "b" })]
#[case::brace_without_key(r#"{{"a": "b"}}"#, object! { "a" => "b" })]
#[case::escaped_quote_in_key(r#"{"a\"b": "c"}"#, object! { "a\"b" => "c" })]
#[case::escape_keeps_next_char(r#"{"k": "c\\d\ne\u0041"}"#, object! { "k" => "c\\dneu0041" })]
#[case::key_without_value(r#"{"x": {"a"}, "b": "c"}"#, object! { "x" => object! {}, "b" => "c" })]
#[case::empty_key_and_value(r#"{"": ""}"#, object! { "" => "" })]
#[case::braces_inside_strings(r#"{"k": "{not} an object"}"#, object! { "k" => "{not} an object" })]
fn tolerated_input(#[case] src: &str, #[case] expected: Value) {
    assert_eq!(parse_chunks(&[src]), expected);
}

// Scalars are skipped without clearing the key, so the next string becomes
// that key's value.
#[rstest]
#[case::numbers_and_literals(
    r#"{"n": 42, "t": true, "z": null, "s": "x"}"#,
    object! { "n" => "t", "z" => "s" },
)]
#[case::arrays(
    r#"{"arr": ["x", "y"], "k": "v"}"#,
    object! { "arr" => "x", "y" => "k" },
)]
fn non_string_values_shift_pairs(#[case] src: &str, #[case] expected: Value) {
    assert_eq!(parse_chunks(&[src]), expected);
}

#[rstest]
#[case::string_value(r#"{"k": "one", "k": "two"}"#, object! { "k" => "two" })]
#[case::object_over_string(
    r#"{"k": "one", "j": "x", "k": {"n": "2"}}"#,
    object! { "k" => object! { "n" => "2" }, "j" => "x" },
)]
#[case::string_over_object(
    r#"{"k": {"n": "2"}, "k": "flat"}"#,
    object! { "k" => "flat" },
)]
fn duplicate_keys_replace_in_place(#[case] src: &str, #[case] expected: Value) {
    assert_eq!(parse_chunks(&[src]), expected);
}

#[test]
fn escape_split_across_chunks() {
    let mut parser = checked_parser();
    parser.consume(r#"{"k": "x\"#);
    assert_eq!(parser.snapshot(), object! { "k" => "x" });
    parser.consume(r#""y"}"#);
    assert_eq!(parser.snapshot(), object! { "k" => "x\"y" });
    assert!(!parser.is_in_string());
}

#[test]
fn trailing_backslash_is_dropped_from_the_partial_value() {
    let mut parser = checked_parser();
    parser.consume(r#"{"k": "ab\"#);
    assert_eq!(parser.snapshot(), object! { "k" => "ab" });
    assert!(parser.is_in_string());
}

#[test]
fn closing_braces_never_drop_below_the_root() {
    let mut parser = checked_parser();
    parser.consume(r#"{"a": {"b": {"#);
    assert_eq!(parser.depth(), 2);
    parser.consume("}}}}}}");
    assert_eq!(parser.depth(), 0);
    parser.consume(r#""c": "d"}"#);
    assert_eq!(
        parser.snapshot(),
        object! { "a" => object! { "b" => object! {} }, "c" => "d" }
    );
}

#[test]
fn deep_nesting() {
    let depth = 64;
    let mut src = String::from("{");
    for i in 0..depth {
        src.push_str(&format!("\"k{i}\": {{"));
    }
    src.push_str(r#""leaf": "v"#);

    let mut parser = checked_parser();
    parser.consume(&src);
    assert_eq!(parser.depth(), depth);

    let path: Vec<String> = (0..depth).map(|i| format!("k{i}")).collect();
    let mut keys: Vec<&str> = path.iter().map(String::as_str).collect();
    keys.push("leaf");
    let snapshot = parser.snapshot();
    assert_eq!(snapshot.pointer(&keys).ok().and_then(Value::as_str), Some("v"));
}
