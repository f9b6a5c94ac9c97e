#![allow(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

pub const ORIGINAL: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": "clean"
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": "2",
            "edition": "2024"
        }
    },
    "summary": "prints \"hi\"",
    "trailing": {
        "status": "ok"
    }
}"#;

// A structured tool-call response cut at awkward places: inside values,
// between a quote and its key, after a backslash and between closing braces.
#[rustfmt::skip]
pub const STREAM: [&str; 12] = [
    r#"{"moderation":{"decision":"al"#,                 // value in flight
    r#"lo"#,                                            // value still in flight
    r#"w","reason":"clean"},""#,                        // ends on the opening quote of a key
    r#"request":{"filename":"example.rs""#,             // key completes, nested object opens
    r#","language":"rust","#,
    r#""options":{"opt_level":"2""#,                    // second level of nesting
    r#","edition":"20"#,
    r#"24"}}"#,                                         // closes two objects at once
    r#","summary":"prints \"#,                          // ends right after a backslash
    r#""hi\"""#,                                        // escaped quote completes, then the value
    r#","trailing":{"status":"ok"}"#,
    r#"}"#,                                             // the document's own brace
];

#[test]
fn assert_stream_example() {
    let streamed = STREAM.join("");

    let value: serde_json::Value = serde_json::from_str(ORIGINAL).unwrap();
    let original = serde_json::to_string(&value).unwrap();

    assert_eq!(streamed, original);
}
