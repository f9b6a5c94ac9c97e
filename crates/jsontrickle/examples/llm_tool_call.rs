//! Demonstrates how to react **immediately** to content-moderation feedback
//! while incrementally streaming a tool-call response from an LLM.
//!
//! The assistant was given a tool whose arguments are a JSON object like
//! this (abridged):
//!
//! ```text
//! {
//!   "moderation": {
//!     "decision": "allow" | "block",
//!     "reason":   string
//!   },
//!   "filename":   string,
//!   "language":   string,
//!   "summary":    string
//! }
//! ```
//!
//! The document arrives in small, irregular chunks, the way `chat.completions`
//! style APIs deliver partial tokens. After every chunk we take a snapshot:
//!
//! 1. As soon as `moderation.decision` starts with `"block"` we abort, before
//!    the rest of the response has arrived.
//! 2. The `summary` string is printed as it grows, so a user interface could
//!    render it character by character.
//!
//! Run with
//!
//! ```bash
//! cargo run -p jsontrickle --example llm_tool_call
//! ```

#![allow(clippy::needless_raw_string_hashes)]
#![allow(clippy::doc_markdown)]

use jsontrickle::{IncrementalObjectParser, Value};

fn main() {
    // The `moderation` object comes first so that a decision can be made
    // before the rest of the payload arrives. In real life this would come
    // from the network.
    let simulated_stream: [&str; 9] = [
        // 0 – start of object, moderation key
        r#"{"moderation":{"decision":"al"#,
        // 1 – continue decision
        r#"lo"#,
        // 2 – finish decision & reason
        r#"w","reason":"none"},"#,
        // 3 – filename key/value
        r#""filename":"example.rs","#,
        // 4 – language key/value
        r#""language":"rust","#,
        // 5 – summary key and the start of its value
        r#""summary":"Prints a greet"#,
        // 6 – more summary
        r#"ing and exits. Uses only"#,
        // 7 – close the summary string
        r#" the standard library.""#,
        // 8 – close the object
        r#"}"#,
    ];

    let mut parser = IncrementalObjectParser::new();
    let mut decision_announced = false;
    let mut summary_printed = 0;

    // One rendered snapshot per chunk so that `cargo insta` can show
    // meaningful diffs whenever the parser's behaviour changes.
    let mut reference_value = String::from("\n");

    for chunk in simulated_stream {
        let snapshot = parser.consume(chunk).snapshot();
        reference_value.push_str(&snapshot.to_string());
        reference_value.push('\n');

        // -------------------------------- moderation --------------------------------
        let moderation = snapshot.get("moderation");
        if let Some(decision) = moderation.and_then(|m| m.get("decision")).and_then(Value::as_str) {
            if decision.starts_with("block") {
                eprintln!("🚨  Moderation blocked the content – aborting");
                return;
            }
            // the decision string is complete once a later key shows up
            let complete = moderation.is_some_and(|m| m.get("reason").is_some());
            if complete && !decision_announced {
                println!("✅  Moderation decision: {decision}");
                decision_announced = true;
            }
        }

        // ---------------------------------- summary ---------------------------------
        if let Some(summary) = snapshot.get("summary").and_then(Value::as_str) {
            // only write what is new since the last chunk
            print!("{}", &summary[summary_printed..]);
            summary_printed = summary.len();
        }
    }
    println!();

    if parser.is_in_string() {
        // The stream ended before a string was closed; handle however is
        // appropriate for your app.
        eprintln!("⚠️  Stream ended inside a string");
    }

    // Finally, verify that the produced snapshots stay stable. Run
    // `cargo insta review` after the first execution to approve the snapshot.
    #[cfg(not(miri))]
    insta::assert_snapshot!(reference_value, @r#"
    {"moderation":{"decision":"al"}}
    {"moderation":{"decision":"allo"}}
    {"moderation":{"decision":"allow","reason":"none"}}
    {"moderation":{"decision":"allow","reason":"none"},"filename":"example.rs"}
    {"moderation":{"decision":"allow","reason":"none"},"filename":"example.rs","language":"rust"}
    {"moderation":{"decision":"allow","reason":"none"},"filename":"example.rs","language":"rust","summary":"Prints a greet"}
    {"moderation":{"decision":"allow","reason":"none"},"filename":"example.rs","language":"rust","summary":"Prints a greeting and exits. Uses only"}
    {"moderation":{"decision":"allow","reason":"none"},"filename":"example.rs","language":"rust","summary":"Prints a greeting and exits. Uses only the standard library."}
    {"moderation":{"decision":"allow","reason":"none"},"filename":"example.rs","language":"rust","summary":"Prints a greeting and exits. Uses only the standard library."}
    "#);
}
