use alloc::string::String;

use quickcheck::{Arbitrary, Gen};

use crate::{Map, PartialValueMode, Value};

/// Text without control characters or line/paragraph separators, so that
/// its rendering escapes nothing but `"` and `\`.
fn printable(g: &mut Gen) -> String {
    String::arbitrary(g)
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '\u{2028}' | '\u{2029}'))
        .collect()
}

fn arbitrary_map(g: &mut Gen, depth: usize) -> Map {
    let len = usize::arbitrary(g) % 5;
    let mut map = Map::new();
    for _ in 0..len {
        let key = printable(g);
        let value = if depth > 0 && bool::arbitrary(g) {
            Value::Object(arbitrary_map(g, depth - 1))
        } else {
            Value::String(printable(g))
        };
        map.insert(key, value);
    }
    map
}

/// Always an object: that is the only shape a parser can produce at its
/// root.
impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        Value::Object(arbitrary_map(g, depth))
    }
}

impl Arbitrary for PartialValueMode {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            PartialValueMode::Prefixes
        } else {
            PartialValueMode::None
        }
    }
}

const FRAGMENTS: &[&str] = &[
    "{", "}", "\"", "\\", ":", ",", " ", "\n", "a", "b", "key", "42", "true", "null", "[", "]",
    "é", "😊",
];

/// Noisy, JSON-looking text: braces, quotes, escapes and scalars in any
/// order.
#[derive(Clone, Debug)]
pub(crate) struct JsonishText(pub(crate) String);

impl Arbitrary for JsonishText {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 64;
        let mut text = String::new();
        for _ in 0..len {
            text.push_str(g.choose(FRAGMENTS).copied().unwrap_or(" "));
        }
        Self(text)
    }
}
