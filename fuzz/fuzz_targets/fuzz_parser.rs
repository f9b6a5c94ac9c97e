#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsontrickle::{IncrementalObjectParser, ParserOptions, PartialValueMode};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);

        // split-seed
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        let limit = max_size - prefix;
        prefix += append_whitespace(&mut data[prefix..], limit);
        let limit = max_size - prefix;
        prefix += append_document(&mut data[prefix..], size, limit);
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 1‒N whitespace characters to `buf`, never exceeding `limit`.
/// Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let n = rng.random_range(1..=limit.min(8));
        for b in &mut buf[..n] {
            *b = WS_TABLE[rng.random_range(0..WS_TABLE.len())][0];
        }
        n
    })
}

/// Append a serialized object, truncated to `limit` bytes.
fn append_document(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2 + 1).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        let mut u = arbitrary::Unstructured::new(&bytes);
        if let Ok(map) = arbitrary_object(&mut u) {
            break Value::Object(map);
        }
    };

    let serialized = serde_json::to_vec(&value).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fn arbitrary_object(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Map<String, Value>> {
    let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
    Ok(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// Mostly objects and strings, with the occasional scalar or array that the
/// parser has to step over.
#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(20)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::from(u.arbitrary::<i32>()?),
            3 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            4..=13 => Value::String(u.arbitrary()?),
            14..=19 => Value::Object(arbitrary_object(u)?),
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn only_objects_and_strings(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Object(map) => map.values().all(only_objects_and_strings),
        _ => false,
    }
}

fn parser(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes(data[1..5].try_into().unwrap()));
    let data = &data[HEADER..];

    let options = ParserOptions {
        partial_values: if flags & 1 != 0 {
            PartialValueMode::None
        } else {
            PartialValueMode::Prefixes
        },
        check_invariants: true,
    };

    let mut whole = IncrementalObjectParser::with_options(options);
    whole.consume_bytes(data);

    // The same input cut at random places must end in the same state.
    let mut chunked = IncrementalObjectParser::with_options(options);
    let text = String::from_utf8_lossy(data);
    if flags & 2 != 0 {
        for chunk in split_bytes(data, split_seed) {
            chunked.consume_bytes(chunk);
        }
    } else {
        for chunk in split_into_safe_chunks(&text, split_seed) {
            chunked.consume(chunk);
        }
    }
    assert_eq!(whole.snapshot(), chunked.snapshot());
    assert_eq!(whole.depth(), chunked.depth());
    assert_eq!(whole.is_in_string(), chunked.is_in_string());

    // Escapes are read as the escaped character itself, so only escape-free
    // documents can be compared against a strict parser.
    if text.contains('\\') {
        return;
    }
    if let Ok(expected @ Value::Object(_)) = serde_json::from_str::<Value>(&text) {
        if only_objects_and_strings(&expected) {
            let actual = serde_json::to_value(whole.snapshot()).unwrap();
            assert_eq!(actual, expected, "input: {text:?}");
        }
    }
}

fuzz_target!(|data: &[u8]| parser(data));

/// Split a UTF-8 `&str` into boundary-safe chunks of random size.
///
/// * Each chunk is at least one byte.
/// * Every slice ends on a valid UTF-8 boundary, so it can’t panic.
fn split_into_safe_chunks(serialized: &str, split_seed: u64) -> Vec<&str> {
    let mut rng = SmallRng::seed_from_u64(split_seed);
    let mut chunks = Vec::new();
    let mut start = 0;
    let len = serialized.len();

    while start < len {
        let mut end = start + rng.random_range(1..=(len - start).min(16));

        // Bump `end` forward until it lands on a char boundary
        // (or hits the end of the string, which is always a boundary).
        while end < len && !serialized.is_char_boundary(end) {
            end += 1;
        }

        chunks.push(&serialized[start..end]);
        start = end;
    }

    chunks
}

/// Like [`split_into_safe_chunks`], but free to cut UTF-8 sequences.
fn split_bytes(data: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut rng = SmallRng::seed_from_u64(split_seed);
    let mut chunks = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let (head, tail) = rest.split_at(rng.random_range(1..=rest.len().min(16)));
        chunks.push(head);
        rest = tail;
    }
    chunks
}
