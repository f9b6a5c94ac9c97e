use alloc::{string::String, vec::Vec};

use crate::{IncrementalObjectParser, ParserOptions, PartialValueMode, Value};

/// A parser that asserts its structural invariants after every call.
pub(crate) fn checked_parser() -> IncrementalObjectParser {
    checked_parser_with(PartialValueMode::Prefixes)
}

pub(crate) fn checked_parser_with(partial_values: PartialValueMode) -> IncrementalObjectParser {
    IncrementalObjectParser::with_options(ParserOptions {
        partial_values,
        check_invariants: true,
    })
}

/// Feeds `chunks` in order and returns the final snapshot.
pub(crate) fn parse_chunks<S: AsRef<str>>(chunks: &[S]) -> Value {
    let mut parser = checked_parser();
    for chunk in chunks {
        parser.consume(chunk.as_ref());
    }
    parser.snapshot()
}

/// Split `payload` into approximately equal-sized chunks without
/// breaking UTF-8 code points.
///
/// # Panics
///
/// Panics if `parts` is zero.
pub(crate) fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0);
    let len = payload.len();
    let chunk_size = len.div_ceil(parts);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = core::cmp::min(start + chunk_size, len);
        while end < len && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Cuts `src` at character positions derived from `splits`. Whatever the
/// splits don't cover ends up in one final chunk.
pub(crate) fn split_chars(src: &str, splits: &[usize]) -> Vec<String> {
    let chars: Vec<char> = src.chars().collect();
    let mut chunks = Vec::new();
    let mut idx = 0;
    let mut remaining = chars.len();

    for s in splits {
        if remaining == 0 {
            break;
        }
        let size = 1 + (s % remaining);
        chunks.push(chars[idx..idx + size].iter().collect());
        idx += size;
        remaining -= size;
    }
    if remaining > 0 {
        chunks.push(chars[idx..].iter().collect());
    }
    chunks
}

/// Like [`split_chars`], but cuts raw bytes, so UTF-8 sequences may be
/// split.
pub(crate) fn split_bytes<'a>(src: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = src;
    for s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + (s % rest.len()));
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
