//! The incremental object parser.
//!
//! The parser is a character-at-a-time state machine. Outside of strings only
//! `{`, `}` and `"` mean anything; every other character, separators and
//! scalar literals included, is skipped. Whether a string is a key or a value
//! is decided when its opening quote is seen: it is a key exactly when the
//! current object has no key waiting for a value.
//!
//! # Examples
//!
//! ```rust
//! use jsontrickle::{IncrementalObjectParser, object};
//!
//! let mut parser = IncrementalObjectParser::new();
//! parser.consume(r#"{"a": "b", "c":"#).consume(r#" "d"}"#);
//! assert_eq!(parser.snapshot(), object! { "a" => "b", "c" => "d" });
//! ```
#![allow(clippy::struct_excessive_bools)]

use alloc::string::String;
use core::mem;

use crate::{
    arena::{Arena, ObjectId, Slot},
    frame::{Frame, FrameStack},
    options::{ParserOptions, PartialValueMode},
    utf8::Utf8Carry,
    value::Value,
    view::ObjectRef,
};

/// What a character outside of a string does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    ObjectOpen,
    ObjectClose,
    Quote,
    Ignored,
}

impl Token {
    fn classify(ch: char) -> Self {
        match ch {
            '{' => Token::ObjectOpen,
            '}' => Token::ObjectClose,
            '"' => Token::Quote,
            // `:`, `,`, whitespace, digits and the letters of true/false/null
            _ => Token::Ignored,
        }
    }
}

/// Incremental, best-effort parser for a stream of JSON object text.
///
/// Feed text with [`consume`](Self::consume) in chunks split anywhere, and
/// read the result at any time with [`snapshot`](Self::snapshot). The parser
/// never fails: unknown tokens are skipped, surplus closing braces are
/// ignored and unterminated input simply leaves objects open.
///
/// The result always has a root object, even before the first `{`. A key
/// whose closing quote has not arrived is never visible; a value string
/// still in flight is visible with the characters received so far (see
/// [`PartialValueMode`]).
#[derive(Debug, Clone, Default)]
pub struct IncrementalObjectParser {
    options: ParserOptions,
    arena: Arena,
    frames: FrameStack,
    in_string: bool,
    escape_pending: bool,
    /// The string in flight is a key.
    expecting_colon: bool,
    buffer: String,
    utf8: Utf8Carry,
}

impl IncrementalObjectParser {
    /// Creates a parser with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Creates a parser with the given options.
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            arena: Arena::new(),
            frames: FrameStack::new(),
            in_string: false,
            escape_pending: false,
            expecting_colon: false,
            buffer: String::new(),
            utf8: Utf8Carry::default(),
        }
    }

    /// Feeds the next piece of the input.
    ///
    /// `chunk` may be empty and may end anywhere, including inside a string
    /// or right after a backslash. Returns the parser so calls can be
    /// chained.
    pub fn consume(&mut self, chunk: &str) -> &mut Self {
        for ch in chunk.chars() {
            self.step(ch);
        }
        self.expose_partial_value();
        debug_event!(
            chunk_len = chunk.len(),
            depth = self.frames.depth(),
            in_string = self.in_string,
            "consumed chunk"
        );
        self.after_call();
        self
    }

    /// Feeds the next piece of the input as raw UTF-8 bytes.
    ///
    /// A multi-byte character split across calls is held back until its
    /// remaining bytes arrive. Invalid sequences are read as U+FFFD.
    ///
    /// ```rust
    /// use jsontrickle::{IncrementalObjectParser, object};
    ///
    /// let mut parser = IncrementalObjectParser::new();
    /// parser.consume_bytes(b"{\"k\": \"caf\xC3");
    /// assert_eq!(parser.snapshot(), object! { "k" => "caf" });
    /// parser.consume_bytes(b"\xA9\"}");
    /// assert_eq!(parser.snapshot(), object! { "k" => "caf\u{e9}" });
    /// ```
    pub fn consume_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        let mut utf8 = self.utf8;
        utf8.decode(bytes, |ch| self.step(ch));
        self.utf8 = utf8;
        self.expose_partial_value();
        debug_event!(
            chunk_len = bytes.len(),
            depth = self.frames.depth(),
            in_string = self.in_string,
            "consumed byte chunk"
        );
        self.after_call();
        self
    }

    /// Returns an owned copy of everything parsed so far.
    ///
    /// The copy does not change when more input is consumed; call again to
    /// observe progress. Use [`root`](Self::root) to read in place instead.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        Value::Object(self.arena.materialize(ObjectId::ROOT))
    }

    /// Borrows the live root object without copying it.
    #[must_use]
    pub fn root(&self) -> ObjectRef<'_> {
        ObjectRef::new(&self.arena, ObjectId::ROOT)
    }

    /// Consumes the parser and returns the result parsed so far.
    #[must_use]
    pub fn into_value(mut self) -> Value {
        Value::Object(self.arena.take(ObjectId::ROOT))
    }

    /// Discards all parsed state, keeping the options.
    pub fn reset(&mut self) {
        *self = Self::with_options(self.options);
    }

    /// Number of objects currently open below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    /// Returns `true` while a key or value string is missing its closing
    /// quote.
    #[must_use]
    pub fn is_in_string(&self) -> bool {
        self.in_string
    }

    /// The options this parser was created with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn step(&mut self, ch: char) {
        if self.in_string {
            self.step_in_string(ch);
            return;
        }
        match Token::classify(ch) {
            Token::ObjectOpen => self.open_object(),
            Token::ObjectClose => self.close_object(),
            Token::Quote => self.open_string(),
            Token::Ignored => {}
        }
    }

    fn step_in_string(&mut self, ch: char) {
        match ch {
            _ if self.escape_pending => {
                self.buffer.push(ch);
                self.escape_pending = false;
            }
            '\\' => self.escape_pending = true,
            '"' => self.close_string(),
            _ => self.buffer.push(ch),
        }
    }

    fn open_string(&mut self) {
        self.in_string = true;
        if self.frames.last().pending_key.is_none() && !self.expecting_colon {
            self.expecting_colon = true;
        }
    }

    fn close_string(&mut self) {
        self.in_string = false;
        let text = mem::take(&mut self.buffer);
        let frame = self.frames.last_mut();
        if self.expecting_colon {
            frame.pending_key = Some(text);
            self.expecting_colon = false;
        } else if let Some(key) = frame.pending_key.take() {
            self.arena.assign(frame.object, &key, Slot::Text(text));
        }
    }

    fn open_object(&mut self) {
        let frame = self.frames.last_mut();
        // a `{` with no key waiting (the document's own brace included)
        // has nothing to attach to; the root stands in for it
        let Some(key) = frame.pending_key.take() else {
            return;
        };
        let owner = frame.object;
        let child = self.arena.alloc();
        self.arena.assign(owner, &key, Slot::Object(child));
        self.frames.push(Frame::new(child));
        trace_event!(depth = self.frames.depth(), "opened nested object");
    }

    fn close_object(&mut self) {
        if self.frames.pop().is_some() {
            trace_event!(depth = self.frames.depth(), "closed nested object");
        } else {
            trace_event!("ignored closing brace at the root");
        }
    }

    fn expose_partial_value(&mut self) {
        if !self.in_string
            || self.expecting_colon
            || self.options.partial_values == PartialValueMode::None
        {
            return;
        }
        let frame = self.frames.last();
        if let Some(key) = &frame.pending_key {
            self.arena.assign_text(frame.object, key, &self.buffer);
        }
    }

    #[cfg(any(test, feature = "fuzzing"))]
    fn after_call(&self) {
        if self.options.check_invariants {
            self.assert_invariants();
        }
    }

    #[cfg(not(any(test, feature = "fuzzing")))]
    fn after_call(&self) {}

    #[cfg(any(test, feature = "fuzzing"))]
    fn assert_invariants(&self) {
        assert!(
            !self.expecting_colon || self.in_string,
            "key flag set outside of a string"
        );
        assert!(
            !self.expecting_colon || self.frames.last().pending_key.is_none(),
            "key string in flight while a key is already pending"
        );
        assert!(
            !self.escape_pending || self.in_string,
            "escape pending outside of a string"
        );
        assert!(
            self.in_string || self.buffer.is_empty(),
            "accumulator not cleared after its string closed"
        );

        let mut frames = self.frames.iter();
        let mut parent = frames.next().map(|f| f.object);
        assert_eq!(parent, Some(ObjectId::ROOT), "bottom frame must own the root");
        for frame in frames {
            assert!(self.arena.contains(frame.object), "dangling frame handle");
            let owner = parent.unwrap_or(ObjectId::ROOT);
            let attached = self
                .arena
                .node(owner)
                .entries()
                .iter()
                .any(|(_, slot)| *slot == Slot::Object(frame.object));
            assert!(attached, "open object is not attached to its parent");
            parent = Some(frame.object);
        }
    }
}
