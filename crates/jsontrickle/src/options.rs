/// How string values that are still missing their closing quote show up in
/// snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialValueMode {
    /// After every call, an unterminated value string is stored under its
    /// key holding everything received so far. Later calls extend it until
    /// the closing quote arrives.
    #[default]
    Prefixes,
    /// Value strings appear only once their closing quote has been seen.
    None,
}

/// Configuration options for the incremental object parser.
///
/// # Examples
///
/// ```rust
/// use jsontrickle::{IncrementalObjectParser, ParserOptions, PartialValueMode};
///
/// let mut parser = IncrementalObjectParser::with_options(ParserOptions {
///     partial_values: PartialValueMode::None,
///     ..Default::default()
/// });
/// parser.consume(r#"{"foo": "ba"#);
/// assert_eq!(parser.snapshot().to_string(), "{}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Whether unterminated string values are visible between calls.
    ///
    /// Keys are never exposed before their closing quote, whatever this is
    /// set to.
    ///
    /// # Default
    ///
    /// [`PartialValueMode::Prefixes`]
    pub partial_values: PartialValueMode,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Assert the parser's structural invariants after every call.
    ///
    /// Enabled only in test and fuzzing builds.
    pub check_invariants: bool,
}
