//! Owned parse results.
//!
//! A parsed document is a tree of [`Map`]s with string leaves, so [`Value`]
//! only has those two shapes. Maps keep keys in the order they were first
//! inserted, which keeps snapshots of a growing document stable.

use alloc::string::String;
use core::fmt::{self, Write as _};

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;

use crate::ValueError;

/// Keyed entries in first-insertion order, with hashed lookup.
pub(crate) type Entries<V> = IndexMap<String, V, DefaultHashBuilder>;

/// A value produced by the parser: either a nested object or a string.
///
/// # Examples
///
/// ```
/// use jsontrickle::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key", Value::from("value"));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// assert_eq!(format!("{v:#}"), "{\n  \"key\": \"value\"\n}");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// An object, possibly still receiving entries.
    Object(Map),
    /// A string, possibly still growing if its closing quote has not arrived.
    String(String),
}

impl Default for Value {
    fn default() -> Self {
        Self::Object(Map::new())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl TryFrom<Value> for String {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            Value::Object(_) => Err(ValueError::ExpectedString),
        }
    }
}

impl TryFrom<Value> for Map {
    type Error = ValueError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(m) => Ok(m),
            Value::String(_) => Err(ValueError::ExpectedObject),
        }
    }
}

impl Value {
    /// Returns `true` if the value is an [`Object`](Value::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns `true` if the value is a [`String`](Value::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Borrows the map of an [`Object`](Value::Object).
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            Self::String(_) => None,
        }
    }

    /// Borrows the text of a [`String`](Value::String).
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Object(_) => None,
        }
    }

    /// Looks up `key` if this value is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }

    /// Follows `path` key by key from this value.
    ///
    /// # Errors
    ///
    /// [`ValueError::ExpectedObject`] when a string sits where the path needs
    /// to descend further, [`ValueError::MissingKey`] when a key has no entry.
    ///
    /// ```
    /// use jsontrickle::{ValueError, object};
    ///
    /// let v = object! { "outer" => object! { "inner" => "value" } };
    /// assert_eq!(v.pointer(&["outer", "inner"])?.as_str(), Some("value"));
    /// assert_eq!(
    ///     v.pointer(&["outer", "missing"]),
    ///     Err(ValueError::MissingKey("missing".into()))
    /// );
    /// # Ok::<(), ValueError>(())
    /// ```
    pub fn pointer(&self, path: &[&str]) -> Result<&Value, ValueError> {
        let mut current = self;
        for key in path {
            let Value::Object(map) = current else {
                return Err(ValueError::ExpectedObject);
            };
            current = map
                .get(key)
                .ok_or_else(|| ValueError::MissingKey((*key).into()))?;
        }
        Ok(current)
    }
}

/// An object's entries in first-insertion order.
///
/// Inserting an existing key replaces its value but keeps its position, the
/// way a streamed document that repeats a key is expected to read back.
#[derive(Clone, Default)]
pub struct Map {
    entries: Entries<Value>,
}

impl Map {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> MapIter<'_> {
        MapIter {
            inner: self.entries.iter(),
        }
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

/// Borrowing iterator over a [`Map`], created by [`Map::iter`].
#[derive(Clone, Debug)]
pub struct MapIter<'a> {
    inner: indexmap::map::Iter<'a, String, Value>,
}

impl<'a> Iterator for MapIter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for MapIter<'_> {}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a str, &'a Value);
    type IntoIter = MapIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Maps are equal when they hold equal entries in the same order.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for Map {}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(m) => f.debug_tuple("Object").field(m).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
        }
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes, control characters (category Cc) and the Unicode line
/// separators are written as escapes; everything else passes through.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            // pre-2019 JSON parsers reject raw line separators
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04X}", c as u32)?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

fn write_quoted<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    f.write_char('"')?;
    write_escaped_string(src, f)?;
    f.write_char('"')
}

fn write_compact<W: fmt::Write>(map: &Map, f: &mut W) -> fmt::Result {
    f.write_char('{')?;
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        write_quoted(k, f)?;
        f.write_char(':')?;
        match v {
            Value::Object(m) => write_compact(m, f)?,
            Value::String(s) => write_quoted(s, f)?,
        }
    }
    f.write_char('}')
}

fn write_pretty<W: fmt::Write>(map: &Map, f: &mut W, depth: usize) -> fmt::Result {
    if map.is_empty() {
        return f.write_str("{}");
    }
    f.write_char('{')?;
    for (i, (k, v)) in map.iter().enumerate() {
        f.write_str(if i > 0 { ",\n" } else { "\n" })?;
        write_indent(f, depth + 1)?;
        write_quoted(k, f)?;
        f.write_str(": ")?;
        match v {
            Value::Object(m) => write_pretty(m, f, depth + 1)?,
            Value::String(s) => write_quoted(s, f)?,
        }
    }
    f.write_char('\n')?;
    write_indent(f, depth)?;
    f.write_char('}')
}

fn write_indent<W: fmt::Write>(f: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

/// Compact JSON; `{:#}` indents by two spaces per level.
impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write_pretty(self, f, 0)
        } else {
            write_compact(self, f)
        }
    }
}

/// Compact JSON; `{:#}` indents by two spaces per level.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(m) => fmt::Display::fmt(m, f),
            Value::String(s) => write_quoted(s, f),
        }
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Object(m) => serde::Serialize::serialize(m, serializer),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Map {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            out.serialize_entry(k, v)?;
        }
        out.end()
    }
}
