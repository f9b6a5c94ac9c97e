//! An incremental, best-effort parser for JSON objects that arrive in pieces.
//!
//! Text is pushed in chunks of any size with
//! [`IncrementalObjectParser::consume`]; between chunks
//! [`IncrementalObjectParser::snapshot`] returns everything parsed so far,
//! including string values whose closing quote has not arrived yet.
//!
//! Only objects and strings are understood. Numbers, booleans, `null` and
//! arrays are skipped without producing an entry, and malformed input never
//! fails: it degrades to whatever could be recovered.
//!
//! ```rust
//! use jsontrickle::{IncrementalObjectParser, object};
//!
//! let mut parser = IncrementalObjectParser::new();
//! parser.consume(r#"{"outer": {"inner": "val"#);
//! assert_eq!(
//!     parser.snapshot(),
//!     object! { "outer" => object! { "inner" => "val" } }
//! );
//!
//! parser.consume(r#"ue"}}"#);
//! assert_eq!(parser.snapshot().to_string(), r#"{"outer":{"inner":"value"}}"#);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod log;

mod arena;
mod error;
mod frame;
mod options;
mod parser;
mod utf8;
mod value;
mod view;

#[cfg(test)]
mod tests;

pub use error::ValueError;
pub use options::{ParserOptions, PartialValueMode};
pub use parser::IncrementalObjectParser;
pub use value::{Map, MapIter, Value};
pub use view::{ObjectRef, ValueRef};

/// Builds a [`Value::Object`] from `key => value` pairs, in order.
///
/// Values go through [`Value::from`], so string literals, `String`s and
/// nested `object!` invocations can be mixed freely.
///
/// ```rust
/// use jsontrickle::{Value, object};
///
/// let v = object! { "a" => "b", "nested" => object! {} };
/// assert_eq!(v.to_string(), r#"{"a":"b","nested":{}}"#);
/// assert!(matches!(object! {}, Value::Object(m) if m.is_empty()));
/// ```
#[macro_export]
macro_rules! object {
    () => {
        $crate::Value::Object($crate::Map::new())
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut map = $crate::Map::new();
        $( map.insert($key, $crate::Value::from($value)); )+
        $crate::Value::Object(map)
    }};
}
