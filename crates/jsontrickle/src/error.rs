use alloc::string::String;

use thiserror::Error;

/// Failure to read a [`Value`](crate::Value) as a particular shape.
///
/// Parsing itself never fails; this only surfaces when a caller asks for a
/// string where an object sits (or the reverse), or follows a path through a
/// key that has not been parsed yet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A string was found where an object was required.
    #[error("expected an object, found a string")]
    ExpectedObject,
    /// An object was found where a string was required.
    #[error("expected a string, found an object")]
    ExpectedString,
    /// The object has no entry under this key.
    #[error("no entry for key {0:?}")]
    MissingKey(String),
}
