//! Borrowed views of a parser's live result.
//!
//! [`IncrementalObjectParser::root`](crate::IncrementalObjectParser::root)
//! hands out an [`ObjectRef`] that reads the parser's storage in place. The
//! borrow ends before the next `consume`, so a view never changes under its
//! reader.

use core::fmt;

use crate::{
    arena::{Arena, Node, ObjectId, Slot},
    value::{Map, Value},
};

/// A borrowed object inside a parser's result.
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    arena: &'a Arena,
    id: ObjectId,
}

/// A borrowed entry value: a nested object or a string.
#[derive(Clone, Copy, Debug)]
pub enum ValueRef<'a> {
    /// A nested object.
    Object(ObjectRef<'a>),
    /// A string, possibly still growing.
    String(&'a str),
}

impl<'a> ObjectRef<'a> {
    pub(crate) fn new(arena: &'a Arena, id: ObjectId) -> Self {
        Self { arena, id }
    }

    fn node(&self) -> &'a Node {
        self.arena.node(self.id)
    }

    /// Looks up `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ValueRef<'a>> {
        self.node()
            .get(key)
            .map(|slot| ValueRef::from_slot(self.arena, slot))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.node().entries().len()
    }

    /// Returns `true` if the object has no entries yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node().entries().is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, ValueRef<'a>)> + use<'a> {
        let arena = self.arena;
        self.node()
            .entries()
            .iter()
            .map(move |(k, slot)| (k.as_str(), ValueRef::from_slot(arena, slot)))
    }

    /// Copies this object into an owned [`Map`].
    #[must_use]
    pub fn to_map(&self) -> Map {
        self.arena.materialize(self.id)
    }
}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> ValueRef<'a> {
    fn from_slot(arena: &'a Arena, slot: &'a Slot) -> Self {
        match slot {
            Slot::Text(s) => ValueRef::String(s),
            Slot::Object(id) => ValueRef::Object(ObjectRef::new(arena, *id)),
        }
    }

    /// The text, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            ValueRef::String(s) => Some(*s),
            ValueRef::Object(_) => None,
        }
    }

    /// The object, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<ObjectRef<'a>> {
        match self {
            ValueRef::Object(o) => Some(*o),
            ValueRef::String(_) => None,
        }
    }

    /// Copies this value into an owned [`Value`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            ValueRef::Object(o) => Value::Object(o.to_map()),
            ValueRef::String(s) => Value::String((*s).into()),
        }
    }
}
