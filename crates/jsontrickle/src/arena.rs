//! Storage for objects that are still being built.
//!
//! Every object the parser creates lives in one [`Arena`] node and is named by
//! an [`ObjectId`]; parents refer to children by id. Frames can therefore
//! point at any open object without borrowing the tree, and the root keeps
//! the same id for the parser's whole lifetime.

use alloc::{string::String, vec, vec::Vec};
use core::mem;

use crate::value::{Entries, Map, Value};

/// Handle to an object node inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ObjectId(usize);

impl ObjectId {
    pub(crate) const ROOT: ObjectId = ObjectId(0);
}

/// What an object entry holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    Text(String),
    Object(ObjectId),
}

/// Entries of one object, in first-insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Node {
    entries: Entries<Slot>,
}

impl Node {
    pub(crate) fn entries(&self) -> &Entries<Slot> {
        &self.entries
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Slot> {
        self.entries.get(key)
    }
}

/// Node store; node 0 is the root.
///
/// Overwriting a key that held an object releases that object and everything
/// below it. Released nodes go on a free list and are handed out again by
/// [`Arena::alloc`], so a stream that keeps replacing the same key reuses the
/// same few nodes.
#[derive(Debug, Clone)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
    free: Vec<ObjectId>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            free: Vec::new(),
        }
    }

    /// Allocates an empty object, reusing a released node when there is one.
    pub(crate) fn alloc(&mut self) -> ObjectId {
        if let Some(id) = self.free.pop() {
            return id;
        }
        self.nodes.push(Node::default());
        ObjectId(self.nodes.len() - 1)
    }

    pub(crate) fn node(&self, id: ObjectId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of node slots, released ones and the root included.
    #[cfg(any(test, feature = "fuzzing"))]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Stores `slot` under `key` in `owner`, replacing any previous entry in
    /// place.
    pub(crate) fn assign(&mut self, owner: ObjectId, key: &str, slot: Slot) {
        let node = &mut self.nodes[owner.0];
        let replaced = match node.entries.get_mut(key) {
            Some(existing) => Some(mem::replace(existing, slot)),
            None => {
                node.entries.insert(key.into(), slot);
                None
            }
        };
        if let Some(Slot::Object(old)) = replaced {
            self.release(old);
        }
    }

    /// Makes `key` in `owner` hold exactly `text`, reusing the existing
    /// string allocation when the entry already holds text.
    pub(crate) fn assign_text(&mut self, owner: ObjectId, key: &str, text: &str) {
        let node = &mut self.nodes[owner.0];
        let replaced = match node.entries.get_mut(key) {
            Some(Slot::Text(existing)) => {
                existing.clear();
                existing.push_str(text);
                None
            }
            Some(other) => Some(mem::replace(other, Slot::Text(text.into()))),
            None => {
                node.entries.insert(key.into(), Slot::Text(text.into()));
                None
            }
        };
        if let Some(Slot::Object(old)) = replaced {
            self.release(old);
        }
    }

    /// Empties `id` and every object below it and puts them on the free list.
    ///
    /// The released objects must not be referenced by any open frame.
    fn release(&mut self, id: ObjectId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let node = &mut self.nodes[id.0];
            pending.extend(node.entries.drain(..).filter_map(|(_, slot)| match slot {
                Slot::Object(child) => Some(child),
                Slot::Text(_) => None,
            }));
            self.free.push(id);
        }
    }

    /// Copies the object `id` and everything reachable from it into an owned
    /// [`Map`].
    pub(crate) fn materialize(&self, id: ObjectId) -> Map {
        self.node(id)
            .entries
            .iter()
            .map(|(k, slot)| (k.as_str(), self.materialize_slot(slot)))
            .collect()
    }

    pub(crate) fn materialize_slot(&self, slot: &Slot) -> Value {
        match slot {
            Slot::Text(s) => Value::String(s.clone()),
            Slot::Object(child) => Value::Object(self.materialize(*child)),
        }
    }

    /// Moves the object `id` and everything reachable from it out of the
    /// arena, leaving those nodes empty.
    pub(crate) fn take(&mut self, id: ObjectId) -> Map {
        let entries = mem::take(&mut self.nodes[id.0].entries);
        entries
            .into_iter()
            .map(|(k, slot)| {
                let value = match slot {
                    Slot::Text(s) => Value::String(s),
                    Slot::Object(child) => Value::Object(self.take(child)),
                };
                (k, value)
            })
            .collect()
    }

    /// `id` names a node that is allocated and not released.
    #[cfg(any(test, feature = "fuzzing"))]
    pub(crate) fn contains(&self, id: ObjectId) -> bool {
        id.0 < self.nodes.len() && !self.free.contains(&id)
    }
}
