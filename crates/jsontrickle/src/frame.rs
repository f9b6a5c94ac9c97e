use alloc::{string::String, vec::Vec};

use crate::arena::ObjectId;

/// Stack entry, one per open object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    /// Object that receives the next value.
    pub(crate) object: ObjectId,
    /// Key waiting for its value.
    pub(crate) pending_key: Option<String>,
}

impl Frame {
    pub(crate) fn new(object: ObjectId) -> Self {
        Self {
            object,
            pending_key: None,
        }
    }
}

/// Stack of open objects whose bottom frame (the root) can never be popped.
#[derive(Clone, Debug)]
pub(crate) struct FrameStack {
    root: Frame,
    stack: Vec<Frame>,
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStack {
    pub(crate) fn new() -> Self {
        Self {
            root: Frame::new(ObjectId::ROOT),
            stack: Vec::with_capacity(16),
        }
    }

    pub(crate) fn last(&self) -> &Frame {
        self.stack.last().unwrap_or(&self.root)
    }

    pub(crate) fn last_mut(&mut self) -> &mut Frame {
        self.stack.last_mut().unwrap_or(&mut self.root)
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.stack.push(frame);
    }

    /// Pops the top frame, unless only the root is left.
    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.stack.pop()
    }

    /// Number of open objects above the root.
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Frame {
        &self.root
    }

    #[cfg(any(test, feature = "fuzzing"))]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Frame> {
        core::iter::once(&self.root).chain(self.stack.iter())
    }
}
