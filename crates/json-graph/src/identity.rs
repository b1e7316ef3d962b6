//! Per-call identity bookkeeping.

use std::collections::HashMap;

use crate::error::DeserializationError;
use crate::graph::ObjRef;

/// Outcome of [`IdentityTracker::assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First visit; the object now owns this index.
    First(usize),
    /// Visited before at this index.
    Seen(usize),
}

/// Maps object handles to visitation indices and back. One tracker lives
/// for exactly one top-level encode or decode call.
#[derive(Debug, Default)]
pub struct IdentityTracker {
    indices: HashMap<ObjRef, usize>,
    objects: Vec<ObjRef>,
}

impl IdentityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, object: ObjRef) -> Visit {
        if let Some(&index) = self.indices.get(&object) {
            return Visit::Seen(index);
        }
        Visit::First(self.register(object))
    }

    /// Record a freshly allocated object at the next index.
    pub fn register(&mut self, object: ObjRef) -> usize {
        let index = self.objects.len();
        self.objects.push(object);
        self.indices.insert(object, index);
        index
    }

    pub fn lookup(&self, index: usize) -> Result<ObjRef, DeserializationError> {
        self.objects
            .get(index)
            .copied()
            .ok_or(DeserializationError::DanglingReference(index))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
