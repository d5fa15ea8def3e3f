//! Item lifecycle: stable per-item handles that survive re-renders.
//!
//! The rendering layer keys each item's node by the handle issued here, so a
//! node keeps its identity across updates for as long as its item id is in
//! the list. Handles are issued lazily on first sight of an id and dropped as
//! soon as the id disappears; a dropped handle value is never reissued.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::doc::{ItemId, PlacedItem};

/// Opaque identity token for one item's rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pb-node-{}", self.0)
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub added: Vec<ItemId>,
    pub removed: Vec<ItemId>,
}

impl Reconciled {
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Id → handle registry.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    handles: HashMap<ItemId, NodeHandle>,
    next: u64,
}

impl HandleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the registry in line with `items`: issue handles for new ids and
    /// drop handles for ids no longer present.
    pub fn reconcile(&mut self, items: &[PlacedItem]) -> Reconciled {
        let current: HashSet<ItemId> = items.iter().map(|i| i.id).collect();

        let mut removed: Vec<ItemId> = self.handles.keys().filter(|id| !current.contains(id)).copied().collect();
        removed.sort_unstable();
        for id in &removed {
            self.handles.remove(id);
        }

        let mut added = Vec::new();
        for item in items {
            if !self.handles.contains_key(&item.id) {
                self.issue(item.id);
                added.push(item.id);
            }
        }

        Reconciled { added, removed }
    }

    /// Handle for `id`, issuing one if the id has not been seen yet.
    pub fn handle_for(&mut self, id: ItemId) -> NodeHandle {
        match self.handles.get(&id) {
            Some(h) => *h,
            None => self.issue(id),
        }
    }

    /// Handle for `id` without issuing.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<NodeHandle> {
        self.handles.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.handles.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    fn issue(&mut self, id: ItemId) -> NodeHandle {
        let handle = NodeHandle(self.next);
        self.next += 1;
        self.handles.insert(id, handle);
        handle
    }
}
