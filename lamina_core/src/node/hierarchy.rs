// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchy enter/exit notifications.
//!
//! A root can be marked *presented*, meaning it is attached to something the
//! platform displays (a window, a host view). Every node whose ultimate
//! ancestor is presented is *in the hierarchy*. Attaching, detaching, and
//! presenting mark the `HIERARCHY` dirty channel for the affected subtree;
//! [`drain_hierarchy_changes`](NodeStore::drain_hierarchy_changes) then turns
//! the accumulated marks into appear/disappear transitions.
//!
//! Transitions of nodes whose suppression counter is non-zero are applied to
//! the node's state but not reported. They are not replayed when the counter
//! returns to zero.

use alloc::vec::Vec;

use understory_dirty::EagerPolicy;

use super::id::NodeId;
use super::store::NodeStore;
use crate::dirty;
use crate::trace::{HierarchyEvent, Tracer};

/// Hierarchy transitions produced by a single
/// [`NodeStore::drain_hierarchy_changes`] call.
#[derive(Clone, Debug, Default)]
pub struct HierarchyChanges {
    /// Nodes that entered a presented hierarchy.
    pub appeared: Vec<NodeId>,
    /// Nodes that left a presented hierarchy.
    pub disappeared: Vec<NodeId>,
    /// Transitions that happened on nodes with notifications suppressed.
    pub suppressed: usize,
}

impl HierarchyChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.appeared.clear();
        self.disappeared.clear();
        self.suppressed = 0;
    }

    /// Returns whether nothing was reported or suppressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.appeared.is_empty() && self.disappeared.is_empty() && self.suppressed == 0
    }
}

impl NodeStore {
    /// Marks or unmarks `id` as the root of a presented hierarchy.
    ///
    /// Only the flag on a root matters; a presented node that is later
    /// attached beneath another node defers to that tree's root.
    pub fn set_presented(&mut self, id: NodeId, presented: bool) {
        self.validate(id);
        if self.presented[id.idx as usize] != presented {
            self.presented[id.idx as usize] = presented;
            self.dirty
                .mark_with(id.idx, dirty::HIERARCHY, &EagerPolicy);
        }
    }

    /// Returns whether `id` is marked as presented.
    #[must_use]
    pub fn is_presented(&self, id: NodeId) -> bool {
        self.validate(id);
        self.presented[id.idx as usize]
    }

    /// Returns whether `id` was in a presented hierarchy as of the last drain.
    #[must_use]
    pub fn in_hierarchy(&self, id: NodeId) -> bool {
        self.validate(id);
        self.in_hierarchy[id.idx as usize]
    }

    /// Recomputes hierarchy membership for every node touched since the last
    /// drain and returns the resulting transitions.
    pub fn drain_hierarchy_changes(&mut self) -> HierarchyChanges {
        let mut changes = HierarchyChanges::default();
        self.drain_hierarchy_changes_into(&mut changes);
        changes
    }

    /// Like [`drain_hierarchy_changes`](Self::drain_hierarchy_changes), and
    /// reports the counts to `tracer`.
    pub fn drain_hierarchy_changes_traced(
        &mut self,
        tracer: &mut Tracer<'_>,
    ) -> HierarchyChanges {
        let changes = self.drain_hierarchy_changes();
        tracer.hierarchy(&HierarchyEvent::from(&changes));
        changes
    }

    /// Like [`drain_hierarchy_changes`](Self::drain_hierarchy_changes), but
    /// reuses a caller-provided buffer to avoid allocation.
    pub fn drain_hierarchy_changes_into(&mut self, changes: &mut HierarchyChanges) {
        changes.clear();

        let dirty_nodes: Vec<u32> = self
            .dirty
            .drain(dirty::HIERARCHY)
            .affected()
            .deterministic()
            .run()
            .collect();

        for idx in dirty_nodes {
            if self.free_list.contains(&idx) {
                continue;
            }
            let root = self.links.root_of(idx);
            let now = self.presented[root as usize];
            if self.in_hierarchy[idx as usize] == now {
                continue;
            }
            self.in_hierarchy[idx as usize] = now;

            if self.suppression[idx as usize] > 0 {
                changes.suppressed += 1;
            } else if now {
                changes.appeared.push(self.id_at(idx));
            } else {
                changes.disappeared.push(self.id_at(idx));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;

    #[test]
    fn presenting_a_root_reports_whole_tree() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::NODE);
        let a = store.create_node(NodeKind::NODE);
        let b = store.create_node(NodeKind::NODE);
        store.add_child(root, a);
        store.add_child(a, b);
        let _ = store.drain_hierarchy_changes();

        store.set_presented(root, true);
        let changes = store.drain_hierarchy_changes();
        assert_eq!(changes.appeared.len(), 3);
        for n in [root, a, b] {
            assert!(changes.appeared.contains(&n), "{n:?} should appear");
            assert!(store.in_hierarchy(n));
        }
        assert!(changes.disappeared.is_empty());
    }

    #[test]
    fn detaching_reports_disappear_for_subtree_only() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::NODE);
        let a = store.create_node(NodeKind::NODE);
        let b = store.create_node(NodeKind::NODE);
        let c = store.create_node(NodeKind::NODE);
        store.add_child(root, a);
        store.add_child(a, b);
        store.add_child(root, c);
        store.set_presented(root, true);
        let _ = store.drain_hierarchy_changes();

        store.remove_from_parent(a);
        let changes = store.drain_hierarchy_changes();
        assert_eq!(changes.disappeared.len(), 2);
        assert!(changes.disappeared.contains(&a));
        assert!(changes.disappeared.contains(&b));
        assert!(changes.appeared.is_empty());
        assert!(store.in_hierarchy(c));
    }

    #[test]
    fn attaching_under_presented_root_reports_appear() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::NODE);
        store.set_presented(root, true);
        let _ = store.drain_hierarchy_changes();

        let a = store.create_node(NodeKind::NODE);
        store.add_child(root, a);
        let changes = store.drain_hierarchy_changes();
        assert_eq!(changes.appeared, alloc::vec![a]);
    }

    #[test]
    fn suppressed_nodes_update_silently() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::NODE);
        let a = store.create_node(NodeKind::NODE);
        store.add_child(root, a);
        store.suppression[a.idx as usize] = 1;

        store.set_presented(root, true);
        let changes = store.drain_hierarchy_changes();
        assert_eq!(changes.appeared, alloc::vec![root]);
        assert_eq!(changes.suppressed, 1);
        assert!(store.in_hierarchy(a));

        // Re-enabling does not replay the swallowed transition.
        store.suppression[a.idx as usize] = 0;
        assert!(store.drain_hierarchy_changes().is_empty());
    }

    #[test]
    fn move_between_presented_trees_is_quiet() {
        let mut store = NodeStore::new();
        let r1 = store.create_node(NodeKind::NODE);
        let r2 = store.create_node(NodeKind::NODE);
        let a = store.create_node(NodeKind::NODE);
        store.add_child(r1, a);
        store.set_presented(r1, true);
        store.set_presented(r2, true);
        let _ = store.drain_hierarchy_changes();

        store.reparent(a, r2);
        assert!(store.drain_hierarchy_changes().is_empty());
        assert!(store.in_hierarchy(a));
    }

    #[test]
    fn destroyed_nodes_report_nothing() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::NODE);
        let a = store.create_node(NodeKind::NODE);
        store.add_child(root, a);
        store.set_presented(root, true);
        let _ = store.drain_hierarchy_changes();

        store.remove_from_parent(a);
        store.destroy_node(a);
        assert!(store.drain_hierarchy_changes().is_empty());
    }

    #[test]
    fn traced_drain_returns_changes() {
        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::NODE);
        store.set_presented(root, true);
        let mut tracer = Tracer::none();
        let changes = store.drain_hierarchy_changes_traced(&mut tracer);
        assert_eq!(changes.appeared, alloc::vec![root]);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn traced_drain_reports_counts() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Last(HierarchyEvent);
        impl TraceSink for Last {
            fn on_hierarchy(&mut self, e: &HierarchyEvent) {
                self.0 = *e;
            }
        }

        let mut store = NodeStore::new();
        let root = store.create_node(NodeKind::NODE);
        let a = store.create_node(NodeKind::NODE);
        store.add_child(root, a);
        store.suppression[a.idx as usize] = 1;
        store.set_presented(root, true);

        let mut sink = Last::default();
        let mut tracer = Tracer::new(&mut sink);
        let _ = store.drain_hierarchy_changes_traced(&mut tracer);
        drop(tracer);
        assert_eq!(sink.0.appeared, 1);
        assert_eq!(sink.0.suppressed, 1);
    }
}
