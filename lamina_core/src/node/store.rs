// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::Affine;
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{NodeId, SurfaceId};
use super::traverse::Children;
use crate::dirty;
use crate::kind::{KindTable, NodeKind};
use crate::links::Links;

/// Per-node boolean flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeFlags {
    /// Whether the node draws its entire subtree into its own surface.
    ///
    /// Descendants of such a node never get surfaces of their own, so
    /// traversals below it follow node links instead of the surface tree.
    pub rasterize_descendants: bool,
}

/// Struct-of-arrays storage for all nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct NodeStore {
    // -- Topology --
    pub(crate) links: Links,

    // -- Identity and local properties --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) flags: Vec<NodeFlags>,
    pub(crate) local_transform: Vec<Affine>,

    // -- Surface binding (validated against the surface store by `Scene`) --
    pub(crate) surface: Vec<Option<SurfaceId>>,

    // -- Hierarchy notifications --
    pub(crate) suppression: Vec<u32>,
    pub(crate) presented: Vec<bool>,
    pub(crate) in_hierarchy: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    pub(crate) kinds: KindTable,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates an empty node store whose kind table holds only
    /// [`NodeKind::NODE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            links: Links::default(),
            kind: Vec::new(),
            flags: Vec::new(),
            local_transform: Vec::new(),
            surface: Vec::new(),
            suppression: Vec::new(),
            presented: Vec::new(),
            in_hierarchy: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            kinds: KindTable::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Kinds --

    /// Returns the kind table used for kind-based searches.
    #[must_use]
    pub fn kinds(&self) -> &KindTable {
        &self.kinds
    }

    /// Registers a new node kind as a subkind of `supertag`.
    pub fn register_kind(&mut self, name: &'static str, supertag: NodeKind) -> NodeKind {
        self.kinds.register(name, supertag)
    }

    // -- Allocation API --

    /// Creates a new detached node of the given kind and returns its handle.
    ///
    /// The node starts with no surface, no parent, default flags, an identity
    /// transform, and notifications enabled.
    ///
    /// # Panics
    ///
    /// Panics if `kind` was not registered with this store.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        assert!(
            kind.index() < self.kinds.len(),
            "unknown {kind:?} (table has {} kinds)",
            self.kinds.len()
        );
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.links.reset(idx);
            self.kind[idx as usize] = kind;
            self.flags[idx as usize] = NodeFlags::default();
            self.local_transform[idx as usize] = Affine::IDENTITY;
            self.surface[idx as usize] = None;
            self.suppression[idx as usize] = 0;
            self.presented[idx as usize] = false;
            self.in_hierarchy[idx as usize] = false;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.links.push_detached();
            self.kind.push(kind);
            self.flags.push(NodeFlags::default());
            self.local_transform.push(Affine::IDENTITY);
            self.surface.push(None);
            self.suppression.push(0);
            self.presented.push(false);
            self.in_hierarchy.push(false);
            self.generation.push(0);
            idx
        };

        self.id_at(idx)
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// The node is detached from its parent first. Any surface it vended
    /// stays in the platform tree but is no longer registered to a node.
    /// Destroyed nodes produce no hierarchy notifications.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            !self.links.has_children(idx),
            "cannot destroy node with children"
        );

        if let Some(p) = self.links.parent_of(idx) {
            self.links.unlink(idx);
            self.dirty.remove_dependency(idx, p, dirty::HIERARCHY);
        }

        self.dirty.remove_key(idx);
        self.surface[idx as usize] = None;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// Marks `child`'s subtree for hierarchy recomputation.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, or
    /// if `parent` is `child` or one of its descendants.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.links.parent_of(c).is_none(),
            "child already has a parent"
        );
        self.assert_acyclic(p, c);

        self.links.append_child(p, c);
        self.link_dirty(c, p);
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// `child` must not already have a parent. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or the insertion would create a cycle.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.links.parent_of(c).is_none(),
            "child already has a parent"
        );
        let Some(p) = self.links.parent_of(s) else {
            panic!("sibling has no parent");
        };
        self.assert_acyclic(p, c);

        self.links.insert_before(c, s);
        self.link_dirty(c, p);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.links.parent_of(c).is_some(), "node has no parent");

        let p = self.links.unlink(c);
        self.dirty.remove_dependency(c, p, dirty::HIERARCHY);
        self.dirty.mark_with(c, dirty::HIERARCHY, &EagerPolicy);
    }

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or if `new_parent` is `child` or one
    /// of its descendants.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) {
        self.validate(child);
        self.validate(new_parent);
        let c = child.idx;
        let p = new_parent.idx;
        self.assert_acyclic(p, c);

        if self.links.parent_of(c).is_some() {
            let old_p = self.links.unlink(c);
            self.dirty.remove_dependency(c, old_p, dirty::HIERARCHY);
        }

        self.links.append_child(p, c);
        self.link_dirty(c, p);
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.links.parent_of(id.idx).map(|p| self.id_at(p))
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, id.idx)
    }

    /// Returns the live nodes that have no parent, in slot order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.len)
            .filter(|&idx| {
                self.links.parent_of(idx).is_none() && !self.free_list.contains(&idx)
            })
            .map(|idx| self.id_at(idx))
            .collect()
    }

    // -- Property getters --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns whether the node's kind is `tag` or a registered subkind of it.
    #[must_use]
    pub fn is_kind_of(&self, id: NodeId, tag: NodeKind) -> bool {
        self.kinds.is_kind_of(self.kind(id), tag)
    }

    /// Returns the flags of a node.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the transform from this node's space into its parent's space.
    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Returns the raw notification suppression counter of a node.
    #[must_use]
    pub fn suppression_depth(&self, id: NodeId) -> u32 {
        self.validate(id);
        self.suppression[id.idx as usize]
    }

    /// Returns whether hierarchy notifications for this node are suppressed.
    #[must_use]
    pub fn notifications_suppressed(&self, id: NodeId) -> bool {
        self.suppression_depth(id) > 0
    }

    // -- Mutation API --

    /// Sets the flags of a node.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
    }

    /// Sets the transform from this node's space into its parent's space.
    pub fn set_transform(&mut self, id: NodeId, transform: Affine) {
        self.validate(id);
        self.local_transform[id.idx as usize] = transform;
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Returns the current handle for raw slot `idx`.
    pub(crate) fn id_at(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns the surface recorded for `idx`, without liveness checks.
    pub(crate) fn bound_surface(&self, idx: u32) -> Option<SurfaceId> {
        self.surface[idx as usize]
    }

    fn assert_acyclic(&self, parent: u32, child: u32) {
        assert!(
            !self.links.is_self_or_ancestor(child, parent),
            "cannot attach a node beneath itself or its descendant"
        );
    }

    /// Adds the child-to-parent dependency edge and marks the moved subtree.
    fn link_dirty(&mut self, c: u32, p: u32) {
        let _ = self.dirty.add_dependency(c, p, dirty::HIERARCHY);
        self.dirty.mark_with(c, dirty::HIERARCHY, &EagerPolicy);
    }
}
