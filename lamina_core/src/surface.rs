// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform surface tree.
//!
//! Surfaces mirror the platform's own layer or view hierarchy. Some of them
//! were vended by nodes; others belong to platform containers (scroll views,
//! navigation containers, collection cells) that sit between node surfaces.
//! The store records which node vended each surface, but the association is
//! only trusted after [`Scene`](crate::scene::Scene) has checked both sides
//! are still alive.

use alloc::vec::Vec;

use crate::links::{Links, Siblings};
pub use crate::node::SurfaceId;
use crate::node::NodeId;

/// Struct-of-arrays storage for platform surfaces.
#[derive(Debug, Default)]
pub struct SurfaceStore {
    pub(crate) links: Links,
    /// The node that vended each surface, as recorded at bind time.
    pub(crate) owner: Vec<Option<NodeId>>,
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
}

impl SurfaceStore {
    /// Creates an empty surface store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached surface with no vending node.
    pub fn create_surface(&mut self) -> SurfaceId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.links.reset(idx);
            self.owner[idx as usize] = None;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.links.push_detached();
            self.owner.push(None);
            self.generation.push(0);
            idx
        };
        self.id_at(idx)
    }

    /// Destroys a surface, detaching it from its parent.
    ///
    /// A node bound to this surface reads as unmaterialized afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the surface has child surfaces or the handle is stale.
    pub fn destroy_surface(&mut self, id: SurfaceId) {
        self.validate(id);
        assert!(
            !self.links.has_children(id.idx),
            "cannot destroy surface with children"
        );
        if self.links.parent_of(id.idx).is_some() {
            self.links.unlink(id.idx);
        }
        self.owner[id.idx as usize] = None;
        self.generation[id.idx as usize] += 1;
        self.free_list.push(id.idx);
    }

    /// Returns whether the handle refers to a live surface.
    #[must_use]
    pub fn is_alive(&self, id: SurfaceId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Adds `child` as the last child surface of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, `child` already has a parent, or
    /// `parent` is `child` or one of its descendants.
    pub fn add_child(&mut self, parent: SurfaceId, child: SurfaceId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.links.parent_of(child.idx).is_none(),
            "surface already has a parent"
        );
        assert!(
            !self.links.is_self_or_ancestor(child.idx, parent.idx),
            "cannot attach a surface beneath itself or its descendant"
        );
        self.links.append_child(parent.idx, child.idx);
    }

    /// Inserts `child` before `sibling` among `sibling`'s parent's children.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or the insertion would create a cycle.
    pub fn insert_before(&mut self, child: SurfaceId, sibling: SurfaceId) {
        self.validate(child);
        self.validate(sibling);
        assert!(
            self.links.parent_of(child.idx).is_none(),
            "surface already has a parent"
        );
        let Some(p) = self.links.parent_of(sibling.idx) else {
            panic!("sibling surface has no parent");
        };
        assert!(
            !self.links.is_self_or_ancestor(child.idx, p),
            "cannot attach a surface beneath itself or its descendant"
        );
        self.links.insert_before(child.idx, sibling.idx);
    }

    /// Removes `child` from its parent surface.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the surface has no parent.
    pub fn remove_from_parent(&mut self, child: SurfaceId) {
        self.validate(child);
        assert!(
            self.links.parent_of(child.idx).is_some(),
            "surface has no parent"
        );
        self.links.unlink(child.idx);
    }

    /// Returns the parent surface, if any.
    #[must_use]
    pub fn parent(&self, id: SurfaceId) -> Option<SurfaceId> {
        self.validate(id);
        self.links.parent_of(id.idx).map(|p| self.id_at(p))
    }

    /// Returns an iterator over the direct child surfaces.
    #[must_use]
    pub fn children(&self, id: SurfaceId) -> SurfaceChildren<'_> {
        self.validate(id);
        SurfaceChildren {
            store: self,
            inner: self.links.children_of(id.idx),
        }
    }

    pub(crate) fn validate(&self, id: SurfaceId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale SurfaceId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    pub(crate) fn id_at(&self, idx: u32) -> SurfaceId {
        SurfaceId {
            idx,
            generation: self.generation[idx as usize],
        }
    }
}

/// An iterator over the direct children of a surface.
///
/// Created by [`SurfaceStore::children`].
#[derive(Debug)]
pub struct SurfaceChildren<'a> {
    store: &'a SurfaceStore,
    inner: Siblings<'a>,
}

impl Iterator for SurfaceChildren<'_> {
    type Item = SurfaceId;

    fn next(&mut self) -> Option<SurfaceId> {
        self.inner.next().map(|idx| self.store.id_at(idx))
    }
}
