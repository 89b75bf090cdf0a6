// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene: a node store, a surface store, and the registry between them.
//!
//! # Registry
//!
//! A surface maps to a node only while all of the following hold:
//!
//! - the surface is alive,
//! - the node recorded as its vendor is alive,
//! - that node's bound surface is this surface.
//!
//! Because every check goes through generational handles, destroying either
//! side makes the association vanish without any explicit cleanup, and a
//! lookup can never return a dangling handle.
//!
//! # Traversal
//!
//! Descendant queries ([`walk`](Scene::walk) and everything built on it) need
//! both trees, so they live here. Ancestor queries only follow node links and
//! live on [`NodeStore`].

mod collect;
mod suppress;
mod walk;

pub use walk::{WalkOrigin, WalkStats};

use crate::node::{NodeId, NodeStore, SurfaceId};
use crate::surface::SurfaceStore;

/// A node tree, the platform surface tree, and the association between them.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: NodeStore,
    surfaces: SurfaceStore,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node store.
    #[must_use]
    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    /// Returns the node store for topology and property mutation.
    pub fn nodes_mut(&mut self) -> &mut NodeStore {
        &mut self.nodes
    }

    /// Returns the surface store.
    #[must_use]
    pub fn surfaces(&self) -> &SurfaceStore {
        &self.surfaces
    }

    /// Returns the surface store for platform-side mutation.
    pub fn surfaces_mut(&mut self) -> &mut SurfaceStore {
        &mut self.surfaces
    }

    // -- Registry --

    /// Records that `node` vended `surface`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `node` already has a live
    /// surface, or if `surface` is already registered to a node.
    pub fn bind_surface(&mut self, node: NodeId, surface: SurfaceId) {
        self.nodes.validate(node);
        self.surfaces.validate(surface);
        assert!(
            self.surface_of(node).is_none(),
            "{node:?} already has a surface"
        );
        assert!(
            self.node_for_surface(surface).is_none(),
            "{surface:?} is already registered to a node"
        );
        self.nodes.surface[node.idx as usize] = Some(surface);
        self.surfaces.owner[surface.idx as usize] = Some(node);
    }

    /// Removes `node`'s surface association, returning the surface if it was
    /// still alive. The surface itself stays in the platform tree.
    pub fn unbind_surface(&mut self, node: NodeId) -> Option<SurfaceId> {
        let surface = self.surface_of(node);
        self.nodes.surface[node.idx as usize] = None;
        if let Some(s) = surface {
            self.surfaces.owner[s.idx as usize] = None;
        }
        surface
    }

    /// Returns the node that vended `surface`, if any.
    ///
    /// Returns `None` for platform containers, for stale surface handles, and
    /// for surfaces whose node has been destroyed or unbound.
    #[must_use]
    pub fn node_for_surface(&self, surface: SurfaceId) -> Option<NodeId> {
        if !self.surfaces.is_alive(surface) {
            return None;
        }
        let node = self.surfaces.owner[surface.idx as usize]?;
        (self.nodes.is_alive(node) && self.nodes.bound_surface(node.idx) == Some(surface))
            .then_some(node)
    }

    /// Returns the live surface bound to `node`, or `None` if the node has
    /// not been materialized (or its surface was reclaimed).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn surface_of(&self, node: NodeId) -> Option<SurfaceId> {
        self.nodes.validate(node);
        self.live_surface(node.idx)
    }

    /// Returns whether `node` currently has a live surface.
    #[must_use]
    pub fn is_materialized(&self, node: NodeId) -> bool {
        self.surface_of(node).is_some()
    }

    /// Unchecked-handle variant of [`surface_of`](Self::surface_of) for
    /// traversal over raw slots.
    pub(crate) fn live_surface(&self, idx: u32) -> Option<SurfaceId> {
        let surface = self.nodes.bound_surface(idx)?;
        (self.surfaces.is_alive(surface)
            && self.surfaces.owner[surface.idx as usize] == Some(self.nodes.id_at(idx)))
        .then_some(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;

    #[test]
    fn bound_surface_maps_both_ways() {
        let mut scene = Scene::new();
        let node = scene.nodes_mut().create_node(NodeKind::NODE);
        let surface = scene.surfaces_mut().create_surface();
        assert_eq!(scene.node_for_surface(surface), None);
        assert!(!scene.is_materialized(node));

        scene.bind_surface(node, surface);
        assert_eq!(scene.node_for_surface(surface), Some(node));
        assert_eq!(scene.surface_of(node), Some(surface));
    }

    #[test]
    fn container_surface_has_no_node() {
        let mut scene = Scene::new();
        let container = scene.surfaces_mut().create_surface();
        assert_eq!(scene.node_for_surface(container), None);
    }

    #[test]
    fn entry_vanishes_when_node_is_destroyed() {
        let mut scene = Scene::new();
        let node = scene.nodes_mut().create_node(NodeKind::NODE);
        let surface = scene.surfaces_mut().create_surface();
        scene.bind_surface(node, surface);

        scene.nodes_mut().destroy_node(node);
        assert_eq!(scene.node_for_surface(surface), None);

        // A new node reusing the slot does not inherit the association.
        let reused = scene.nodes_mut().create_node(NodeKind::NODE);
        assert_eq!(reused.index(), node.index());
        assert_eq!(scene.node_for_surface(surface), None);
        assert_eq!(scene.surface_of(reused), None);
    }

    #[test]
    fn entry_vanishes_when_surface_is_destroyed() {
        let mut scene = Scene::new();
        let node = scene.nodes_mut().create_node(NodeKind::NODE);
        let surface = scene.surfaces_mut().create_surface();
        scene.bind_surface(node, surface);

        scene.surfaces_mut().destroy_surface(surface);
        assert_eq!(scene.surface_of(node), None);
        assert_eq!(scene.node_for_surface(surface), None);

        // The node can be materialized again.
        let fresh = scene.surfaces_mut().create_surface();
        scene.bind_surface(node, fresh);
        assert_eq!(scene.node_for_surface(fresh), Some(node));
    }

    #[test]
    fn unbind_returns_live_surface() {
        let mut scene = Scene::new();
        let node = scene.nodes_mut().create_node(NodeKind::NODE);
        let surface = scene.surfaces_mut().create_surface();
        scene.bind_surface(node, surface);

        assert_eq!(scene.unbind_surface(node), Some(surface));
        assert_eq!(scene.node_for_surface(surface), None);
        assert_eq!(scene.unbind_surface(node), None);
        assert!(scene.surfaces().is_alive(surface));
    }

    #[test]
    #[should_panic(expected = "is already registered to a node")]
    fn binding_a_registered_surface_panics() {
        let mut scene = Scene::new();
        let a = scene.nodes_mut().create_node(NodeKind::NODE);
        let b = scene.nodes_mut().create_node(NodeKind::NODE);
        let surface = scene.surfaces_mut().create_surface();
        scene.bind_surface(a, surface);
        scene.bind_surface(b, surface);
    }

    #[test]
    #[should_panic(expected = "already has a surface")]
    fn binding_twice_panics() {
        let mut scene = Scene::new();
        let a = scene.nodes_mut().create_node(NodeKind::NODE);
        let s1 = scene.surfaces_mut().create_surface();
        let s2 = scene.surfaces_mut().create_surface();
        scene.bind_surface(a, s1);
        scene.bind_surface(a, s2);
    }
}
