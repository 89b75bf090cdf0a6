// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hybrid node/surface tree walking.
//!
//! The walker prefers the surface tree: once a node is materialized, its
//! descendants are found by descending its surface, which also reaches nodes
//! hosted beneath platform containers that have no node of their own. Where
//! no surface exists yet, the walker follows node links instead and never
//! creates a surface to keep going.
//!
//! Per node, the rules are:
//!
//! 1. A materialized node (that does not rasterize its descendants) descends
//!    every child surface in order. Child surfaces without a registered node
//!    are not visited but are still descended.
//! 2. Then every child node whose surface is *not* below the surface being
//!    walked is descended through node links, in child order. Unmaterialized
//!    children always fall in this group.
//! 3. An unmaterialized or rasterizing node descends its child nodes, minus
//!    those whose surfaces an enclosing surface walk already covers.
//!
//! Visits are depth-first and pre-order. Each node reachable from the origin
//! is visited exactly once.

use core::ops::ControlFlow;

use super::Scene;
use crate::node::{NodeId, SurfaceId};
use crate::trace::{Tracer, WalkEvent};

/// Where a walk starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WalkOrigin {
    /// Start from a node.
    Node(NodeId),
    /// Start from a surface, which may be a bare platform container.
    Surface(SurfaceId),
}

/// Counters gathered during a single [`Scene::walk`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WalkStats {
    /// Visitor invocations.
    pub visited: u32,
    /// Surfaces whose children were descended.
    pub surfaces: u32,
    /// Descended surfaces with no registered node (platform containers).
    pub bridged: u32,
    /// Nodes whose children were descended through node links because no
    /// surface was walkable.
    pub fallbacks: u32,
}

impl Scene {
    /// Walks everything below `origin`, calling `visitor` on each node.
    ///
    /// With `include_origin`, the origin's own node (if it has one) is
    /// visited first. The walk stops as soon as `visitor` breaks, and the
    /// break value is returned along with the walk's counters.
    ///
    /// # Panics
    ///
    /// Panics if the origin handle is stale.
    pub fn walk<B>(
        &self,
        origin: WalkOrigin,
        include_origin: bool,
        mut visitor: impl FnMut(NodeId) -> ControlFlow<B>,
    ) -> (ControlFlow<B>, WalkStats) {
        let mut stats = WalkStats::default();
        let flow = match origin {
            WalkOrigin::Node(node) => {
                self.nodes.validate(node);
                self.walk_from(
                    None,
                    Some(node.idx),
                    include_origin,
                    None,
                    &mut visitor,
                    &mut stats,
                )
            }
            WalkOrigin::Surface(surface) => {
                self.surfaces.validate(surface);
                self.walk_from(
                    Some(surface),
                    None,
                    include_origin,
                    None,
                    &mut visitor,
                    &mut stats,
                )
            }
        };
        (flow, stats)
    }

    /// Calls `f` on `node` and then on every node below it.
    pub fn for_each_node(&self, node: NodeId, mut f: impl FnMut(NodeId)) {
        let _ = self.walk(WalkOrigin::Node(node), true, |n| {
            f(n);
            ControlFlow::<()>::Continue(())
        });
    }

    /// Calls `f` on every node below `node`, but not on `node` itself.
    pub fn for_each_subnode(&self, node: NodeId, mut f: impl FnMut(NodeId)) {
        let _ = self.walk(WalkOrigin::Node(node), false, |n| {
            f(n);
            ControlFlow::<()>::Continue(())
        });
    }

    /// Calls `f` on the node registered to `surface` (if any) and then on
    /// every node hosted beneath it.
    pub fn for_each_node_in_surface(&self, surface: SurfaceId, mut f: impl FnMut(NodeId)) {
        let _ = self.walk(WalkOrigin::Surface(surface), true, |n| {
            f(n);
            ControlFlow::<()>::Continue(())
        });
    }

    /// Like [`walk`](Self::walk), but reports the finished walk to `tracer`.
    pub fn walk_traced<B>(
        &self,
        origin: WalkOrigin,
        include_origin: bool,
        tracer: &mut Tracer<'_>,
        visitor: impl FnMut(NodeId) -> ControlFlow<B>,
    ) -> (ControlFlow<B>, WalkStats) {
        let (flow, stats) = self.walk(origin, include_origin, visitor);
        tracer.walk(&WalkEvent::new(
            origin,
            include_origin,
            stats,
            flow.is_break(),
        ));
        (flow, stats)
    }

    /// `scope` is the surface of the nearest enclosing surface walk; child
    /// nodes whose surfaces sit below it are left to that walk.
    fn walk_from<B, F>(
        &self,
        surface: Option<SurfaceId>,
        node: Option<u32>,
        visit_self: bool,
        scope: Option<u32>,
        visitor: &mut F,
        stats: &mut WalkStats,
    ) -> ControlFlow<B>
    where
        F: FnMut(NodeId) -> ControlFlow<B>,
    {
        let node = node.or_else(|| {
            surface
                .and_then(|s| self.node_for_surface(s))
                .map(|n| n.idx)
        });

        if visit_self {
            if let Some(n) = node {
                stats.visited += 1;
                visitor(self.nodes.id_at(n))?;
            }
        }

        let rasterized = node.is_some_and(|n| self.nodes.flags[n as usize].rasterize_descendants);
        let surface = surface.or_else(|| node.and_then(|n| self.live_surface(n)));

        let scope = match surface {
            Some(s) if !rasterized => {
                stats.surfaces += 1;
                if node.is_none() {
                    stats.bridged += 1;
                }
                for child in self.surfaces.links.children_of(s.idx) {
                    let child = self.surfaces.id_at(child);
                    self.walk_from(Some(child), None, true, Some(s.idx), visitor, stats)?;
                }
                Some(s.idx)
            }
            _ => {
                if node.is_some() {
                    stats.fallbacks += 1;
                }
                if rasterized { None } else { scope }
            }
        };

        if let Some(n) = node {
            for child in self.nodes.links.children_of(n) {
                if !self.covered_by_scope(child, scope) {
                    self.walk_from(None, Some(child), true, scope, visitor, stats)?;
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Returns whether node slot `idx` has a live surface inside the surface
    /// subtree rooted at `scope`.
    fn covered_by_scope(&self, idx: u32, scope: Option<u32>) -> bool {
        let Some(scope) = scope else {
            return false;
        };
        self.live_surface(idx)
            .is_some_and(|s| self.surfaces.links.is_self_or_ancestor(scope, s.idx))
    }
}
