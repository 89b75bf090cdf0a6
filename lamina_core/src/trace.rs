// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for traversal and notification bookkeeping.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! instrumented entry points call once per operation. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Events carry raw slot indices rather than handles so sinks can record them
//! without holding on to the scene.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use crate::node::HierarchyChanges;
use crate::scene::{WalkOrigin, WalkStats};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The slot a traced walk started from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceOrigin {
    /// A node slot index.
    Node(u32),
    /// A surface slot index.
    Surface(u32),
}

impl From<WalkOrigin> for TraceOrigin {
    fn from(origin: WalkOrigin) -> Self {
        match origin {
            WalkOrigin::Node(n) => Self::Node(n.index()),
            WalkOrigin::Surface(s) => Self::Surface(s.index()),
        }
    }
}

/// Whether a suppression call disabled or re-enabled notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuppressionDirection {
    /// Counters were incremented.
    Disable,
    /// Counters were decremented.
    Enable,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a traced walk finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkEvent {
    /// Where the walk started.
    pub origin: TraceOrigin,
    /// Whether the origin's own node was offered to the visitor.
    pub include_origin: bool,
    /// Counters gathered by the walk.
    pub stats: WalkStats,
    /// Whether the visitor stopped the walk early.
    pub short_circuited: bool,
}

impl WalkEvent {
    /// Creates a `WalkEvent` for a finished walk.
    #[must_use]
    pub fn new(
        origin: WalkOrigin,
        include_origin: bool,
        stats: WalkStats,
        short_circuited: bool,
    ) -> Self {
        Self {
            origin: origin.into(),
            include_origin,
            stats,
            short_circuited,
        }
    }
}

/// Emitted after a subtree's suppression counters were adjusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuppressionEvent {
    /// Slot index of the subtree root.
    pub node_index: u32,
    /// Which way the counters moved.
    pub direction: SuppressionDirection,
    /// Number of nodes whose counter changed.
    pub touched: u32,
}

/// Emitted after hierarchy changes were drained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HierarchyEvent {
    /// Nodes reported as entering a presented hierarchy.
    pub appeared: u32,
    /// Nodes reported as leaving a presented hierarchy.
    pub disappeared: u32,
    /// Transitions swallowed by suppression.
    pub suppressed: u32,
}

impl From<&HierarchyChanges> for HierarchyEvent {
    fn from(changes: &HierarchyChanges) -> Self {
        Self {
            appeared: saturating_u32(changes.appeared.len()),
            disappeared: saturating_u32(changes.disappeared.len()),
            suppressed: saturating_u32(changes.suppressed),
        }
    }
}

pub(crate) fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from instrumented scene operations.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a traced walk finishes.
    fn on_walk(&mut self, e: &WalkEvent) {
        _ = e;
    }

    /// Called after suppression counters were adjusted.
    fn on_suppression(&mut self, e: &SuppressionEvent) {
        _ = e;
    }

    /// Called after hierarchy changes were drained.
    fn on_hierarchy(&mut self, e: &HierarchyEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`WalkEvent`].
    #[inline]
    pub fn walk(&mut self, e: &WalkEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_walk(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SuppressionEvent`].
    #[inline]
    pub fn suppression(&mut self, e: &SuppressionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_suppression(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HierarchyEvent`].
    #[inline]
    pub fn hierarchy(&mut self, e: &HierarchyEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hierarchy(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::kind::NodeKind;
    use crate::scene::Scene;

    fn sample_walk() -> WalkEvent {
        WalkEvent {
            origin: TraceOrigin::Node(3),
            include_origin: true,
            stats: WalkStats {
                visited: 4,
                surfaces: 2,
                bridged: 1,
                fallbacks: 1,
            },
            short_circuited: false,
        }
    }

    #[test]
    fn origin_uses_slot_indices() {
        let mut scene = Scene::new();
        let _ = scene.nodes_mut().create_node(NodeKind::NODE);
        let n = scene.nodes_mut().create_node(NodeKind::NODE);
        let s = scene.surfaces_mut().create_surface();
        assert_eq!(TraceOrigin::from(WalkOrigin::Node(n)), TraceOrigin::Node(1));
        assert_eq!(
            TraceOrigin::from(WalkOrigin::Surface(s)),
            TraceOrigin::Surface(0)
        );
    }

    #[test]
    fn hierarchy_event_counts_changes() {
        let mut scene = Scene::new();
        let a = scene.nodes_mut().create_node(NodeKind::NODE);
        let b = scene.nodes_mut().create_node(NodeKind::NODE);
        let changes = HierarchyChanges {
            appeared: vec![a, b],
            disappeared: vec![],
            suppressed: 5,
        };
        let e = HierarchyEvent::from(&changes);
        assert_eq!(
            e,
            HierarchyEvent {
                appeared: 2,
                disappeared: 0,
                suppressed: 5,
            }
        );
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_walk(&sample_walk());
        sink.on_suppression(&SuppressionEvent {
            node_index: 0,
            direction: SuppressionDirection::Disable,
            touched: 1,
        });
        sink.on_hierarchy(&HierarchyEvent::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.walk(&sample_walk());
        tracer.hierarchy(&HierarchyEvent::default());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            visited: Vec<u32>,
        }
        impl TraceSink for RecordingSink {
            fn on_walk(&mut self, e: &WalkEvent) {
                self.visited.push(e.stats.visited);
            }
        }

        let mut sink = RecordingSink {
            visited: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.walk(&sample_walk());
        drop(tracer);
        assert_eq!(sink.visited, &[4]);
    }
}
