// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested suppression of hierarchy notifications.
//!
//! Suppression is a per-node counter, applied to a snapshot of the subtree
//! taken when the call is made. Nodes attached afterwards are unaffected
//! until a new disable/enable pair covers them.

use super::Scene;
use crate::node::NodeId;
use crate::trace::{SuppressionDirection, SuppressionEvent, Tracer, saturating_u32};

impl Scene {
    /// Suppresses hierarchy notifications for `node` and every node currently
    /// below it. Calls nest; returns how many nodes were touched.
    pub fn disable_notifications(&mut self, node: NodeId) -> usize {
        let targets = self.collect_nodes(node);
        for n in &targets {
            self.nodes.suppression[n.idx as usize] += 1;
        }
        targets.len()
    }

    /// Undoes one [`disable_notifications`](Self::disable_notifications) for
    /// `node` and every node currently below it. Returns how many nodes were
    /// touched.
    ///
    /// Enabling a node whose counter is already zero is a caller bug; it is
    /// caught by a debug assertion and otherwise leaves the counter at zero.
    pub fn enable_notifications(&mut self, node: NodeId) -> usize {
        let targets = self.collect_nodes(node);
        for n in &targets {
            let depth = &mut self.nodes.suppression[n.idx as usize];
            debug_assert!(*depth > 0, "unbalanced enable_notifications on {n:?}");
            *depth = depth.saturating_sub(1);
        }
        targets.len()
    }

    /// Disables or enables notifications for `node`'s subtree and reports
    /// the adjustment to `tracer`.
    pub fn adjust_notifications_traced(
        &mut self,
        node: NodeId,
        direction: SuppressionDirection,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        let touched = match direction {
            SuppressionDirection::Disable => self.disable_notifications(node),
            SuppressionDirection::Enable => self.enable_notifications(node),
        };
        tracer.suppression(&SuppressionEvent {
            node_index: node.index(),
            direction,
            touched: saturating_u32(touched),
        });
        touched
    }
}
