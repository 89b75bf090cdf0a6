// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Lamina uses [`understory_dirty`] to find the nodes whose hierarchy
//! membership may have changed since the last drain.
//!
//! # Propagation semantics
//!
//! [`HIERARCHY`] is marked with [`EagerPolicy`](understory_dirty::EagerPolicy)
//! and has dependency edges from child to parent. Attaching, detaching, or
//! presenting a node marks it and every descendant, because membership in a
//! presented hierarchy is inherited from the root.
//!
//! # Consumption
//!
//! Callers never query dirty state directly.
//! [`NodeStore::drain_hierarchy_changes`](crate::node::NodeStore::drain_hierarchy_changes)
//! drains the channel and reports the resulting transitions as
//! [`HierarchyChanges`](crate::node::HierarchyChanges).

use understory_dirty::Channel;

/// Parentage or presentation changed; hierarchy membership must be
/// recomputed for the node and its descendants.
pub const HIERARCHY: Channel = Channel::new(0);
