// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node tree data model.
//!
//! A *node* is an entry in the retained scene graph. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed, preventing use-after-free bugs at the API level.
//! - Topology: parent, first-child, and sibling links forming an ordered
//!   forest. Attaching a node beneath itself is rejected, so the forest stays
//!   acyclic.
//! - A [`NodeKind`](crate::kind::NodeKind) tag for kind-based searches.
//! - An optional bound surface, set through
//!   [`Scene::bind_surface`](crate::scene::Scene::bind_surface) when the node
//!   is materialized. This module never creates surfaces.
//! - A notification suppression counter (see
//!   [`Scene::disable_notifications`](crate::scene::Scene::disable_notifications))
//!   and hierarchy membership state (see [`HierarchyChanges`]).
//! - A local [`Affine`](kurbo::Affine) transform used for
//!   [point conversion](NodeStore::convert_point).
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.
//! Queries that only need node links live here; queries that follow the
//! surface tree live on [`Scene`](crate::scene::Scene).

mod geometry;
mod hierarchy;
mod id;
mod search;
mod store;
mod traverse;

pub use hierarchy::HierarchyChanges;
pub use id::{INVALID, NodeId, SurfaceId};
pub use store::{NodeFlags, NodeStore};
pub use traverse::{Ancestors, Children};
