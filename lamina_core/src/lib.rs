// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node/surface association and hierarchy traversal for retained scene graphs.
//!
//! `lamina_core` models a scene graph whose nodes may each be backed by a
//! platform rendering *surface* (a `CALayer`, a DOM element, a native view).
//! The two hierarchies are not isomorphic: platform containers can sit
//! between the surfaces of a parent node and its children, and nodes that
//! have not been materialized yet have no surface at all. This crate answers
//! the questions callers ask of such a graph without ever forcing a surface
//! into existence.
//!
//! It is `no_std` compatible (with `alloc`) and uses array-based
//! struct-of-arrays storage with generational index handles.
//!
//! # Architecture
//!
//! ```text
//!   NodeStore ◄──── registry ────► SurfaceStore
//!   (nodes, kinds,     │           (platform surface tree,
//!    suppression,      │            vending node per surface)
//!    hierarchy state)  │
//!        ▲             ▼
//!        └──────── Scene ──► walk() ──► collect / find / suppress
//! ```
//!
//! **[`node`]**: Struct-of-arrays node tree with generational handles,
//! registered [`NodeKind`](kind::NodeKind) tags, per-node notification
//! suppression counters, ancestor queries, hierarchy notifications, and
//! geometry conversion between node spaces.
//!
//! **[`surface`]**: The platform surface tree. Surfaces record the node that
//! vended them; bare platform containers record nothing.
//!
//! **[`scene`]**: Owns both stores, maintains the node/surface registry, and
//! hosts the hybrid walker that bridges the two hierarchies, together with the
//! descendant collectors and suppression toggles built on it.
//!
//! **[`kind`]**: Type tags with explicit subtype rules.
//!
//! **[`dirty`]**: Dirty-tracking channels (via `understory_dirty`) used to
//! compute hierarchy enter/exit transitions.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! traversal instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod kind;
mod links;
pub mod node;
pub mod scene;
pub mod surface;
pub mod trace;
