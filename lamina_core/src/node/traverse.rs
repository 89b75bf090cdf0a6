// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node-tree iterators and the upward walk to the root.

use super::id::{INVALID, NodeId};
use super::store::NodeStore;
use crate::links::Siblings;

/// An iterator over the direct children of a node.
///
/// Created by [`NodeStore::children`].
#[derive(Debug)]
pub struct Children<'a> {
    store: &'a NodeStore,
    inner: Siblings<'a>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(store: &'a NodeStore, parent: u32) -> Self {
        Self {
            store,
            inner: store.links.children_of(parent),
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().map(|idx| self.store.id_at(idx))
    }
}

/// An iterator from a node up to its root, starting with the node itself.
///
/// Created by [`NodeStore::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    store: &'a NodeStore,
    current: u32,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.store.links.parent[idx as usize];
        Some(self.store.id_at(idx))
    }
}

impl NodeStore {
    /// Returns an iterator over `id` and each of its ancestors, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors {
            store: self,
            current: id.idx,
        }
    }

    /// Returns the root of the tree containing `id` (the ancestor with no
    /// parent), or `id` itself if it has no parent.
    #[must_use]
    pub fn ultimate_ancestor(&self, id: NodeId) -> NodeId {
        self.validate(id);
        self.id_at(self.links.root_of(id.idx))
    }
}
