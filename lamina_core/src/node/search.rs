// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Upward searches: predicate and kind matching along the ancestor chain,
//! and lowest-common-ancestor resolution.

use hashbrown::HashSet;

use super::id::NodeId;
use super::store::NodeStore;
use crate::kind::NodeKind;

impl NodeStore {
    /// Returns the nearest node, starting with `id` itself, for which
    /// `predicate` returns `true`.
    pub fn find_ancestor(
        &self,
        id: NodeId,
        mut predicate: impl FnMut(NodeId) -> bool,
    ) -> Option<NodeId> {
        self.ancestors(id).find(|&n| predicate(n))
    }

    /// Returns the nearest node, starting with `id` itself, whose kind is
    /// `kind` or a registered subkind of it.
    #[must_use]
    pub fn find_ancestor_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.find_ancestor(id, |n| self.kinds.is_kind_of(self.kind[n.idx as usize], kind))
    }

    /// Returns the lowest common ancestor of `a` and `b`, or `None` if they
    /// live in different trees.
    ///
    /// Either node counts as its own ancestor, so if `a` is an ancestor of
    /// `b` the result is `a`.
    #[must_use]
    pub fn try_common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let chain: HashSet<u32> = self.ancestors(a).map(|n| n.idx).collect();
        self.ancestors(b).find(|n| chain.contains(&n.idx))
    }

    /// Returns the lowest common ancestor of `a` and `b`.
    ///
    /// Asking for the common ancestor of nodes in different trees has no
    /// meaningful answer; every caller doing so must be fixed.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` do not share a root, or if either handle is
    /// stale.
    #[must_use]
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> NodeId {
        match self.try_common_ancestor(a, b) {
            Some(n) => n,
            None => panic!("{a:?} and {b:?} do not share a common ancestor"),
        }
    }
}
