// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node type tags.
//!
//! Every node carries a [`NodeKind`]. Kinds are registered in a [`KindTable`]
//! with an optional supertag, so "is this node a button?" matches both plain
//! buttons and anything registered as a subkind of button. No reflection is
//! involved: a match is a walk up a short chain of `u32` indices.

use alloc::vec::Vec;
use core::fmt;

/// A registered node type tag.
///
/// Obtained from [`KindTable::register`]. Tags are only meaningful for the
/// table (and therefore the [`NodeStore`](crate::node::NodeStore)) that
/// issued them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKind(pub(crate) u32);

impl NodeKind {
    /// The root kind every table starts with. All other kinds are, directly
    /// or transitively, subkinds of it.
    pub const NODE: Self = Self(0);

    /// Returns the raw table index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeKind({})", self.0)
    }
}

/// Registry of node kinds and their supertags.
#[derive(Clone, Debug)]
pub struct KindTable {
    names: Vec<&'static str>,
    supertag: Vec<Option<NodeKind>>,
}

impl Default for KindTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KindTable {
    /// Creates a table containing only [`NodeKind::NODE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: alloc::vec!["node"],
            supertag: alloc::vec![None],
        }
    }

    /// Registers a new kind as a subkind of `supertag`.
    ///
    /// # Panics
    ///
    /// Panics if `supertag` was not issued by this table.
    pub fn register(&mut self, name: &'static str, supertag: NodeKind) -> NodeKind {
        self.validate(supertag);
        let kind = NodeKind(self.len());
        self.names.push(name);
        self.supertag.push(Some(supertag));
        kind
    }

    /// Returns the number of registered kinds, including [`NodeKind::NODE`].
    #[must_use]
    pub fn len(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "kind count is bounded by u32 indices"
        )]
        let len = self.names.len() as u32;
        len
    }

    /// Always `false`: a table holds at least [`NodeKind::NODE`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the name a kind was registered with.
    #[must_use]
    pub fn name(&self, kind: NodeKind) -> &'static str {
        self.validate(kind);
        self.names[kind.0 as usize]
    }

    /// Returns the direct supertag of `kind`, or `None` for [`NodeKind::NODE`].
    #[must_use]
    pub fn supertag(&self, kind: NodeKind) -> Option<NodeKind> {
        self.validate(kind);
        self.supertag[kind.0 as usize]
    }

    /// Returns whether `kind` is `tag` or a (transitive) subkind of it.
    #[must_use]
    pub fn is_kind_of(&self, kind: NodeKind, tag: NodeKind) -> bool {
        self.validate(tag);
        let mut current = Some(kind);
        while let Some(k) = current {
            if k == tag {
                return true;
            }
            current = self.supertag(k);
        }
        false
    }

    fn validate(&self, kind: NodeKind) {
        assert!(
            kind.0 < self.len(),
            "unknown {kind:?} (table has {} kinds)",
            self.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_matches_everything() {
        let mut table = KindTable::new();
        let control = table.register("control", NodeKind::NODE);
        let button = table.register("button", control);
        assert!(table.is_kind_of(button, NodeKind::NODE));
        assert!(table.is_kind_of(control, NodeKind::NODE));
        assert!(table.is_kind_of(NodeKind::NODE, NodeKind::NODE));
    }

    #[test]
    fn subkind_matches_supertag_but_not_reverse() {
        let mut table = KindTable::new();
        let control = table.register("control", NodeKind::NODE);
        let button = table.register("button", control);
        let text = table.register("text", NodeKind::NODE);

        assert!(table.is_kind_of(button, control));
        assert!(!table.is_kind_of(control, button));
        assert!(!table.is_kind_of(text, control));
        assert!(!table.is_kind_of(button, text));
    }

    #[test]
    fn names_and_supertags() {
        let mut table = KindTable::new();
        let image = table.register("image", NodeKind::NODE);
        assert_eq!(table.name(image), "image");
        assert_eq!(table.name(NodeKind::NODE), "node");
        assert_eq!(table.supertag(image), Some(NodeKind::NODE));
        assert_eq!(table.supertag(NodeKind::NODE), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    #[should_panic(expected = "unknown NodeKind")]
    fn foreign_kind_panics() {
        let mut other = KindTable::new();
        let _ = other.register("a", NodeKind::NODE);
        let foreign = other.register("b", NodeKind::NODE);

        let table = KindTable::new();
        let _ = table.is_kind_of(NodeKind::NODE, foreign);
    }
}
