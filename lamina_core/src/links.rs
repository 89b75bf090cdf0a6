// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent, first-child, and sibling links shared by the node and surface
//! stores.

use alloc::vec::Vec;

use crate::node::INVALID;

/// Ordered-tree topology over raw slot indices.
#[derive(Clone, Debug, Default)]
pub(crate) struct Links {
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,
}

impl Links {
    /// Appends a detached slot.
    pub(crate) fn push_detached(&mut self) {
        self.parent.push(INVALID);
        self.first_child.push(INVALID);
        self.next_sibling.push(INVALID);
        self.prev_sibling.push(INVALID);
    }

    /// Detaches a recycled slot from everything.
    pub(crate) fn reset(&mut self, idx: u32) {
        self.parent[idx as usize] = INVALID;
        self.first_child[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
    }

    pub(crate) fn parent_of(&self, idx: u32) -> Option<u32> {
        let p = self.parent[idx as usize];
        (p != INVALID).then_some(p)
    }

    pub(crate) fn has_children(&self, idx: u32) -> bool {
        self.first_child[idx as usize] != INVALID
    }

    /// Iterates the raw indices of `idx`'s children in order.
    pub(crate) fn children_of(&self, idx: u32) -> Siblings<'_> {
        Siblings {
            next: &self.next_sibling,
            current: self.first_child[idx as usize],
        }
    }

    /// Follows parent links from `idx` to its root.
    pub(crate) fn root_of(&self, mut idx: u32) -> u32 {
        while let Some(p) = self.parent_of(idx) {
            idx = p;
        }
        idx
    }

    /// Returns whether `ancestor` is `idx` or one of its ancestors.
    pub(crate) fn is_self_or_ancestor(&self, ancestor: u32, mut idx: u32) -> bool {
        loop {
            if idx == ancestor {
                return true;
            }
            match self.parent_of(idx) {
                Some(p) => idx = p,
                None => return false,
            }
        }
    }

    /// Adds detached `c` as the last child of `p`.
    pub(crate) fn append_child(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Inserts detached `c` before attached `s`, returning their shared parent.
    pub(crate) fn insert_before(&mut self, c: u32, s: u32) -> u32 {
        let p = self.parent[s as usize];
        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `s` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;
        p
    }

    /// Removes `idx` from its parent's child list, returning the old parent.
    pub(crate) fn unlink(&mut self, idx: u32) -> u32 {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
        p
    }
}

/// Iterator over raw sibling indices.
#[derive(Clone, Debug)]
pub(crate) struct Siblings<'a> {
    next: &'a [u32],
    current: u32,
}

impl Iterator for Siblings<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.next[idx as usize];
        Some(idx)
    }
}
