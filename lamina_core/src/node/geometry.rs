// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate conversion between node spaces.
//!
//! Each node's local transform maps its own space into its parent's. Two
//! nodes are related through their lowest common ancestor: a point is lifted
//! from the source node into the ancestor's space, then lowered into the
//! destination node's space with the inverse of the destination's chain.

use kurbo::{Affine, Point};

use super::id::NodeId;
use super::store::NodeStore;

impl NodeStore {
    /// Returns the transform from `id`'s space into `ancestor`'s space.
    ///
    /// # Panics
    ///
    /// Panics if `ancestor` is neither `id` nor one of its ancestors.
    #[must_use]
    pub fn transform_to_ancestor(&self, id: NodeId, ancestor: NodeId) -> Affine {
        self.validate(ancestor);
        let mut acc = Affine::IDENTITY;
        for n in self.ancestors(id) {
            if n == ancestor {
                return acc;
            }
            acc = self.local_transform[n.idx as usize] * acc;
        }
        panic!("{ancestor:?} is not an ancestor of {id:?}");
    }

    /// Converts `point` from `from`'s coordinate space into `to`'s.
    ///
    /// # Panics
    ///
    /// Panics if the nodes do not share a common ancestor (see
    /// [`common_ancestor`](Self::common_ancestor)).
    #[must_use]
    pub fn convert_point(&self, point: Point, from: NodeId, to: NodeId) -> Point {
        let ancestor = self.common_ancestor(from, to);
        let up = self.transform_to_ancestor(from, ancestor);
        let down = self.transform_to_ancestor(to, ancestor).inverse();
        down * up * point
    }
}
