// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descendant collection and search built on [`Scene::walk`].

use alloc::vec::Vec;
use core::ops::ControlFlow;

use super::{Scene, WalkOrigin};
use crate::kind::NodeKind;
use crate::node::NodeId;

impl Scene {
    /// Returns `node` followed by every node below it, in walk order.
    #[must_use]
    pub fn collect_nodes(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.for_each_node(node, |n| out.push(n));
        out
    }

    /// Returns every node below `node` for which `predicate` returns `true`,
    /// in walk order. `node` itself is never included.
    pub fn find_all_subnodes(
        &self,
        node: NodeId,
        mut predicate: impl FnMut(NodeId) -> bool,
    ) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.for_each_subnode(node, |n| {
            if predicate(n) {
                out.push(n);
            }
        });
        out
    }

    /// Returns every node below `node` whose kind is `kind` or a subkind.
    #[must_use]
    pub fn find_all_subnodes_of_kind(&self, node: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.find_all_subnodes(node, |n| self.kind_matches(n, kind))
    }

    /// Returns the first node below `node`, in walk order, for which
    /// `predicate` returns `true`. Stops walking at the first match.
    pub fn find_first_subnode(
        &self,
        node: NodeId,
        mut predicate: impl FnMut(NodeId) -> bool,
    ) -> Option<NodeId> {
        match self.walk(WalkOrigin::Node(node), false, |n| {
            if predicate(n) {
                ControlFlow::Break(n)
            } else {
                ControlFlow::Continue(())
            }
        }) {
            (ControlFlow::Break(found), _) => Some(found),
            (ControlFlow::Continue(()), _) => None,
        }
    }

    /// Returns the first node below `node` whose kind is `kind` or a subkind.
    #[must_use]
    pub fn find_first_subnode_of_kind(&self, node: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.find_first_subnode(node, |n| self.kind_matches(n, kind))
    }

    fn kind_matches(&self, n: NodeId, kind: NodeKind) -> bool {
        self.nodes
            .kinds
            .is_kind_of(self.nodes.kind[n.idx as usize], kind)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::node::SurfaceId;

    struct Fixture {
        scene: Scene,
        image: NodeKind,
        button: NodeKind,
        control: NodeKind,
        root: NodeId,
        nodes: Vec<NodeId>,
    }

    /// root (surface)
    /// ├─ container surface
    /// │  └─ header (image, surface)
    /// ├─ body (no surface)
    /// │  ├─ ok (button)
    /// │  └─ icon (image)
    /// └─ footer (control, no surface)
    fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let control = scene.nodes_mut().register_kind("control", NodeKind::NODE);
        let button = scene.nodes_mut().register_kind("button", control);
        let image = scene.nodes_mut().register_kind("image", NodeKind::NODE);

        let nodes = scene.nodes_mut();
        let root = nodes.create_node(NodeKind::NODE);
        let header = nodes.create_node(image);
        let body = nodes.create_node(NodeKind::NODE);
        let ok = nodes.create_node(button);
        let icon = nodes.create_node(image);
        let footer = nodes.create_node(control);
        nodes.add_child(root, header);
        nodes.add_child(root, body);
        nodes.add_child(body, ok);
        nodes.add_child(body, icon);
        nodes.add_child(root, footer);

        let s_root: SurfaceId = scene.surfaces_mut().create_surface();
        let container = scene.surfaces_mut().create_surface();
        let s_header = scene.surfaces_mut().create_surface();
        scene.surfaces_mut().add_child(s_root, container);
        scene.surfaces_mut().add_child(container, s_header);
        scene.bind_surface(root, s_root);
        scene.bind_surface(header, s_header);

        Fixture {
            scene,
            image,
            button,
            control,
            root,
            nodes: vec![root, header, body, ok, icon, footer],
        }
    }

    #[test]
    fn collect_nodes_includes_origin_once() {
        let f = fixture();
        let all = f.scene.collect_nodes(f.root);
        assert_eq!(all, f.nodes);
    }

    #[test]
    fn find_all_excludes_origin() {
        let f = fixture();
        let all = f.scene.find_all_subnodes(f.root, |_| true);
        assert_eq!(all, f.nodes[1..]);
    }

    #[test]
    fn find_all_of_kind_uses_subkinds() {
        let f = fixture();
        let [_, header, _, ok, icon, footer] = f.nodes[..] else {
            unreachable!()
        };
        assert_eq!(
            f.scene.find_all_subnodes_of_kind(f.root, f.image),
            vec![header, icon]
        );
        assert_eq!(
            f.scene.find_all_subnodes_of_kind(f.root, f.control),
            vec![ok, footer]
        );
        assert_eq!(f.scene.find_all_subnodes_of_kind(f.root, f.button), vec![ok]);
    }

    #[test]
    fn find_first_agrees_with_find_all() {
        let f = fixture();
        for kind in [f.image, f.control, f.button, NodeKind::NODE] {
            let all = f.scene.find_all_subnodes_of_kind(f.root, kind);
            assert_eq!(
                f.scene.find_first_subnode_of_kind(f.root, kind),
                all.first().copied()
            );
        }
        let body = f.nodes[2];
        assert_eq!(f.scene.find_first_subnode(body, |n| n == f.root), None);
        assert!(f.scene.find_all_subnodes(body, |n| n == f.root).is_empty());
    }

    #[test]
    fn find_first_short_circuits() {
        let f = fixture();
        let mut calls = 0;
        let found = f.scene.find_first_subnode(f.root, |_| {
            calls += 1;
            true
        });
        assert_eq!(found, Some(f.nodes[1]));
        assert_eq!(calls, 1);
    }

    #[test]
    fn find_first_excludes_origin() {
        let f = fixture();
        assert_eq!(
            f.scene.find_first_subnode_of_kind(f.nodes[1], f.image),
            None
        );
    }
}
