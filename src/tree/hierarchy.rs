//! Arena-backed hierarchy used for depth limiting and layout.

use super::normalize::{DisplayNode, NodeData};

/// Index of a node inside a [`Hierarchy`].
pub type NodeId = usize;

/// A node in the layout hierarchy.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Distance from the root (root = 0)
    pub depth: usize,
    /// Horizontal position assigned by the layout
    pub x: f64,
    /// Vertical position assigned by the layout
    pub y: f64,
}

impl HierarchyNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// A tree flattened into an arena, root at index 0.
///
/// Pruning only unlinks children; unlinked nodes stay in the arena but are
/// never returned by [`Hierarchy::descendants`] or [`Hierarchy::links`].
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    /// Reachable node count, refreshed after pruning
    reachable: usize,
}

impl Hierarchy {
    /// Root node id.
    pub const ROOT: NodeId = 0;

    /// Flatten a display tree. Nodes are stored in pre-order.
    pub fn new(root: DisplayNode) -> Self {
        let mut nodes: Vec<HierarchyNode> = Vec::with_capacity(root.count());
        let mut stack: Vec<(DisplayNode, Option<NodeId>, usize)> = vec![(root, None, 0)];

        while let Some((node, parent, depth)) = stack.pop() {
            let id = nodes.len();
            nodes.push(HierarchyNode {
                data: node.data,
                parent,
                children: Vec::with_capacity(node.children.len()),
                depth,
                x: 0.0,
                y: 0.0,
            });
            if let Some(parent) = parent {
                nodes[parent].children.push(id);
            }
            for child in node.children.into_iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }

        let reachable = nodes.len();
        Self { nodes, reachable }
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut HierarchyNode {
        &mut self.nodes[id]
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[Self::ROOT]
    }

    /// Collapse every node at `max_depth` or deeper that still has children:
    /// its children are dropped and its `collapsed` flag is set. Returns how
    /// many nodes were collapsed.
    pub fn limit_depth(&mut self, max_depth: usize) -> usize {
        let mut collapsed = 0;
        let mut stack = vec![(Self::ROOT, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = &mut self.nodes[id];
            if depth >= max_depth && node.has_children() {
                node.children.clear();
                node.data.collapsed = true;
                collapsed += 1;
            } else {
                stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
            }
        }

        if collapsed > 0 {
            self.reachable = self.descendants().len();
        }
        collapsed
    }

    /// Reachable nodes in breadth-first order, root first.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        order.push(Self::ROOT);
        let mut cursor = 0;
        while cursor < order.len() {
            let id = order[cursor];
            order.extend_from_slice(&self.nodes[id].children);
            cursor += 1;
        }
        order
    }

    /// Reachable nodes, children before their parent, siblings left to right.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(Self::ROOT, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                out.push(id);
            } else {
                stack.push((id, true));
                for &child in self.nodes[id].children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }
        out
    }

    /// Number of reachable nodes.
    pub fn len(&self) -> usize {
        self.reachable
    }

    /// Always false: a hierarchy has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Parent/child pairs over reachable nodes, in breadth-first order.
    pub fn links(&self) -> Vec<(NodeId, NodeId)> {
        self.descendants()
            .into_iter()
            .skip(1)
            .filter_map(|id| self.nodes[id].parent.map(|parent| (parent, id)))
            .collect()
    }
}
