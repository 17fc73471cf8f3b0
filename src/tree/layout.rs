//! Tidy tree layout.
//!
//! Buchheim, Jünger and Leipert's linear-time refinement of Walker's
//! algorithm. Nodes at the same depth share a row, parents are centred over
//! their children, and subtrees are packed as tightly as the separation
//! allows. The result is then stretched to fit a fixed canvas size.

use super::hierarchy::{Hierarchy, NodeId};

/// Layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeLayout {
    /// Canvas width the layout is fitted into
    pub width: f64,
    /// Canvas height the layout is fitted into
    pub height: f64,
    /// Separation between adjacent nodes sharing a parent
    pub sibling_separation: f64,
    /// Separation between adjacent nodes with different parents
    pub cousin_separation: f64,
}

impl TreeLayout {
    /// A layout with constant unit separation.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            sibling_separation: 1.0,
            cousin_separation: 1.0,
        }
    }

    #[must_use]
    pub const fn with_separation(mut self, sibling: f64, cousin: f64) -> Self {
        self.sibling_separation = sibling;
        self.cousin_separation = cousin;
        self
    }

    fn separation(&self, h: &Hierarchy, a: NodeId, b: NodeId) -> f64 {
        if h.node(a).parent == h.node(b).parent {
            self.sibling_separation
        } else {
            self.cousin_separation
        }
    }

    /// Assign `x`/`y` to every reachable node of `hierarchy`.
    pub fn apply(&self, hierarchy: &mut Hierarchy) {
        let mut walker = Walker::new(hierarchy);
        for v in hierarchy.post_order() {
            walker.first_walk(self, hierarchy, v);
        }
        let root = walker.root;
        let sentinel = walker.sentinel;
        walker.nodes[sentinel].modifier = -walker.nodes[root].prelim;
        for v in hierarchy.descendants() {
            walker.second_walk(hierarchy, v);
        }

        self.fit(hierarchy);
    }

    /// Stretch preliminary coordinates to the canvas.
    fn fit(&self, h: &mut Hierarchy) {
        let order = h.descendants();
        let (mut left, mut right, mut bottom) = (Hierarchy::ROOT, Hierarchy::ROOT, Hierarchy::ROOT);
        for &id in &order {
            let node = h.node(id);
            if node.x < h.node(left).x {
                left = id;
            }
            if node.x > h.node(right).x {
                right = id;
            }
            if node.depth > h.node(bottom).depth {
                bottom = id;
            }
        }

        let s = if left == right {
            1.0
        } else {
            self.separation(h, left, right) / 2.0
        };
        let tx = s - h.node(left).x;
        let kx = self.width / (h.node(right).x + s + tx);
        let ky = self.height / h.node(bottom).depth.max(1) as f64;

        for id in order {
            let node = h.node_mut(id);
            node.x = (node.x + tx) * kx;
            node.y = node.depth as f64 * ky;
        }
    }
}

/// Per-node bookkeeping for the two walks. Index `i` mirrors hierarchy node
/// `i`; one extra sentinel acts as the root's parent.
#[derive(Debug, Clone, Default)]
struct WalkNode {
    /// Preliminary x
    prelim: f64,
    modifier: f64,
    change: f64,
    shift: f64,
    /// Contour thread to continue along when the subtree runs out
    thread: Option<NodeId>,
    /// Greatest distinct ancestor candidate
    ancestor: NodeId,
    /// Default ancestor tracked on the parent during apportion
    default_ancestor: Option<NodeId>,
    /// Position among siblings
    number: usize,
}

struct Walker {
    nodes: Vec<WalkNode>,
    root: NodeId,
    sentinel: NodeId,
}

impl Walker {
    fn new(h: &Hierarchy) -> Self {
        let order = h.descendants();
        let capacity = order.iter().copied().max().unwrap_or(0) + 2;
        let sentinel = capacity - 1;
        let mut nodes = vec![WalkNode::default(); capacity];
        for (i, node) in nodes.iter_mut().enumerate() {
            node.ancestor = i;
        }
        for &id in &order {
            for (number, &child) in h.node(id).children.iter().enumerate() {
                nodes[child].number = number;
            }
        }
        Self {
            nodes,
            root: Hierarchy::ROOT,
            sentinel,
        }
    }

    fn parent(&self, h: &Hierarchy, v: NodeId) -> NodeId {
        h.node(v).parent.unwrap_or(self.sentinel)
    }

    fn siblings<'h>(&self, h: &'h Hierarchy, v: NodeId) -> &'h [NodeId] {
        match h.node(v).parent {
            Some(p) => &h.node(p).children,
            None => std::slice::from_ref(&Hierarchy::ROOT),
        }
    }

    fn next_left(&self, h: &Hierarchy, v: NodeId) -> Option<NodeId> {
        h.node(v).children.first().copied().or(self.nodes[v].thread)
    }

    fn next_right(&self, h: &Hierarchy, v: NodeId) -> Option<NodeId> {
        h.node(v).children.last().copied().or(self.nodes[v].thread)
    }

    fn move_subtree(&mut self, wm: NodeId, wp: NodeId, shift: f64) {
        let change = shift / (self.nodes[wp].number as f64 - self.nodes[wm].number as f64);
        self.nodes[wp].change -= change;
        self.nodes[wp].shift += shift;
        self.nodes[wm].change += change;
        self.nodes[wp].prelim += shift;
        self.nodes[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, h: &Hierarchy, v: NodeId) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for &w in h.node(v).children.iter().rev() {
            let node = &mut self.nodes[w];
            node.prelim += shift;
            node.modifier += shift;
            change += node.change;
            shift += node.shift + change;
        }
    }

    fn next_ancestor(&self, h: &Hierarchy, vim: NodeId, v: NodeId, ancestor: NodeId) -> NodeId {
        let candidate = self.nodes[vim].ancestor;
        if h.node(candidate).parent == h.node(v).parent {
            candidate
        } else {
            ancestor
        }
    }

    fn first_walk(&mut self, layout: &TreeLayout, h: &Hierarchy, v: NodeId) {
        let siblings = self.siblings(h, v);
        let number = self.nodes[v].number;
        let left_sibling = (number > 0).then(|| siblings[number - 1]);
        let children = &h.node(v).children;

        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            self.execute_shifts(h, v);
            let midpoint = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
            if let Some(w) = left_sibling {
                self.nodes[v].prelim = self.nodes[w].prelim + layout.separation(h, v, w);
                self.nodes[v].modifier = self.nodes[v].prelim - midpoint;
            } else {
                self.nodes[v].prelim = midpoint;
            }
        } else if let Some(w) = left_sibling {
            self.nodes[v].prelim = self.nodes[w].prelim + layout.separation(h, v, w);
        }

        let parent = self.parent(h, v);
        let default = self.nodes[parent].default_ancestor.unwrap_or(siblings[0]);
        self.nodes[parent].default_ancestor =
            Some(self.apportion(layout, h, v, left_sibling, default));
    }

    fn apportion(
        &mut self,
        layout: &TreeLayout,
        h: &Hierarchy,
        v: NodeId,
        left_sibling: Option<NodeId>,
        mut ancestor: NodeId,
    ) -> NodeId {
        let Some(w) = left_sibling else {
            return ancestor;
        };

        // i/o: inside/outside contour, p/m: right (plus) / left (minus) subtree
        let mut vip = v;
        let mut vop = v;
        let mut vim = w;
        let mut vom = self.siblings(h, v)[0];
        let mut sip = self.nodes[vip].modifier;
        let mut sop = self.nodes[vop].modifier;
        let mut sim = self.nodes[vim].modifier;
        let mut som = self.nodes[vom].modifier;

        let mut next_im = self.next_right(h, vim);
        let mut next_ip = self.next_left(h, vip);
        while let (Some(im), Some(ip)) = (next_im, next_ip) {
            vim = im;
            vip = ip;
            // Outer contours are at least as deep as the inner ones.
            vom = self.next_left(h, vom).unwrap_or(vom);
            vop = self.next_right(h, vop).unwrap_or(vop);
            self.nodes[vop].ancestor = v;

            let shift = self.nodes[vim].prelim + sim - self.nodes[vip].prelim - sip
                + layout.separation(h, vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(h, vim, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.nodes[vim].modifier;
            sip += self.nodes[vip].modifier;
            som += self.nodes[vom].modifier;
            sop += self.nodes[vop].modifier;

            next_im = self.next_right(h, vim);
            next_ip = self.next_left(h, vip);
        }

        if let Some(im) = next_im
            && self.next_right(h, vop).is_none()
        {
            self.nodes[vop].thread = Some(im);
            self.nodes[vop].modifier += sim - sop;
        }
        if let Some(ip) = next_ip
            && self.next_left(h, vom).is_none()
        {
            self.nodes[vom].thread = Some(ip);
            self.nodes[vom].modifier += sip - som;
            ancestor = v;
        }

        ancestor
    }

    fn second_walk(&mut self, h: &mut Hierarchy, v: NodeId) {
        let parent = self.parent(h, v);
        let parent_modifier = self.nodes[parent].modifier;
        h.node_mut(v).x = self.nodes[v].prelim + parent_modifier;
        self.nodes[v].modifier += parent_modifier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeTree;
    use crate::tree::normalize::normalize;

    fn laid_out(tree: &RecipeTree, width: f64, height: f64) -> Hierarchy {
        let mut h = Hierarchy::new(normalize(tree));
        TreeLayout::new(width, height).apply(&mut h);
        h
    }

    fn by_name<'a>(h: &'a Hierarchy, name: &str) -> &'a crate::tree::HierarchyNode {
        let id = h
            .descendants()
            .into_iter()
            .find(|&id| h.node(id).data.name == name)
            .unwrap();
        h.node(id)
    }

    #[test]
    fn test_single_node_is_centred() {
        let h = laid_out(&RecipeTree::base("Water"), 400.0, 300.0);
        assert!((h.root().x - 200.0).abs() < 1e-9);
        assert!(h.root().y.abs() < 1e-9);
    }

    #[test]
    fn test_two_children_are_symmetric() {
        let tree = RecipeTree::new("Mud")
            .with_ingredients([RecipeTree::base("Water"), RecipeTree::base("Earth")]);
        let h = laid_out(&tree, 400.0, 300.0);

        let water = by_name(&h, "Water");
        let earth = by_name(&h, "Earth");
        // Leftmost and rightmost nodes sit half a separation in from the edges.
        assert!((water.x - 100.0).abs() < 1e-9, "water.x = {}", water.x);
        assert!((earth.x - 300.0).abs() < 1e-9, "earth.x = {}", earth.x);
        assert!((h.root().x - 200.0).abs() < 1e-9);
        assert!((water.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_rows_follow_depth() {
        let tree = RecipeTree::new("A").with_ingredients([
            RecipeTree::new("B").with_ingredients([RecipeTree::base("C")]),
            RecipeTree::base("D"),
        ]);
        let h = laid_out(&tree, 100.0, 200.0);
        assert!(by_name(&h, "A").y.abs() < 1e-9);
        assert!((by_name(&h, "B").y - 100.0).abs() < 1e-9);
        assert!((by_name(&h, "D").y - 100.0).abs() < 1e-9);
        assert!((by_name(&h, "C").y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_parent_centred_over_children() {
        let tree = RecipeTree::new("root").with_ingredients([
            RecipeTree::new("left").with_ingredients([
                RecipeTree::base("a"),
                RecipeTree::base("b"),
                RecipeTree::base("c"),
            ]),
            RecipeTree::new("right")
                .with_ingredients([RecipeTree::base("d"), RecipeTree::base("e")]),
        ]);
        let h = laid_out(&tree, 1000.0, 100.0);

        let left = by_name(&h, "left");
        let mid = (by_name(&h, "a").x + by_name(&h, "c").x) / 2.0;
        assert!((left.x - mid).abs() < 1e-9);

        let right = by_name(&h, "right");
        let mid = (by_name(&h, "d").x + by_name(&h, "e").x) / 2.0;
        assert!((right.x - mid).abs() < 1e-9);
    }

    #[test]
    fn test_nodes_in_a_row_do_not_overlap() {
        let tree = RecipeTree::new("root").with_ingredients([
            RecipeTree::new("x").with_ingredients([
                RecipeTree::new("x1").with_ingredients([RecipeTree::base("x11"), RecipeTree::base("x12")]),
                RecipeTree::base("x2"),
            ]),
            RecipeTree::base("y"),
            RecipeTree::new("z").with_ingredients([
                RecipeTree::base("z1"),
                RecipeTree::new("z2").with_ingredients([RecipeTree::base("z21"), RecipeTree::base("z22")]),
            ]),
        ]);
        let h = laid_out(&tree, 1200.0, 300.0);

        for depth in 0..=3 {
            let mut xs: Vec<f64> = h
                .descendants()
                .into_iter()
                .map(|id| h.node(id))
                .filter(|n| n.depth == depth)
                .map(|n| n.x)
                .collect();
            xs.sort_by(f64::total_cmp);
            for pair in xs.windows(2) {
                assert!(pair[1] - pair[0] > 1.0, "overlap at depth {depth}: {xs:?}");
            }
        }
        for id in h.descendants() {
            let x = h.node(id).x;
            assert!((0.0..=1200.0).contains(&x), "x out of bounds: {x}");
        }
    }

    #[test]
    fn test_collapsed_subtrees_are_not_laid_out() {
        let mut tree = RecipeTree::base("leaf");
        for i in (0..20).rev() {
            tree = RecipeTree::new(format!("n{i}")).with_ingredients([tree]);
        }
        let mut h = Hierarchy::new(normalize(&tree));
        h.limit_depth(15);
        TreeLayout::new(100.0, 150.0).apply(&mut h);

        let deepest = h.descendants().into_iter().map(|id| h.node(id).y).fold(0.0, f64::max);
        assert!((deepest - 150.0).abs() < 1e-9);
    }
}
