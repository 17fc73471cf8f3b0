//! Conversion from recipe trees to display nodes.

use crate::model::RecipeTree;
use serde::Serialize;

/// Deepest level shown before branches are collapsed.
pub const MAX_VISIBLE_DEPTH: usize = 15;

/// Per-node display attributes, shared by [`DisplayNode`] and the layout
/// hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub name: String,
    pub is_base_element: bool,
    pub is_circular_reference: bool,
    pub no_recipe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Set when the depth limiter dropped this node's children
    pub collapsed: bool,
}

impl NodeData {
    fn from_recipe(tree: &RecipeTree) -> Self {
        Self {
            name: tree.name.clone(),
            is_base_element: tree.is_base_element,
            is_circular_reference: tree.is_circular_reference,
            no_recipe: tree.no_recipe,
            image_path: tree.image_path.clone(),
            collapsed: false,
        }
    }
}

/// A recipe node ready for layout. Built fresh for every render.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DisplayNode {
    #[serde(flatten)]
    pub data: NodeData,
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    /// Total number of nodes in this subtree.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(node.children.iter());
        }
        total
    }
}

/// Normalize with the default guard of one level past [`MAX_VISIBLE_DEPTH`].
///
/// The extra level keeps the children of depth-15 nodes so the depth
/// limiter can still tell which nodes it truncates.
pub fn normalize(tree: &RecipeTree) -> DisplayNode {
    normalize_with_guard(tree, MAX_VISIBLE_DEPTH + 1)
}

/// Convert a recipe tree into a display tree of identical shape, stopping
/// at `guard_depth`: nodes at that depth are emitted without children.
///
/// Recursion is bounded by the guard, so arbitrarily deep input cannot
/// exhaust the stack here.
pub fn normalize_with_guard(tree: &RecipeTree, guard_depth: usize) -> DisplayNode {
    normalize_at(tree, 0, guard_depth)
}

fn normalize_at(tree: &RecipeTree, depth: usize, guard_depth: usize) -> DisplayNode {
    let children = if depth >= guard_depth {
        Vec::new()
    } else {
        tree.ingredients
            .iter()
            .map(|child| normalize_at(child, depth + 1, guard_depth))
            .collect()
    };

    DisplayNode {
        data: NodeData::from_recipe(tree),
        children,
    }
}
