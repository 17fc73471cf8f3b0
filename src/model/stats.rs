//! Summary statistics for a recipe tree, shown next to the diagram.

use super::RecipeTree;
use serde::Serialize;
use std::collections::HashSet;

/// Aggregate facts about one recipe tree.
///
/// Computed over the full source tree, not the depth-limited rendering, so
/// the counts describe the recipe rather than what fits on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub total_nodes: usize,
    /// Depth of the deepest node (root = 0)
    pub max_depth: usize,
    pub base_element_count: usize,
    /// Distinct base element names in first-seen (pre-order) order
    pub base_elements: Vec<String>,
    pub circular_reference_count: usize,
    pub no_recipe_count: usize,
}

impl TreeStats {
    /// Walk the tree with an explicit stack.
    pub fn compute(tree: &RecipeTree) -> Self {
        let mut stats = Self::default();
        let mut seen_base: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&RecipeTree, usize)> = vec![(tree, 0)];

        while let Some((node, depth)) = stack.pop() {
            stats.total_nodes += 1;
            stats.max_depth = stats.max_depth.max(depth);

            if node.is_base_element {
                stats.base_element_count += 1;
                if seen_base.insert(node.name.as_str()) {
                    stats.base_elements.push(node.name.clone());
                }
            }
            if node.is_circular_reference {
                stats.circular_reference_count += 1;
            }
            if node.no_recipe {
                stats.no_recipe_count += 1;
            }

            // Reverse so the leftmost ingredient is visited first.
            for child in node.ingredients.iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_node() {
        let stats = TreeStats::compute(&RecipeTree::base("Water"));
        assert_eq!(stats.total_nodes, 1);
        assert_eq!(stats.max_depth, 0);
        assert_eq!(stats.base_elements, vec!["Water".to_string()]);
    }

    #[test]
    fn test_counts_and_order() {
        let tree = RecipeTree::new("Brick").with_ingredients([
            RecipeTree::new("Mud")
                .with_ingredients([RecipeTree::base("Water"), RecipeTree::base("Earth")]),
            RecipeTree::new("Fire")
                .circular()
                .with_ingredients([RecipeTree::base("Earth")]),
            RecipeTree::new("Time").without_recipe(),
        ]);

        let stats = TreeStats::compute(&tree);
        assert_eq!(stats.total_nodes, 7);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.base_element_count, 3);
        assert_eq!(
            stats.base_elements,
            vec!["Water".to_string(), "Earth".to_string()]
        );
        assert_eq!(stats.circular_reference_count, 1);
        assert_eq!(stats.no_recipe_count, 1);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut tree = RecipeTree::base("Leaf");
        for i in 0..5_000 {
            tree = RecipeTree::new(format!("n{i}")).with_ingredients([tree]);
        }
        let stats = TreeStats::compute(&tree);
        assert_eq!(stats.total_nodes, 5_001);
        assert_eq!(stats.max_depth, 5_000);
    }
}
