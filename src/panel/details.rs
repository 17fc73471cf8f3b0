//! Summary of the selected tree.

use crate::model::{RecipeTree, TreeStats};
use serde::Serialize;
use std::fmt;

/// Target, algorithm label and statistics for the selected tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDetails {
    pub target_element: String,
    pub algorithm: String,
    /// Root name of the selected tree
    pub tree_name: String,
    pub index: usize,
    pub count: usize,
    pub stats: TreeStats,
}

impl TreeDetails {
    pub fn new(
        tree: &RecipeTree,
        target_element: &str,
        algorithm: &str,
        index: usize,
        count: usize,
    ) -> Self {
        Self {
            target_element: target_element.to_string(),
            algorithm: algorithm.to_string(),
            tree_name: tree.name.clone(),
            index,
            count,
            stats: TreeStats::compute(tree),
        }
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let stats = &self.stats;
        let mut rows = vec![
            ("Target", self.target_element.clone()),
            ("Algorithm", self.algorithm.clone()),
            ("Recipe", format!("{} of {}", self.index + 1, self.count)),
            ("Elements", stats.total_nodes.to_string()),
            ("Depth", stats.max_depth.to_string()),
            ("Base elements", stats.base_element_count.to_string()),
        ];
        if !stats.base_elements.is_empty() {
            rows.push(("Uses", stats.base_elements.join(", ")));
        }
        if stats.circular_reference_count > 0 {
            rows.push(("Circular", stats.circular_reference_count.to_string()));
        }
        if stats.no_recipe_count > 0 {
            rows.push(("No recipe", stats.no_recipe_count.to_string()));
        }
        rows
    }
}

impl fmt::Display for TreeDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.rows() {
            writeln!(f, "{label:<14}{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steam() -> RecipeTree {
        RecipeTree::new("Steam").with_ingredients([
            RecipeTree::base("Water"),
            RecipeTree::new("Fire").circular(),
            RecipeTree::new("Heat").without_recipe(),
        ])
    }

    #[test]
    fn test_rows_cover_stats() {
        let details = TreeDetails::new(&steam(), "Steam", "bfs", 0, 2);
        let rows = details.rows();
        assert_eq!(rows[0], ("Target", "Steam".to_string()));
        assert_eq!(rows[1], ("Algorithm", "bfs".to_string()));
        assert_eq!(rows[2], ("Recipe", "1 of 2".to_string()));
        assert!(rows.contains(&("Elements", "4".to_string())));
        assert!(rows.contains(&("Uses", "Water".to_string())));
        assert!(rows.contains(&("Circular", "1".to_string())));
        assert!(rows.contains(&("No recipe", "1".to_string())));
    }

    #[test]
    fn test_optional_rows_hidden_when_zero() {
        let details = TreeDetails::new(&RecipeTree::new("Lonely"), "Lonely", "dfs", 0, 1);
        let text = details.to_string();
        assert!(!text.contains("Circular"));
        assert!(!text.contains("No recipe"));
        assert!(!text.contains("Uses"));
        assert!(text.contains("Depth"));
    }
}
