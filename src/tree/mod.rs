//! Tree pipeline: normalize, limit depth, lay out.
//!
//! ```
//! use recipe_viz::model::RecipeTree;
//! use recipe_viz::tree::{normalize, Hierarchy, TreeLayout, MAX_VISIBLE_DEPTH};
//!
//! let tree = RecipeTree::new("Mud")
//!     .with_ingredients([RecipeTree::base("Water"), RecipeTree::base("Earth")]);
//!
//! let mut hierarchy = Hierarchy::new(normalize(&tree));
//! hierarchy.limit_depth(MAX_VISIBLE_DEPTH);
//! TreeLayout::new(600.0, 400.0).apply(&mut hierarchy);
//!
//! assert_eq!(hierarchy.len(), 3);
//! assert_eq!(hierarchy.root().x, 300.0);
//! ```

mod hierarchy;
mod layout;
mod normalize;

pub use hierarchy::{Hierarchy, HierarchyNode, NodeId};
pub use layout::TreeLayout;
pub use normalize::{
    DisplayNode, MAX_VISIBLE_DEPTH, NodeData, normalize, normalize_with_guard,
};
