//! Data model for recipe trees.
//!
//! [`RecipeTree`] is the externally computed crafting tree; it is consumed
//! as-is and never validated beyond what deserialization enforces.
//! [`RecipeDocument`] bundles the alternative trees for one target element
//! with the labels shown in the details view.

mod recipe;
mod stats;

pub use recipe::{RecipeDocument, RecipeTree, UNKNOWN_ALGORITHM};
pub use stats::TreeStats;
