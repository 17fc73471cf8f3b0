//! **Draw crafting recipe trees as tidy top-down diagrams.**
//!
//! `recipe-viz` takes the recipe trees found by an element-combination
//! search (every alternative way of crafting a target element from base
//! elements) and renders one of them at a time: as a standalone SVG, an
//! HTML page with a selector and details table, a JSON scene, a plain-text
//! summary, or on a braille canvas in an interactive terminal viewer.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`RecipeTree`] and [`RecipeDocument`], the input data.
//! - **[`tree`]**: normalization to display nodes, the depth limiter and the
//!   tidy tree layout.
//! - **[`render`]**: the positioned [`Scene`], its SVG serialization, and
//!   pan/zoom via [`ZoomTransform`].
//! - **[`panel`]**: the [`VisualizationPanel`], which owns one drawing
//!   surface and redraws it whenever its [`PanelProps`] change.
//! - **[`pipeline`]**: load → render → write, shared by the CLI commands.
//! - **[`tui`]**: the interactive viewer.
//!
//! ## Getting Started
//!
//! ```
//! use recipe_viz::{RecipeDocument, Renderer};
//! use recipe_viz::render::Surface;
//!
//! let doc = RecipeDocument::from_json_str(r#"{
//!     "targetElement": "Mud",
//!     "algorithm": "bfs",
//!     "trees": [{"name": "Mud", "ingredients": [
//!         {"name": "Water", "isBaseElement": true},
//!         {"name": "Earth", "isBaseElement": true}
//!     ]}]
//! }"#)?;
//!
//! let mut surface = Surface::new(960.0);
//! let scene = Renderer::default().visualize_tree(&doc.trees[0], &mut surface);
//!
//! assert_eq!(scene.node_count(), 3);
//! assert!(surface.content().starts_with("<svg"));
//! # Ok::<(), recipe_viz::RecipeVizError>(())
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Layout and canvas math moves between usize, u16 and f64 freely
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    // Variable names like `x0`/`y0` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod panel;
pub mod pipeline;
pub mod render;
pub mod tree;
pub mod tui;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, Validatable};
pub use error::{ErrorContext, RecipeVizError, Result};
pub use model::{RecipeDocument, RecipeTree, TreeStats};
pub use panel::{PanelProps, VisualizationPanel};
pub use render::{OutputFormat, Renderer, Scene, ZoomTransform};
