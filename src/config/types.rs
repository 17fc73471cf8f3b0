//! Configuration types for recipe-viz.

use crate::tree::MAX_VISIBLE_DEPTH;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a config file and overridden by
/// CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Canvas geometry and depth limits
    pub render: RenderConfig,
    /// Node and link colours
    pub palette: Palette,
    /// Interactive viewer settings
    pub tui: TuiConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Render Configuration
// ============================================================================

/// Space reserved around the laid-out tree, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 90.0,
            bottom: 50.0,
            left: 90.0,
        }
    }
}

/// Canvas and rendering limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RenderConfig {
    /// Container width in pixels (the layout uses this minus the margins)
    #[schemars(range(min = 1.0))]
    pub width: f64,
    /// Container height in pixels
    #[schemars(range(min = 1.0))]
    pub height: f64,
    pub margins: Margins,
    /// Nodes this deep with children are collapsed
    #[schemars(range(min = 1, max = 1000))]
    pub max_visible_depth: usize,
    /// Show the depth caption when more nodes than this are drawn
    pub deep_tree_caption_threshold: usize,
    /// Circle radius in pixels
    pub node_radius: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 500.0,
            margins: Margins::default(),
            max_visible_depth: MAX_VISIBLE_DEPTH,
            deep_tree_caption_threshold: 50,
            node_radius: 6.0,
        }
    }
}

impl RenderConfig {
    /// Width available to the layout.
    pub fn inner_width(&self, container_width: f64) -> f64 {
        (container_width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Height available to the layout.
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Node and link colours as `#rgb` or `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Palette {
    pub base_element: String,
    pub circular_reference: String,
    pub no_recipe: String,
    pub root: String,
    pub collapsed: String,
    pub regular: String,
    pub link: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base_element: "#FFEB3B".to_string(),
            circular_reference: "#FF9800".to_string(),
            no_recipe: "#E0E0E0".to_string(),
            root: "#4CAF50".to_string(),
            collapsed: "#9C27B0".to_string(),
            regular: "#2196F3".to_string(),
            link: "#ccc".to_string(),
        }
    }
}

// ============================================================================
// TUI Configuration
// ============================================================================

/// Interactive viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark" or "light"
    pub theme: String,
    /// Enable mouse wheel zoom and drag panning
    pub mouse_enabled: bool,
    /// Zoom factor applied per key press or wheel notch
    #[schemars(range(min = 1.0))]
    pub zoom_step: f64,
    /// Pan distance per key press, in canvas pixels
    pub pan_step: f64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_enabled: true,
            zoom_step: 1.2,
            pan_step: 40.0,
        }
    }
}
