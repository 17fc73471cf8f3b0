//! Configuration validation for recipe-viz.

use super::types::{AppConfig, Palette, RenderConfig, TuiConfig};

/// Largest accepted `render.max_visible_depth`.
pub const MAX_DEPTH_SETTING: usize = 1_000;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.render.validate());
        errors.extend(self.palette.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

impl Validatable for RenderConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.width.is_finite() && self.width > 0.0) {
            errors.push(ConfigError {
                field: "render.width".to_string(),
                message: format!("Width must be a positive number, got {}", self.width),
            });
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            errors.push(ConfigError {
                field: "render.height".to_string(),
                message: format!("Height must be a positive number, got {}", self.height),
            });
        }

        let m = &self.margins;
        for (name, value) in [
            ("top", m.top),
            ("right", m.right),
            ("bottom", m.bottom),
            ("left", m.left),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError {
                    field: format!("render.margins.{name}"),
                    message: format!("Margin must be non-negative, got {value}"),
                });
            }
        }
        if m.top + m.bottom >= self.height {
            errors.push(ConfigError {
                field: "render.margins".to_string(),
                message: "Vertical margins leave no room for the tree".to_string(),
            });
        }
        if m.left + m.right >= self.width {
            errors.push(ConfigError {
                field: "render.margins".to_string(),
                message: "Horizontal margins leave no room for the tree".to_string(),
            });
        }

        if !(1..=MAX_DEPTH_SETTING).contains(&self.max_visible_depth) {
            errors.push(ConfigError {
                field: "render.max_visible_depth".to_string(),
                message: format!(
                    "Max visible depth must be between 1 and {MAX_DEPTH_SETTING}, got {}",
                    self.max_visible_depth
                ),
            });
        }
        if !(self.node_radius.is_finite() && self.node_radius > 0.0) {
            errors.push(ConfigError {
                field: "render.node_radius".to_string(),
                message: format!("Node radius must be positive, got {}", self.node_radius),
            });
        }

        errors
    }
}

impl Validatable for Palette {
    fn validate(&self) -> Vec<ConfigError> {
        [
            ("base_element", &self.base_element),
            ("circular_reference", &self.circular_reference),
            ("no_recipe", &self.no_recipe),
            ("root", &self.root),
            ("collapsed", &self.collapsed),
            ("regular", &self.regular),
            ("link", &self.link),
        ]
        .into_iter()
        .filter(|(_, value)| !is_hex_color(value))
        .map(|(name, value)| ConfigError {
            field: format!("palette.{name}"),
            message: format!("'{value}' is not a #rgb or #rrggbb colour"),
        })
        .collect()
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let valid_themes = ["dark", "light"];
        if !valid_themes.contains(&self.theme.as_str()) {
            errors.push(ConfigError {
                field: "tui.theme".to_string(),
                message: format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    valid_themes.join(", ")
                ),
            });
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            errors.push(ConfigError {
                field: "tui.zoom_step".to_string(),
                message: format!("Zoom step must be greater than 1, got {}", self.zoom_step),
            });
        }
        if !(self.pan_step.is_finite() && self.pan_step > 0.0) {
            errors.push(ConfigError {
                field: "tui.pan_step".to_string(),
                message: format!("Pan step must be positive, got {}", self.pan_step),
            });
        }
        errors
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
