//! Configuration for recipe-viz.
//!
//! - Type-safe configuration structures with defaults matching the panel
//!   the renderer reproduces (960×500 canvas, 15 visible levels)
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//!
//! # Configuration File
//!
//! Place a `.recipe-viz.yaml` file in your project root or
//! `~/.config/recipe-viz/`:
//!
//! ```yaml
//! render:
//!   width: 1200
//!   max_visible_depth: 10
//! tui:
//!   theme: light
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{AppConfig, Margins, Palette, RenderConfig, TuiConfig};
pub use validation::{ConfigError, MAX_DEPTH_SETTING, Validatable, is_hex_color};

pub use file::{
    CONFIG_FILE_NAMES, ConfigFileError, config_search_dirs, discover_config_file, generate_full_example_config,
    load_config_file, load_or_default, user_config_dir,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_mentions_sections() {
        let schema = generate_json_schema();
        assert!(schema.contains("render"));
        assert!(schema.contains("palette"));
        assert!(schema.contains("max_visible_depth"));
    }
}
