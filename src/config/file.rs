//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".recipe-viz.yaml",
    ".recipe-viz.yml",
    "recipe-viz.yaml",
    "recipe-viz.yml",
    ".recipe-vizrc",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/recipe-viz/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    config_search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in order, after any explicit
/// path.
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    search_dirs_from(cwd.as_deref(), user_config_dir(), dirs::home_dir())
}

fn search_dirs_from(
    cwd: Option<&Path>,
    config_dir: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let git_root = cwd.and_then(find_git_root);
    let mut dirs: Vec<PathBuf> = Vec::with_capacity(4);
    for dir in [cwd.map(Path::to_path_buf), git_root, config_dir, home]
        .into_iter()
        .flatten()
    {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}

/// `~/.config/recipe-viz` or the platform equivalent.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("recipe-viz"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r##"# recipe-viz Configuration File
# =============================
#
# Place it at:
#   - .recipe-viz.yaml in your project root
#   - ~/.config/recipe-viz/recipe-viz.yaml for global config
#
# CLI arguments always override file settings.

# Canvas geometry
render:
  # Container width and height in pixels
  width: 960
  height: 500
  margins:
    top: 40
    right: 90
    bottom: 50
    left: 90
  # Nodes at this depth keep their name but lose their children
  max_visible_depth: 15
  # Show "Showing N levels" when more nodes than this are drawn
  deep_tree_caption_threshold: 50
  node_radius: 6

# Colours (#rgb or #rrggbb)
palette:
  base_element: "#FFEB3B"
  circular_reference: "#FF9800"
  no_recipe: "#E0E0E0"
  root: "#4CAF50"
  collapsed: "#9C27B0"
  regular: "#2196F3"
  link: "#ccc"

# Interactive viewer
tui:
  # Theme: dark, light
  theme: dark
  mouse_enabled: true
  zoom_step: 1.2
  pan_step: 40
"##
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".recipe-viz.yaml");
        std::fs::write(&config_path, "render:\n  width: 800\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_search_dirs_include_git_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("recipes").join("steam");
        std::fs::create_dir_all(&nested).unwrap();
        let home = PathBuf::from("/home/someone");

        let dirs = search_dirs_from(Some(&nested), None, Some(home.clone()));
        assert_eq!(dirs, vec![nested.clone(), tmp.path().to_path_buf(), home]);

        // At the repository root itself the git step adds nothing new.
        let dirs = search_dirs_from(Some(tmp.path()), None, None);
        assert_eq!(dirs, vec![tmp.path().to_path_buf()]);
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r##"
render:
  width: 1200
  max_visible_depth: 8
palette:
  root: "#00ff00"
tui:
  mouse_enabled: false
"##;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.render.width, 1200.0);
        assert_eq!(config.render.max_visible_depth, 8);
        // Unset fields keep their defaults.
        assert_eq!(config.render.height, 500.0);
        assert_eq!(config.palette.root, "#00ff00");
        assert_eq!(config.palette.regular, "#2196F3");
        assert!(!config.tui.mouse_enabled);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "render: [unterminated").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_full_example_config_parses_to_defaults() {
        let config: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "tui:\n  theme: light\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
