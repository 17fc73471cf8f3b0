//! Rendering of recipe trees.
//!
//! The pipeline for one tree is: normalize → hierarchy → depth limit →
//! layout → [`Scene`] → output. The scene is backend-neutral; this module
//! turns it into SVG (optionally wrapped in an HTML page), JSON, or a plain
//! text summary, and the TUI draws it on a terminal canvas.
//!
//! # Security
//!
//! Element names are scraped data. The `escape` module is used for every
//! name written into SVG or HTML.

pub mod escape;
mod scene;
mod style;
mod surface;
mod svg;
mod zoom;

pub use scene::{Caption, INTERACTION_HINT, Scene, SceneLink, SceneNode};
pub use style::NodeKind;
pub use surface::Surface;
pub use svg::{SvgStyle, link_path, write_svg};
pub use zoom::{ZoomBehavior, ZoomTransform};

use crate::config::{AppConfig, Palette, RenderConfig};
use crate::model::RecipeTree;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output formats for the `render` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Summary on a terminal, SVG otherwise
    #[default]
    Auto,
    /// Standalone SVG document
    Svg,
    /// HTML page with the diagram, tree selector label, details and legend
    Html,
    /// Laid-out scene as JSON
    Json,
    /// Short plain-text description
    Summary,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Svg => write!(f, "svg"),
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Draws recipe trees into a [`Surface`].
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    palette: Palette,
    transform: ZoomTransform,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl Renderer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.render.clone(),
            palette: config.palette.clone(),
            transform: ZoomTransform::IDENTITY,
        }
    }

    /// Initial pan/zoom applied to the drawing group.
    #[must_use]
    pub fn with_transform(mut self, transform: ZoomTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: ZoomTransform) {
        self.transform = transform;
    }

    /// Lay out `tree` for a container of `width` pixels.
    pub fn scene(&self, tree: &RecipeTree, width: f64) -> Scene {
        Scene::build(tree, width, &self.config)
    }

    /// Replace the surface's content with a fresh drawing of `tree`.
    pub fn visualize_tree(&self, tree: &RecipeTree, surface: &mut Surface) -> Scene {
        let scene = self.scene(tree, surface.width());
        let style = self.svg_style();
        let out = surface.begin_draw();
        if let Err(e) = write_svg(out, &scene, &style) {
            tracing::warn!("SVG output failed: {e}");
            out.clear();
        }
        scene
    }

    /// SVG text for an already-built scene.
    pub fn svg(&self, scene: &Scene) -> String {
        let mut out = String::new();
        if let Err(e) = write_svg(&mut out, scene, &self.svg_style()) {
            tracing::warn!("SVG output failed: {e}");
            out.clear();
        }
        out
    }

    fn svg_style(&self) -> SvgStyle<'_> {
        SvgStyle {
            palette: &self.palette,
            node_radius: self.config.node_radius,
            transform: self.transform,
        }
    }
}
