//! Backend-neutral description of one rendered tree.
//!
//! A [`Scene`] is everything the SVG writer, the JSON report and the
//! terminal canvas need: positioned nodes with their visual kind, links,
//! and captions. It is rebuilt from scratch on every render.

use super::style::NodeKind;
use crate::config::{Margins, RenderConfig};
use crate::model::RecipeTree;
use crate::tree::{Hierarchy, TreeLayout, normalize_with_guard};
use serde::Serialize;

/// Hint shown in the top-left corner of every diagram.
pub const INTERACTION_HINT: &str = "Scroll to zoom, drag to pan";
const HINT_COLOR: &str = "#666";
const WARNING_COLOR: &str = "#f44336";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    pub depth: usize,
    /// Position inside the margin-translated drawing group
    pub x: f64,
    pub y: f64,
    pub kind: NodeKind,
    /// Whether any children are drawn below this node
    pub has_children: bool,
    pub collapsed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneLink {
    pub source: (f64, f64),
    pub target: (f64, f64),
}

/// Free text drawn in canvas coordinates, outside the zoomable group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Caption {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Full canvas width, margins included
    pub width: f64,
    /// Full canvas height, margins included
    pub height: f64,
    pub margins: Margins,
    pub nodes: Vec<SceneNode>,
    pub links: Vec<SceneLink>,
    pub captions: Vec<Caption>,
    /// Nodes whose children were dropped by the depth limit
    pub collapsed_count: usize,
}

impl Scene {
    /// Run the full pipeline for one tree: normalize, limit depth, lay out,
    /// classify.
    ///
    /// `container_width` is the width of the surface being drawn into; the
    /// height always comes from the config.
    pub fn build(tree: &RecipeTree, container_width: f64, config: &RenderConfig) -> Self {
        let max_depth = config.max_visible_depth;
        let guard_depth = max_depth.saturating_add(1);
        let mut hierarchy = Hierarchy::new(normalize_with_guard(tree, guard_depth));
        let collapsed_count = hierarchy.limit_depth(max_depth);
        TreeLayout::new(config.inner_width(container_width), config.inner_height())
            .apply(&mut hierarchy);

        let nodes: Vec<SceneNode> = hierarchy
            .descendants()
            .into_iter()
            .map(|id| {
                let node = hierarchy.node(id);
                SceneNode {
                    name: node.data.name.clone(),
                    image_path: node.data.image_path.clone(),
                    depth: node.depth,
                    x: node.x,
                    y: node.y,
                    kind: NodeKind::classify(node),
                    has_children: node.has_children(),
                    collapsed: node.data.collapsed,
                }
            })
            .collect();

        let links = hierarchy
            .links()
            .into_iter()
            .map(|(parent, child)| {
                let (p, c) = (hierarchy.node(parent), hierarchy.node(child));
                SceneLink {
                    source: (p.x, p.y),
                    target: (c.x, c.y),
                }
            })
            .collect();

        let mut captions = vec![Caption {
            x: 10.0,
            y: 20.0,
            text: INTERACTION_HINT.to_string(),
            color: HINT_COLOR,
        }];
        // Count heuristic only; it does not check that truncation happened.
        if nodes.len() > config.deep_tree_caption_threshold {
            captions.push(Caption {
                x: 10.0,
                y: 40.0,
                text: format!("Showing {max_depth} levels (tree is deep)"),
                color: WARNING_COLOR,
            });
        }

        tracing::debug!(
            tree = %tree.name,
            nodes = nodes.len(),
            collapsed = collapsed_count,
            "built scene"
        );

        Self {
            width: container_width,
            height: config.height,
            margins: config.margins,
            nodes,
            links,
            captions,
            collapsed_count,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the depth caption is shown.
    pub fn has_depth_caption(&self) -> bool {
        self.captions.iter().any(|c| c.color == WARNING_COLOR)
    }
}
