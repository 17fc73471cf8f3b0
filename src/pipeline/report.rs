//! Turning a loaded document into one of the output formats.

use crate::config::AppConfig;
use crate::error::{RecipeVizError, RenderErrorKind, Result};
use crate::model::RecipeDocument;
use crate::panel::{
    PANEL_TITLE, PLACEHOLDER_HINT, PLACEHOLDER_TITLE, PanelProps, TreeDetails,
    VisualizationPanel, write_page_to_string,
};
use crate::render::{OutputFormat, Renderer, Scene, ZoomTransform};
use serde::Serialize;
use std::fmt::Write;

/// Result of rendering one selection.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub content: String,
    /// Whether a tree was actually drawn
    pub drawn: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    target_element: &'a str,
    algorithm: &'a str,
    tree_count: usize,
    tree_index: usize,
    details: Option<TreeDetails>,
    scene: Option<&'a Scene>,
}

/// Render tree `index` of `document` in `format`.
///
/// `format` must already be resolved; `Auto` is treated as SVG.
pub fn render_document(
    document: &RecipeDocument,
    index: usize,
    format: OutputFormat,
    config: &AppConfig,
    transform: ZoomTransform,
) -> Result<Rendered> {
    let renderer = Renderer::new(config).with_transform(transform);
    let mut panel = VisualizationPanel::new(
        PanelProps::from_document(document, index),
        renderer,
        Box::new(|_| {}),
    );
    panel.mount(config.render.width);
    let drawn = panel.scene().is_some();

    let content = match format {
        OutputFormat::Auto | OutputFormat::Svg => panel
            .surface()
            .map(|s| s.content().to_string())
            .unwrap_or_default(),
        OutputFormat::Html => write_page_to_string(&panel),
        OutputFormat::Json => {
            let report = JsonReport {
                target_element: &document.target_element,
                algorithm: &document.algorithm,
                tree_count: document.len(),
                tree_index: index,
                details: panel.details(),
                scene: panel.scene(),
            };
            serde_json::to_string_pretty(&report).map_err(|e| {
                RecipeVizError::render(
                    "JSON report",
                    RenderErrorKind::JsonSerialization(e.to_string()),
                )
            })?
        }
        OutputFormat::Summary => summary(&panel)?,
    };

    Ok(Rendered { content, drawn })
}

fn summary(panel: &VisualizationPanel) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    let props = panel.props();
    writeln!(out, "{PANEL_TITLE}")?;

    if panel.shows_placeholder() {
        writeln!(out, "{PLACEHOLDER_TITLE}")?;
        writeln!(out, "{PLACEHOLDER_HINT}")?;
        return Ok(out);
    }
    if let Some(label) = panel.selector_label() {
        writeln!(out, "{label}")?;
    }

    match (panel.details(), panel.scene()) {
        (Some(details), Some(scene)) => {
            writeln!(out)?;
            write!(out, "{details}")?;
            writeln!(out)?;
            writeln!(
                out,
                "Drawn: {} nodes, {} links, {} collapsed",
                scene.node_count(),
                scene.links.len(),
                scene.collapsed_count
            )?;
            for caption in scene.captions.iter().skip(1) {
                writeln!(out, "{}", caption.text)?;
            }
        }
        _ => {
            writeln!(
                out,
                "Tree index {} is out of range ({} available)",
                props.current_tree_index,
                props.current_trees.len()
            )?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeTree;

    fn document() -> RecipeDocument {
        RecipeDocument::new(
            "Mud",
            "bfs",
            vec![
                RecipeTree::new("Mud")
                    .with_ingredients([RecipeTree::base("Water"), RecipeTree::base("Earth")]),
                RecipeTree::new("Mud").with_ingredients([RecipeTree::base("Rain")]),
            ],
        )
    }

    fn render(index: usize, format: OutputFormat) -> Rendered {
        render_document(
            &document(),
            index,
            format,
            &AppConfig::default(),
            ZoomTransform::IDENTITY,
        )
        .unwrap()
    }

    #[test]
    fn test_svg_for_selected_tree() {
        let out = render(1, OutputFormat::Svg);
        assert!(out.drawn);
        assert!(out.content.contains("Rain"));
        assert!(!out.content.contains("Earth"));
    }

    #[test]
    fn test_out_of_range_renders_nothing() {
        let out = render(2, OutputFormat::Svg);
        assert!(!out.drawn);
        assert!(out.content.is_empty());

        let summary = render(2, OutputFormat::Summary);
        assert!(summary.content.contains("out of range"));
    }

    #[test]
    fn test_json_report_fields() {
        let out = render(0, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&out.content).unwrap();
        assert_eq!(value["targetElement"], "Mud");
        assert_eq!(value["treeCount"], 2);
        assert_eq!(value["scene"]["nodes"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["details"]["stats"]["baseElementCount"], 2);
        assert_eq!(value["scene"]["nodes"][0]["kind"], "root");
    }

    #[test]
    fn test_summary_lists_selector_and_counts() {
        let out = render(0, OutputFormat::Summary);
        assert!(out.content.starts_with("Recipe Visualization\n"));
        assert!(out.content.contains("Recipe 1 of 2"));
        assert!(out.content.contains("Drawn: 3 nodes, 2 links, 0 collapsed"));
    }

    #[test]
    fn test_empty_document_summary_is_placeholder() {
        let empty = RecipeDocument::new("", "bfs", Vec::new());
        let out = render_document(
            &empty,
            0,
            OutputFormat::Summary,
            &AppConfig::default(),
            ZoomTransform::IDENTITY,
        )
        .unwrap();
        assert!(!out.drawn);
        assert!(out.content.contains("No recipe data to display"));
    }
}
