//! Standalone HTML page for a panel.

use super::{PANEL_TITLE, PLACEHOLDER_HINT, PLACEHOLDER_TITLE, VisualizationPanel};
use crate::render::NodeKind;
use crate::render::escape::{escape_attr, escape_text};
use std::fmt::{self, Write};

const STYLES: &str = r#"
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: #f9fafb;
            color: #1f2937;
            margin: 0;
            padding: 20px;
            line-height: 1.5;
        }

        .panel {
            max-width: 1200px;
            margin: 0 auto;
            background-color: #fff;
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
            overflow: hidden;
        }

        .panel-header {
            padding: 16px 20px;
            border-bottom: 1px solid #e5e7eb;
        }

        .panel-header h2 {
            margin: 0;
            font-size: 1.25em;
        }

        .selector {
            padding: 8px 20px;
            border-bottom: 1px solid #e5e7eb;
            color: #4b5563;
        }

        .visualization {
            height: 500px;
            overflow: auto;
            border-bottom: 1px solid #e5e7eb;
            background: linear-gradient(to bottom right, #f9fafb, #fff);
        }

        .placeholder {
            height: 100%;
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            color: #6b7280;
        }

        .placeholder-title {
            font-size: 1.1em;
            font-weight: 500;
        }

        .details {
            padding: 16px 20px;
        }

        .details table {
            border-collapse: collapse;
        }

        .details th {
            text-align: left;
            padding: 2px 16px 2px 0;
            color: #6b7280;
            font-weight: 500;
        }

        .legend {
            display: flex;
            flex-wrap: wrap;
            gap: 16px;
            padding: 12px 20px;
            border-top: 1px solid #e5e7eb;
            font-size: 0.9em;
        }

        .swatch {
            display: inline-block;
            width: 12px;
            height: 12px;
            border-radius: 50%;
            margin-right: 6px;
            vertical-align: middle;
        }

        .footer {
            margin-top: 16px;
            text-align: center;
            font-size: 0.8em;
            color: #9ca3af;
        }
    </style>
"#;

/// Write the full HTML page for `panel`.
///
/// An unmounted panel gets an empty diagram area rather than a drawing.
pub fn write_page(out: &mut impl Write, panel: &VisualizationPanel) -> fmt::Result {
    let props = panel.props();
    let title = if props.target_element.is_empty() {
        PANEL_TITLE.to_string()
    } else {
        format!("{PANEL_TITLE}: {}", props.target_element)
    };

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(out, "    <title>{}</title>", escape_text(&title))?;
    writeln!(out, "{STYLES}")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<div class=\"panel\">")?;

    writeln!(out, "<div class=\"panel-header\">")?;
    writeln!(out, "    <h2>{PANEL_TITLE}</h2>")?;
    writeln!(out, "</div>")?;

    if let Some(label) = panel.selector_label() {
        writeln!(out, "<div class=\"selector\">{}</div>", escape_text(&label))?;
    }

    writeln!(out, "<div class=\"visualization\">")?;
    if panel.shows_placeholder() {
        writeln!(out, "    <div class=\"placeholder\">")?;
        writeln!(
            out,
            "        <p class=\"placeholder-title\">{PLACEHOLDER_TITLE}</p>"
        )?;
        writeln!(out, "        <p>{}</p>", escape_text(PLACEHOLDER_HINT))?;
        writeln!(out, "    </div>")?;
    } else if let Some(surface) = panel.surface() {
        out.write_str(surface.content())?;
    }
    writeln!(out, "</div>")?;

    if let Some(details) = panel.details() {
        writeln!(out, "<div class=\"details\">")?;
        writeln!(out, "    <table>")?;
        for (label, value) in details.rows() {
            writeln!(
                out,
                "        <tr><th>{label}</th><td>{}</td></tr>",
                escape_text(&value)
            )?;
        }
        writeln!(out, "    </table>")?;
        writeln!(out, "</div>")?;
    }

    if !panel.shows_placeholder() {
        write_legend(out, panel)?;
    }

    writeln!(out, "</div>")?;
    writeln!(
        out,
        "<div class=\"footer\">Generated by recipe-viz v{} on {}</div>",
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_legend(out: &mut impl Write, panel: &VisualizationPanel) -> fmt::Result {
    let palette = panel.renderer().palette();
    writeln!(out, "<div class=\"legend\">")?;
    for kind in NodeKind::ALL {
        writeln!(
            out,
            "    <span><span class=\"swatch\" style=\"background-color: {}\"></span>{}</span>",
            escape_attr(kind.color(palette)),
            kind.label()
        )?;
    }
    writeln!(out, "</div>")
}

/// Convenience wrapper around [`write_page`].
pub fn write_page_to_string(panel: &VisualizationPanel) -> String {
    let mut html = String::new();
    if let Err(e) = write_page(&mut html, panel) {
        tracing::warn!("HTML output failed: {e}");
        html.clear();
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeTree;
    use crate::panel::PanelProps;
    use crate::render::Renderer;
    use std::sync::Arc;

    fn mounted(trees: Vec<RecipeTree>, index: usize) -> VisualizationPanel {
        let mut panel = VisualizationPanel::new(
            PanelProps::new(trees.into(), index, "Mud", "bfs"),
            Renderer::default(),
            Box::new(|_| {}),
        );
        panel.mount(960.0);
        panel
    }

    #[test]
    fn test_page_with_single_tree() {
        let tree = RecipeTree::new("Mud")
            .with_ingredients([RecipeTree::base("Water"), RecipeTree::base("Earth")]);
        let html = write_page_to_string(&mounted(vec![tree], 0));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h2>Recipe Visualization</h2>"));
        assert!(!html.contains("class=\"selector\""));
        assert_eq!(html.matches("<svg").count(), 1);
        assert!(html.contains("<th>Base elements</th><td>2</td>"));
        assert!(html.contains("Water, Earth"));
        assert!(html.contains("class=\"legend\""));
    }

    #[test]
    fn test_page_with_alternatives_shows_selector() {
        let html = write_page_to_string(&mounted(
            vec![RecipeTree::new("Mud"), RecipeTree::new("Mud")],
            1,
        ));
        assert!(html.contains("<div class=\"selector\">Recipe 2 of 2</div>"));
    }

    #[test]
    fn test_empty_page_shows_placeholder() {
        let panel = mounted(Vec::new(), 0);
        let html = write_page_to_string(&panel);
        assert!(html.contains("No recipe data to display"));
        assert!(html.contains("&quot;Find Recipes&quot;"));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("class=\"details\""));
        assert!(!html.contains("class=\"legend\""));
    }

    #[test]
    fn test_bad_index_has_no_drawing_or_details() {
        let trees: Arc<[RecipeTree]> = vec![RecipeTree::new("A"), RecipeTree::new("B")].into();
        let mut panel = VisualizationPanel::new(
            PanelProps::new(trees, 9, "A", "bfs"),
            Renderer::default(),
            Box::new(|_| {}),
        );
        panel.mount(960.0);
        let html = write_page_to_string(&panel);
        assert!(!html.contains("<svg"));
        assert!(!html.contains("class=\"details\""));
        assert!(!html.contains("No recipe data to display"));
    }
}
