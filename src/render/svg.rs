//! SVG writer for a [`Scene`].

use super::escape::{escape_attr, escape_text};
use super::scene::{Scene, SceneLink, SceneNode};
use super::zoom::ZoomTransform;
use crate::config::Palette;
use std::fmt::{self, Write};

/// Horizontal label offset from the node centre.
const LABEL_OFFSET: f64 = 13.0;

/// Styling inputs that do not come from the scene itself.
#[derive(Debug, Clone, Copy)]
pub struct SvgStyle<'a> {
    pub palette: &'a Palette,
    pub node_radius: f64,
    pub transform: ZoomTransform,
}

/// Round to three decimals so output stays compact and stable.
pub(crate) fn num(v: f64) -> f64 {
    let rounded = (v * 1000.0).round() / 1000.0;
    // Avoid printing "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Vertical link: a cubic curve leaving the parent and entering the child
/// vertically, with both control points at the midpoint row.
pub fn link_path(link: &SceneLink) -> String {
    let (x0, y0) = link.source;
    let (x1, y1) = link.target;
    let ym = (y0 + y1) / 2.0;
    format!(
        "M{},{}C{},{},{},{},{},{}",
        num(x0),
        num(y0),
        num(x0),
        num(ym),
        num(x1),
        num(ym),
        num(x1),
        num(y1)
    )
}

/// Write the complete `<svg>` element for `scene`.
pub fn write_svg(out: &mut impl Write, scene: &Scene, style: &SvgStyle<'_>) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="recipe-tree" width="{}" height="{}">"#,
        num(scene.width),
        num(scene.height)
    )?;
    writeln!(
        out,
        r#"  <g class="zoom" transform="{}">"#,
        style.transform.to_svg()
    )?;
    writeln!(
        out,
        r#"    <g transform="translate({},{})">"#,
        num(scene.margins.left),
        num(scene.margins.top)
    )?;

    for link in &scene.links {
        writeln!(
            out,
            r#"      <path class="link" d="{}" style="fill: none; stroke: {}; stroke-width: 2px;"/>"#,
            link_path(link),
            escape_attr(&style.palette.link)
        )?;
    }

    for node in &scene.nodes {
        write_node(out, node, style)?;
    }

    writeln!(out, "    </g>")?;
    writeln!(out, "  </g>")?;

    for caption in &scene.captions {
        writeln!(
            out,
            r#"  <text class="caption" x="{}" y="{}" style="font-size: 12px; fill: {};">{}</text>"#,
            num(caption.x),
            num(caption.y),
            caption.color,
            escape_text(&caption.text)
        )?;
    }

    writeln!(out, "</svg>")
}

fn write_node(out: &mut impl Write, node: &SceneNode, style: &SvgStyle<'_>) -> fmt::Result {
    let name = escape_text(&node.name);
    let (label_x, anchor) = if node.has_children {
        (-LABEL_OFFSET, "end")
    } else {
        (LABEL_OFFSET, "start")
    };

    writeln!(
        out,
        r#"      <g class="node" data-kind="{}" transform="translate({},{})">"#,
        node.kind.slug(),
        num(node.x),
        num(node.y)
    )?;
    writeln!(
        out,
        r#"        <circle r="{}" style="fill: {}; stroke: #fff; stroke-width: 1.5px;"><title>{name}</title></circle>"#,
        num(style.node_radius),
        escape_attr(node.kind.color(style.palette))
    )?;
    writeln!(
        out,
        r#"        <text dy=".35em" x="{}" text-anchor="{anchor}" style="font-size: 12px; font-family: sans-serif;">{name}</text>"#,
        num(label_x)
    )?;
    writeln!(out, "      </g>")
}
