//! Render command handler.
//!
//! Implements the `render` subcommand: one selected tree written as SVG,
//! HTML, JSON or a text summary.

use crate::config::AppConfig;
use crate::pipeline::{
    OutputTarget, apply_overrides, auto_detect_format, exit_codes, load_document,
    render_document, write_output,
};
use crate::render::{OutputFormat, ZoomBehavior, ZoomTransform};
use anyhow::Result;
use std::path::PathBuf;

/// Resolved options for one `render` invocation.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Recipe JSON file, or `-` for stdin
    pub input: PathBuf,
    pub index: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub target: Option<String>,
    pub algorithm: Option<String>,
    /// Initial pan/zoom of the drawing group
    pub transform: ZoomTransform,
    pub quiet: bool,
}

/// Run the render command
#[allow(clippy::needless_pass_by_value)]
pub fn run_render(options: RenderOptions, config: &AppConfig) -> Result<i32> {
    let document = load_document(&options.input, options.quiet)?;
    let document = apply_overrides(document, options.target, options.algorithm);

    let target = OutputTarget::from_option(options.output);
    let format = auto_detect_format(options.format, &target);
    tracing::debug!(%format, index = options.index, "rendering");

    let transform = ZoomBehavior::default().clamp_transform(options.transform);
    if transform != options.transform {
        tracing::warn!(
            requested = %options.transform,
            applied = %transform,
            "Initial zoom outside the allowed range; adjusted"
        );
    }

    let rendered = render_document(&document, options.index, format, config, transform)?;

    if !rendered.drawn {
        if document.is_empty() {
            tracing::warn!("No recipe trees in input; nothing drawn");
        } else {
            tracing::warn!(
                "Tree index {} is out of range ({} available); nothing drawn",
                options.index,
                document.len()
            );
        }
    }

    // An empty SVG is not worth writing; the other formats describe why
    // nothing was drawn.
    if rendered.drawn || format != OutputFormat::Svg {
        write_output(&rendered.content, &target, options.quiet)?;
    }

    Ok(if rendered.drawn {
        exit_codes::SUCCESS
    } else {
        exit_codes::NOTHING_RENDERED
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(input: PathBuf, output: PathBuf, index: usize) -> RenderOptions {
        RenderOptions {
            input,
            index,
            format: OutputFormat::Auto,
            output: Some(output),
            target: None,
            algorithm: None,
            transform: ZoomTransform::IDENTITY,
            quiet: true,
        }
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trees.json");
        std::fs::write(&input, r#"[{"name":"Mud","ingredients":[{"name":"Water","isBaseElement":true}]}]"#)
            .unwrap();
        let output = dir.path().join("mud.svg");

        let code = run_render(options(input, output.clone(), 0), &AppConfig::default()).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let svg = std::fs::read_to_string(output).unwrap();
        assert!(svg.contains("<title>Water</title>"));
    }

    #[test]
    fn test_bad_index_exit_code_and_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trees.json");
        std::fs::write(&input, r#"[{"name":"Mud"}]"#).unwrap();
        let output = dir.path().join("mud.svg");

        let code = run_render(options(input, output.clone(), 3), &AppConfig::default()).unwrap();
        assert_eq!(code, exit_codes::NOTHING_RENDERED);
        assert!(!output.exists());
    }

    #[test]
    fn test_html_placeholder_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trees.json");
        std::fs::write(&input, "[]").unwrap();
        let output = dir.path().join("page.html");

        let code = run_render(options(input, output.clone(), 0), &AppConfig::default()).unwrap();
        assert_eq!(code, exit_codes::NOTHING_RENDERED);
        let html = std::fs::read_to_string(output).unwrap();
        assert!(html.contains("No recipe data to display"));
    }

    #[test]
    fn test_label_overrides_reach_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("trees.json");
        std::fs::write(&input, r#"{"trees":[{"name":"Mud"}]}"#).unwrap();
        let output = dir.path().join("report.json");

        let mut opts = options(input, output.clone(), 0);
        opts.algorithm = Some("bidirectional".into());
        run_render(opts, &AppConfig::default()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["algorithm"], "bidirectional");
        assert_eq!(json["targetElement"], "Mud");
    }
}
