//! Output handling for renderings.
//!
//! Provides utilities for auto-detecting output format and writing results.

use crate::render::OutputFormat;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }

    /// Check if output is to a terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, OutputTarget::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Auto-detect the output format based on TTY and output target
///
/// Markup dumped on an interactive terminal is unreadable, so `Auto`
/// becomes a summary there and SVG everywhere else. File targets pick
/// by extension.
pub fn auto_detect_format(format: OutputFormat, target: &OutputTarget) -> OutputFormat {
    match format {
        OutputFormat::Auto => match target {
            OutputTarget::File(path) => match path.extension().and_then(|e| e.to_str()) {
                Some("html" | "htm") => OutputFormat::Html,
                Some("json") => OutputFormat::Json,
                Some("txt") => OutputFormat::Summary,
                _ => OutputFormat::Svg,
            },
            OutputTarget::Stdout if target.is_terminal() => OutputFormat::Summary,
            OutputTarget::Stdout => OutputFormat::Svg,
        },
        other => other,
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Rendering written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option_none() {
        let target = OutputTarget::from_option(None);
        assert!(matches!(target, OutputTarget::Stdout));
    }

    #[test]
    fn test_output_target_from_option_some() {
        let path = PathBuf::from("/tmp/tree.svg");
        let target = OutputTarget::from_option(Some(path.clone()));
        match target {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("Expected File variant"),
        }
    }

    #[test]
    fn test_auto_detect_format_non_auto() {
        let target = OutputTarget::Stdout;
        assert_eq!(
            auto_detect_format(OutputFormat::Json, &target),
            OutputFormat::Json
        );
        assert_eq!(
            auto_detect_format(OutputFormat::Html, &target),
            OutputFormat::Html
        );
    }

    #[test]
    fn test_auto_detect_format_file_extension() {
        let detect = |name: &str| {
            auto_detect_format(OutputFormat::Auto, &OutputTarget::File(PathBuf::from(name)))
        };
        assert_eq!(detect("out.html"), OutputFormat::Html);
        assert_eq!(detect("out.json"), OutputFormat::Json);
        assert_eq!(detect("out.txt"), OutputFormat::Summary);
        assert_eq!(detect("out.svg"), OutputFormat::Svg);
        assert_eq!(detect("out"), OutputFormat::Svg);
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.svg");
        write_output("<svg/>", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<svg/>");
    }
}
