//! View command handler.
//!
//! Implements the `view` subcommand: the interactive terminal viewer.

use crate::config::AppConfig;
use crate::pipeline::{apply_overrides, exit_codes, is_stdin, load_document};
use crate::tui::{ViewApp, run_view_tui};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Resolved options for one `view` invocation.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Recipe JSON file
    pub input: PathBuf,
    pub index: usize,
    pub target: Option<String>,
    pub algorithm: Option<String>,
}

/// Run the view command
#[allow(clippy::needless_pass_by_value)]
pub fn run_view(options: ViewOptions, config: &AppConfig) -> Result<i32> {
    if is_stdin(&options.input) {
        anyhow::bail!("The viewer needs the terminal for input; pass a file instead of '-'");
    }
    let document = load_document(&options.input, true)?;
    let document = apply_overrides(document, options.target, options.algorithm);
    if !document.is_empty() {
        document.tree_at(options.index)?;
    }

    let mut app = ViewApp::new(document, options.index, config);
    run_view_tui(&mut app).context("Terminal viewer failed")?;
    Ok(exit_codes::SUCCESS)
}
