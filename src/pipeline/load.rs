//! Loading recipe documents from files or stdin.

use crate::model::RecipeDocument;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Where a document is read from. `-` means stdin.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read and parse a recipe document.
pub fn load_document(path: &Path, quiet: bool) -> Result<RecipeDocument> {
    let document = if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read recipe data from stdin")?;
        RecipeDocument::from_json_str(&buf).context("Failed to parse recipe data from stdin")?
    } else {
        if !quiet {
            tracing::info!("Loading recipe data: {}", path.display());
        }
        RecipeDocument::from_path(path)
            .with_context(|| format!("Failed to load recipe file: {}", path.display()))?
    };

    if !quiet {
        tracing::info!(
            "Loaded {} tree(s) for {:?} ({})",
            document.len(),
            document.target_element,
            document.algorithm
        );
    }
    Ok(document)
}

/// Apply CLI label overrides.
pub fn apply_overrides(
    mut document: RecipeDocument,
    target: Option<String>,
    algorithm: Option<String>,
) -> RecipeDocument {
    if let Some(target) = target {
        document.target_element = target;
    }
    if let Some(algorithm) = algorithm {
        document.algorithm = algorithm;
    }
    document
}
