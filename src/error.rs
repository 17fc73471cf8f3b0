//! Unified error types for recipe-viz.
//!
//! Loading and configuration can fail; rendering never does. A bad
//! selection degrades to "nothing drawn" instead of surfacing an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for recipe-viz operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecipeVizError {
    /// Errors while reading or decoding recipe trees
    #[error("Failed to load recipe trees: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors while producing output documents
    #[error("Rendering failed: {context}")]
    Render {
        context: String,
        #[source]
        source: RenderErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration values that failed validation
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Tree index {index} out of range ({count} trees)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Specific render error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RenderErrorKind {
    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("JSON serialization failed: {0}")]
    JsonSerialization(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for recipe-viz operations
pub type Result<T> = std::result::Result<T, RecipeVizError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RecipeVizError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a render error with context
    pub fn render(context: impl Into<String>, source: RenderErrorKind) -> Self {
        Self::Render {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for RecipeVizError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RecipeVizError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<std::fmt::Error> for RecipeVizError {
    fn from(err: std::fmt::Error) -> Self {
        Self::render("writing output", RenderErrorKind::Format(err))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to whatever the error already carries, so a chain
/// reads outermost first: `"reading trees.json: JSON deserialization"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RecipeVizError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: RecipeVizError, new_ctx: &str) -> RecipeVizError {
    match err {
        RecipeVizError::Load {
            context: existing,
            source,
        } => RecipeVizError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RecipeVizError::Render {
            context: existing,
            source,
        } => RecipeVizError::Render {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RecipeVizError::Io {
            path,
            message,
            source,
        } => RecipeVizError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RecipeVizError::Validation(msg) => {
            RecipeVizError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RecipeVizError::load(
            "selecting tree",
            LoadErrorKind::IndexOutOfRange { index: 4, count: 2 },
        );
        let display = err.to_string();
        assert!(display.contains("load"), "unexpected message: {display}");
        assert!(display.contains("selecting tree"), "unexpected message: {display}");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RecipeVizError::io("/path/to/trees.json", io_err);

        assert!(err.to_string().contains("/path/to/trees.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(RecipeVizError::load(
                "base",
                LoadErrorKind::InvalidJson("eof".to_string()),
            ))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(RecipeVizError::Load { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(RecipeVizError::validation("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_json_error_converts_to_load() {
        let err: RecipeVizError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(
            err,
            RecipeVizError::Load {
                source: LoadErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
