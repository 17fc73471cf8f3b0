//! Pipeline orchestration for recipe renderings.
//!
//! Shared load → render → write logic used by the CLI command handlers.

mod load;
mod output;
mod report;

pub use load::{apply_overrides, is_stdin, load_document};
pub use output::{OutputTarget, auto_detect_format, write_output};
pub use report::{Rendered, render_document};

/// Exit codes for scripting
pub mod exit_codes {
    /// A tree was rendered
    pub const SUCCESS: i32 = 0;
    /// Nothing was drawn: empty tree list or index out of range
    pub const NOTHING_RENDERED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
