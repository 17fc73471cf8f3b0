//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs, one per subcommand. Each returns
//! the process exit code.

mod render;
mod view;

pub use render::{RenderOptions, run_render};
pub use view::{ViewOptions, run_view};
