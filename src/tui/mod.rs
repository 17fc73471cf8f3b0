//! Interactive terminal viewer using ratatui.
//!
//! The viewer draws the same [`Scene`](crate::render::Scene) the SVG writer
//! uses onto a braille canvas, with keyboard and mouse pan/zoom, switching
//! between alternative trees, and a details side panel.

mod app;
mod events;
pub mod theme;
mod ui;

pub use app::{PX_PER_COLUMN, ViewApp};
pub use events::{Event, EventHandler, handle_key_event, handle_mouse_event};
pub use theme::{ColorScheme, Theme, colors, set_theme, toggle_theme};
pub use ui::run_view_tui;
