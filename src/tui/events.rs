//! Event polling and input handling for the viewer.

use super::app::ViewApp;
use super::theme::{Theme, set_theme, toggle_theme};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal tick
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut ViewApp, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    app.clear_status_message();

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // Any key closes the help overlay
    if app.show_help {
        if matches!(key.code, KeyCode::Char('q')) {
            app.quit();
        }
        app.show_help = false;
        return;
    }

    let step = app.pan_step;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Left | KeyCode::Char('h') => app.pan(-step, 0.0),
        KeyCode::Right | KeyCode::Char('l') => app.pan(step, 0.0),
        KeyCode::Up | KeyCode::Char('k') => app.pan(0.0, -step),
        KeyCode::Down | KeyCode::Char('j') => app.pan(0.0, step),
        KeyCode::Char('+' | '=') => app.zoom_in(),
        KeyCode::Char('-' | '_') => app.zoom_out(),
        KeyCode::Char('0') => app.reset_zoom(),
        KeyCode::Char('n' | ']') => app.next_tree(),
        KeyCode::Char('p' | '[') => app.previous_tree(),
        KeyCode::Char('T') => {
            let name = toggle_theme();
            app.theme_name = name.to_string();
            app.set_status_message(format!("Theme: {name}"));
        }
        KeyCode::Char('e') => match app.export_svg() {
            Ok(path) => app.set_status_message(format!("Exported {}", path.display())),
            Err(e) => app.set_status_message(format!("Export failed: {e}")),
        },
        _ => {}
    }
}

/// Map a terminal cell to a canvas point, if it lies on the canvas.
fn canvas_point(app: &ViewApp, column: u16, row: u16) -> Option<(f64, f64)> {
    let area = app.canvas_area;
    if area.width == 0
        || area.height == 0
        || column < area.x
        || row < area.y
        || column >= area.x + area.width
        || row >= area.y + area.height
    {
        return None;
    }
    let (w, h) = app.canvas_size();
    let fx = (f64::from(column - area.x) + 0.5) / f64::from(area.width);
    let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
    Some((fx * w, fy * h))
}

/// Handle mouse events: wheel zooms at the pointer, left-drag pans.
pub fn handle_mouse_event(app: &mut ViewApp, mouse: MouseEvent) {
    if !app.mouse_enabled || app.show_help {
        return;
    }
    let point = canvas_point(app, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => {
            if let Some(p) = point {
                app.zoom_at(p, true);
            }
        }
        MouseEventKind::ScrollDown => {
            if let Some(p) = point {
                app.zoom_at(p, false);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.drag_origin = point;
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let (Some(origin), Some(p)) = (app.drag_origin, point) {
                app.drag_by(p.0 - origin.0, p.1 - origin.1);
                app.drag_origin = Some(p);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.drag_origin = None;
        }
        _ => {}
    }
}

/// Apply the configured theme.
pub fn apply_theme(app: &ViewApp) {
    set_theme(Theme::from_name(&app.theme_name));
}
