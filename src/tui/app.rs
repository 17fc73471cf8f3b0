//! Viewer state.

use crate::config::AppConfig;
use crate::model::RecipeDocument;
use crate::panel::{PanelProps, VisualizationPanel};
use crate::render::{Renderer, Scene, ZoomBehavior, ZoomTransform};
use anyhow::{Context, Result};
use ratatui::layout::Rect;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

/// Canvas pixels per terminal column. The scene is laid out at this
/// resolution so labels and spacing look like the SVG at full width.
pub const PX_PER_COLUMN: f64 = 8.0;

/// Interactive viewer over one recipe document.
///
/// The viewer owns the selected index; the panel only asks for changes
/// through its callback, which lands in `requested`.
pub struct ViewApp {
    pub(crate) document: RecipeDocument,
    pub(crate) panel: VisualizationPanel,
    requested: Rc<Cell<usize>>,
    pub(crate) zoom: ZoomTransform,
    pub(crate) behavior: ZoomBehavior,
    pub(crate) pan_step: f64,
    pub(crate) mouse_enabled: bool,
    pub(crate) show_help: bool,
    pub(crate) should_quit: bool,
    pub(crate) status_message: Option<String>,
    /// Last canvas area, for mapping mouse positions
    pub(crate) canvas_area: Rect,
    /// Canvas point where the current drag started
    pub(crate) drag_origin: Option<(f64, f64)>,
    pub(crate) theme_name: String,
}

impl ViewApp {
    pub fn new(document: RecipeDocument, index: usize, config: &AppConfig) -> Self {
        let requested = Rc::new(Cell::new(index));
        let sink = Rc::clone(&requested);
        let mut panel = VisualizationPanel::new(
            PanelProps::from_document(&document, index),
            Renderer::new(config),
            Box::new(move |i| sink.set(i)),
        );
        panel.mount(config.render.width);

        Self {
            document,
            panel,
            requested,
            zoom: ZoomTransform::IDENTITY,
            behavior: ZoomBehavior::default().with_step(config.tui.zoom_step),
            pan_step: config.tui.pan_step,
            mouse_enabled: config.tui.mouse_enabled,
            show_help: false,
            should_quit: false,
            status_message: None,
            canvas_area: Rect::default(),
            drag_origin: None,
            theme_name: config.tui.theme.clone(),
        }
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.panel.scene()
    }

    pub fn current_index(&self) -> usize {
        self.panel.props().current_tree_index
    }

    pub fn tree_count(&self) -> usize {
        self.document.len()
    }

    pub fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Canvas size in scene pixels.
    pub(crate) fn canvas_size(&self) -> (f64, f64) {
        let scene_height = self.panel.renderer().config().height;
        let width = self.panel.surface().map_or(0.0, |s| s.width());
        (width, scene_height)
    }

    fn canvas_center(&self) -> (f64, f64) {
        let (w, h) = self.canvas_size();
        (w / 2.0, h / 2.0)
    }

    /// Relayout for a new canvas width in terminal columns.
    pub fn resize_canvas(&mut self, area: Rect) {
        self.canvas_area = area;
        let width = f64::from(area.width) * PX_PER_COLUMN;
        let current = self.panel.surface().map(|s| s.width());
        if current != Some(width) {
            self.panel.resize(width);
        }
    }

    pub fn next_tree(&mut self) {
        if let Some(mut selector) = self.panel.selector() {
            selector.next();
        }
        self.sync_selection();
    }

    pub fn previous_tree(&mut self) {
        if let Some(mut selector) = self.panel.selector() {
            selector.previous();
        }
        self.sync_selection();
    }

    /// Feed a requested index back into the panel.
    fn sync_selection(&mut self) {
        let index = self.requested.get();
        if index == self.current_index() {
            return;
        }
        self.panel
            .set_props(PanelProps::from_document(&self.document, index));
        self.reset_zoom();
        self.set_status_message(format!("Recipe {} of {}", index + 1, self.tree_count()));
    }

    pub fn zoom_in(&mut self) {
        self.zoom = self.behavior.zoom_in(self.zoom, self.canvas_center());
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.behavior.zoom_out(self.zoom, self.canvas_center());
    }

    /// Zoom one step around a canvas point, as the mouse wheel does.
    pub fn zoom_at(&mut self, point: (f64, f64), zoom_in: bool) {
        self.zoom = if zoom_in {
            self.behavior.zoom_in(self.zoom, point)
        } else {
            self.behavior.zoom_out(self.zoom, point)
        };
    }

    /// Move the view. Positive `dx` shows more of the right-hand side.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.zoom = self.behavior.pan(self.zoom, -dx, -dy);
    }

    /// Drag the drawing by a canvas-space offset.
    pub fn drag_by(&mut self, dx: f64, dy: f64) {
        self.zoom = self.behavior.pan(self.zoom, dx, dy);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = ZoomTransform::IDENTITY;
    }

    /// Write the current view, zoom included, as an SVG file in the
    /// working directory.
    pub fn export_svg(&mut self) -> Result<PathBuf> {
        if self.scene().is_none() {
            anyhow::bail!("Nothing to export");
        }
        self.panel.set_transform(self.zoom);
        let content = self
            .panel
            .surface()
            .map(|s| s.content().to_string())
            .unwrap_or_default();
        let path = PathBuf::from(export_file_name(
            &self.document.target_element,
            self.current_index(),
        ));
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Exported view to {}", path.display());
        Ok(path)
    }
}

/// `recipe-<target>-<n>.svg`, with anything outside `[A-Za-z0-9_-]`
/// replaced by `_`.
pub(crate) fn export_file_name(target: &str, index: usize) -> String {
    let slug: String = target
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let slug = if slug.is_empty() { "tree".to_string() } else { slug };
    format!("recipe-{slug}-{}.svg", index + 1)
}
