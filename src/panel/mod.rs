//! The visualization panel: one drawing surface, a tree selector and a
//! details block, driven entirely by props from its owner.
//!
//! The panel keeps no state of its own beyond the surface handle and the
//! last scene it drew. The tree list, the selected index and the labels are
//! owned by the caller, and index changes requested through the selector
//! are forwarded to the caller's callback:
//!
//! ```
//! use recipe_viz::model::RecipeTree;
//! use recipe_viz::panel::{PanelProps, VisualizationPanel};
//! use recipe_viz::render::Renderer;
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::sync::Arc;
//!
//! let trees: Arc<[RecipeTree]> = vec![RecipeTree::new("Mud"), RecipeTree::new("Clay")].into();
//! let selected = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&selected);
//!
//! let props = PanelProps::new(Arc::clone(&trees), 0, "Mud", "bfs");
//! let mut panel = VisualizationPanel::new(props, Renderer::default(), Box::new(move |i| sink.set(i)));
//! panel.mount(960.0);
//!
//! if let Some(mut selector) = panel.selector() {
//!     selector.next();
//! }
//! assert_eq!(selected.get(), 1);
//! // The index only changes once the owner passes it back in.
//! assert_eq!(panel.props().current_tree_index, 0);
//! panel.set_props(PanelProps::new(trees, selected.get(), "Mud", "bfs"));
//! assert!(panel.surface().is_some_and(|s| s.content().contains("Clay")));
//! ```

mod details;
mod page;
mod selector;

pub use details::TreeDetails;
pub use page::{write_page, write_page_to_string};
pub use selector::TreeSelector;

use crate::model::{RecipeDocument, RecipeTree};
use crate::render::{Renderer, Scene, Surface, ZoomTransform};
use std::sync::Arc;

/// Panel heading.
pub const PANEL_TITLE: &str = "Recipe Visualization";
/// Shown instead of the diagram when there are no trees.
pub const PLACEHOLDER_TITLE: &str = "No recipe data to display";
pub const PLACEHOLDER_HINT: &str =
    "Enter an element name and click \"Find Recipes\" to see its crafting tree.";

/// Callback through which the panel asks its owner to change the index.
pub type IndexCallback = Box<dyn FnMut(usize)>;

/// Everything the panel renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelProps {
    pub current_trees: Arc<[RecipeTree]>,
    pub current_tree_index: usize,
    pub target_element: String,
    pub algorithm: String,
}

impl PanelProps {
    pub fn new(
        current_trees: Arc<[RecipeTree]>,
        current_tree_index: usize,
        target_element: impl Into<String>,
        algorithm: impl Into<String>,
    ) -> Self {
        Self {
            current_trees,
            current_tree_index,
            target_element: target_element.into(),
            algorithm: algorithm.into(),
        }
    }

    /// Props for `document`, sharing its tree list.
    pub fn from_document(document: &RecipeDocument, index: usize) -> Self {
        Self::new(
            Arc::clone(&document.trees),
            index,
            document.target_element.clone(),
            document.algorithm.clone(),
        )
    }

    /// The selected tree, if the index is in range.
    pub fn selected_tree(&self) -> Option<&RecipeTree> {
        self.current_trees.get(self.current_tree_index)
    }

    /// Whether `other` would require a redraw: a different tree list
    /// (by identity, not contents) or a different index.
    fn needs_redraw(&self, other: &Self) -> bool {
        !Arc::ptr_eq(&self.current_trees, &other.current_trees)
            || self.current_tree_index != other.current_tree_index
    }
}

pub struct VisualizationPanel {
    props: PanelProps,
    renderer: Renderer,
    surface: Option<Surface>,
    scene: Option<Scene>,
    on_select: IndexCallback,
    draws: usize,
}

impl std::fmt::Debug for VisualizationPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualizationPanel")
            .field("props", &self.props)
            .field("mounted", &self.surface.is_some())
            .field("draws", &self.draws)
            .finish_non_exhaustive()
    }
}

impl VisualizationPanel {
    /// Create an unmounted panel. Nothing is drawn until [`mount`](Self::mount).
    pub fn new(props: PanelProps, renderer: Renderer, on_select: IndexCallback) -> Self {
        Self {
            props,
            renderer,
            surface: None,
            scene: None,
            on_select,
            draws: 0,
        }
    }

    /// Attach a surface of `width` pixels and draw the current selection.
    pub fn mount(&mut self, width: f64) {
        self.surface = Some(Surface::new(width));
        self.draw();
    }

    pub fn unmount(&mut self) {
        self.surface = None;
        self.scene = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Resize the surface and redraw. No-op while unmounted.
    pub fn resize(&mut self, width: f64) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_width(width);
            self.draw();
        }
    }

    /// Replace the props. Redraws only when the tree list identity or the
    /// index changed; returns whether it did.
    pub fn set_props(&mut self, props: PanelProps) -> bool {
        let redraw = self.props.needs_redraw(&props);
        self.props = props;
        if redraw {
            self.draw();
        }
        redraw
    }

    /// Change the pan/zoom of the drawing group without relaying out.
    pub fn set_transform(&mut self, transform: ZoomTransform) {
        self.renderer.set_transform(transform);
        if let (Some(surface), Some(scene)) = (self.surface.as_mut(), self.scene.as_ref()) {
            let svg = self.renderer.svg(scene);
            surface.begin_draw().push_str(&svg);
        }
    }

    fn draw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match self.props.selected_tree() {
            Some(tree) => {
                self.scene = Some(self.renderer.visualize_tree(tree, surface));
                self.draws += 1;
            }
            None => {
                // Stale drawings never outlive the selection they belong to.
                surface.clear();
                self.scene = None;
                tracing::debug!(
                    trees = self.props.current_trees.len(),
                    index = self.props.current_tree_index,
                    "nothing to draw"
                );
            }
        }
    }

    pub fn props(&self) -> &PanelProps {
        &self.props
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// The scene behind the current drawing.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// How many times a tree has been drawn since creation.
    pub fn draw_count(&self) -> usize {
        self.draws
    }

    /// Whether the empty-list placeholder is shown.
    pub fn shows_placeholder(&self) -> bool {
        self.props.current_trees.is_empty()
    }

    /// The selector, present only when there is more than one tree.
    pub fn selector(&mut self) -> Option<TreeSelector<'_>> {
        let count = self.props.current_trees.len();
        (count > 1).then(|| {
            TreeSelector::new(count, self.props.current_tree_index, &mut *self.on_select)
        })
    }

    /// The selector's label without borrowing the callback.
    pub fn selector_label(&self) -> Option<String> {
        let count = self.props.current_trees.len();
        (count > 1).then(|| format!("Recipe {} of {count}", self.props.current_tree_index + 1))
    }

    /// Details for the selected tree, present only when the index is valid.
    pub fn details(&self) -> Option<TreeDetails> {
        let props = &self.props;
        props.selected_tree().map(|tree| {
            TreeDetails::new(
                tree,
                &props.target_element,
                &props.algorithm,
                props.current_tree_index,
                props.current_trees.len(),
            )
        })
    }
}
