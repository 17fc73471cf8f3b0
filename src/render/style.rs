//! Node classification and colours.

use crate::config::Palette;
use crate::tree::HierarchyNode;
use serde::Serialize;

/// Visual category of a rendered node.
///
/// Classification is first-match-wins in declaration order, so a base
/// element that is also the root is drawn as a base element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    BaseElement,
    CircularReference,
    NoRecipe,
    Root,
    Collapsed,
    Regular,
}

impl NodeKind {
    /// Every kind in precedence order.
    pub const ALL: [Self; 6] = [
        Self::BaseElement,
        Self::CircularReference,
        Self::NoRecipe,
        Self::Root,
        Self::Collapsed,
        Self::Regular,
    ];

    /// Classify a laid-out node.
    pub fn classify(node: &HierarchyNode) -> Self {
        let data = &node.data;
        if data.is_base_element {
            Self::BaseElement
        } else if data.is_circular_reference {
            Self::CircularReference
        } else if data.no_recipe {
            Self::NoRecipe
        } else if node.depth == 0 {
            Self::Root
        } else if data.collapsed {
            Self::Collapsed
        } else {
            Self::Regular
        }
    }

    pub fn color<'p>(&self, palette: &'p Palette) -> &'p str {
        match self {
            Self::BaseElement => &palette.base_element,
            Self::CircularReference => &palette.circular_reference,
            Self::NoRecipe => &palette.no_recipe,
            Self::Root => &palette.root,
            Self::Collapsed => &palette.collapsed,
            Self::Regular => &palette.regular,
        }
    }

    /// Stable identifier used in `data-kind` attributes.
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::BaseElement => "base-element",
            Self::CircularReference => "circular-reference",
            Self::NoRecipe => "no-recipe",
            Self::Root => "root",
            Self::Collapsed => "collapsed",
            Self::Regular => "regular",
        }
    }

    /// Legend label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::BaseElement => "Base element",
            Self::CircularReference => "Circular reference",
            Self::NoRecipe => "No recipe",
            Self::Root => "Target element",
            Self::Collapsed => "Collapsed (depth limit)",
            Self::Regular => "Intermediate element",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
