//! Recipe trees as produced by the upstream recipe-resolution search.

use crate::error::{ErrorContext, LoadErrorKind, RecipeVizError, Result};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use std::path::Path;
use std::sync::Arc;

/// One node of a crafting recipe tree.
///
/// `ingredients` are the elements combined to craft `name`. Leaves are
/// either base elements, cycle markers, or elements with no known recipe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeTree {
    pub name: String,
    #[serde(default)]
    pub is_base_element: bool,
    #[serde(default)]
    pub is_circular_reference: bool,
    #[serde(default)]
    pub no_recipe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<RecipeTree>,
}

impl RecipeTree {
    /// Create a plain intermediate node with no flags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_base_element: false,
            is_circular_reference: false,
            no_recipe: false,
            image_path: None,
            ingredients: Vec::new(),
        }
    }

    /// Create a base element leaf.
    pub fn base(name: impl Into<String>) -> Self {
        let mut tree = Self::new(name);
        tree.is_base_element = true;
        tree
    }

    /// Builder-style helper to append ingredients.
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: impl IntoIterator<Item = Self>) -> Self {
        self.ingredients.extend(ingredients);
        self
    }

    #[must_use]
    pub fn circular(mut self) -> Self {
        self.is_circular_reference = true;
        self
    }

    #[must_use]
    pub fn without_recipe(mut self) -> Self {
        self.no_recipe = true;
        self
    }

    #[must_use]
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients.is_empty()
    }
}

// Subtrees are flattened onto a heap stack; drop depth stays constant.
impl Drop for RecipeTree {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.ingredients);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.ingredients);
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Label used when the input does not name the search algorithm.
pub const UNKNOWN_ALGORITHM: &str = "unknown";

/// The full result of one recipe search: every alternative tree found for a
/// target element, plus the labels shown next to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDocument {
    pub target_element: String,
    pub algorithm: String,
    pub trees: Arc<[RecipeTree]>,
}

/// Every accepted object shape in one pass: a document carries `trees`, a
/// single tree carries `name`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentFields {
    #[serde(default)]
    target_element: Option<String>,
    #[serde(default)]
    algorithm: Option<String>,
    #[serde(default)]
    trees: Option<Vec<RecipeTree>>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    is_base_element: bool,
    #[serde(default)]
    is_circular_reference: bool,
    #[serde(default)]
    no_recipe: bool,
    #[serde(default)]
    image_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    ingredients: Vec<RecipeTree>,
}

enum RecipeInput {
    Document {
        target_element: Option<String>,
        algorithm: Option<String>,
        trees: Vec<RecipeTree>,
    },
    Trees(Vec<RecipeTree>),
    Single(RecipeTree),
}

impl RecipeInput {
    fn parse(content: &str) -> serde_json::Result<Self> {
        if content.trim_start().starts_with('[') {
            return decode(content).map(Self::Trees);
        }

        let fields: DocumentFields = decode(content)?;
        if let Some(trees) = fields.trees {
            return Ok(Self::Document {
                target_element: fields.target_element,
                algorithm: fields.algorithm,
                trees,
            });
        }
        let name = fields
            .name
            .ok_or_else(|| serde_json::Error::custom("expected a `trees` list or a tree `name`"))?;
        let mut tree = RecipeTree::new(name);
        tree.is_base_element = fields.is_base_element;
        tree.is_circular_reference = fields.is_circular_reference;
        tree.no_recipe = fields.no_recipe;
        tree.image_path = fields.image_path;
        tree.ingredients = fields.ingredients;
        Ok(Self::Single(tree))
    }
}

/// Decode without serde_json's nesting limit, growing the stack on demand.
fn decode<'de, T: Deserialize<'de>>(content: &'de str) -> serde_json::Result<T> {
    let mut json = serde_json::Deserializer::from_str(content);
    json.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

impl RecipeDocument {
    /// Build a document from already-resolved trees.
    pub fn new(
        target_element: impl Into<String>,
        algorithm: impl Into<String>,
        trees: Vec<RecipeTree>,
    ) -> Self {
        Self {
            target_element: target_element.into(),
            algorithm: algorithm.into(),
            trees: trees.into(),
        }
    }

    /// Parse any of the accepted JSON input shapes.
    ///
    /// A missing target falls back to the first tree's root name; a missing
    /// algorithm label falls back to [`UNKNOWN_ALGORITHM`]. An empty tree
    /// list is accepted here and rendered as the placeholder later.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let input = RecipeInput::parse(content)?;
        let (target, algorithm, trees) = match input {
            RecipeInput::Document {
                target_element,
                algorithm,
                trees,
            } => (target_element, algorithm, trees),
            RecipeInput::Trees(trees) => (None, None, trees),
            RecipeInput::Single(tree) => (None, None, vec![tree]),
        };

        let target = target
            .or_else(|| trees.first().map(|t| t.name.clone()))
            .unwrap_or_default();
        let algorithm = algorithm.unwrap_or_else(|| UNKNOWN_ALGORITHM.to_string());
        Ok(Self::new(target, algorithm, trees))
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RecipeVizError::io(path, e))?;
        Self::from_json_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// The tree at `index`, or a load error naming the valid range.
    pub fn tree_at(&self, index: usize) -> Result<&RecipeTree> {
        self.trees.get(index).ok_or_else(|| {
            RecipeVizError::load(
                "selecting tree",
                LoadErrorKind::IndexOutOfRange {
                    index,
                    count: self.trees.len(),
                },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_fields() {
        let tree: RecipeTree = serde_json::from_str(
            r#"{
                "name": "Mud",
                "imagePath": "images/mud.png",
                "ingredients": [
                    {"name": "Water", "isBaseElement": true},
                    {"name": "Earth", "isBaseElement": true, "isCircularReference": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(tree.name, "Mud");
        assert_eq!(tree.image_path.as_deref(), Some("images/mud.png"));
        assert_eq!(tree.ingredients.len(), 2);
        assert!(tree.ingredients[0].is_base_element);
        assert!(tree.ingredients[1].is_circular_reference);
        assert!(!tree.no_recipe);
    }

    #[test]
    fn test_null_ingredients_are_empty() {
        let tree: RecipeTree =
            serde_json::from_str(r#"{"name": "Time", "noRecipe": true, "ingredients": null}"#)
                .unwrap();
        assert!(tree.ingredients.is_empty());
        assert!(tree.no_recipe);
    }

    #[test]
    fn test_document_shape() {
        let doc = RecipeDocument::from_json_str(
            r#"{"targetElement": "Brick", "algorithm": "BFS", "trees": [{"name": "Brick"}]}"#,
        )
        .unwrap();
        assert_eq!(doc.target_element, "Brick");
        assert_eq!(doc.algorithm, "BFS");
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_bare_array_shape_defaults_labels() {
        let doc =
            RecipeDocument::from_json_str(r#"[{"name": "Steam"}, {"name": "Steam"}]"#).unwrap();
        assert_eq!(doc.target_element, "Steam");
        assert_eq!(doc.algorithm, UNKNOWN_ALGORITHM);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_single_tree_shape() {
        let doc = RecipeDocument::from_json_str(r#"{"name": "Fire", "isBaseElement": true}"#)
            .unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.trees[0].is_base_element);
    }

    #[test]
    fn test_empty_document_is_accepted() {
        let doc = RecipeDocument::from_json_str(r#"{"trees": []}"#).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.target_element, "");
    }

    #[test]
    fn test_document_serializes_tree_list() {
        let doc = RecipeDocument::new("Mud", "bfs", vec![RecipeTree::new("Mud")]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["targetElement"], "Mud");
        assert_eq!(value["trees"][0]["name"], "Mud");
        assert_eq!(value["trees"][0]["ingredients"], serde_json::json!([]));
    }

    #[test]
    fn test_tree_at_out_of_range() {
        let doc = RecipeDocument::new("Mud", "DFS", vec![RecipeTree::new("Mud")]);
        assert!(doc.tree_at(0).is_ok());
        let err = doc.tree_at(3).unwrap_err();
        assert!(err.to_string().contains("selecting tree"));
    }

    #[test]
    fn test_invalid_json_is_load_error() {
        assert!(RecipeDocument::from_json_str("not json").is_err());
        assert!(RecipeDocument::from_json_str(r#"{"algorithm": "BFS"}"#).is_err());
        assert!(RecipeDocument::from_json_str(r#"[{"name": "Mud"}] trailing"#).is_err());
    }

    fn nested_chain_json(depth: usize) -> String {
        let mut json = String::new();
        for i in 0..depth {
            json.push_str(&format!(r#"{{"name": "Step{i}", "ingredients": ["#));
        }
        json.push_str(r#"{"name": "Water", "isBaseElement": true}"#);
        json.push_str(&"]}".repeat(depth));
        json
    }

    #[test]
    fn test_deep_nesting_is_accepted() {
        for depth in [64, 200, 20_000] {
            let doc = RecipeDocument::from_json_str(&nested_chain_json(depth)).unwrap();
            let mut node = &doc.trees[0];
            let mut levels = 0;
            while let Some(child) = node.ingredients.first() {
                node = child;
                levels += 1;
            }
            assert_eq!(levels, depth);
            assert!(node.is_base_element);
        }
    }

    #[test]
    fn test_dropping_a_long_chain_does_not_recurse() {
        let mut tree = RecipeTree::base("Leaf");
        for i in 0..200_000 {
            tree = RecipeTree::new(format!("n{i}")).with_ingredients([tree]);
        }
        drop(tree);
    }
}
