//! Arena-backed tree model with attribute pseudo-nodes.

use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::{Attribute, RenderOutcome};
use crate::domain::hierarchy::HierarchyGraph;

/// What a model node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelNodeKind {
    /// One document element
    Element { id: String, tag: String },
    /// Synthetic leaf carrying one attribute of its parent element
    Attribute(Attribute),
}

/// Node in the arena-based presentation model.
#[derive(Debug)]
pub struct ModelNode {
    /// Display label: the tag, or `name="value"` for attributes
    pub label: String,
    pub kind: ModelNodeKind,
    /// Attribute nodes first, then child elements
    pub children: Vec<Index>,
}

impl ModelNode {
    pub fn is_attribute(&self) -> bool {
        matches!(self.kind, ModelNodeKind::Attribute(_))
    }
}

impl fmt::Display for ModelNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Presentation-agnostic tree built from a [`HierarchyGraph`].
///
/// All nodes live in one generational arena owned by the model; a node is
/// referenced by exactly one parent (or the root list).
#[derive(Debug)]
pub struct TreeModel {
    arena: Arena<ModelNode>,
    roots: Vec<Index>,
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeModel {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    fn insert_node(&mut self, label: String, kind: ModelNodeKind, parent: Option<Index>) -> Index {
        let node = ModelNode {
            label,
            kind,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get(&self, idx: Index) -> Option<&ModelNode> {
        self.arena.get(idx)
    }

    /// Root element indices in graph root order.
    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    /// Total number of nodes, attribute nodes included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order traversal yielding `(depth, node)`.
    pub fn iter(&self) -> ModelIter<'_> {
        ModelIter::new(self)
    }

    /// Number of levels, attribute leaves included.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Labels of all leaves (attributes and childless elements) in pre-order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.label.as_str())
            .collect()
    }
}

pub struct ModelIter<'a> {
    model: &'a TreeModel,
    stack: Vec<(Index, usize)>,
}

impl<'a> ModelIter<'a> {
    fn new(model: &'a TreeModel) -> Self {
        let stack = model.roots.iter().rev().map(|&idx| (idx, 0)).collect();
        Self { model, stack }
    }
}

impl<'a> Iterator for ModelIter<'a> {
    type Item = (usize, &'a ModelNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.model.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((depth, node));
            }
        }
        None
    }
}

/// Builds a [`TreeModel`] from the shared hierarchy index.
pub struct TreeModelBuilder;

impl TreeModelBuilder {
    /// One element node per record; its attribute nodes are attached before
    /// any child element, so sibling order matches [`TreeRenderer`] output.
    ///
    /// [`TreeRenderer`]: crate::domain::render::TreeRenderer
    #[instrument(level = "debug", skip(graph), fields(nodes = graph.len()))]
    pub fn build_model(graph: &HierarchyGraph) -> RenderOutcome<TreeModel> {
        if graph.is_empty() {
            return RenderOutcome::Empty;
        }

        let mut model = TreeModel::new();
        let mut stack: Vec<(&str, Option<Index>)> = graph
            .roots()
            .iter()
            .rev()
            .map(|id| (id.as_str(), None))
            .collect();

        while let Some((id, parent_idx)) = stack.pop() {
            let Some(record) = graph.node(id) else {
                continue;
            };

            let element_idx = model.insert_node(
                record.tag.clone(),
                ModelNodeKind::Element {
                    id: record.id.clone(),
                    tag: record.tag.clone(),
                },
                parent_idx,
            );

            for attribute in &record.attributes {
                model.insert_node(
                    attribute.to_string(),
                    ModelNodeKind::Attribute(attribute.clone()),
                    Some(element_idx),
                );
            }

            for child in graph.children_of(id).iter().rev() {
                stack.push((child.as_str(), Some(element_idx)));
            }
        }

        RenderOutcome::Ready(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_graph_when_building_model_then_reports_no_data() {
        let outcome = TreeModelBuilder::build_model(&HierarchyGraph::default());
        assert!(outcome.is_empty());
    }

    #[test]
    fn given_new_model_when_created_then_is_empty() {
        let model = TreeModel::default();
        assert!(model.is_empty());
        assert_eq!(model.depth(), 0);
        assert!(model.leaf_labels().is_empty());
    }
}
