//! Hierarchy builder: node records -> roots and ordered children index.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::domain::entities::{NodeRecord, ROOT_SENTINEL};
use crate::domain::error::DomainError;
use crate::domain::ingest::{DomainResult, NodeTable};

/// Reconstructed document hierarchy.
///
/// Every node id appears exactly once: either in `roots` or in exactly one
/// `children` list. Both renderers read this single index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyGraph {
    roots: Vec<String>,
    children: HashMap<String, Vec<String>>,
    nodes: NodeTable,
}

impl HierarchyGraph {
    /// Root ids in first-seen order.
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Child ids of `id` in first-seen order; empty for leaves and unknown ids.
    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Full `parent -> children` index. Leaves have no entry.
    pub fn children(&self) -> &HashMap<String, Vec<String>> {
        &self.children
    }

    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order traversal yielding `(depth, record)`, roots in stored order.
    pub fn iter(&self) -> GraphIter<'_> {
        GraphIter::new(self, &self.roots)
    }

    /// Pre-order traversal of the subtree below and including `id`.
    pub fn iter_from<'a>(&'a self, id: &'a str) -> GraphIter<'a> {
        let mut iter = GraphIter::new(self, &[]);
        if self.nodes.contains(id) {
            iter.stack.push((id, 0));
        }
        iter
    }

    /// Number of levels in the deepest tree, 0 for an empty graph.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Ids of element nodes without child elements, in pre-order.
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| self.children_of(&node.id).is_empty())
            .map(|(_, node)| node.id.as_str())
            .collect()
    }
}

/// Explicit-stack pre-order iterator over a [`HierarchyGraph`].
pub struct GraphIter<'a> {
    graph: &'a HierarchyGraph,
    stack: Vec<(&'a str, usize)>,
}

impl<'a> GraphIter<'a> {
    fn new(graph: &'a HierarchyGraph, roots: &'a [String]) -> Self {
        // reversed so the first root is popped first
        let stack = roots.iter().rev().map(|id| (id.as_str(), 0)).collect();
        Self { graph, stack }
    }
}

impl<'a> Iterator for GraphIter<'a> {
    type Item = (usize, &'a NodeRecord);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, depth)) = self.stack.pop() {
            if let Some(node) = self.graph.node(id) {
                for child in self.graph.children_of(id).iter().rev() {
                    self.stack.push((child.as_str(), depth + 1));
                }
                return Some((depth, node));
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Done,
}

/// Builds a [`HierarchyGraph`] from ingested node records.
pub struct HierarchyBuilder;

impl HierarchyBuilder {
    /// Two passes over the complete node set.
    ///
    /// Pass 1 checks every parent chain for cycles. Pass 2 classifies roots
    /// (sentinel parent or parent id absent from the table) and appends every
    /// other id to its parent's children in first-seen order.
    #[instrument(level = "debug", skip(nodes), fields(nodes = nodes.len()))]
    pub fn build(nodes: NodeTable) -> DomainResult<HierarchyGraph> {
        Self::check_cycles(&nodes)?;

        let mut roots = Vec::new();
        let mut children: HashMap<String, Vec<String>> = HashMap::new();

        for (record, parent_id) in nodes.iter_with_parents() {
            if is_root(&nodes, parent_id) {
                roots.push(record.id.clone());
            } else {
                children
                    .entry(parent_id.to_string())
                    .or_default()
                    .push(record.id.clone());
            }
        }

        debug!(
            "build: {} roots, {} parents with children",
            roots.len(),
            children.len()
        );

        Ok(HierarchyGraph {
            roots,
            children,
            nodes,
        })
    }

    /// Walks each parent chain once, marking nodes on the current path.
    /// Reaching a node that is still on the path means the chain loops.
    fn check_cycles(nodes: &NodeTable) -> DomainResult<()> {
        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(nodes.len());
        let mut path: Vec<&str> = Vec::new();

        for start in nodes.ids() {
            let mut current = start;
            loop {
                match marks.get(current) {
                    Some(Mark::Done) => break,
                    Some(Mark::OnPath) => {
                        return Err(DomainError::CycleDetected(current.to_string()));
                    }
                    None => {
                        marks.insert(current, Mark::OnPath);
                        path.push(current);
                    }
                }

                match nodes.parent_of(current) {
                    Some(parent) if !is_root(nodes, parent) => current = parent,
                    _ => break,
                }
            }

            for id in path.drain(..) {
                marks.insert(id, Mark::Done);
            }
        }

        Ok(())
    }
}

/// Sentinel parent or orphan: the declared parent is not in the table.
fn is_root(nodes: &NodeTable, parent_id: &str) -> bool {
    parent_id == ROOT_SENTINEL || !nodes.contains(parent_id)
}
