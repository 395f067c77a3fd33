//! Indented text rendering of a [`HierarchyGraph`].

use colored::Colorize;
use rayon::prelude::*;
use tracing::instrument;

use crate::domain::entities::{Attribute, RenderOutcome};
use crate::domain::hierarchy::HierarchyGraph;

/// What a rendered line stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Element,
    Attribute,
}

/// One line of the depth-first rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub depth: usize,
    pub text: String,
    pub kind: LineKind,
}

impl RenderLine {
    /// `(depth, text)` view of the line.
    pub fn as_pair(&self) -> (usize, &str) {
        (self.depth, self.text.as_str())
    }
}

/// Presentation settings for printed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Colorize tags and attributes
    pub color: bool,
    /// Spaces per depth level
    pub indent: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: false,
            indent: 2,
        }
    }
}

enum Frame<'a> {
    Element(&'a str, usize),
    Attribute(&'a Attribute, usize),
}

/// Lazy pre-order line sequence.
///
/// Per element: the tag at its depth, its attributes one level deeper, then
/// its child elements. Attributes always come before child elements.
pub struct TreeLines<'a> {
    graph: &'a HierarchyGraph,
    stack: Vec<Frame<'a>>,
}

impl<'a> TreeLines<'a> {
    fn new(graph: &'a HierarchyGraph, roots: &'a [String]) -> Self {
        let stack = roots
            .iter()
            .rev()
            .map(|id| Frame::Element(id.as_str(), 0))
            .collect();
        Self { graph, stack }
    }
}

impl<'a> Iterator for TreeLines<'a> {
    type Item = RenderLine;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Attribute(attribute, depth) => {
                    return Some(RenderLine {
                        depth,
                        text: attribute.to_string(),
                        kind: LineKind::Attribute,
                    });
                }
                Frame::Element(id, depth) => {
                    let Some(node) = self.graph.node(id) else {
                        continue;
                    };
                    for child in self.graph.children_of(id).iter().rev() {
                        self.stack.push(Frame::Element(child.as_str(), depth + 1));
                    }
                    for attribute in node.attributes.iter().rev() {
                        self.stack.push(Frame::Attribute(attribute, depth + 1));
                    }
                    return Some(RenderLine {
                        depth,
                        text: node.tag.clone(),
                        kind: LineKind::Element,
                    });
                }
            }
        }
        None
    }
}

/// Renders a hierarchy as indented text lines.
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    style: RenderStyle,
}

impl TreeRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Fresh line sequence over `graph`; `Empty` when there are no roots.
    pub fn render<'a>(&self, graph: &'a HierarchyGraph) -> RenderOutcome<TreeLines<'a>> {
        if graph.is_empty() {
            return RenderOutcome::Empty;
        }
        RenderOutcome::Ready(TreeLines::new(graph, graph.roots()))
    }

    /// Same lines as [`render`](Self::render), one root subtree per rayon task.
    /// Subtree results are concatenated in root order.
    #[instrument(level = "debug", skip(self, graph), fields(roots = graph.roots().len()))]
    pub fn render_parallel(&self, graph: &HierarchyGraph) -> RenderOutcome<Vec<RenderLine>> {
        if graph.is_empty() {
            return RenderOutcome::Empty;
        }
        let per_root: Vec<Vec<RenderLine>> = graph
            .roots()
            .par_iter()
            .map(|root| TreeLines::new(graph, std::slice::from_ref(root)).collect())
            .collect();
        RenderOutcome::Ready(per_root.into_iter().flatten().collect())
    }

    /// Indents `line` by `indent * depth` spaces and colors it if enabled.
    pub fn format_line(&self, line: &RenderLine) -> String {
        let pad = " ".repeat(self.style.indent * line.depth);
        if !self.style.color {
            return format!("{}{}", pad, line.text);
        }
        match line.kind {
            LineKind::Element => format!("{}{}", pad, line.text.cyan().bold()),
            LineKind::Attribute => format!("{}{}", pad, line.text.yellow()),
        }
    }

    /// All formatted lines joined by newlines; `Empty` for a graph without roots.
    pub fn render_to_string(&self, graph: &HierarchyGraph) -> RenderOutcome<String> {
        self.render(graph).map(|lines| {
            lines
                .map(|line| self.format_line(&line))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}
