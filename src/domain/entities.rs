//! Domain entities: core data structures

use std::fmt;

/// Parent id that marks a node without parent.
pub const ROOT_SENTINEL: &str = "-1";

/// Minimum number of cells in a data row:
/// `id, parent_id, ..., tag, attribute, value` plus at least one middle column.
pub const MIN_ROW_CELLS: usize = 6;

/// One row of the exported table, cells in column order.
pub type Row = Vec<String>;

/// Complete row table as produced by the engine, header row first.
pub type RowTable = Vec<Row>;

/// Single `name="value"` pair attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Renders as `name="value"`.
///
/// The value is embedded verbatim: a value containing `"` yields ambiguous
/// output. The engine's own value encoding is unknown, so no escaping is
/// applied here.
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.name, self.value)
    }
}

/// One document element, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    /// Identifier, unique within one table
    pub id: String,
    /// Element tag, fixed by the first row mentioning `id`
    pub tag: String,
    /// Attributes in row order
    pub attributes: Vec<Attribute>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }
}

/// Result of rendering or model building.
///
/// A graph without roots is not an error: it surfaces as `Empty`, the
/// "no data" status callers report instead of printing nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome<T> {
    Ready(T),
    Empty,
}

impl<T> RenderOutcome<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutcome::Empty)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            RenderOutcome::Ready(value) => Some(value),
            RenderOutcome::Empty => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RenderOutcome<U> {
        match self {
            RenderOutcome::Ready(value) => RenderOutcome::Ready(f(value)),
            RenderOutcome::Empty => RenderOutcome::Empty,
        }
    }
}
