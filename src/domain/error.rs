//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the row-table contract.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(
        "malformed row {row}{}: expected at least 6 cells, found {cells}",
        id_suffix(.id)
    )]
    MalformedRow {
        row: usize,
        /// First cell of the row, when it has a non-empty one
        id: Option<String>,
        cells: usize,
    },

    #[error("cycle detected in hierarchy at node: {0}")]
    CycleDetected(String),
}

fn id_suffix(id: &Option<String>) -> String {
    id.as_deref()
        .map(|id| format!(" (id {})", id))
        .unwrap_or_default()
}
