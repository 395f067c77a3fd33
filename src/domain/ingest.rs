//! Row table ingestion: rows -> validated, deduplicated node records.

use std::collections::HashMap;

use tracing::{debug, instrument, trace};

use crate::domain::entities::{Attribute, NodeRecord, Row, MIN_ROW_CELLS};
use crate::domain::error::DomainError;

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Node records keyed by id, in first-seen order.
///
/// The parent id of each node travels alongside its record so that
/// hierarchy construction can classify roots once every id is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTable {
    records: Vec<NodeRecord>,
    parents: Vec<String>,
    index: HashMap<String, usize>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&NodeRecord> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// Declared parent id of `id`, as written in its first row.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&pos| self.parents[pos].as_str())
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.records.iter()
    }

    /// `(record, parent_id)` pairs in first-seen order.
    pub fn iter_with_parents(&self) -> impl Iterator<Item = (&NodeRecord, &str)> {
        self.records
            .iter()
            .zip(self.parents.iter().map(String::as_str))
    }

    /// Ids in first-seen order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    fn upsert(&mut self, id: &str, parent_id: &str, tag: &str) -> &mut NodeRecord {
        let pos = match self.index.get(id) {
            Some(&pos) => pos,
            None => {
                let pos = self.records.len();
                self.records.push(NodeRecord::new(id, tag));
                self.parents.push(parent_id.to_string());
                self.index.insert(id.to_string(), pos);
                pos
            }
        };
        &mut self.records[pos]
    }
}

/// Turns a row table (header first) into a [`NodeTable`].
///
/// The header row is skipped without looking at it. Every data row needs at
/// least [`MIN_ROW_CELLS`] cells; the first row that falls short aborts
/// ingestion and nothing is returned.
#[instrument(level = "debug", skip(rows), fields(rows = rows.len()))]
pub fn ingest(rows: &[Row]) -> DomainResult<NodeTable> {
    let mut table = NodeTable::new();

    // row numbers are 1-based and count the header
    for (offset, row) in rows.iter().enumerate().skip(1) {
        let cells = row.len();
        if cells < MIN_ROW_CELLS {
            return Err(DomainError::MalformedRow {
                row: offset + 1,
                id: row.first().filter(|id| !id.is_empty()).cloned(),
                cells,
            });
        }

        let id = &row[0];
        let parent_id = &row[1];
        let tag = &row[cells - 3];
        let attribute = &row[cells - 2];
        let value = &row[cells - 1];
        trace!(id = %id, parent_id = %parent_id, tag = %tag, "row");

        let record = table.upsert(id, parent_id, tag);
        if !attribute.is_empty() {
            record
                .attributes
                .push(Attribute::new(attribute.as_str(), value.as_str()));
        }
    }

    debug!("ingest: {} nodes", table.len());
    Ok(table)
}
