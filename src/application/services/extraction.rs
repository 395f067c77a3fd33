//! Extraction service
//!
//! Runs one engine session per call and reconstructs the hierarchy from the
//! table it exports.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{ingest, HierarchyBuilder, HierarchyGraph, RowTable};
use crate::infrastructure::engine::EngineSession;
use crate::infrastructure::traits::{FileSystem, TableEngine};

/// Row table and the hierarchy rebuilt from it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub table: RowTable,
    pub graph: HierarchyGraph,
}

/// Service turning a source document into a [`HierarchyGraph`].
pub struct ExtractionService {
    engine: Arc<dyn TableEngine>,
    fs: Arc<dyn FileSystem>,
}

impl ExtractionService {
    pub fn new(engine: Arc<dyn TableEngine>, fs: Arc<dyn FileSystem>) -> Self {
        Self { engine, fs }
    }

    /// Row table for `source`, header row first.
    ///
    /// The engine handle is released before this returns, on success and
    /// on failure alike.
    #[instrument(level = "debug", skip(self))]
    pub fn extract_table(&self, source: &Path) -> ApplicationResult<RowTable> {
        self.ensure_source(source)?;

        let mut session = EngineSession::open(self.engine.as_ref(), source, None)
            .with_path_context("acquire engine handle", source)?;
        let table = session.export_table().engine_failure(source)?;

        debug!("extract_table: {} rows", table.len());
        Ok(table)
    }

    /// Extract the table and rebuild its hierarchy.
    ///
    /// Fails on the first malformed row or parent cycle; no partial graph is
    /// returned.
    #[instrument(level = "debug", skip(self))]
    pub fn extract(&self, source: &Path) -> ApplicationResult<Extraction> {
        let table = self.extract_table(source)?;
        let nodes = ingest(&table)?;
        let graph = HierarchyBuilder::build(nodes)?;
        info!(
            "extracted {} nodes, {} roots from {}",
            graph.len(),
            graph.roots().len(),
            source.display()
        );
        Ok(Extraction { table, graph })
    }

    /// Let the engine write the table for `source` to `destination`.
    #[instrument(level = "debug", skip(self))]
    pub fn export(&self, source: &Path, destination: &Path) -> ApplicationResult<()> {
        self.ensure_source(source)?;

        let mut session = EngineSession::open(self.engine.as_ref(), source, Some(destination))
            .with_path_context("acquire engine handle", source)?;
        session.execute().engine_failure(source)?;

        info!("exported {} -> {}", source.display(), destination.display());
        Ok(())
    }

    fn ensure_source(&self, source: &Path) -> ApplicationResult<()> {
        if !self.fs.is_file(source) {
            return Err(ApplicationError::SourceNotFound(source.to_path_buf()));
        }
        Ok(())
    }
}
