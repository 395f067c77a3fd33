//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ExtractionService;
use crate::config::Settings;
use crate::infrastructure::engine::{CommandEngine, ExportedTableEngine};
use crate::infrastructure::traits::{
    CommandRunner, FileSystem, RealCommandRunner, RealFileSystem, TableEngine,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs, cmd }
    }

    /// Engine running the configured converter program.
    pub fn command_engine(&self) -> Arc<dyn TableEngine> {
        Arc::new(CommandEngine::new(
            Arc::clone(&self.cmd),
            Arc::clone(&self.fs),
            self.settings.engine.program.clone(),
            self.settings.engine.args.clone(),
        ))
    }

    /// Engine reading an already exported table file.
    pub fn exported_table_engine(&self) -> Arc<dyn TableEngine> {
        Arc::new(ExportedTableEngine::new(Arc::clone(&self.fs)))
    }

    /// Extraction service over the converter, or over exported tables
    /// when `from_table` is set.
    pub fn extraction_service(&self, from_table: bool) -> ExtractionService {
        let engine = if from_table {
            self.exported_table_engine()
        } else {
            self.command_engine()
        };
        ExtractionService::new(engine, Arc::clone(&self.fs))
    }
}
