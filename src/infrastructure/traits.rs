//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;
use std::process::Output;

use crate::domain::RowTable;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;
}

/// External conversion engine: markup document in, row table out.
///
/// Each extraction creates exactly one handle and releases it afterwards.
/// Handles are not reentrant and must not outlive the extraction.
pub trait TableEngine: Send + Sync {
    /// Create a handle for one conversion of `source`.
    /// `destination` is where the engine writes its table; engines pick a
    /// temporary location when it is None.
    fn create(&self, source: &Path, destination: Option<&Path>) -> io::Result<Box<dyn EngineHandle>>;
}

/// One acquired engine handle.
pub trait EngineHandle {
    /// Run the conversion.
    fn execute(&mut self) -> io::Result<()>;

    /// Row table produced by the conversion, header row first.
    /// Executes first if that has not happened yet.
    fn export_table(&mut self) -> io::Result<RowTable>;

    /// Free everything the handle holds. Called exactly once.
    fn release(&mut self);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }
}
