//! Engine implementations and the scoped session guard.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::{NamedTempFile, TempPath};
use tracing::{debug, instrument, warn};

use crate::domain::RowTable;
use crate::infrastructure::table_file::{parse_table, DELIMITER};
use crate::infrastructure::traits::{CommandRunner, EngineHandle, FileSystem, TableEngine};

/// Scoped ownership of one engine handle.
///
/// The handle is released when the session is dropped, which covers early
/// returns through `?` as well as unwinding.
pub struct EngineSession {
    handle: Box<dyn EngineHandle>,
}

impl EngineSession {
    /// Acquire a handle for converting `source`.
    pub fn open(
        engine: &dyn TableEngine,
        source: &Path,
        destination: Option<&Path>,
    ) -> io::Result<Self> {
        let handle = engine.create(source, destination)?;
        debug!("engine handle acquired for {}", source.display());
        Ok(Self { handle })
    }

    pub fn execute(&mut self) -> io::Result<()> {
        self.handle.execute()
    }

    pub fn export_table(&mut self) -> io::Result<RowTable> {
        self.handle.export_table()
    }
}

impl Drop for EngineSession {
    fn drop(&mut self) {
        self.handle.release();
        debug!("engine handle released");
    }
}

/// Where a command engine writes its table.
enum Destination {
    Given(PathBuf),
    Temporary(TempPath),
}

impl Destination {
    fn path(&self) -> &Path {
        match self {
            Destination::Given(path) => path.as_path(),
            Destination::Temporary(temp) => &**temp,
        }
    }
}

/// Runs the external converter as `<program> [args...] <source> <destination>`.
pub struct CommandEngine {
    runner: Arc<dyn CommandRunner>,
    fs: Arc<dyn FileSystem>,
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        fs: Arc<dyn FileSystem>,
        program: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            runner,
            fs,
            program: program.into(),
            args,
        }
    }
}

impl TableEngine for CommandEngine {
    fn create(&self, source: &Path, destination: Option<&Path>) -> io::Result<Box<dyn EngineHandle>> {
        let destination = match destination {
            Some(path) => Destination::Given(path.to_path_buf()),
            None => Destination::Temporary(NamedTempFile::new()?.into_temp_path()),
        };
        Ok(Box::new(CommandEngineHandle {
            runner: Arc::clone(&self.runner),
            fs: Arc::clone(&self.fs),
            program: self.program.clone(),
            args: self.args.clone(),
            source: source.to_path_buf(),
            destination: Some(destination),
            executed: false,
        }))
    }
}

struct CommandEngineHandle {
    runner: Arc<dyn CommandRunner>,
    fs: Arc<dyn FileSystem>,
    program: String,
    args: Vec<String>,
    source: PathBuf,
    destination: Option<Destination>,
    executed: bool,
}

impl CommandEngineHandle {
    fn destination(&self) -> io::Result<&Path> {
        self.destination
            .as_ref()
            .map(Destination::path)
            .ok_or_else(|| io::Error::other("engine handle already released"))
    }
}

impl EngineHandle for CommandEngineHandle {
    #[instrument(level = "debug", skip(self), fields(program = %self.program))]
    fn execute(&mut self) -> io::Result<()> {
        let destination = self.destination()?.to_path_buf();
        let source = self.source.to_string_lossy().into_owned();
        let destination = destination.to_string_lossy().into_owned();

        let mut args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        args.push(&source);
        args.push(&destination);

        let output = self.runner.run(&self.program, &args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(io::Error::other(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        self.executed = true;
        Ok(())
    }

    fn export_table(&mut self) -> io::Result<RowTable> {
        if !self.executed {
            self.execute()?;
        }
        let content = self.fs.read_to_string(self.destination()?)?;
        parse_table(&content, DELIMITER)
    }

    fn release(&mut self) {
        if let Some(Destination::Temporary(temp)) = self.destination.take() {
            if let Err(e) = temp.close() {
                warn!("could not remove temporary table: {}", e);
            }
        }
    }
}

/// Reads a table the engine exported earlier; the source is the table file.
pub struct ExportedTableEngine {
    fs: Arc<dyn FileSystem>,
}

impl ExportedTableEngine {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl TableEngine for ExportedTableEngine {
    fn create(&self, source: &Path, _destination: Option<&Path>) -> io::Result<Box<dyn EngineHandle>> {
        Ok(Box::new(ExportedTableHandle {
            fs: Arc::clone(&self.fs),
            source: source.to_path_buf(),
        }))
    }
}

struct ExportedTableHandle {
    fs: Arc<dyn FileSystem>,
    source: PathBuf,
}

impl EngineHandle for ExportedTableHandle {
    fn execute(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn export_table(&mut self) -> io::Result<RowTable> {
        let content = self.fs.read_to_string(&self.source)?;
        parse_table(&content, DELIMITER)
    }

    fn release(&mut self) {}
}
