//! Error conversion helpers for I/O results crossing the engine boundary

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// EngineSession::open(engine, &source, None)
    ///     .with_path_context("acquire engine handle", &source)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;

    /// Report a failed conversion of `source`.
    fn engine_failure(self, source: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }

    fn engine_failure(self, source: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Engine {
            message: format!("{}: {}", source.display(), e),
        })
    }
}
