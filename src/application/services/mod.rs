//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, TableEngine)
//! but are themselves concrete structs, not traits.

mod extraction;

pub use extraction::{Extraction, ExtractionService};
