//! # Storage Layer
//!
//! Documents and mapping files are addressed by name. The [`DocumentStore`] trait
//! keeps the editor and the commands independent of where those names live.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: names resolved relative to a root directory (the working
//!   directory for the CLI).
//! - [`memory::InMemoryStore`]: a name → contents map for tests.
//!
//! Reads are whole-resource, writes either overwrite or append. Nothing is
//! streamed and nothing is cached between calls.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// How `write` treats an existing resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    #[default]
    Overwrite,
    Append,
}

/// Abstract interface for named text resources.
pub trait DocumentStore {
    /// Read the full contents of a resource.
    ///
    /// Fails with `RenoteError::NotFound` when the resource does not exist.
    fn read(&self, name: &str) -> Result<String>;

    /// Write contents under a name, creating the resource if needed.
    fn write(&mut self, name: &str, contents: &str, mode: WriteMode) -> Result<()>;

    /// Whether a resource with this name exists
    fn exists(&self, name: &str) -> bool;
}
