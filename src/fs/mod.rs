// file: src/fs/mod.rs
// version: 1.0.0
// guid: 7a1c9e30-2b4d-4f86-8c5e-d0e1f2a3b4c5

//! Filesystem-access capability
//!
//! Programs never touch the disk directly. They ask a [`FileSystemHost`] for a
//! capability, then resolve files and read directories through the capability's
//! root. Every step is an awaited request, so a file read can only begin once
//! the file has been resolved.

pub mod local;
pub mod memory;
pub mod path;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

use crate::Result;
use std::future::Future;

/// Grants capabilities over one sandboxed filesystem root
pub trait FileSystemHost: Send + Sync {
    /// Root directory type handed out with the capability
    type Root: DirectoryRoot;

    /// Request the filesystem capability
    fn request_file_system(&self) -> impl Future<Output = Result<FileSystem<Self::Root>>> + Send;
}

/// Root directory of a sandboxed filesystem
pub trait DirectoryRoot: Send + Sync {
    /// Reader type produced by [`DirectoryRoot::create_reader`]
    type Reader: DirectoryReader;

    /// Resolve `path` to a file handle, honoring `options`
    fn get_file(
        &self,
        path: &str,
        options: GetFileOptions,
    ) -> impl Future<Output = Result<FileHandle>> + Send;

    /// Create a reader over the root directory's entries.
    ///
    /// `batch_size_hint` is advisory; a reader may return any number of
    /// entries per batch.
    fn create_reader(&self, batch_size_hint: usize) -> Self::Reader;

    /// Read a resolved file in full and decode it as text
    fn read_as_text(&self, file: &FileHandle) -> impl Future<Output = Result<String>> + Send;
}

/// Batched reader over directory entries
pub trait DirectoryReader: Send {
    /// Read the next batch. An empty batch means the directory is exhausted.
    fn read_entries(&mut self) -> impl Future<Output = Result<Vec<Entry>>> + Send;
}

/// A granted filesystem capability
#[derive(Debug, Clone)]
pub struct FileSystem<R> {
    pub name: String,
    pub root: R,
}

/// Options for [`DirectoryRoot::get_file`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetFileOptions {
    /// Create the file when it does not exist
    pub create: bool,
    /// With `create`, fail if the file already exists
    pub exclusive: bool,
}

impl GetFileOptions {
    /// Options that create a missing file
    pub fn create() -> Self {
        Self {
            create: true,
            exclusive: false,
        }
    }

    /// Options that create a file and fail if it already exists
    pub fn create_new() -> Self {
        Self {
            create: true,
            exclusive: true,
        }
    }
}

/// Handle to a resolved file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// Final path component
    pub name: String,
    /// Absolute path inside the sandbox, always starting with `/`
    pub full_path: String,
}

impl FileHandle {
    pub(crate) fn from_components(components: &[String]) -> Self {
        Self {
            name: components.last().cloned().unwrap_or_default(),
            full_path: path::join(components),
        }
    }
}

/// One directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_file: bool,
    pub is_directory: bool,
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: true,
            is_directory: false,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: false,
            is_directory: true,
        }
    }
}

/// Full-text reader.
///
/// The decoded content lands in [`FileReader::result`] once
/// [`FileReader::read_as_text`] completes.
#[derive(Debug, Default)]
pub struct FileReader {
    result: Option<String>,
}

impl FileReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `file` through `root` and store its text
    pub async fn read_as_text<R: DirectoryRoot>(&mut self, root: &R, file: &FileHandle) -> Result<()> {
        let text = root.read_as_text(file).await?;
        self.result = Some(text);
        Ok(())
    }

    /// Content of the last completed read
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }
}
