// file: src/fs/memory.rs
// version: 1.0.0
// guid: 2e7a5b93-f1c4-4d08-a6b7-c8d9e0f1a2b3

//! In-memory sandboxed filesystem
//!
//! Keeps entries in insertion order so listings are predictable, and counts
//! capability requests so callers can check whether a program touched the
//! filesystem at all.

use super::{
    path, DirectoryReader, DirectoryRoot, Entry, FileHandle, FileSystem, FileSystemHost,
    GetFileOptions,
};
use crate::{Result, ShellError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Directory,
}

#[derive(Debug, Default)]
struct State {
    /// Normalized path -> node, in insertion order
    nodes: RwLock<Vec<(Vec<String>, Node)>>,
    requests: AtomicUsize,
    unavailable: AtomicBool,
    reads_fail: AtomicBool,
}

/// In-memory filesystem host
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<State>,
    batch_limit: Option<usize>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with `contents`. Missing parent directories are added too.
    pub fn with_file(self, file_path: &str, contents: &str) -> Self {
        self.insert(file_path, Node::File(contents.to_string()))
    }

    /// Add a directory. Missing parent directories are added too.
    pub fn with_directory(self, dir_path: &str) -> Self {
        self.insert(dir_path, Node::Directory)
    }

    /// Cap every directory batch at `limit` entries
    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = Some(limit);
        self
    }

    /// Make every following capability request fail
    pub fn fail_file_system(&self) {
        self.state.unavailable.store(true, Ordering::SeqCst);
    }

    /// Make every following file read fail, while files still resolve
    pub fn fail_reads(&self) {
        self.state.reads_fail.store(true, Ordering::SeqCst);
    }

    /// Number of capability requests made so far
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    fn insert(self, raw_path: &str, node: Node) -> Self {
        let Ok(components) = path::normalize(raw_path) else {
            return self;
        };
        if components.is_empty() {
            return self;
        }

        // Builders run before any capability is handed out, so the lock is free.
        if let Ok(mut nodes) = self.state.nodes.try_write() {
            for depth in 1..components.len() {
                let parent = &components[..depth];
                if !nodes.iter().any(|(p, _)| p.as_slice() == parent) {
                    nodes.push((parent.to_vec(), Node::Directory));
                }
            }

            match nodes.iter_mut().find(|(p, _)| *p == components) {
                Some((_, existing)) => *existing = node,
                None => nodes.push((components, node)),
            }
        }

        self
    }
}

impl FileSystemHost for MemoryFileSystem {
    type Root = MemoryRoot;

    async fn request_file_system(&self) -> Result<FileSystem<MemoryRoot>> {
        self.state.requests.fetch_add(1, Ordering::SeqCst);

        if self.state.unavailable.load(Ordering::SeqCst) {
            return Err(ShellError::not_found("filesystem unavailable"));
        }

        Ok(FileSystem {
            name: "memory".to_string(),
            root: MemoryRoot {
                state: Arc::clone(&self.state),
                batch_limit: self.batch_limit,
            },
        })
    }
}

/// Root directory of a [`MemoryFileSystem`] capability
#[derive(Debug, Clone)]
pub struct MemoryRoot {
    state: Arc<State>,
    batch_limit: Option<usize>,
}

impl DirectoryRoot for MemoryRoot {
    type Reader = MemoryDirectoryReader;

    async fn get_file(&self, file_path: &str, options: GetFileOptions) -> Result<FileHandle> {
        let components = path::normalize(file_path)?;
        if components.is_empty() {
            return Err(ShellError::type_mismatch("the root is a directory"));
        }

        let mut nodes = self.state.nodes.write().await;
        let existing_is_dir = nodes
            .iter()
            .find(|(p, _)| *p == components)
            .map(|(_, node)| matches!(node, Node::Directory));

        match existing_is_dir {
            Some(true) => Err(ShellError::type_mismatch(format!(
                "{} is a directory",
                path::join(&components)
            ))),
            Some(false) if options.create && options.exclusive => Err(
                ShellError::invalid_modification(format!("{} already exists", path::join(&components))),
            ),
            Some(false) => Ok(FileHandle::from_components(&components)),
            None if options.create => {
                let parent = &components[..components.len() - 1];
                let parent_exists = parent.is_empty()
                    || nodes
                        .iter()
                        .any(|(p, n)| p.as_slice() == parent && matches!(n, Node::Directory));
                if !parent_exists {
                    return Err(ShellError::not_found(path::join(parent)));
                }

                let handle = FileHandle::from_components(&components);
                nodes.push((components, Node::File(String::new())));
                Ok(handle)
            }
            None => Err(ShellError::not_found(path::join(&components))),
        }
    }

    fn create_reader(&self, batch_size_hint: usize) -> MemoryDirectoryReader {
        MemoryDirectoryReader {
            state: Arc::clone(&self.state),
            batch_limit: self.batch_limit,
            batch_size_hint,
            position: 0,
        }
    }

    async fn read_as_text(&self, file: &FileHandle) -> Result<String> {
        if self.state.reads_fail.load(Ordering::SeqCst) {
            return Err(ShellError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("read of {} failed", file.full_path),
            )));
        }

        let components = path::normalize(&file.full_path)?;
        let nodes = self.state.nodes.read().await;
        match nodes.iter().find(|(p, _)| *p == components) {
            Some((_, Node::File(contents))) => Ok(contents.clone()),
            Some((_, Node::Directory)) => Err(ShellError::type_mismatch(file.full_path.clone())),
            None => Err(ShellError::not_found(file.full_path.clone())),
        }
    }
}

/// Reader over the root entries of a [`MemoryFileSystem`]
#[derive(Debug)]
pub struct MemoryDirectoryReader {
    state: Arc<State>,
    batch_limit: Option<usize>,
    batch_size_hint: usize,
    position: usize,
}

impl DirectoryReader for MemoryDirectoryReader {
    async fn read_entries(&mut self) -> Result<Vec<Entry>> {
        let nodes = self.state.nodes.read().await;
        let limit = self.batch_limit.unwrap_or(usize::MAX);

        let batch: Vec<Entry> = nodes
            .iter()
            .filter(|(p, _)| p.len() == 1)
            .skip(self.position)
            .take(limit)
            .map(|(p, node)| match node {
                Node::File(_) => Entry::file(p[0].clone()),
                Node::Directory => Entry::directory(p[0].clone()),
            })
            .collect();

        tracing::trace!(
            "Memory reader returned {} entries (hint {})",
            batch.len(),
            self.batch_size_hint
        );
        self.position += batch.len();
        Ok(batch)
    }
}
