// file: src/config/mod.rs
// version: 1.0.0
// guid: a2f6c0d9-4e7b-4a13-b5c3-e7f8a9b0c1d2

//! Shell configuration
//!
//! Loaded from an optional YAML file. Every field has a default, so an empty
//! file is a valid configuration.

pub mod loader;

use crate::programs::ls::DEFAULT_BATCH_SIZE_HINT;
use crate::{Result, ShellError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prompt printed before each shell line
pub const DEFAULT_PROMPT: &str = "user@localhost:~/ ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Directory the filesystem capability is sandboxed to
    pub root: PathBuf,
    pub prompt: String,
    /// Hint passed to the directory reader by `ls`
    pub batch_size_hint: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            prompt: DEFAULT_PROMPT.to_string(),
            batch_size_hint: DEFAULT_BATCH_SIZE_HINT,
        }
    }
}

impl ShellConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(ShellError::config("root cannot be empty"));
        }

        if self.prompt.is_empty() {
            return Err(ShellError::config("prompt cannot be empty"));
        }

        if self.batch_size_hint == 0 {
            return Err(ShellError::config("batch_size_hint must be at least 1"));
        }

        Ok(())
    }
}
