// file: src/lib.rs
// version: 1.0.0
// guid: 0f6b2d84-91c3-4e5a-a7d8-2b3c4e5f6a71

//! # Sandbox Shell
//!
//! Two small programs, `cat` and `ls`, that talk to a sandboxed filesystem
//! capability through async requests. The capability is handed to each
//! program when it runs, so the same programs work against the real
//! disk (`fs::local`) or an in-memory tree (`fs::memory`).

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod programs;
pub mod shell;

pub use error::{Result, ShellError};

/// Version information for the shell
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name printed in shell diagnostics
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");
