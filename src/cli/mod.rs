// file: src/cli/mod.rs
// version: 1.0.0
// guid: b9c3a5e6-7d0f-4e46-a8f6-b0c1d2e3f4a5

//! Command line interface for the sandbox shell

pub mod args;
pub mod commands;

pub use args::Cli;
pub use commands::*;
