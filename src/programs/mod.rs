// file: src/programs/mod.rs
// version: 1.0.0
// guid: 1a6e3d98-c5b2-4f47-9d08-b4c5d6e7f8a9

//! Programs runnable from the command line or the shell

pub mod cat;
pub mod ls;

pub use cat::cat;
pub use ls::ls;

use crate::fs::FileSystemHost;
use crate::logging::logger::with_async_operation_span;
use crate::Result;
use std::io::Write;

/// A program the shell knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Cat,
    Ls,
}

impl Program {
    /// Look up a program by the name typed at the prompt
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cat" => Some(Program::Cat),
            "ls" => Some(Program::Ls),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Program::Cat => "cat",
            Program::Ls => "ls",
        }
    }

    /// Run the program with `argv` (program name first)
    pub async fn run<H, W>(
        &self,
        argv: &[String],
        host: &H,
        batch_size_hint: usize,
        out: &mut W,
    ) -> Result<()>
    where
        H: FileSystemHost,
        W: Write,
    {
        with_async_operation_span(self.name(), move || async move {
            match self {
                Program::Cat => cat(argv, host, out).await,
                Program::Ls => ls(host, batch_size_hint, out).await,
            }
        })
        .await
    }
}
