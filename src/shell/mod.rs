// file: src/shell/mod.rs
// version: 1.0.0
// guid: f4b8e2c1-6a9d-4c35-97e5-a9b0c1d2e3f4

//! Interactive command loop
//!
//! Reads one line at a time, runs the named program with the line's tokens as
//! its argv, and repeats until input ends. Each line runs on its own; nothing
//! carries over between programs.

use crate::config::ShellConfig;
use crate::fs::FileSystemHost;
use crate::programs::Program;
use crate::{Result, PROGRAM_NAME};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

pub struct Shell<H> {
    host: H,
    config: ShellConfig,
}

impl<H: FileSystemHost> Shell<H> {
    pub fn new(host: H, config: ShellConfig) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Prompt, read and execute lines from `input` until it is exhausted
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!("Shell started");
        let mut input = input;
        let mut buf = Vec::new();

        loop {
            write!(out, "{}", self.config.prompt)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(trim_line_ending(&buf)).into_owned();
            self.execute_line(&line, out).await?;
        }

        writeln!(out, "Exiting.")?;
        Ok(())
    }

    /// Execute a single command line.
    ///
    /// Tokens are separated by runs of whitespace, so `cat  a` is `cat` with
    /// the single argument `a`.
    pub async fn execute_line<W: Write>(&self, line: &str, out: &mut W) -> Result<()> {
        let argv: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let Some(name) = argv.first() else {
            return Ok(());
        };

        match Program::from_name(name) {
            Some(program) => {
                debug!("Running {} with {} argument(s)", program.name(), argv.len() - 1);
                program
                    .run(&argv, &self.host, self.config.batch_size_hint, out)
                    .await
            }
            None => {
                writeln!(out, "{}: {}: command not found", PROGRAM_NAME, line)?;
                Ok(())
            }
        }
    }
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
