// file: src/programs/cat.rs
// version: 1.0.0
// guid: 8c3d7e15-a4f2-4b96-b0d1-f2e3a4b5c6d7

//! `cat`: print the text of one file

use crate::fs::{DirectoryRoot, FileReader, FileSystemHost, GetFileOptions};
use crate::Result;
use std::io::Write;
use tracing::debug;

/// Line printed when `cat` is not given exactly one path
pub const USAGE: &str = "Usage: cat filename";

/// Run `cat` with `argv` (program name first).
///
/// Prints the usage line and returns without touching the filesystem unless
/// exactly one path follows the program name. Failures to reach or read the
/// file produce no further output; only errors writing to `out` are returned.
pub async fn cat<H, W>(argv: &[String], host: &H, out: &mut W) -> Result<()>
where
    H: FileSystemHost,
    W: Write,
{
    let [_, path] = argv else {
        writeln!(out, "{}", USAGE)?;
        return Ok(());
    };

    writeln!(out, "Opening file: {}", path)?;

    let fs = match host.request_file_system().await {
        Ok(fs) => fs,
        Err(e) => {
            debug!("cat: filesystem request failed: {}", e);
            return Ok(());
        }
    };

    let file = match fs.root.get_file(path, GetFileOptions::default()).await {
        Ok(file) => file,
        Err(e) => {
            debug!("cat: could not resolve {}: {}", path, e);
            return Ok(());
        }
    };

    let mut reader = FileReader::new();
    if let Err(e) = reader.read_as_text(&fs.root, &file).await {
        debug!("cat: could not read {}: {}", file.full_path, e);
        return Ok(());
    }

    if let Some(text) = reader.result() {
        writeln!(out, "{}", text)?;
    }

    Ok(())
}
