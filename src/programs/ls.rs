// file: src/programs/ls.rs
// version: 1.0.0
// guid: 4f9a2c76-b8e1-4d35-8a47-a3b4c5d6e7f8

//! `ls`: list the entries of the root directory

use crate::fs::{DirectoryReader, DirectoryRoot, Entry, FileSystemHost};
use crate::Result;
use std::io::Write;
use tracing::debug;

/// Batch size hint passed to the directory reader by default
pub const DEFAULT_BATCH_SIZE_HINT: usize = 1;

/// Run `ls` against the root directory.
///
/// Reads a single batch of entries and prints one line per entry, in the
/// order the reader returned them. Entries past the first batch are not
/// listed. A failed request or read prints nothing.
pub async fn ls<H, W>(host: &H, batch_size_hint: usize, out: &mut W) -> Result<()>
where
    H: FileSystemHost,
    W: Write,
{
    let fs = match host.request_file_system().await {
        Ok(fs) => fs,
        Err(e) => {
            debug!("ls: filesystem request failed: {}", e);
            return Ok(());
        }
    };

    let mut reader = fs.root.create_reader(batch_size_hint);
    let entries = match reader.read_entries().await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("ls: reading entries failed: {}", e);
            return Ok(());
        }
    };

    for entry in &entries {
        writeln!(out, "{}", listing_name(entry))?;
    }

    Ok(())
}

/// Entry name with a trailing `/` for directories
pub fn listing_name(entry: &Entry) -> String {
    if entry.is_directory {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}
