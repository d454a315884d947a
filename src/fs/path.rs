// file: src/fs/path.rs
// version: 1.0.0
// guid: 5d2e8f41-c7a9-4b13-9e60-1a2b3c4d5e6f

//! Sandbox path resolution

use crate::{Result, ShellError};

/// Split `path` into components relative to the sandbox root.
///
/// Both `notes.txt` and `/notes.txt` name the same file. `.` is dropped and
/// `..` pops a component, but never above the root. An empty result is the
/// root itself.
pub fn normalize(path: &str) -> Result<Vec<String>> {
    let mut components: Vec<String> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if components.pop().is_none() {
                    return Err(ShellError::security(format!(
                        "{} escapes the sandbox root",
                        path
                    )));
                }
            }
            other => components.push(other.to_string()),
        }
    }

    Ok(components)
}

/// Render components as an absolute sandbox path
pub fn join(components: &[String]) -> String {
    format!("/{}", components.join("/"))
}
