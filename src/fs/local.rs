// file: src/fs/local.rs
// version: 1.0.0
// guid: 9b4f0c62-d3e8-4a71-b5c6-e7f8a9b0c1d2

//! Sandboxed filesystem backed by a real directory

use super::{
    path, DirectoryReader, DirectoryRoot, Entry, FileHandle, FileSystem, FileSystemHost,
    GetFileOptions,
};
use crate::{Result, ShellError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Host that grants capabilities over one directory on disk.
///
/// Symlinks inside the directory are followed only while their target stays
/// inside it; anything resolving elsewhere is a security error.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    base: PathBuf,
}

impl LocalFileSystem {
    /// Create a host sandboxed to `base`
    pub fn new<P: AsRef<Path>>(base: P) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Directory the sandbox is rooted at
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl FileSystemHost for LocalFileSystem {
    type Root = LocalRoot;

    async fn request_file_system(&self) -> Result<FileSystem<LocalRoot>> {
        let metadata = fs::metadata(&self.base).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                ShellError::not_found(format!("sandbox root {}", self.base.display()))
            }
            _ => ShellError::Io(e),
        })?;

        if !metadata.is_dir() {
            return Err(ShellError::type_mismatch(format!(
                "sandbox root {} is not a directory",
                self.base.display()
            )));
        }

        debug!("Granted filesystem capability over {}", self.base.display());

        Ok(FileSystem {
            name: self.base.display().to_string(),
            root: LocalRoot {
                base: self.base.clone(),
            },
        })
    }
}

/// Root directory of a [`LocalFileSystem`] capability
#[derive(Debug, Clone)]
pub struct LocalRoot {
    base: PathBuf,
}

impl LocalRoot {
    fn resolve(&self, components: &[String]) -> PathBuf {
        components
            .iter()
            .fold(self.base.clone(), |acc, part| acc.join(part))
    }

    /// Fail unless `target`, with symlinks resolved, lies inside the base
    async fn confine(&self, target: &Path) -> Result<()> {
        let base = fs::canonicalize(&self.base).await?;

        let resolved = match fs::canonicalize(target).await {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // A dangling symlink could still be followed by a create.
                if fs::symlink_metadata(target).await.is_ok() {
                    return Err(ShellError::security(format!(
                        "{} is a dangling symlink",
                        target.display()
                    )));
                }

                let Some(parent) = target.parent() else {
                    return Ok(());
                };
                match fs::canonicalize(parent).await {
                    Ok(resolved) => resolved,
                    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
                    Err(e) => return Err(ShellError::Io(e)),
                }
            }
            Err(e) => return Err(ShellError::Io(e)),
        };

        if !resolved.starts_with(&base) {
            return Err(ShellError::security(format!(
                "{} resolves outside the sandbox root",
                target.display()
            )));
        }

        Ok(())
    }
}

impl DirectoryRoot for LocalRoot {
    type Reader = LocalDirectoryReader;

    async fn get_file(&self, file_path: &str, options: GetFileOptions) -> Result<FileHandle> {
        let components = path::normalize(file_path)?;
        if components.is_empty() {
            return Err(ShellError::type_mismatch("the root is a directory"));
        }

        let target = self.resolve(&components);
        self.confine(&target).await?;

        match fs::metadata(&target).await {
            Ok(metadata) if metadata.is_dir() => Err(ShellError::type_mismatch(format!(
                "{} is a directory",
                path::join(&components)
            ))),
            Ok(_) if options.create && options.exclusive => Err(ShellError::invalid_modification(
                format!("{} already exists", path::join(&components)),
            )),
            Ok(_) => Ok(FileHandle::from_components(&components)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if !options.create {
                    return Err(ShellError::not_found(path::join(&components)));
                }

                fs::OpenOptions::new()
                    .write(true)
                    .create(true)
                    .open(&target)
                    .await?;
                debug!("Created {}", target.display());

                Ok(FileHandle::from_components(&components))
            }
            Err(e) => Err(ShellError::Io(e)),
        }
    }

    fn create_reader(&self, batch_size_hint: usize) -> LocalDirectoryReader {
        LocalDirectoryReader {
            dir: self.base.clone(),
            batch_size_hint,
            exhausted: false,
        }
    }

    async fn read_as_text(&self, file: &FileHandle) -> Result<String> {
        let components = path::normalize(&file.full_path)?;
        let target = self.resolve(&components);
        self.confine(&target).await?;

        let bytes = fs::read(&target).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Reader over the entries of a local directory.
///
/// The whole directory comes back in the first batch, sorted by name.
#[derive(Debug)]
pub struct LocalDirectoryReader {
    dir: PathBuf,
    batch_size_hint: usize,
    exhausted: bool,
}

impl DirectoryReader for LocalDirectoryReader {
    async fn read_entries(&mut self) -> Result<Vec<Entry>> {
        if self.exhausted {
            return Ok(Vec::new());
        }

        debug!(
            "Reading entries of {} (batch size hint {})",
            self.dir.display(),
            self.batch_size_hint
        );

        let mut entries = Vec::new();
        let mut read_dir = fs::read_dir(&self.dir).await?;
        while let Some(dir_entry) = read_dir.next_entry().await? {
            let file_type = dir_entry.file_type().await?;
            entries.push(Entry {
                name: dir_entry.file_name().to_string_lossy().into_owned(),
                is_file: file_type.is_file(),
                is_directory: file_type.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        self.exhausted = true;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn sandbox() -> (TempDir, FileSystem<LocalRoot>) {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "alpha\n").unwrap();
        std::fs::create_dir(temp_dir.path().join("b")).unwrap();
        std::fs::write(temp_dir.path().join("b").join("inner.txt"), "inner").unwrap();

        let host = LocalFileSystem::new(temp_dir.path());
        let fs = host.request_file_system().await.unwrap();
        (temp_dir, fs)
    }

    #[tokio::test]
    async fn test_missing_root_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let host = LocalFileSystem::new(temp_dir.path().join("nope"));

        let result = host.request_file_system().await;
        assert!(matches!(result, Err(ShellError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_file_and_read() {
        let (_temp_dir, fs) = sandbox().await;

        let file = fs.root.get_file("a.txt", GetFileOptions::default()).await.unwrap();
        assert_eq!(file.name, "a.txt");
        assert_eq!(fs.root.read_as_text(&file).await.unwrap(), "alpha\n");

        let nested = fs.root.get_file("/b/inner.txt", GetFileOptions::default()).await.unwrap();
        assert_eq!(nested.full_path, "/b/inner.txt");
        assert_eq!(fs.root.read_as_text(&nested).await.unwrap(), "inner");
    }

    #[tokio::test]
    async fn test_get_file_errors() {
        let (_temp_dir, fs) = sandbox().await;

        let missing = fs.root.get_file("missing.txt", GetFileOptions::default()).await;
        assert!(matches!(missing, Err(ShellError::NotFound(_))));

        let dir = fs.root.get_file("b", GetFileOptions::default()).await;
        assert!(matches!(dir, Err(ShellError::TypeMismatch(_))));

        let escape = fs.root.get_file("../outside.txt", GetFileOptions::default()).await;
        assert!(matches!(escape, Err(ShellError::Security(_))));
    }

    #[tokio::test]
    async fn test_get_file_create_flags() {
        let (temp_dir, fs) = sandbox().await;

        let created = fs.root.get_file("new.txt", GetFileOptions::create()).await.unwrap();
        assert!(temp_dir.path().join("new.txt").exists());
        assert_eq!(fs.root.read_as_text(&created).await.unwrap(), "");

        let again = fs.root.get_file("new.txt", GetFileOptions::create_new()).await;
        assert!(matches!(again, Err(ShellError::InvalidModification(_))));

        // plain create keeps the existing file
        assert!(fs.root.get_file("a.txt", GetFileOptions::create()).await.is_ok());
        assert_eq!(std::fs::read_to_string(temp_dir.path().join("a.txt")).unwrap(), "alpha\n");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decoded_lossily() {
        let (temp_dir, fs) = sandbox().await;
        std::fs::write(temp_dir.path().join("bin.dat"), [b'o', b'k', 0xff]).unwrap();

        let file = fs.root.get_file("bin.dat", GetFileOptions::default()).await.unwrap();
        assert_eq!(fs.root.read_as_text(&file).await.unwrap(), "ok\u{fffd}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_backslash_file_names_resolve() {
        let (temp_dir, fs) = sandbox().await;
        std::fs::write(temp_dir.path().join("x\\y"), "slashed").unwrap();

        let file = fs.root.get_file("x\\y", GetFileOptions::default()).await.unwrap();
        assert_eq!(fs.root.read_as_text(&file).await.unwrap(), "slashed");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_sandbox_is_rejected() {
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "secret").unwrap();

        let (temp_dir, fs) = sandbox().await;
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), temp_dir.path().join("link"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), temp_dir.path().join("outdir")).unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("missing.txt"),
            temp_dir.path().join("dangling"),
        )
        .unwrap();

        let link = fs.root.get_file("link", GetFileOptions::default()).await;
        assert!(matches!(link, Err(ShellError::Security(_))));

        let through_dir = fs.root.get_file("outdir/secret.txt", GetFileOptions::default()).await;
        assert!(matches!(through_dir, Err(ShellError::Security(_))));

        let create_via_dir = fs.root.get_file("outdir/new.txt", GetFileOptions::create()).await;
        assert!(matches!(create_via_dir, Err(ShellError::Security(_))));
        assert!(!outside.path().join("new.txt").exists());

        let create_via_dangling = fs.root.get_file("dangling", GetFileOptions::create()).await;
        assert!(matches!(create_via_dangling, Err(ShellError::Security(_))));
        assert!(!outside.path().join("missing.txt").exists());

        let forged = FileHandle {
            name: "link".to_string(),
            full_path: "/link".to_string(),
        };
        assert!(matches!(fs.root.read_as_text(&forged).await, Err(ShellError::Security(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_inside_sandbox_is_followed() {
        let (temp_dir, fs) = sandbox().await;
        std::os::unix::fs::symlink(temp_dir.path().join("a.txt"), temp_dir.path().join("alias"))
            .unwrap();

        let file = fs.root.get_file("alias", GetFileOptions::default()).await.unwrap();
        assert_eq!(fs.root.read_as_text(&file).await.unwrap(), "alpha\n");
    }

    #[tokio::test]
    async fn test_reader_returns_everything_once() {
        let (_temp_dir, fs) = sandbox().await;
        let mut reader = fs.root.create_reader(1);

        let first = reader.read_entries().await.unwrap();
        assert_eq!(first, vec![Entry::file("a.txt"), Entry::directory("b")]);

        assert!(reader.read_entries().await.unwrap().is_empty());
    }
}
