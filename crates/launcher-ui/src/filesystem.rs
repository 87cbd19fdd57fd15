//! Filesystem abstraction for the disc browser.
//! Backed by the host filesystem, an SD card, or the in-memory mock.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// A file entry in the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub is_directory: bool,
}

/// Filesystem error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileSystemError {
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("IO error: {0}")]
    Io(String),
}

/// Trait for filesystem operations
///
/// Implementations:
/// - `MockFileSystem` for simulators and tests
/// - `HostFileSystem` (std) for desktop builds
pub trait FileSystem {
    /// List files in a directory
    fn list_files(&mut self, path: &str) -> Result<Vec<FileInfo>, FileSystemError>;

    /// Read an entire file
    ///
    /// # Errors
    /// Returns FileSystemError if file not found or read fails
    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError>;

    /// Create or replace a file, creating missing parent directories.
    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), FileSystemError>;
}

/// Whether `name` ends with one of `extensions`, ignoring case
pub fn extension_matches<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    let name_lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| name_lower.ends_with(&ext.as_ref().to_lowercase()))
}

/// Get filename without path
pub fn basename(path: &str) -> &str {
    path.rfind('/').map(|i| &path[i + 1..]).unwrap_or(path)
}

/// Get parent directory
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => ".",
    }
}

/// Join paths
pub fn join_path(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}

/// Filesystem rooted at a host directory.
#[cfg(feature = "std")]
pub struct HostFileSystem {
    root: std::path::PathBuf,
}

#[cfg(feature = "std")]
impl HostFileSystem {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> std::path::PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[cfg(feature = "std")]
fn map_io_error(err: std::io::Error) -> FileSystemError {
    match err.kind() {
        std::io::ErrorKind::NotFound => FileSystemError::NotFound,
        std::io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied,
        _ => FileSystemError::Io(err.to_string()),
    }
}

#[cfg(feature = "std")]
impl FileSystem for HostFileSystem {
    fn list_files(&mut self, path: &str) -> Result<Vec<FileInfo>, FileSystemError> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(self.resolve(path)).map_err(map_io_error)? {
            let entry = entry.map_err(map_io_error)?;
            let meta = entry.metadata().map_err(map_io_error)?;
            files.push(FileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: meta.len(),
                is_directory: meta.is_dir(),
            });
        }
        Ok(files)
    }

    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        std::fs::read(self.resolve(path)).map_err(map_io_error)
    }

    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), FileSystemError> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(map_io_error)?;
        }
        std::fs::write(target, data).map_err(map_io_error)
    }
}
