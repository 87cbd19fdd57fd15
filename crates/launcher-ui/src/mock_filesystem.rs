//! In-memory filesystem seeded with a small game library.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::filesystem::{basename, dirname, join_path, FileInfo, FileSystem, FileSystemError};

/// In-memory file entry
#[derive(Clone)]
enum MockEntry {
    File { content: Vec<u8> },
    Directory { children: Vec<String> },
}

/// Mock filesystem for simulators
///
/// Stores files in memory for exercising the disc browser without media
pub struct MockFileSystem {
    files: BTreeMap<String, MockEntry>,
}

impl MockFileSystem {
    /// Create new mock filesystem with a small sample game library
    pub fn new() -> Self {
        let mut fs = Self::empty();
        fs.add_directory("/");
        fs.add_directory("/games");
        fs.add_directory("/games/demos");
        fs.add_directory("/metadata");
        fs.add_directory("/tmp");

        fs.add_file("/games/elite.d64", [0u8; 16]);
        fs.add_file("/games/boulder_dash.prg", [0x01, 0x08]);
        fs.add_file("/games/impossible_mission.t64", [0u8; 8]);
        fs.add_file("/games/notes.txt", b"not a disc image");
        fs.add_file("/games/demos/second_reality.d64", [0u8; 16]);

        fs
    }

    /// Create empty mock filesystem
    pub fn empty() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    /// Add a file to the mock filesystem
    pub fn add_file(&mut self, path: &str, content: impl AsRef<[u8]>) {
        self.files.insert(
            path.to_string(),
            MockEntry::File {
                content: content.as_ref().to_vec(),
            },
        );
        self.link_to_parent(path);
    }

    /// Add a directory to the mock filesystem
    pub fn add_directory(&mut self, path: &str) {
        self.files.insert(
            path.to_string(),
            MockEntry::Directory {
                children: Vec::new(),
            },
        );
        if path != "/" {
            self.link_to_parent(path);
        }
    }

    fn link_to_parent(&mut self, path: &str) {
        if let Some(MockEntry::Directory { children }) = self.files.get_mut(dirname(path)) {
            let name = basename(path).to_string();
            if !children.contains(&name) {
                children.push(name);
            }
        }
    }

    fn ensure_directory(&mut self, path: &str) -> Result<(), FileSystemError> {
        match self.files.get(path) {
            Some(MockEntry::Directory { .. }) => Ok(()),
            Some(MockEntry::File { .. }) => Err(FileSystemError::Io("Not a directory".to_string())),
            None => {
                if path != "/" {
                    self.ensure_directory(dirname(path))?;
                }
                self.add_directory(path);
                Ok(())
            }
        }
    }

    /// Contents of a file, if present.
    pub fn contents(&self, path: &str) -> Option<&[u8]> {
        match self.files.get(&Self::normalize_path(path)) {
            Some(MockEntry::File { content }) => Some(content),
            _ => None,
        }
    }

    fn normalize_path(path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else {
            join_path("/", path)
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn list_files(&mut self, path: &str) -> Result<Vec<FileInfo>, FileSystemError> {
        let path = Self::normalize_path(path);

        match self.files.get(&path) {
            Some(MockEntry::Directory { children }) => Ok(children
                .iter()
                .filter_map(|child_name| {
                    let entry = self.files.get(&join_path(&path, child_name))?;
                    let (size, is_directory) = match entry {
                        MockEntry::File { content } => (content.len() as u64, false),
                        MockEntry::Directory { .. } => (0, true),
                    };
                    Some(FileInfo {
                        name: child_name.clone(),
                        size,
                        is_directory,
                    })
                })
                .collect()),
            Some(MockEntry::File { .. }) => Err(FileSystemError::Io("Not a directory".to_string())),
            None => Err(FileSystemError::NotFound),
        }
    }

    fn read_file(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        match self.files.get(&Self::normalize_path(path)) {
            Some(MockEntry::File { content }) => Ok(content.clone()),
            Some(MockEntry::Directory { .. }) => {
                Err(FileSystemError::Io("Is a directory".to_string()))
            }
            None => Err(FileSystemError::NotFound),
        }
    }

    fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), FileSystemError> {
        let path = Self::normalize_path(path);
        if let Some(MockEntry::Directory { .. }) = self.files.get(&path) {
            return Err(FileSystemError::Io("Is a directory".to_string()));
        }
        self.ensure_directory(dirname(&path))?;
        self.add_file(&path, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem() {
        let mut fs = MockFileSystem::new();

        let files = fs.list_files("/games").unwrap();
        assert!(files.iter().any(|f| f.name == "demos" && f.is_directory));
        assert!(files.iter().any(|f| f.name == "elite.d64" && !f.is_directory));

        let content = fs.read_file("/games/notes.txt").unwrap();
        assert_eq!(content, b"not a disc image");

        let prg = files.iter().find(|f| f.name == "boulder_dash.prg").unwrap();
        assert_eq!(prg.size, 2);
    }

    #[test]
    fn writes_replace_files_and_create_parents() {
        let mut fs = MockFileSystem::new();
        fs.write_file("/tmp/a", b"one").unwrap();
        fs.write_file("/tmp/a", b"two").unwrap();
        assert_eq!(fs.contents("/tmp/a"), Some(&b"two"[..]));
        assert_eq!(fs.list_files("/tmp").unwrap().len(), 1);

        fs.write_file("/scratch/deep/b", &[1u8]).unwrap();
        let listing = fs.list_files("/scratch").unwrap();
        assert!(listing.iter().any(|f| f.name == "deep" && f.is_directory));

        assert!(matches!(
            fs.write_file("/games", b"x"),
            Err(FileSystemError::Io(_))
        ));
    }

    #[test]
    fn listing_a_file_is_an_error() {
        let mut fs = MockFileSystem::new();
        assert!(matches!(
            fs.list_files("/games/elite.d64"),
            Err(FileSystemError::Io(_))
        ));
        assert_eq!(fs.list_files("/missing"), Err(FileSystemError::NotFound));
    }
}
