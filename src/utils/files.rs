//! # File System Collaborator
//!
//! Whole-file access used by house loading and saved games. Paths handed to a
//! [`FileSystem`] are resolved against its root directory, so callers work with
//! bare file names such as `DefaultHouse.house.json`.

use crate::{config, HideError, HideResult};
use log::debug;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Whole-file operations the game needs from its environment.
pub trait FileSystem: std::fmt::Debug {
    /// Returns true if a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads the full contents of `path`, failing if it does not exist.
    fn read_to_string(&self, path: &Path) -> HideResult<String>;

    /// Writes `contents` to `path`, replacing any previous contents.
    fn write(&self, path: &Path, contents: &str) -> HideResult<()>;

    /// Deletes the file at `path`.
    fn delete(&self, path: &Path) -> HideResult<()>;

    /// Lists the files directly inside `dir`.
    fn list_files(&self, dir: &Path) -> HideResult<Vec<PathBuf>>;

    /// Directory used when no directory is given explicitly.
    fn default_directory(&self) -> PathBuf;
}

/// Returns true if `name` can be used as a file name on every platform the game
/// runs on: non-empty, no whitespace, no `\` or `/`.
pub fn is_portable_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c == '\\' || c == '/')
}

/// Fails with [`HideError::InvalidFileName`] unless `name` is portable.
pub fn validate_file_name(name: &str) -> HideResult<()> {
    if is_portable_file_name(name) {
        Ok(())
    } else {
        Err(HideError::InvalidFileName(name.to_string()))
    }
}

/// `<name>.house.json`
pub fn house_file_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", name, config::HOUSE_FILE_SUFFIX))
}

/// `<name>.game.json`
pub fn game_file_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", name, config::GAME_FILE_SUFFIX))
}

/// `<name>.json`
pub fn json_file_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", name, config::JSON_SUFFIX))
}

/// Returns the stems of every file in `dir` whose name ends with `suffix`, in
/// the order the file system lists them.
pub fn file_stems_with_suffix(
    files: &dyn FileSystem,
    dir: &Path,
    suffix: &str,
) -> HideResult<Vec<String>> {
    let stems = files
        .list_files(dir)?
        .iter()
        .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
        .filter_map(|name| name.strip_suffix(suffix))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .collect();
    Ok(stems)
}

/// File system backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    /// Creates a file system rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a file system rooted at the directory holding the running executable.
    pub fn beside_executable() -> HideResult<Self> {
        let exe = std::env::current_exe()?;
        let root = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(root))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_to_string(&self, path: &Path) -> HideResult<String> {
        let full = self.resolve(path);
        if !full.is_file() {
            return Err(HideError::FileNotFound(path.display().to_string()));
        }
        Ok(fs::read_to_string(full)?)
    }

    fn write(&self, path: &Path, contents: &str) -> HideResult<()> {
        let full = self.resolve(path);
        debug!("Writing {} bytes to {}", contents.len(), full.display());
        fs::write(full, contents)?;
        Ok(())
    }

    fn delete(&self, path: &Path) -> HideResult<()> {
        let full = self.resolve(path);
        if !full.is_file() {
            return Err(HideError::FileNotFound(path.display().to_string()));
        }
        fs::remove_file(full)?;
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> HideResult<Vec<PathBuf>> {
        let full = self.resolve(dir);
        if !full.is_dir() {
            return Err(HideError::DirectoryNotFound(dir.display().to_string()));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(full)? {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn default_directory(&self) -> PathBuf {
        self.root.clone()
    }
}

/// In-memory file system for tests and embedding.
///
/// Files live in a sorted map keyed by their resolved path. Writing a file
/// registers its parent directory so that it can be listed afterwards.
#[derive(Debug)]
pub struct MemoryFileSystem {
    root: PathBuf,
    files: RefCell<BTreeMap<PathBuf, String>>,
    directories: RefCell<BTreeSet<PathBuf>>,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFileSystem {
    /// Creates an empty file system whose root directory is `/memory`.
    pub fn new() -> Self {
        let root = PathBuf::from("/memory");
        let mut directories = BTreeSet::new();
        directories.insert(root.clone());
        Self {
            root,
            files: RefCell::new(BTreeMap::new()),
            directories: RefCell::new(directories),
        }
    }

    /// Adds a file, builder style.
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
        let full = self.resolve(path.as_ref());
        if let Some(parent) = full.parent() {
            self.directories.borrow_mut().insert(parent.to_path_buf());
        }
        self.files.borrow_mut().insert(full, contents.into());
    }

    /// Registers an empty directory.
    pub fn add_directory(&self, dir: impl AsRef<Path>) {
        let full = self.resolve(dir.as_ref());
        self.directories.borrow_mut().insert(full);
    }

    /// Returns the contents of a file, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let full = self.resolve(path.as_ref());
        self.files.borrow().get(&full).cloned()
    }

    /// Number of files stored.
    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    /// Returns true if no files are stored.
    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(&self.resolve(path))
    }

    fn read_to_string(&self, path: &Path) -> HideResult<String> {
        self.files
            .borrow()
            .get(&self.resolve(path))
            .cloned()
            .ok_or_else(|| HideError::FileNotFound(path.display().to_string()))
    }

    fn write(&self, path: &Path, contents: &str) -> HideResult<()> {
        self.insert(path, contents);
        Ok(())
    }

    fn delete(&self, path: &Path) -> HideResult<()> {
        self.files
            .borrow_mut()
            .remove(&self.resolve(path))
            .map(|_| ())
            .ok_or_else(|| HideError::FileNotFound(path.display().to_string()))
    }

    fn list_files(&self, dir: &Path) -> HideResult<Vec<PathBuf>> {
        let full = self.resolve(dir);
        if !self.directories.borrow().contains(&full) {
            return Err(HideError::DirectoryNotFound(dir.display().to_string()));
        }
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|path| path.parent() == Some(full.as_path()))
            .cloned()
            .collect())
    }

    fn default_directory(&self) -> PathBuf {
        self.root.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_portable_file_names() {
        assert!(is_portable_file_name("my_saved_game"));
        assert!(is_portable_file_name("game-1.backup"));
        assert!(!is_portable_file_name(""));
        assert!(!is_portable_file_name(" "));
        assert!(!is_portable_file_name("my game"));
        assert!(!is_portable_file_name("tab\tname"));
        assert!(!is_portable_file_name("dir/name"));
        assert!(!is_portable_file_name("dir\\name"));
    }

    #[test]
    fn test_validate_file_name_error_kind() {
        let err = validate_file_name("bad name").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("\"bad name\" is invalid"));
    }

    #[test]
    fn test_suffix_helpers() {
        assert_eq!(house_file_path("Mansion"), PathBuf::from("Mansion.house.json"));
        assert_eq!(game_file_path("save1"), PathBuf::from("save1.game.json"));
        assert_eq!(json_file_path("Mansion"), PathBuf::from("Mansion.json"));
    }

    #[test]
    fn test_memory_file_system_round_trip() {
        let files = MemoryFileSystem::new();
        let path = Path::new("notes.txt");

        assert!(!files.exists(path));
        files.write(path, "hello").unwrap();
        assert!(files.exists(path));
        assert_eq!(files.read_to_string(path).unwrap(), "hello");

        files.delete(path).unwrap();
        assert!(!files.exists(path));
        assert_eq!(
            files.read_to_string(path).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(files.delete(path).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_file_system_listing() {
        let files = MemoryFileSystem::new()
            .with_file("A.house.json", "{}")
            .with_file("B.game.json", "{}")
            .with_file("nested/C.house.json", "{}");

        let root = files.default_directory();
        let stems = file_stems_with_suffix(&files, &root, config::HOUSE_FILE_SUFFIX).unwrap();
        assert_eq!(stems, vec!["A".to_string()]);

        let nested = file_stems_with_suffix(&files, Path::new("nested"), ".house.json").unwrap();
        assert_eq!(nested, vec!["C".to_string()]);

        let err = files.list_files(Path::new("missing")).unwrap_err();
        assert!(matches!(err, HideError::DirectoryNotFound(_)));
    }
}
