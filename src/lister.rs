//! Directory listing capabilities consumed by the search strategies

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::pattern::Pattern;

/// Source of directory listings
///
/// Both methods list immediate children only. Errors are returned as-is; the
/// search strategies decide which ones to skip.
pub trait DirectoryLister {
    /// Files directly inside `dir` whose name matches `pattern`, in listing order
    ///
    /// # Errors
    /// Returns error if `dir` cannot be listed.
    fn files(&self, dir: &Path, pattern: &Pattern) -> io::Result<Vec<PathBuf>>;

    /// Immediate subdirectories of `dir`, in listing order
    ///
    /// # Errors
    /// Returns error if `dir` cannot be listed.
    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// First file directly inside `dir` matching `pattern`
    ///
    /// # Errors
    /// Returns error if `dir` cannot be listed.
    fn first_file(&self, dir: &Path, pattern: &Pattern) -> io::Result<Option<PathBuf>> {
        Ok(self.files(dir, pattern)?.into_iter().next())
    }
}

impl<L: DirectoryLister + ?Sized> DirectoryLister for &L {
    fn files(&self, dir: &Path, pattern: &Pattern) -> io::Result<Vec<PathBuf>> {
        (**self).files(dir, pattern)
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).subdirectories(dir)
    }

    fn first_file(&self, dir: &Path, pattern: &Pattern) -> io::Result<Option<PathBuf>> {
        (**self).first_file(dir, pattern)
    }
}

/// Lister backed by the real file system
///
/// Entries come back in whatever order the operating system yields them.
/// Symbolic links are followed when deciding between file and directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl FsLister {
    /// Resolve an entry to (is file, is directory), following symlinks
    fn classify(entry: &fs::DirEntry) -> io::Result<(bool, bool)> {
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            // Dangling links are neither
            return Ok(fs::metadata(entry.path())
                .map(|meta| (meta.is_file(), meta.is_dir()))
                .unwrap_or((false, false)));
        }
        Ok((file_type.is_file(), file_type.is_dir()))
    }
}

impl DirectoryLister for FsLister {
    fn files(&self, dir: &Path, pattern: &Pattern) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if pattern.matches(&path) && Self::classify(&entry)?.0 {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if Self::classify(&entry)?.1 {
                dirs.push(entry.path());
            }
        }
        Ok(dirs)
    }

    fn first_file(&self, dir: &Path, pattern: &Pattern) -> io::Result<Option<PathBuf>> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if pattern.matches(&path) && Self::classify(&entry)?.0 {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Default)]
struct MemoryDir {
    files:  Vec<PathBuf>,
    dirs:   Vec<PathBuf>,
    denied: bool,
}

/// In-memory directory tree
///
/// Listing order is insertion order. Directories can be marked as denied,
/// which makes every listing of them fail with `PermissionDenied`, or
/// vanished, which keeps them in their parent's listing but makes their own
/// listing fail with `NotFound`. Every call is counted and file listings are
/// logged, so callers can check what a search touched.
#[derive(Debug, Default)]
pub struct MemoryLister {
    dirs:                  HashMap<PathBuf, MemoryDir>,
    file_listings:         RefCell<Vec<PathBuf>>,
    subdirectory_listings: Cell<usize>,
}

impl MemoryLister {
    /// Create a tree containing only the directory `root`
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut lister = Self::default();
        lister.add_dir(root);
        lister
    }

    /// Add a directory and any missing ancestors
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.ensure_dir(path.as_ref());
        self
    }

    /// Add a file and any missing ancestor directories
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent);
            if let Some(dir) = self.dirs.get_mut(parent) {
                if !dir.files.iter().any(|f| f == path) {
                    dir.files.push(path.to_path_buf());
                }
            }
        }
        self
    }

    /// Make every listing of `path` fail with `PermissionDenied`
    pub fn deny(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        self.ensure_dir(path);
        if let Some(dir) = self.dirs.get_mut(path) {
            dir.denied = true;
        }
        self
    }

    /// Drop the contents of `path` while its parent still lists it
    pub fn vanish(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        self.ensure_dir(path);
        self.dirs.retain(|p, _| !p.starts_with(path));
        self
    }

    /// Directories whose files were listed, in call order
    #[must_use]
    pub fn file_listings(&self) -> Vec<PathBuf> {
        self.file_listings.borrow().clone()
    }

    /// Number of subdirectory listings requested so far
    #[must_use]
    pub fn subdirectory_listings(&self) -> usize {
        self.subdirectory_listings.get()
    }

    fn ensure_dir(&mut self, path: &Path) {
        if self.dirs.contains_key(path) {
            return;
        }
        self.dirs.insert(path.to_path_buf(), MemoryDir::default());
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent);
            if let Some(dir) = self.dirs.get_mut(parent) {
                dir.dirs.push(path.to_path_buf());
            }
        }
    }

    fn lookup(&self, path: &Path) -> io::Result<&MemoryDir> {
        let dir = self.dirs.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })?;
        if dir.denied {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("access to {} denied", path.display()),
            ));
        }
        Ok(dir)
    }
}

impl DirectoryLister for MemoryLister {
    fn files(&self, dir: &Path, pattern: &Pattern) -> io::Result<Vec<PathBuf>> {
        self.file_listings.borrow_mut().push(dir.to_path_buf());
        let node = self.lookup(dir)?;
        Ok(node.files.iter().filter(|f| pattern.matches(f)).cloned().collect())
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.subdirectory_listings.set(self.subdirectory_listings.get() + 1);
        Ok(self.lookup(dir)?.dirs.clone())
    }
}
