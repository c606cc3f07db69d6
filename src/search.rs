//! First-match file search, breadth-first or depth-first
//!
//! Both strategies stop at the first file whose name matches the pattern.
//! A directory that cannot be listed because access is denied, or because it
//! disappeared after its parent was listed, is skipped and the search goes on
//! with its siblings. Any other listing failure is returned to the caller.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::lister::{DirectoryLister, FsLister};
use crate::pattern::Pattern;
use crate::types::{SearchMode, SearchOptions, SkipHook, descend};

/// Find the first file under `root` matching `pattern`, breadth-first, with no depth limit
///
/// # Errors
/// Returns error if the pattern is invalid or `root` cannot be listed.
pub fn find_file(root: impl AsRef<Path>, pattern: &str) -> Result<Option<PathBuf>> {
    find_file_with(root, pattern, SearchMode::default(), None)
}

/// Find the first file under `root` matching `pattern` in the given order, with no depth limit
///
/// # Errors
/// Returns error if the pattern is invalid or `root` cannot be listed.
pub fn find_file_with_mode(
    root: impl AsRef<Path>,
    pattern: &str,
    mode: SearchMode,
) -> Result<Option<PathBuf>> {
    find_file_with(root, pattern, mode, None)
}

/// Find the first file under `root` matching `pattern`, breadth-first, at most
/// `max_depth` levels below `root`
///
/// # Errors
/// Returns error if the pattern is invalid or `root` cannot be listed.
pub fn find_file_with_max_depth(
    root: impl AsRef<Path>,
    pattern: &str,
    max_depth: u32,
) -> Result<Option<PathBuf>> {
    find_file_with(root, pattern, SearchMode::default(), Some(max_depth))
}

/// Find the first file under `root` matching `pattern`
///
/// `max_depth` counts directory levels below `root`: `Some(0)` only looks at
/// `root` itself, `None` has no limit.
///
/// # Errors
/// Returns error if the pattern is invalid or `root` cannot be listed.
pub fn find_file_with(
    root: impl AsRef<Path>,
    pattern: &str,
    mode: SearchMode,
    max_depth: Option<u32>,
) -> Result<Option<PathBuf>> {
    Finder::new().options(SearchOptions::new().mode(mode).max_depth(max_depth)).find(root, pattern)
}

/// Reusable search over a directory lister
#[derive(Debug, Clone, Default)]
pub struct Finder<L = FsLister> {
    lister:  L,
    options: SearchOptions,
}

impl Finder<FsLister> {
    /// Create a finder over the real file system with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: DirectoryLister> Finder<L> {
    /// Create a finder over a custom lister with default options
    pub fn with_lister(lister: L) -> Self {
        Self { lister, options: SearchOptions::default() }
    }

    /// Replace the search options
    #[must_use]
    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    /// The lister this finder reads from
    pub const fn lister(&self) -> &L {
        &self.lister
    }

    /// Find the first file under `root` whose name matches the glob `pattern`
    ///
    /// # Errors
    /// Returns error if:
    /// - Pattern is invalid
    /// - `root` does not exist or is not a directory
    /// - A listing fails for a reason other than denied access
    pub fn find(&self, root: impl AsRef<Path>, pattern: &str) -> Result<Option<PathBuf>> {
        let pattern = Pattern::new(pattern, self.options.case_insensitive)?;
        self.find_pattern(root.as_ref(), &pattern)
    }

    /// Like [`Finder::find`] with an already compiled pattern
    ///
    /// # Errors
    /// Same as [`Finder::find`], minus pattern validation.
    pub fn find_pattern(&self, root: &Path, pattern: &Pattern) -> Result<Option<PathBuf>> {
        let (mode, max_depth) = (self.options.mode, self.options.max_depth);
        debug!(
            root = %root.display(),
            pattern = pattern.as_str(),
            ?mode,
            ?max_depth,
            "search started"
        );

        let search = Search {
            lister: &self.lister,
            pattern,
            root,
            on_skip: self.options.on_skip.as_ref(),
        };
        let found = match mode {
            SearchMode::BreadthFirst => {
                // The root's own files are checked outside the skip policy
                match self.lister.first_file(root, pattern)? {
                    Some(path) => Some(path),
                    None => search.breadth_first(&[root.to_path_buf()], max_depth)?,
                }
            },
            SearchMode::DepthFirst => search.depth_first(root, max_depth)?,
        };

        match &found {
            Some(path) => debug!(path = %path.display(), "match found"),
            None => debug!("no match"),
        }
        Ok(found)
    }
}

/// Result of checking one directory's own files
enum Visit {
    Found(PathBuf),
    NotFound,
    Skipped(io::Error),
}

/// State shared by every level of one search
struct Search<'a, L> {
    lister:  &'a L,
    pattern: &'a Pattern,
    root:    &'a Path,
    on_skip: Option<&'a SkipHook>,
}

impl<L: DirectoryLister> Search<'_, L> {
    /// Look for a match among the direct files of `dir`
    fn visit(&self, dir: &Path) -> Result<Visit> {
        trace!(dir = %dir.display(), "checking files");
        match self.lister.first_file(dir, self.pattern) {
            Ok(Some(path)) => Ok(Visit::Found(path)),
            Ok(None) => Ok(Visit::NotFound),
            Err(err) if self.recoverable(dir, &err) => Ok(Visit::Skipped(err)),
            Err(err) => Err(err.into()),
        }
    }

    /// Subdirectories of `dir`, or `None` if `dir` has to be skipped
    fn subdirectories(&self, dir: &Path) -> Result<Option<Vec<PathBuf>>> {
        match self.lister.subdirectories(dir) {
            Ok(dirs) => Ok(Some(dirs)),
            Err(err) if self.recoverable(dir, &err) => {
                self.skip(dir, &err);
                Ok(None)
            },
            Err(err) => Err(err.into()),
        }
    }

    /// Access denied anywhere, or a directory gone missing below the root
    fn recoverable(&self, dir: &Path, err: &io::Error) -> bool {
        match err.kind() {
            io::ErrorKind::PermissionDenied => true,
            io::ErrorKind::NotFound => dir != self.root,
            _ => false,
        }
    }

    fn skip(&self, dir: &Path, err: &io::Error) {
        warn!(dir = %dir.display(), error = %err, "skipping directory");
        if let Some(hook) = self.on_skip {
            hook(dir, err);
        }
    }

    /// Search below `level`, a set of directories of equal depth whose own
    /// files have already been checked.
    ///
    /// Pass 1 checks the direct files of every child directory, which does
    /// not consume depth budget. Pass 2 recurses with the children as the new
    /// level and one level less of budget.
    fn breadth_first(&self, level: &[PathBuf], max_depth: Option<u32>) -> Result<Option<PathBuf>> {
        let Some(remaining) = descend(max_depth) else {
            return Ok(None);
        };

        let mut children = Vec::new();
        for dir in level {
            if let Some(subdirs) = self.subdirectories(dir)? {
                children.extend(subdirs);
            }
        }

        let mut next_level = Vec::with_capacity(children.len());
        for dir in children {
            match self.visit(&dir)? {
                Visit::Found(path) => return Ok(Some(path)),
                Visit::NotFound => next_level.push(dir),
                // Never listed again
                Visit::Skipped(err) => self.skip(&dir, &err),
            }
        }

        if next_level.is_empty() {
            return Ok(None);
        }
        self.breadth_first(&next_level, remaining)
    }

    /// Search `dir` and then each of its subtrees in full, in listing order
    fn depth_first(&self, dir: &Path, max_depth: Option<u32>) -> Result<Option<PathBuf>> {
        match self.visit(dir)? {
            Visit::Found(path) => return Ok(Some(path)),
            Visit::NotFound => {},
            Visit::Skipped(err) => {
                self.skip(dir, &err);
                return Ok(None);
            },
        }

        let Some(remaining) = descend(max_depth) else {
            return Ok(None);
        };
        let Some(subdirs) = self.subdirectories(dir)? else {
            return Ok(None);
        };

        for subdir in &subdirs {
            if let Some(path) = self.depth_first(subdir, remaining)? {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }
}
