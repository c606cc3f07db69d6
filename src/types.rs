//! Common types for `filesearch`

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Traversal order used to look for a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Check every directory at one depth before any directory below it
    #[default]
    BreadthFirst,
    /// Exhaust each subtree before moving on to the next sibling
    DepthFirst,
}

/// Callback invoked for every directory skipped because it could not be listed
pub type SkipHook = Arc<dyn Fn(&Path, &io::Error) + Send + Sync>;

/// Parameters of a search, minus the root and the pattern
#[derive(Clone, Default)]
pub struct SearchOptions {
    /// Traversal order
    pub mode:             SearchMode,
    /// Number of directory levels to descend below the root, `None` for no limit
    pub max_depth:        Option<u32>,
    /// Match file names without regard to case
    pub case_insensitive: bool,
    /// Observer for skipped directories; does not affect the result
    pub on_skip:          Option<SkipHook>,
}

impl SearchOptions {
    /// Breadth-first, unbounded, case-sensitive
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the traversal order
    #[must_use]
    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the depth bound
    #[must_use]
    pub fn max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Toggle case-insensitive matching
    #[must_use]
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Register a callback for directories skipped after a listing failure
    #[must_use]
    pub fn on_skip<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path, &io::Error) + Send + Sync + 'static,
    {
        self.on_skip = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for SearchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("mode", &self.mode)
            .field("max_depth", &self.max_depth)
            .field("case_insensitive", &self.case_insensitive)
            .field("on_skip", &self.on_skip.is_some())
            .finish()
    }
}

/// Remaining depth budget after descending one level, or `None` if descent is not allowed
///
/// An absent budget is unbounded and stays absent.
#[must_use]
pub const fn descend(max_depth: Option<u32>) -> Option<Option<u32>> {
    match max_depth {
        None => Some(None),
        Some(0) => None,
        Some(n) => Some(Some(n - 1)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::new();
        assert_eq!(options.mode, SearchMode::BreadthFirst);
        assert_eq!(options.max_depth, None);
        assert!(!options.case_insensitive);
        assert!(options.on_skip.is_none());
    }

    #[test]
    fn test_descend() {
        assert_eq!(descend(None), Some(None));
        assert_eq!(descend(Some(0)), None);
        assert_eq!(descend(Some(1)), Some(Some(0)));
        assert_eq!(descend(Some(5)), Some(Some(4)));
    }

    #[test]
    fn test_skip_hook_is_shared_by_clones() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let options = SearchOptions::new().on_skip(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let cloned = options.clone();

        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        for opts in [&options, &cloned] {
            if let Some(hook) = &opts.on_skip {
                hook(Path::new("/locked"), &err);
            }
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(format!("{cloned:?}").contains("on_skip: true"));
    }
}
