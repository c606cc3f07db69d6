//! File name glob matching

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{Error, Result};

/// A compiled glob matched against file names only
#[derive(Debug, Clone)]
pub struct Pattern {
    source:  String,
    matcher: GlobMatcher,
}

impl Pattern {
    /// Compile a pattern such as `*.txt`
    ///
    /// # Errors
    /// Returns error if:
    /// - Pattern is empty
    /// - Pattern contains a NUL byte or a path separator
    /// - Glob syntax is invalid
    pub fn new(pattern: &str, case_insensitive: bool) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::pattern("pattern must not be empty"));
        }
        if pattern.contains('\0') {
            return Err(Error::pattern("pattern contains a NUL byte"));
        }
        if pattern.chars().any(std::path::is_separator) {
            return Err(Error::pattern("pattern must not contain a path separator"));
        }

        let glob = GlobBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::pattern(&e.to_string()))?;

        Ok(Self { source: pattern.to_owned(), matcher: glob.compile_matcher() })
    }

    /// The pattern as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether the last component of `path` matches
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| self.matcher.is_match(name))
    }
}
