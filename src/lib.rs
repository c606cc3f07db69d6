//! `filesearch` - Find the first file matching a glob, breadth-first or depth-first.
//!
//! ```no_run
//! use filesearch::{SearchMode, find_file, find_file_with};
//!
//! let first = find_file(".", "*.toml")?;
//! let shallow = find_file_with(".", "*.rs", SearchMode::DepthFirst, Some(2))?;
//! # Ok::<(), filesearch::error::Error>(())
//! ```

#![deny(
    warnings,
    missing_debug_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]

pub mod error;
pub mod lister;
pub mod pattern;
pub mod search;
pub mod types;

pub use error::{Error, Result};
pub use lister::{DirectoryLister, FsLister, MemoryLister};
pub use pattern::Pattern;
pub use search::{Finder, find_file, find_file_with, find_file_with_max_depth, find_file_with_mode};
pub use types::{SearchMode, SearchOptions, SkipHook};
