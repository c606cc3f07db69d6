//! Error types for `filesearch`

use arrayvec::ArrayString;
use thiserror::Error;

/// Maximum length of error messages
pub const MAX_ERROR_LENGTH: usize = 256;

/// Custom result type for `filesearch` operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for `filesearch`
///
/// Only failures the traversal does not recover from end up here. Access
/// failures below the root are swallowed by the search strategies.
#[derive(Debug, Error)]
pub enum Error {
    /// Listing a directory failed in a way the search cannot skip
    #[error("Error: {0}")]
    Io(#[from] std::io::Error),

    /// The glob pattern was rejected, with a fixed-size message buffer
    #[error("Error: Invalid pattern: {0}")]
    Pattern(Box<ArrayString<MAX_ERROR_LENGTH>>),
}

impl Error {
    /// Create a new pattern error
    ///
    /// Messages longer than `MAX_ERROR_LENGTH` are truncated on a char boundary.
    pub fn pattern(msg: &str) -> Self {
        let mut buf = ArrayString::new();
        for c in msg.chars() {
            if buf.try_push(c).is_err() {
                break;
            }
        }
        Self::Pattern(Box::new(buf))
    }

    /// Get a user-friendly error message with action items
    #[must_use]
    pub fn user_message(&self) -> ArrayString<MAX_ERROR_LENGTH> {
        let mut msg = ArrayString::new();
        match self {
            Self::Io(e) => {
                let tip = match e.kind() {
                    std::io::ErrorKind::NotFound => "Tip: Check that the search root exists",
                    std::io::ErrorKind::NotADirectory => "Tip: The search root must be a directory",
                    _ => "Tip: Check directory permissions and try again",
                };
                let _ = msg.try_push_str(&format!("Error: {e}\n{tip}"));
            },
            Self::Pattern(pattern_msg) => {
                let _ = msg.try_push_str("Error: Invalid pattern: ");
                let _ = msg.try_push_str(pattern_msg);
                let _ = msg.try_push_str("\nTip: Patterns match file names, e.g. '*.txt'");
            },
        }
        msg
    }
}
