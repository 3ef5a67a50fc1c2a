//! Error types for codearea.

use std::fmt;

/// Result type alias for codearea operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for codearea operations.
///
/// Editing and history navigation are infallible; only the host-facing
/// surfaces (session restore, reference assignment) can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A restored session whose offset does not address its stack.
    InvalidSession {
        /// Offset carried by the rejected history.
        offset: Option<usize>,
        /// Number of records in the rejected history.
        len: usize,
    },
    /// A host reference could not accept the assigned node.
    RefAssignment(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSession {
                offset: Some(offset),
                len,
            } => write!(
                f,
                "invalid session: offset {offset} out of range for {len} history records"
            ),
            Self::InvalidSession { offset: None, len } => {
                write!(f, "invalid session: missing offset for {len} history records")
            }
            Self::RefAssignment(target) => write!(f, "cannot assign value to ref {target}"),
        }
    }
}

impl std::error::Error for Error {}
