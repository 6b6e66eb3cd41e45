//! Error kinds for tagmap operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers can match on ErrorKind to decide how to handle specific cases,
/// e.g. distinguishing a malformed interchange file from plain I/O trouble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid argument passed to an operation
    InvalidArgument,

    // =========================================================================
    // Interchange format errors
    // =========================================================================
    /// Failed to parse an interchange document
    ParseFailed,

    /// A tagged element did not match the expected literal name
    ElementMismatch,

    /// An attribute was missing, out of order, or had a malformed value
    AttributeInvalid,

    // =========================================================================
    // Graph errors
    // =========================================================================
    /// Tag not found in the map
    TagNotFound,

    /// Arc not found in the map
    ArcNotFound,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
