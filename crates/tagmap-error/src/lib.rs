//! # tagmap-error
//!
//! Unified error handling for tagmap.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., ParseFailed, AttributeInvalid)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use tagmap_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::AttributeInvalid, "expected a number")
//!         .with_operation("xml::attribute_f64")
//!         .with_context("attribute", "Distance")
//!         .with_context("offset", "42"))
//! }
//! ```
//!
//! ## Principles
//!
//! - Recoverable failures return `Result<T, tagmap_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Structural contract violations (broken endpoint ordering, non-positive
//!   distances) are *not* errors: they assert, because they signal a bug in
//!   a caller or collaborator rather than bad input

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using tagmap Error
pub type Result<T> = std::result::Result<T, Error>;
