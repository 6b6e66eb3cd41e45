//! The main Error type for tagmap.

use crate::ErrorKind;
use std::fmt;

/// Unified error type for all tagmap operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.operation)?;

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl Error {
    /// Create an Unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create a ParseFailed error
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseFailed, message)
    }

    /// Create an ElementMismatch error
    pub fn element_mismatch(element: impl Into<String>) -> Self {
        let element = element.into();
        Self::new(
            ErrorKind::ElementMismatch,
            format!("expected element '{}'", element),
        )
        .with_context("element", element)
    }

    /// Create an AttributeInvalid error
    pub fn attribute_invalid(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        let attribute = attribute.into();
        Self::new(ErrorKind::AttributeInvalid, message).with_context("attribute", attribute)
    }

    /// Create a TagNotFound error
    pub fn tag_not_found(tag_id: impl Into<String>) -> Self {
        let tag_id = tag_id.into();
        Self::new(ErrorKind::TagNotFound, format!("tag '{}' not found", tag_id))
            .with_context("tag_id", tag_id)
    }

    /// Create an ArcNotFound error
    pub fn arc_not_found(pair: impl Into<String>) -> Self {
        let pair = pair.into();
        Self::new(ErrorKind::ArcNotFound, format!("arc '{}' not found", pair))
            .with_context("pair", pair)
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorKind::FileNotFound,
            format!("file '{}' not found", path),
        )
        .with_context("path", path)
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::ParseFailed, "unexpected end of document");
        assert_eq!(err.kind(), ErrorKind::ParseFailed);
        assert_eq!(err.message(), "unexpected end of document");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::AttributeInvalid, "not a number")
            .with_operation("xml::attribute_f64")
            .with_context("attribute", "Distance")
            .with_context("offset", "17");

        assert_eq!(err.operation(), "xml::attribute_f64");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("attribute", "Distance".to_string()));
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::ElementMismatch, "failed")
            .with_operation("xml::tag_match")
            .with_operation("map::arc_read");

        assert_eq!(err.operation(), "map::arc_read");
        assert_eq!(err.context().len(), 1);
        assert_eq!(err.context()[0], ("called", "xml::tag_match".to_string()));
    }

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::AttributeInvalid, "not a number")
            .with_operation("xml::attribute_u32")
            .with_context("attribute", "From_Tag_Id")
            .with_context("offset", "42");

        let display = format!("{}", err);
        assert!(display.contains("AttributeInvalid"));
        assert!(display.contains("xml::attribute_u32"));
        assert!(display.contains("attribute: From_Tag_Id"));
    }

    #[test]
    fn test_convenience_constructors() {
        let err = Error::tag_not_found("41");
        assert_eq!(err.kind(), ErrorKind::TagNotFound);
        assert!(err.message().contains("41"));

        let err = Error::element_mismatch("Arc");
        assert_eq!(err.kind(), ErrorKind::ElementMismatch);

        let err = Error::file_not_found("map.xml");
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::from(io_err);

        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.source_ref().is_some());
    }
}
