//! Error types for xmlbox
//!
//! Building and rendering are total; errors only come from the edges where
//! a binding layer hands over values that cannot be placed in a box tree.

use std::fmt;
use thiserror::Error;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A keyed container was given a value it cannot hold (a choice arm)
    UnsupportedMember { key: String },
    /// A field name collides with one of the reserved text markers
    ReservedKey { key: String },
    /// An attribute value is not a scalar
    InvalidAttribute { key: String },
    /// Input text is not well-formed JSON
    InvalidJson,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedMember { key } => {
                write!(f, "unsupported keyed member: {key}")
            }
            Self::ReservedKey { key } => write!(f, "reserved key: {key:?}"),
            Self::InvalidAttribute { key } => {
                write!(f, "attribute is not a scalar: {key}")
            }
            Self::InvalidJson => write!(f, "invalid json"),
        }
    }
}

/// Main error type for xmlbox
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    path: Vec<String>,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            path: Vec::new(),
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Prepend a parent key, used while unwinding out of nested containers
    #[must_use]
    pub fn within(mut self, key: impl Into<String>) -> Self {
        self.path.insert(0, key.into());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Keys from the root down to the offending value
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "error: {}", self.message)
        } else {
            write!(f, "error at {}: {}", self.path.join("."), self.message)
        }
    }
}

/// Result type alias for xmlbox
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::ReservedKey {
            key: "#CDATA".to_string(),
        });
        assert_eq!(
            err.kind(),
            &ErrorKind::ReservedKey {
                key: "#CDATA".to_string()
            }
        );
        assert!(err.path().is_empty());
    }

    #[test]
    fn test_error_display_without_path() {
        let err = Error::new(ErrorKind::UnsupportedMember {
            key: "shape".to_string(),
        });
        assert_eq!(err.to_string(), "error: unsupported keyed member: shape");
    }

    #[test]
    fn test_error_display_with_path() {
        let err = Error::new(ErrorKind::InvalidAttribute {
            key: "id".to_string(),
        })
        .within("item")
        .within("root");
        assert_eq!(err.path(), ["root", "item"]);
        let display = err.to_string();
        assert!(display.starts_with("error at root.item"));
        assert!(display.contains("attribute is not a scalar: id"));
    }
}
