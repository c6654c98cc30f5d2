//! Error handling utilities.
//!
//! Errors raised by the shared helpers carry a coarse [`ErrorKind`] so callers
//! can decide how to report them without matching on message text.

use std::fmt;

/// A type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for lvc utilities.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input or argument
    InvalidInput,
    /// A child process could not be started
    Launch,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with a source error.
    pub fn with_source<E>(kind: ErrorKind, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    /// Create a launch error for a program that could not be spawned.
    pub fn launch(program: &str, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorKind::Launch,
            format!("failed to launch {}: {}", program, source),
            source,
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input("empty program name");
        assert_eq!(err.to_string(), "empty program name");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_launch_error_names_program() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file");
        let err = Error::launch("git", io_err);
        assert_eq!(err.kind(), ErrorKind::Launch);
        assert!(err.to_string().starts_with("failed to launch git"));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn test_error_without_source() {
        let err = Error::new(ErrorKind::InvalidInput, "program name is empty");
        assert!(StdError::source(&err).is_none());
    }
}
