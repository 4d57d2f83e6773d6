//! Error types shared by the buffer, renderer and command shell.
//!
//! Three families of failure are kept apart so callers can react to each:
//! - resource exhaustion ([`PagerError::OutOfMemory`])
//! - validation ([`PagerError::OutOfBounds`], [`PagerError::InvalidArgument`],
//!   [`PagerError::NoFileName`], [`PagerError::Format`])
//! - I/O ([`PagerError::Io`], [`PagerError::Terminal`])
//!
//! Validation errors never leave the buffer half-modified.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PagerError>;

/// Everything that can go wrong in the pager core.
#[derive(Debug, Error)]
pub enum PagerError {
    /// An allocation or growth request could not be satisfied.
    #[error("out of memory")]
    OutOfMemory,

    /// An index argument fell outside its valid range.
    #[error("{what} {value} out of bounds (expected {min}..={max})")]
    OutOfBounds {
        what: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// A malformed argument, usually from the command shell.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Save requested on a buffer with no associated file.
    #[error("no file name associated with the buffer")]
    NoFileName,

    /// Tokenizer rejected the input (unterminated quoting).
    #[error("format error: {0}")]
    Format(String),

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal I/O failed (query, mode switch, frame flush).
    #[error("terminal: {0}")]
    Terminal(io::Error),
}

impl PagerError {
    /// Shorthand for an [`PagerError::OutOfBounds`] error.
    pub fn out_of_bounds(what: &'static str, value: usize, min: usize, max: usize) -> Self {
        Self::OutOfBounds {
            what,
            value,
            min,
            max,
        }
    }

    /// Attach a path to an I/O error, keeping OOM distinguishable.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::OutOfMemory {
            return Self::OutOfMemory;
        }
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the validation family: the session or shell may continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::OutOfMemory | Self::Terminal(_))
    }
}

impl From<TryReserveError> for PagerError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

impl From<io::Error> for PagerError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::OutOfMemory {
            Self::OutOfMemory
        } else {
            Self::Terminal(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oom_io_error_maps_to_out_of_memory() {
        let err = io::Error::new(io::ErrorKind::OutOfMemory, "frame");
        assert!(matches!(PagerError::from(err), PagerError::OutOfMemory));

        let err = io::Error::new(io::ErrorKind::OutOfMemory, "file");
        assert!(matches!(PagerError::io("a.txt", err), PagerError::OutOfMemory));
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = PagerError::out_of_bounds("line", 7, 1, 3);
        assert_eq!(err.to_string(), "line 7 out of bounds (expected 1..=3)");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_error_names_path() {
        let err = PagerError::io("missing.txt", io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("missing.txt: "));
    }
}
