#![forbid(unsafe_code)]

//! Error taxonomy shared across the workspace.
//!
//! Three failure classes exist, and deliberately no more:
//!
//! - [`Error::InvalidArgument`] / [`Error::InvalidSize`] — the caller passed
//!   a value outside its documented range. The operation performs no partial
//!   mutation.
//! - [`Error::Unavailable`] — a driver could not acquire its host resource
//!   (no tty, no display). Fatal for that driver; the caller may try another
//!   backend.
//! - [`Error::Io`] — an underlying terminal I/O failure.
//!
//! Out-of-bounds cell coordinates are **not** errors anywhere in this
//! workspace: reads return a fallback value and writes are no-ops, so
//! callers never bounds-check before touching the canvas.

use std::fmt;

/// Top-level error type for textel operations.
#[derive(Debug)]
pub enum Error {
    /// A value was outside its documented range (ANSI index, ARGB4 color).
    InvalidArgument(&'static str),

    /// Canvas dimensions must both be positive.
    InvalidSize {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
    },

    /// A driver's host resource could not be acquired at construction.
    Unavailable(&'static str),

    /// I/O failure during terminal operations.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Self::InvalidSize { width, height } => {
                write!(f, "invalid canvas size: {width}x{height}")
            }
            Self::Unavailable(what) => write!(f, "backend unavailable: {what}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for textel APIs.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_the_failing_argument() {
        let err = Error::InvalidArgument("ansi index > 0x20");
        assert_eq!(err.to_string(), "invalid argument: ansi index > 0x20");
    }

    #[test]
    fn display_reports_rejected_dimensions() {
        let err = Error::InvalidSize {
            width: 0,
            height: 24,
        };
        assert_eq!(err.to_string(), "invalid canvas size: 0x24");
    }

    #[test]
    fn io_errors_convert_and_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "tty gone");
        let err = Error::from(io);
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
