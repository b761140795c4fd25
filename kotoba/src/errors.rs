//! Definition of errors.

use std::error::Error;
use std::fmt;

/// A specialized Result type for Kotoba.
pub type Result<T, E = KotobaError> = std::result::Result<T, E>;

/// The error type for Kotoba.
#[derive(Debug, thiserror::Error)]
pub enum KotobaError {
    /// The error variant for [`InvalidArgumentError`].
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`InvalidFormatError`].
    ///
    /// Raised when a binary dictionary has a wrong magic number or version,
    /// is truncated, or has unparsed bytes at its end.
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// The error variant for [`OutOfRangeError`].
    ///
    /// Raised when a connection id or a feature offset exceeds its declared bound.
    #[error(transparent)]
    OutOfRange(OutOfRangeError),

    /// The error variant for [`InvalidSizeError`].
    #[error(transparent)]
    InvalidSize(InvalidSizeError),

    /// No path of dictionary words covers the whole input.
    #[error("NoParseError: no path reaches the end of the input ({len_byte} bytes)")]
    NoParse {
        /// Length of the rejected input in bytes.
        len_byte: usize,
    },

    /// The error variant for [`std::io::Error`].
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KotobaError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn out_of_range<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::OutOfRange(OutOfRangeError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_size<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidSize(InvalidSizeError {
            arg,
            msg: msg.into(),
        })
    }
}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when the input format is invalid.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// Name of the format.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// Error used when an id or an offset is out of its declared range.
#[derive(Debug)]
pub struct OutOfRangeError {
    /// Name of the value.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RangeError: {}: {}", self.arg, self.msg)
    }
}

impl Error for OutOfRangeError {}

/// Error used when the dimensions of a table do not match its contents.
#[derive(Debug)]
pub struct InvalidSizeError {
    /// Name of the table.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidSizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SizeError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidSizeError {}
