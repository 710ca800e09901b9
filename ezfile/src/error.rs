//! Error types for stream operations

use ezfile_core::WindowError;
use std::io;
use thiserror::Error;

/// Errors raised by [`WindowedLineStream`](crate::WindowedLineStream)
///
/// Reaching the end of the source is not an error; it shows up as `None`
/// from [`read_one`](crate::WindowedLineStream::read_one) or as the end of
/// iteration.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Invalid construction parameters or an unreadable options file
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The source could not be opened
    #[error("could not open {name}: {source}")]
    Open {
        /// Path or description of the source
        name: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The requested absolute position is not retained in the window
    #[error("line {index} is outside the window [{first}, {last}]")]
    IndexOutOfRange {
        /// The position that was asked for
        index: isize,
        /// First retained position
        first: isize,
        /// Last retained position
        last: isize,
    },

    /// A window lookup was made while no line is current: before the first
    /// read, or after the traversal has ended
    #[error("no current line: the window is empty until the first read and after the last")]
    NoCurrentLine,

    /// The index could not be represented as a line position
    #[error("invalid line index: {0}")]
    InvalidIndexType(String),

    /// A traversal was requested on a stream that is not active
    #[error("stream is not active: call activate() first")]
    NotActive,

    /// A window query was made on a stream created with window size 0
    #[error("windowing is disabled for this stream")]
    WindowDisabled,

    /// Reading from an open source failed
    #[error("read failed: {0}")]
    Read(#[from] io::Error),
}

impl From<WindowError> for StreamError {
    fn from(err: WindowError) -> Self {
        match err {
            WindowError::InvalidSize(size) => StreamError::Configuration(format!(
                "window size {size} is invalid: use 0 to disable windowing or at least 2"
            )),
            WindowError::OutOfRange { index, first, last } => {
                StreamError::IndexOutOfRange { index, first, last }
            }
            WindowError::Uninitialized => StreamError::NoCurrentLine,
        }
    }
}

/// Result type for stream operations
pub type Result<T> = std::result::Result<T, StreamError>;
