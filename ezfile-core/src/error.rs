//! Core error types (deterministic only)

use core::fmt;

/// Window errors (no I/O, no external failures)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Requested window width cannot hold a current line plus neighbors
    InvalidSize(usize),
    /// Absolute index outside the retained window
    OutOfRange {
        /// The index that was asked for
        index: isize,
        /// First absolute position currently retained
        first: isize,
        /// Last absolute position currently retained
        last: isize,
    },
    /// The window has not been filled yet
    Uninitialized,
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::InvalidSize(size) => write!(
                f,
                "invalid window size {size}: must be 0 (disabled) or at least 2"
            ),
            WindowError::OutOfRange { index, first, last } => {
                write!(f, "index {index} is outside the window [{first}, {last}]")
            }
            WindowError::Uninitialized => write!(f, "window has not been filled yet"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WindowError {}

/// Result type for window operations
pub type Result<T> = core::result::Result<T, WindowError>;
