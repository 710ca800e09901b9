//! Validated window width

use crate::error::{Result, WindowError};

/// Width of a line window: always odd and at least 3
///
/// An odd width gives the window a middle slot for the current line with the
/// same number of neighbors on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize(usize);

impl WindowSize {
    /// Smallest usable width: one line of history, one of lookahead
    pub const MIN: WindowSize = WindowSize(3);

    /// Validate a requested width
    ///
    /// Even widths are rounded up to the next odd value. Widths `0` and `1`
    /// have no room for a neighbor and are rejected; callers that treat `0`
    /// as "no window" should check for it before calling this.
    pub fn new(requested: usize) -> Result<Self> {
        match requested {
            0 | 1 => Err(WindowError::InvalidSize(requested)),
            // usize::MAX is odd, so an even width always has a successor
            n if n % 2 == 0 => Ok(WindowSize(n + 1)),
            n => Ok(WindowSize(n)),
        }
    }

    /// Total number of slots (W)
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of slots on each side of the middle (m = W / 2)
    pub fn half_width(self) -> usize {
        self.0 / 2
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = WindowError;

    fn try_from(value: usize) -> Result<Self> {
        WindowSize::new(value)
    }
}

impl From<WindowSize> for usize {
    fn from(size: WindowSize) -> Self {
        size.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_sizes_are_kept() {
        assert_eq!(WindowSize::new(3).unwrap().get(), 3);
        assert_eq!(WindowSize::new(9).unwrap().get(), 9);
    }

    #[test]
    fn test_even_sizes_round_up() {
        assert_eq!(WindowSize::new(2).unwrap().get(), 3);
        assert_eq!(WindowSize::new(4).unwrap().get(), 5);
        assert_eq!(WindowSize::new(100).unwrap().get(), 101);
    }

    #[test]
    fn test_degenerate_sizes_rejected() {
        assert_eq!(WindowSize::new(0), Err(WindowError::InvalidSize(0)));
        assert_eq!(WindowSize::new(1), Err(WindowError::InvalidSize(1)));
    }

    #[test]
    fn test_half_width() {
        assert_eq!(WindowSize::MIN.half_width(), 1);
        assert_eq!(WindowSize::new(7).unwrap().half_width(), 3);
    }

    #[test]
    fn test_largest_even_size() {
        assert_eq!(WindowSize::new(usize::MAX - 1).unwrap().get(), usize::MAX);
    }
}
