//! Line window for bounded lookbehind and lookahead
//!
//! Keeps a fixed number of lines around the current one so that neighbors
//! can be looked up by absolute position without re-reading the source.
//! Each advance costs one pull from the source.

use crate::error::{Result, WindowError};
use crate::size::WindowSize;
use alloc::collections::VecDeque;
use core::ops::RangeInclusive;

/// Translate an absolute position into a window slot
///
/// `current` is the absolute position held by the middle slot. Returns `None`
/// when `index` falls outside `[current - m, current + m]`.
pub fn slot_for(size: WindowSize, current: usize, index: isize) -> Option<usize> {
    let current = isize::try_from(current).ok()?;
    let half = isize::try_from(size.half_width()).ok()?;
    let slot = index.checked_sub(current)?.checked_add(half)?;
    usize::try_from(slot).ok().filter(|&slot| slot < size.get())
}

/// Sliding window of lines around the current position
///
/// Layout for a width of 5 (m = 2):
///
/// ```text
///   slot:  0      1      2        3      4
///          prev2  prev1  current  next1  next2
/// ```
///
/// Slots before the start of the stream and past its end hold `None`. The
/// window is empty until the first [`step`](Self::step) and holds exactly
/// `W` slots afterwards, until a failed pull empties it for good.
#[derive(Debug, Clone)]
pub struct LineWindow<T> {
    size: WindowSize,
    slots: VecDeque<Option<T>>,
    /// Pulls made against the source, including those that hit end-of-input
    /// or failed
    pulls: usize,
    /// Set by a failed pull; no further pulls are made
    failed: bool,
}

impl<T> LineWindow<T> {
    /// Create an unfilled window; nothing is allocated until the first step
    pub fn new(size: WindowSize) -> Self {
        Self {
            size,
            slots: VecDeque::new(),
            pulls: 0,
            failed: false,
        }
    }

    /// Window width (W)
    pub fn size(&self) -> WindowSize {
        self.size
    }

    /// Slots on each side of the current line (m)
    pub fn half_width(&self) -> usize {
        self.size.half_width()
    }

    /// Whether the first fill has happened
    pub fn is_filled(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Number of pulls made against the source so far
    pub fn pulls(&self) -> usize {
        self.pulls
    }

    /// Whether a pull has failed, ending the window
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Move the window forward by one line and return the new current line
    ///
    /// The first call fills the window: `m` empty history slots followed by
    /// `m + 1` pulls. Every later call makes exactly one pull, drops the
    /// oldest slot and appends the pulled value. `pull` returns `Ok(None)` at
    /// end-of-input.
    ///
    /// A failed pull is counted and ends the window: the slots are dropped,
    /// the error is returned, and every later step returns `Ok(None)` without
    /// pulling.
    pub fn step<E, F>(&mut self, pull: F) -> core::result::Result<Option<&T>, E>
    where
        F: FnMut() -> core::result::Result<Option<T>, E>,
    {
        if self.failed {
            return Ok(None);
        }
        let outcome = if self.is_filled() {
            self.advance(pull)
        } else {
            self.fill(pull)
        };
        if let Err(err) = outcome {
            self.failed = true;
            self.slots.clear();
            return Err(err);
        }
        Ok(self.current())
    }

    fn fill<E, F>(&mut self, mut pull: F) -> core::result::Result<(), E>
    where
        F: FnMut() -> core::result::Result<Option<T>, E>,
    {
        let width = self.size.get();
        let half = self.size.half_width();

        let mut slots = VecDeque::with_capacity(width);
        slots.extend(core::iter::repeat_with(|| None).take(half));
        for _ in half..width {
            self.pulls += 1;
            slots.push_back(pull()?);
        }

        self.slots = slots;
        Ok(())
    }

    fn advance<E, F>(&mut self, mut pull: F) -> core::result::Result<(), E>
    where
        F: FnMut() -> core::result::Result<Option<T>, E>,
    {
        self.pulls += 1;
        let incoming = pull()?;
        self.slots.pop_front();
        self.slots.push_back(incoming);
        Ok(())
    }

    /// The line in the middle slot, if any
    pub fn current(&self) -> Option<&T> {
        self.slots.get(self.half_width()).and_then(Option::as_ref)
    }

    /// Whether the middle slot holds a line
    pub fn has_current(&self) -> bool {
        self.current().is_some()
    }

    /// Absolute position of the middle slot (`pulls - 1 - m`)
    ///
    /// `None` until the window has been filled.
    pub fn current_position(&self) -> Option<usize> {
        if !self.is_filled() {
            return None;
        }
        // A fill makes m + 1 pulls, so this never underflows
        Some(self.pulls - 1 - self.half_width())
    }

    /// Absolute positions currently addressable through [`get`](Self::get)
    pub fn retained(&self) -> Option<RangeInclusive<isize>> {
        let current = isize::try_from(self.current_position()?).ok()?;
        let half = isize::try_from(self.half_width()).ok()?;
        Some(current.saturating_sub(half)..=current.saturating_add(half))
    }

    /// Look up a line by absolute position
    ///
    /// Returns `Ok(None)` for slots that are padding before the start or past
    /// the end of the stream.
    pub fn get(&self, index: isize) -> Result<Option<&T>> {
        let current = self.current_position().ok_or(WindowError::Uninitialized)?;
        match slot_for(self.size, current, index) {
            Some(slot) => Ok(self.slots.get(slot).and_then(Option::as_ref)),
            None => {
                let range = self.retained().ok_or(WindowError::Uninitialized)?;
                Err(WindowError::OutOfRange {
                    index,
                    first: *range.start(),
                    last: *range.end(),
                })
            }
        }
    }

    /// Look up a line by offset from the current line (`0` is the current line)
    pub fn get_relative(&self, offset: isize) -> Result<Option<&T>> {
        let current = self.current_position().ok_or(WindowError::Uninitialized)?;
        let current = isize::try_from(current).map_err(|_| WindowError::Uninitialized)?;
        self.get(current.saturating_add(offset))
    }

    /// All lines held in the window, oldest first, skipping empty slots
    ///
    /// The count varies near the edges of the stream; do not assume `W`.
    pub fn snapshot(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().flatten()
    }

    /// Every slot in order, including empty ones
    pub fn slots(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// Drop all slots, forget the pull count and clear a failure
    pub fn reset(&mut self) {
        self.slots = VecDeque::new();
        self.pulls = 0;
        self.failed = false;
    }
}
