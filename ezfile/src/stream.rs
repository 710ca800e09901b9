//! Windowed line stream
//!
//! [`WindowedLineStream`] reads a source one line at a time while keeping a
//! fixed window of neighboring lines addressable by absolute position.

use crate::error::{Result, StreamError};
use crate::filter::LineFilter;
use crate::lines::Lines;
use crate::options::StreamOptions;
use crate::source::{LineReader, LineSource};
use ezfile_core::LineWindow;
use std::fmt;
use std::io;
use std::ops::{Deref, DerefMut};
use std::path::Path;

/// Traversal state, including the number of pulls made since activation
enum Cursor {
    /// Window disabled: lines are handed out as they are read
    Raw { pulls: usize },
    /// Window enabled; unfilled until the first step
    Windowed(LineWindow<String>),
    /// End of input or a read failure; the window has been discarded
    Ended { pulls: usize },
}

impl Cursor {
    fn pulls(&self) -> usize {
        match self {
            Cursor::Raw { pulls } | Cursor::Ended { pulls } => *pulls,
            Cursor::Windowed(window) => window.pulls(),
        }
    }
}

/// Line reader with a sliding window of lookbehind and lookahead lines
///
/// The stream is inert until [`activate`](Self::activate) opens its source.
/// Lines are then pulled with [`iterate`](Self::iterate) or
/// [`read_one`](Self::read_one); both drive the same window, so there is
/// only ever one cursor per stream.
///
/// # Example
///
/// ```rust
/// use ezfile::{LineSource, StreamOptions, WindowedLineStream};
///
/// let options = StreamOptions::windowed(3)?;
/// let mut stream = WindowedLineStream::new(LineSource::text("a\nb\nc\n"), options)?;
///
/// stream.with_active(|stream| {
///     let mut lines = stream.iterate()?;
///     let first = lines.next().transpose()?;
///     assert_eq!(first.as_deref(), Some("a"));
///     assert_eq!(lines.get(1)?, Some("b"));
///     assert_eq!(lines.get(-1)?, None);
///     Ok::<_, ezfile::StreamError>(())
/// })?;
/// # Ok::<_, ezfile::StreamError>(())
/// ```
pub struct WindowedLineStream {
    source: LineSource,
    options: StreamOptions,
    filter: Option<Box<dyn LineFilter>>,
    reader: Option<LineReader>,
    cursor: Cursor,
}

impl WindowedLineStream {
    /// Create a stream over `source`; nothing is opened yet
    pub fn new(source: impl Into<LineSource>, options: StreamOptions) -> Result<Self> {
        options.validate()?;
        let cursor = Self::fresh_cursor(&options);
        Ok(Self {
            source: source.into(),
            options,
            filter: None,
            reader: None,
            cursor,
        })
    }

    /// Create a text-mode stream over the file at `path`
    ///
    /// `window_size` 0 disables windowing; 1 is rejected; even values are
    /// rounded up.
    pub fn open(path: impl AsRef<Path>, window_size: usize) -> Result<Self> {
        Self::new(
            LineSource::file(path.as_ref()),
            StreamOptions::windowed(window_size)?,
        )
    }

    /// Attach a line filter hook (see [`LineFilter`])
    pub fn with_filter(mut self, filter: impl LineFilter + 'static) -> Self {
        self.set_filter(filter);
        self
    }

    fn fresh_cursor(options: &StreamOptions) -> Cursor {
        match options.window() {
            Some(size) => Cursor::Windowed(LineWindow::new(size)),
            None => Cursor::Raw { pulls: 0 },
        }
    }

    fn reset_cursor(&mut self) {
        self.cursor = Self::fresh_cursor(&self.options);
    }

    /// Open the source and start from its first line
    ///
    /// An already active stream is closed and reopened.
    pub fn activate(&mut self) -> Result<()> {
        if self.is_active() {
            log::debug!("{self}: reopening active stream");
            self.close();
        }

        let reader = self.source.open(self.options.keep_line_terminator())?;
        self.reset_cursor();
        self.reader = Some(reader);
        log::debug!(
            "{self}: activated (window size {})",
            self.options.window_size()
        );
        Ok(())
    }

    /// Release the source and discard the window; a no-op when not active
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            log::debug!("{self}: closed after {} reads", self.lines_read());
        }
        self.reset_cursor();
    }

    /// Whether the source is currently open
    pub fn is_active(&self) -> bool {
        self.reader.is_some()
    }

    /// Activate and return a guard that closes the stream when dropped
    ///
    /// The guard dereferences to the stream, so every operation is available
    /// through it.
    pub fn scoped(&mut self) -> Result<ActiveStream<'_>> {
        self.activate()?;
        Ok(ActiveStream { stream: self })
    }

    /// Run `body` with the stream active and close it afterwards
    ///
    /// The stream is closed on every exit path, including a panic in `body`.
    /// An error from `body` is logged and returned unchanged.
    pub fn with_active<T, E, F>(&mut self, body: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut WindowedLineStream) -> std::result::Result<T, E>,
        E: From<StreamError> + fmt::Display,
    {
        let mut guard = self.scoped()?;
        let outcome = body(&mut *guard);
        if let Err(err) = &outcome {
            log::error!("{}: scope ended with error: {err}", *guard);
        }
        drop(guard);
        outcome
    }

    /// Lazy iterator over the remaining lines
    ///
    /// The iterator borrows the stream, and exposes the window queries
    /// itself so neighbors can be inspected while iterating.
    pub fn iterate(&mut self) -> Result<Lines<'_>> {
        if !self.is_active() {
            return Err(StreamError::NotActive);
        }
        Ok(Lines::new(self))
    }

    /// Advance by one line and return it; `None` at end of input
    ///
    /// With a window, the first call fills it (`m + 1` reads) and every later
    /// call reads exactly one line. Without a window each call is one read.
    ///
    /// A read error ends the traversal: it is returned once, and later calls
    /// return `None` until the stream is activated again.
    pub fn read_one(&mut self) -> Result<Option<String>> {
        let Self { reader, cursor, .. } = self;
        let reader = reader.as_mut().ok_or(StreamError::NotActive)?;

        let pulled = match cursor {
            Cursor::Ended { .. } => return Ok(None),
            Cursor::Raw { pulls } => pull(reader, pulls),
            Cursor::Windowed(window) => window
                .step(|| reader.read_line())
                .map(|line| line.cloned()),
        };

        let pulls = cursor.pulls();
        match pulled {
            Ok(Some(line)) => {
                log::trace!("read #{pulls}: {line:?}");
                Ok(Some(line))
            }
            Ok(None) => {
                log::debug!("end of input after {pulls} reads");
                *cursor = Cursor::Ended { pulls };
                Ok(None)
            }
            Err(err) => {
                log::debug!("read #{pulls} failed, ending traversal: {err}");
                *cursor = Cursor::Ended { pulls };
                Err(err.into())
            }
        }
    }

    /// The window, `None` when nothing is retained (unfilled or exhausted)
    fn line_window(&self) -> Result<Option<&LineWindow<String>>> {
        if self.options.window().is_none() {
            return Err(StreamError::WindowDisabled);
        }
        match &self.cursor {
            Cursor::Windowed(window) if window.is_filled() => Ok(Some(window)),
            _ => Ok(None),
        }
    }

    /// Line at absolute position `index`
    ///
    /// Valid positions are `current - m ..= current + m`. Positions inside
    /// that range but before the start or past the end of the source give
    /// `Ok(None)`.
    pub fn get<I>(&self, index: I) -> Result<Option<&str>>
    where
        I: TryInto<isize>,
        I::Error: fmt::Display,
    {
        let index = index
            .try_into()
            .map_err(|e| StreamError::InvalidIndexType(e.to_string()))?;
        let Some(window) = self.line_window()? else {
            return Err(StreamError::NoCurrentLine);
        };
        window
            .get(index)
            .map(|line| line.map(String::as_str))
            .map_err(StreamError::from)
    }

    /// Line at `offset` from the current one (`0` is the current line)
    pub fn get_relative(&self, offset: isize) -> Result<Option<&str>> {
        let Some(window) = self.line_window()? else {
            return Err(StreamError::NoCurrentLine);
        };
        window
            .get_relative(offset)
            .map(|line| line.map(String::as_str))
            .map_err(StreamError::from)
    }

    /// Non-empty lines currently in the window, oldest first
    ///
    /// Shorter than the window size near the start and end of the source.
    pub fn snapshot(&self) -> Result<Vec<&str>> {
        Ok(self
            .line_window()?
            .map(|window| window.snapshot().map(String::as_str).collect::<Vec<_>>())
            .unwrap_or_default())
    }

    /// Whether the window's middle slot holds a line
    pub fn has_current(&self) -> bool {
        match &self.cursor {
            Cursor::Windowed(window) => window.has_current(),
            _ => false,
        }
    }

    /// Absolute position of the current line while one exists
    pub fn current_position(&self) -> Option<usize> {
        match &self.cursor {
            Cursor::Windowed(window) if window.has_current() => window.current_position(),
            _ => None,
        }
    }

    /// Pulls made against the source since activation, counting the pulls
    /// that hit end of input or failed
    pub fn lines_read(&self) -> usize {
        self.cursor.pulls()
    }

    /// Effective window size, 0 when disabled
    pub fn window_size(&self) -> usize {
        self.options.window_size()
    }

    /// Lines kept on each side of the current one
    pub fn half_width(&self) -> usize {
        self.options.window().map_or(0, |size| size.half_width())
    }

    /// Options the stream was built with
    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// The source description
    pub fn source(&self) -> &LineSource {
        &self.source
    }

    /// Replace the line filter hook
    pub fn set_filter(&mut self, filter: impl LineFilter + 'static) {
        self.filter = Some(Box::new(filter));
    }

    /// Remove the line filter hook
    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// The line filter hook, if one is set
    pub fn filter(&self) -> Option<&dyn LineFilter> {
        self.filter.as_deref()
    }

    /// Whether a line filter hook is set
    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }
}

fn pull(reader: &mut LineReader, pulls: &mut usize) -> io::Result<Option<String>> {
    *pulls += 1;
    reader.read_line()
}

impl Drop for WindowedLineStream {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Display for WindowedLineStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WindowedLineStream({}, {}, {})",
            self.source,
            self.options.mode(),
            if self.has_filter() { "filter" } else { "none" }
        )
    }
}

impl fmt::Debug for WindowedLineStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowedLineStream")
            .field("source", &self.source)
            .field("options", &self.options)
            .field("active", &self.is_active())
            .field("lines_read", &self.lines_read())
            .field("current_position", &self.current_position())
            .field("has_filter", &self.has_filter())
            .finish()
    }
}

/// An activated stream that closes itself when dropped
///
/// Returned by [`WindowedLineStream::scoped`].
pub struct ActiveStream<'a> {
    stream: &'a mut WindowedLineStream,
}

impl Deref for ActiveStream<'_> {
    type Target = WindowedLineStream;

    fn deref(&self) -> &Self::Target {
        self.stream
    }
}

impl DerefMut for ActiveStream<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stream
    }
}

impl Drop for ActiveStream<'_> {
    fn drop(&mut self) {
        self.stream.close();
    }
}
