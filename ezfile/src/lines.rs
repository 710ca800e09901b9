//! Iterator over a windowed line stream

use crate::error::Result;
use crate::stream::WindowedLineStream;
use std::fmt;
use std::iter::FusedIterator;

/// Lazy, single-pass iterator returned by [`WindowedLineStream::iterate`]
///
/// Each call to `next` advances the window by one line. Because the iterator
/// holds the stream's only cursor, the window queries are available on the
/// iterator itself:
///
/// ```rust
/// use ezfile::{LineSource, StreamOptions, WindowedLineStream};
///
/// let options = StreamOptions::windowed(3)?;
/// let mut stream = WindowedLineStream::new(LineSource::text("a\nb\nc\n"), options)?;
/// let mut active = stream.scoped()?;
/// let mut lines = active.iterate()?;
///
/// let mut pairs = Vec::new();
/// while let Some(line) = lines.next() {
///     let line = line?;
///     let position = lines.current_position().unwrap_or_default() as isize;
///     let previous = lines.get(position - 1)?.map(str::to_string);
///     pairs.push((previous, line));
/// }
/// assert_eq!(pairs[0], (None, "a".to_string()));
/// assert_eq!(pairs[2], (Some("b".to_string()), "c".to_string()));
/// # Ok::<_, ezfile::StreamError>(())
/// ```
pub struct Lines<'a> {
    stream: &'a mut WindowedLineStream,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(stream: &'a mut WindowedLineStream) -> Self {
        Self { stream }
    }

    /// See [`WindowedLineStream::get`]
    pub fn get<I>(&self, index: I) -> Result<Option<&str>>
    where
        I: TryInto<isize>,
        I::Error: fmt::Display,
    {
        self.stream.get(index)
    }

    /// See [`WindowedLineStream::get_relative`]
    pub fn get_relative(&self, offset: isize) -> Result<Option<&str>> {
        self.stream.get_relative(offset)
    }

    /// See [`WindowedLineStream::snapshot`]
    pub fn snapshot(&self) -> Result<Vec<&str>> {
        self.stream.snapshot()
    }

    /// See [`WindowedLineStream::has_current`]
    pub fn has_current(&self) -> bool {
        self.stream.has_current()
    }

    /// See [`WindowedLineStream::current_position`]
    pub fn current_position(&self) -> Option<usize> {
        self.stream.current_position()
    }

    /// See [`WindowedLineStream::lines_read`]
    pub fn lines_read(&self) -> usize {
        self.stream.lines_read()
    }

    /// The stream being iterated
    pub fn stream(&self) -> &WindowedLineStream {
        self.stream
    }
}

impl Iterator for Lines<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream.read_one().transpose()
    }
}

// read_one keeps returning Ok(None) once the end has been seen
impl FusedIterator for Lines<'_> {}

impl fmt::Debug for Lines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lines").field("stream", &self.stream).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{LineSource, StreamError, StreamOptions, WindowedLineStream};

    fn stream(text: &str, window_size: usize) -> WindowedLineStream {
        let options = StreamOptions::windowed(window_size).unwrap();
        let mut stream = WindowedLineStream::new(LineSource::text(text), options).unwrap();
        stream.activate().unwrap();
        stream
    }

    #[test]
    fn test_iterate_collects_all_lines() {
        let mut stream = stream("a\nb\nc\n", 3);
        let lines: Vec<String> = stream
            .iterate()
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, ["a", "b", "c"]);
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut stream = stream("a\n", 5);
        let mut lines = stream.iterate().unwrap();
        assert!(lines.next().is_some());
        assert!(lines.next().is_none());
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_queries_while_iterating() {
        let mut stream = stream("a\nb\nc\nd\ne\n", 3);
        let mut lines = stream.iterate().unwrap();

        lines.next();
        lines.next();
        let current = lines.next().unwrap().unwrap();
        assert_eq!(current, "c");
        assert_eq!(lines.current_position(), Some(2));
        assert!(lines.has_current());
        assert_eq!(lines.get(1).unwrap(), Some("b"));
        assert_eq!(lines.get(3).unwrap(), Some("d"));
        assert_eq!(lines.get_relative(1).unwrap(), Some("d"));
        assert_eq!(lines.snapshot().unwrap(), ["b", "c", "d"]);
        assert!(matches!(
            lines.get(0),
            Err(StreamError::IndexOutOfRange {
                index: 0,
                first: 1,
                last: 3
            })
        ));
        assert_eq!(lines.lines_read(), 4);
    }

    #[test]
    fn test_iteration_after_read_one_continues() {
        let mut stream = stream("a\nb\nc\n", 3);
        assert_eq!(stream.read_one().unwrap().as_deref(), Some("a"));

        let rest: Vec<String> = stream.iterate().unwrap().map(Result::unwrap).collect();
        assert_eq!(rest, ["b", "c"]);
    }

    #[test]
    fn test_read_error_in_first_fill_ends_iteration() {
        let options = StreamOptions::windowed(3).unwrap();
        let source = LineSource::reader(std::io::Cursor::new(b"a\n\xff\nc\nd\n".to_vec()));
        let mut stream = WindowedLineStream::new(source, options).unwrap();
        stream.activate().unwrap();

        let mut lines = stream.iterate().unwrap();
        assert!(matches!(lines.next(), Some(Err(StreamError::Read(_)))));
        assert_eq!(lines.lines_read(), 2);

        // No refill from later in the source: "c" is never reported as line 0
        assert!(lines.next().is_none());
        assert!(lines.next().is_none());
        assert_eq!(lines.current_position(), None);
        assert_eq!(lines.lines_read(), 2);
    }

    #[test]
    fn test_read_error_after_first_fill_ends_iteration() {
        let options = StreamOptions::windowed(3).unwrap();
        let source = LineSource::reader(std::io::Cursor::new(b"a\nb\n\xff\nd\ne\n".to_vec()));
        let mut stream = WindowedLineStream::new(source, options).unwrap();
        stream.activate().unwrap();

        let mut lines = stream.iterate().unwrap();
        let mut yielded = Vec::new();
        let mut errors = 0;
        while let Some(item) = lines.next() {
            match item {
                Ok(line) => yielded.push((line, lines.current_position())),
                Err(StreamError::Read(_)) => errors += 1,
                Err(other) => panic!("Expected read error, got {other:?}"),
            }
        }

        assert_eq!(yielded, [("a".to_string(), Some(0))]);
        assert_eq!(errors, 1);
    }
}
