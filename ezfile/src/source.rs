//! Line sources
//!
//! A [`LineSource`] describes where lines come from. Nothing is opened until
//! the owning stream is activated.

use crate::error::{Result, StreamError};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

const TEXT_NAME: &str = "<text>";
const READER_NAME: &str = "<reader>";

enum SourceKind {
    File(PathBuf),
    Text(String),
    /// Taken on first open
    Reader(Option<Box<dyn BufRead + Send>>),
}

/// Where a stream reads its lines from
pub struct LineSource {
    kind: SourceKind,
}

impl LineSource {
    /// Lines of a file on disk; can be reopened any number of times
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceKind::File(path.into()),
        }
    }

    /// Lines of an in-memory string; can be reopened any number of times
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Text(text.into()),
        }
    }

    /// Lines of an already-open reader; can be opened once
    pub fn reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            kind: SourceKind::Reader(Some(Box::new(reader))),
        }
    }

    /// Path of a file source
    pub fn path(&self) -> Option<&Path> {
        match &self.kind {
            SourceKind::File(path) => Some(path),
            _ => None,
        }
    }

    /// Whether the source can be opened again (a reader is spent after its
    /// first open)
    pub fn is_reopenable(&self) -> bool {
        !matches!(self.kind, SourceKind::Reader(None))
    }

    /// Open the source for reading
    pub(crate) fn open(&mut self, keep_terminator: bool) -> Result<LineReader> {
        let inner: Box<dyn BufRead + Send> = match &mut self.kind {
            SourceKind::File(path) => {
                let file = File::open(&*path).map_err(|source| StreamError::Open {
                    name: path.display().to_string(),
                    source,
                })?;
                Box::new(BufReader::new(file))
            }
            SourceKind::Text(text) => Box::new(Cursor::new(text.clone().into_bytes())),
            SourceKind::Reader(reader) => reader.take().ok_or_else(|| StreamError::Open {
                name: READER_NAME.to_string(),
                source: io::Error::other("reader was already consumed"),
            })?,
        };
        Ok(LineReader::new(inner, keep_terminator))
    }
}

impl fmt::Display for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SourceKind::File(path) => write!(f, "{}", path.display()),
            SourceKind::Text(_) => f.write_str(TEXT_NAME),
            SourceKind::Reader(_) => f.write_str(READER_NAME),
        }
    }
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SourceKind::File(path) => f.debug_tuple("File").field(path).finish(),
            SourceKind::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} bytes>", text.len()))
                .finish(),
            SourceKind::Reader(reader) => f
                .debug_tuple("Reader")
                .field(&if reader.is_some() { "<open>" } else { "<consumed>" })
                .finish(),
        }
    }
}

impl From<PathBuf> for LineSource {
    fn from(path: PathBuf) -> Self {
        LineSource::file(path)
    }
}

impl From<&Path> for LineSource {
    fn from(path: &Path) -> Self {
        LineSource::file(path)
    }
}

/// An opened source handing out one line per call
pub(crate) struct LineReader {
    inner: Box<dyn BufRead + Send>,
    keep_terminator: bool,
}

impl LineReader {
    fn new(inner: Box<dyn BufRead + Send>, keep_terminator: bool) -> Self {
        Self {
            inner,
            keep_terminator,
        }
    }

    /// Next line, or `None` once the source is exhausted
    pub(crate) fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if !self.keep_terminator {
            strip_terminator(&mut line);
        }
        Ok(Some(line))
    }
}

/// Remove one trailing `\n` (and a `\r` before it)
pub(crate) fn strip_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
