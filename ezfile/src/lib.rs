//! Line reading with a bounded sliding window
//!
//! ezfile reads a line-oriented source one line at a time while keeping a
//! small, fixed number of neighboring lines in memory: up to `m` lines already
//! consumed and up to `m` lines read ahead, where `m` is half the window size.
//! Any retained line can be looked up by its absolute position in the source.
//!
//! # Example
//!
//! ```rust
//! use ezfile::{LineSource, StreamOptions, WindowedLineStream};
//!
//! let options = StreamOptions::builder().window_size(5).build()?;
//! let text = "one\ntwo\nthree\nfour\n";
//! let mut stream = WindowedLineStream::new(LineSource::text(text), options)?;
//!
//! let mut active = stream.scoped()?;
//! assert_eq!(active.read_one()?.as_deref(), Some("one"));
//! // Two lines of lookahead are already available
//! assert_eq!(active.get(2)?, Some("three"));
//! assert_eq!(active.snapshot()?, ["one", "two", "three"]);
//! # Ok::<_, ezfile::StreamError>(())
//! ```
//!
//! # Crate organisation
//!
//! - [`WindowedLineStream`]: the stream, its lifecycle and window queries
//! - [`Lines`]: the iterator returned by [`WindowedLineStream::iterate`]
//! - [`StreamOptions`]: validated configuration, buildable or loaded from TOML
//! - [`LineSource`]: file, in-memory text, or an already-open reader
//! - [`LineFilter`]: predicate hook stored on a stream
//! - [`StreamError`]: everything that can go wrong
//!
//! The window itself lives in the `ezfile-core` crate; its main types are
//! re-exported here.

#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod lines;
pub mod options;
pub mod source;
pub mod stream;

// Re-export key types
pub use error::{Result, StreamError};
pub use filter::LineFilter;
pub use lines::Lines;
pub use options::{OpenMode, StreamOptions, StreamOptionsBuilder};
pub use source::LineSource;
pub use stream::{ActiveStream, WindowedLineStream};

// Re-export from core for convenience
pub use ezfile_core::{LineWindow, WindowSize};
