//! Fixed-size sliding line window
//!
//! This crate holds the I/O-free part of ezfile: a window of `W` slots (always
//! odd) centred on the current line, the translation from absolute line
//! positions to slots, and the validation of window widths.
//!
//! ```rust
//! use ezfile_core::{LineWindow, WindowSize};
//! use std::convert::Infallible;
//!
//! let mut lines = ["a", "b", "c", "d"].into_iter();
//! let mut window = LineWindow::new(WindowSize::new(3).unwrap());
//!
//! window.step(|| Ok::<_, Infallible>(lines.next())).unwrap();
//! window.step(|| Ok::<_, Infallible>(lines.next())).unwrap();
//!
//! assert_eq!(window.current(), Some(&"b"));
//! assert_eq!(window.get(0), Ok(Some(&"a")));
//! assert_eq!(window.get(2), Ok(Some(&"c")));
//! assert!(window.get(3).is_err());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod error;
pub mod size;
pub mod window;

pub use error::{Result, WindowError};
pub use size::WindowSize;
pub use window::{slot_for, LineWindow};
