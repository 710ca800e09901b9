//! Stream configuration
//!
//! Options are built with [`StreamOptions::builder`] or loaded from a TOML
//! file. Both paths go through the same validation.
//!
//! ```toml
//! mode = "r"
//! window_size = 5
//! keep_line_terminator = false
//! ```

use crate::error::{Result, StreamError};
use ezfile_core::WindowSize;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Default configuration constants
pub mod defaults {
    /// Window size meaning "no window": plain line-by-line reading
    pub const WINDOW_DISABLED: usize = 0;

    /// Whether line terminators are kept by default
    pub const KEEP_LINE_TERMINATOR: bool = false;
}

/// How the source is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum OpenMode {
    /// Text lines (`"r"`)
    #[default]
    Read,
    /// Raw bytes (`"rb"`); recognised but not supported
    ReadBinary,
}

impl OpenMode {
    /// Mode string as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            OpenMode::Read => "r",
            OpenMode::ReadBinary => "rb",
        }
    }

    /// Whether this mode reads raw bytes
    pub fn is_binary(self) -> bool {
        matches!(self, OpenMode::ReadBinary)
    }
}

impl FromStr for OpenMode {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" | "rt" => Ok(OpenMode::Read),
            "rb" | "br" => Ok(OpenMode::ReadBinary),
            other => Err(StreamError::Configuration(format!(
                "unknown open mode '{other}': expected 'r' or 'rb'"
            ))),
        }
    }
}

impl TryFrom<String> for OpenMode {
    type Error = StreamError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated stream options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOptions {
    pub(crate) mode: OpenMode,
    pub(crate) window: Option<WindowSize>,
    pub(crate) keep_line_terminator: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            mode: OpenMode::default(),
            window: None,
            keep_line_terminator: defaults::KEEP_LINE_TERMINATOR,
        }
    }
}

impl StreamOptions {
    /// Create an options builder
    pub fn builder() -> StreamOptionsBuilder {
        StreamOptionsBuilder::default()
    }

    /// Options for a window of `window_size` lines (0 disables the window)
    pub fn windowed(window_size: usize) -> Result<Self> {
        Self::builder().window_size(window_size).build()
    }

    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let builder: StreamOptionsBuilder = toml::from_str(content)
            .map_err(|e| StreamError::Configuration(format!("failed to parse options: {e}")))?;
        builder.build()
    }

    /// Load options from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StreamError::Configuration(format!(
                "failed to read options file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Open mode
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Effective window size after correction, 0 when disabled
    pub fn window_size(&self) -> usize {
        self.window.map_or(defaults::WINDOW_DISABLED, WindowSize::get)
    }

    /// The window width, if windowing is enabled
    pub fn window(&self) -> Option<WindowSize> {
        self.window
    }

    /// Whether lines keep their trailing newline
    pub fn keep_line_terminator(&self) -> bool {
        self.keep_line_terminator
    }

    /// Validate the options
    pub(crate) fn validate(&self) -> Result<()> {
        if self.mode.is_binary() {
            return Err(StreamError::Configuration(
                "binary mode is not supported: open the source in text mode ('r')".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`StreamOptions`]
///
/// Also the shape of an options file: every key is optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamOptionsBuilder {
    mode: Option<OpenMode>,
    window_size: Option<usize>,
    keep_line_terminator: Option<bool>,
}

impl StreamOptionsBuilder {
    /// Create a new options builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the open mode
    pub fn mode(mut self, mode: OpenMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the open mode from a mode string such as `"r"`
    pub fn mode_str(mut self, mode: &str) -> Result<Self> {
        self.mode = Some(mode.parse()?);
        Ok(self)
    }

    /// Set the window size; 0 disables windowing, even values are rounded up
    pub fn window_size(mut self, lines: usize) -> Self {
        self.window_size = Some(lines);
        self
    }

    /// Keep (`true`) or strip (`false`) the trailing newline of each line
    pub fn keep_line_terminator(mut self, keep: bool) -> Self {
        self.keep_line_terminator = Some(keep);
        self
    }

    /// Build the options
    pub fn build(self) -> Result<StreamOptions> {
        let mut options = StreamOptions::default();

        if let Some(mode) = self.mode {
            options.mode = mode;
        }

        match self.window_size {
            None | Some(defaults::WINDOW_DISABLED) => {}
            Some(requested) => {
                let size = WindowSize::new(requested)?;
                if size.get() != requested {
                    log::debug!("window size {requested} rounded up to {}", size.get());
                }
                options.window = Some(size);
            }
        }

        if let Some(keep) = self.keep_line_terminator {
            options.keep_line_terminator = keep;
        }

        options.validate()?;
        Ok(options)
    }
}
