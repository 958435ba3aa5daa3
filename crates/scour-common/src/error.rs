//! Error types for reading input and configuration.
//!
//! The sanitization functions themselves cannot fail. Everything here belongs
//! to the layers around them: loading text from disk or stdin, parsing a
//! pipeline config, and turning step names into steps.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, ScourError>;

/// Everything that can go wrong outside the pure text transforms.
#[derive(Debug, Error)]
pub enum ScourError {
    /// An input or config file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Standard input could not be read.
    #[error("failed to read standard input: {0}")]
    Stdin(#[source] io::Error),

    /// Input bytes are not valid UTF-8.
    #[error("'{path}' is not valid UTF-8")]
    InvalidUtf8 {
        /// Where the bytes came from (`-` for stdin).
        path: String,
    },

    /// A pipeline config file is not valid JSON or has the wrong shape.
    #[error("invalid config '{path}': {source}")]
    Config {
        /// The config path, or `<inline>` for configs parsed from a string.
        path: String,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A step name did not match any known step.
    #[error("unknown step '{0}' (expected one of: strip-tags, encode, encode-with-breaks)")]
    UnknownStep(String),
}

impl ScourError {
    /// Build an [`ScourError::Io`] for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
