//! Error types for example processing.

use std::path::PathBuf;

use crate::render::RenderError;

/// Error raised while scanning, parsing, rendering or writing an example.
#[derive(Debug, thiserror::Error)]
pub enum ExampleError {
    /// The example file's extension is not a recognized kind.
    #[error("Unsupported file type: {extension} ({})", path.display())]
    UnsupportedKind {
        /// Example file path.
        path: PathBuf,
        /// The offending extension (empty if the file has none).
        extension: String,
    },

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The renderer rejected the executed source.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ExampleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
