//! Error types for the rendering and export pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or exporting images
#[derive(Error, Debug)]
pub enum Error {
    /// The drawing surface could not be acquired
    #[error("Render surface unavailable: {0}")]
    Surface(String),

    /// The rendered pixels could not be encoded as PNG
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// A batch export was requested but no chunk has a rendered image
    #[error("Nothing to export: no rendered images")]
    EmptyExport,

    /// Archive assembly failed; no partial archive is produced
    #[error("Archive assembly failed: {0}")]
    Archive(String),

    /// Input the pipeline cannot accept (e.g. an empty source file)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Other(err.to_string())
    }
}
