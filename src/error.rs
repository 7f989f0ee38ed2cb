use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by deck generation and rendering.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected input counts or layout settings.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("not enough symbol images: required {required}, available {available}")]
    InsufficientSymbols { required: usize, available: usize },

    /// A single symbol failed to transform or place; the document is not written.
    #[error("failed to render symbol {symbol} on card {card}")]
    Render {
        card: usize,
        symbol: String,
        #[source]
        source: Box<Error>,
    },

    /// A drawing call reached a backend in a state it cannot handle.
    #[error("page backend error: {0}")]
    Backend(String),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("pdf output failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
