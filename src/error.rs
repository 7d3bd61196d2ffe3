use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A document could not be opened or read
    #[error("failed to read document {document}: {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },

    #[error("query document not found in corpus: {0}")]
    MissingDocument(String),

    #[error("query word not found in corpus: {0}")]
    MissingWord(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Vectors of a different length than the model's dimensions
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    /// Corpus build aborted because at least one document failed
    #[error("{failed} document(s) failed, first: {first}")]
    Failed { failed: usize, first: Box<Error> },
}

impl Error {
    pub(crate) fn io(document: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io { document: document.into(), source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
