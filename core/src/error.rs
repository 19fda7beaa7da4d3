use std::io;

/// Errors raised by corpus operations.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Requested text encoding is not one of the supported names.
    #[error("invalid encoding: {0}")]
    UnsupportedEncoding(String),
    /// Stopword replacement was not an array of strings. Prior state is kept.
    #[error("invalid stopwords: {0}")]
    InvalidStopwords(String),
    /// Per-document query addressed a document that does not exist.
    #[error("document index {index} out of range for corpus of {len} documents")]
    DocumentOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
