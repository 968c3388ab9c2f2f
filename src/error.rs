use std::{io, sync::Arc};

use thiserror::Error;

use crate::directory::error::OpenReadError;

#[derive(Debug, Clone, Error)]
pub enum DocsegError {
    /// IO Error.
    #[error("An IO error occurred: '{0}'")]
    IoError(Arc<io::Error>),
    /// Failed to open a file for read.
    #[error("Failed to open file for read: '{0:?}'")]
    OpenReadError(#[from] OpenReadError),
    /// Invalid argument was passed by the user.
    #[error("An invalid argument was passed: '{0}'")]
    InvalidArgument(String),
    /// Persisted data could not be decoded.
    #[error("Data corrupted: '{0}'")]
    DataCorrupted(String),
    /// The requested representation or key type is not supported here.
    #[error("Unsupported: '{0}'")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, DocsegError>;

impl From<io::Error> for DocsegError {
    fn from(io_err: io::Error) -> DocsegError {
        DocsegError::IoError(Arc::new(io_err))
    }
}

impl From<serde_json::Error> for DocsegError {
    fn from(err: serde_json::Error) -> DocsegError {
        DocsegError::DataCorrupted(err.to_string())
    }
}
