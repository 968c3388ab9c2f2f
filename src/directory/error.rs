use std::{io, path::PathBuf, sync::Arc};

use thiserror::Error;

/// Error that may occur when opening a file for reading.
#[derive(Debug, Clone, Error)]
pub enum OpenReadError {
    /// The file does not exist.
    #[error("Files does not exist: {0:?}")]
    FileDoesNotExist(PathBuf),
    /// Any kind of io::Error.
    #[error("IoError '{io_error:?}' while opening file {filepath:?} for read")]
    IoError {
        io_error: Arc<io::Error>,
        filepath: PathBuf,
    },
}

impl OpenReadError {
    pub fn wrap_io_error(io_error: io::Error, filepath: PathBuf) -> Self {
        if io_error.kind() == io::ErrorKind::NotFound {
            Self::FileDoesNotExist(filepath)
        } else {
            Self::IoError {
                io_error: Arc::new(io_error),
                filepath,
            }
        }
    }
}
