use std::{io, path::Path};

use tantivy_common::file_slice::FileSlice;

use super::error::OpenReadError;

/// Byte-addressable storage that segments are read from and written to.
///
/// Paths are relative to the directory root. Written files are immutable: a
/// segment's index file is produced once by [`Directory::atomic_write`] and then
/// only ever read through [`Directory::open_read`], which hands out a
/// [`FileSlice`] supporting ranged reads.
pub trait Directory: Send + Sync {
    fn exists(&self, path: &Path) -> io::Result<bool>;

    fn open_read(&self, path: &Path) -> Result<FileSlice, OpenReadError>;

    fn atomic_read(&self, path: &Path) -> Result<Vec<u8>, OpenReadError>;

    fn atomic_write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}
