use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use tantivy_common::{file_slice::FileSlice, OwnedBytes};

use super::{error::OpenReadError, Directory};

/// In-memory directory. Cloning shares the underlying files.
#[derive(Clone, Default)]
pub struct RamDirectory {
    files: Arc<RwLock<HashMap<PathBuf, OwnedBytes>>>,
}

impl RamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_mem_usage(&self) -> usize {
        self.files.read().unwrap().values().map(|f| f.len()).sum()
    }
}

impl Directory for RamDirectory {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self.files.read().unwrap().contains_key(path))
    }

    fn open_read(&self, path: &Path) -> Result<FileSlice, OpenReadError> {
        let files = self.files.read().unwrap();
        let data = files
            .get(path)
            .ok_or_else(|| OpenReadError::FileDoesNotExist(path.to_path_buf()))?;
        Ok(FileSlice::new(Arc::new(data.clone())))
    }

    fn atomic_read(&self, path: &Path) -> Result<Vec<u8>, OpenReadError> {
        let files = self.files.read().unwrap();
        files
            .get(path)
            .map(|data| data.as_slice().to_vec())
            .ok_or_else(|| OpenReadError::FileDoesNotExist(path.to_path_buf()))
    }

    fn atomic_write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let data = OwnedBytes::new(data.to_vec());
        self.files.write().unwrap().insert(path.to_path_buf(), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::directory::{error::OpenReadError, Directory};

    use super::RamDirectory;

    #[test]
    fn test_write_then_read() {
        let directory = RamDirectory::new();
        let path = Path::new("segments/a/index/pk");
        assert!(!directory.exists(path).unwrap());
        directory.atomic_write(path, b"hello world").unwrap();
        assert!(directory.exists(path).unwrap());

        let file = directory.open_read(path).unwrap();
        let bytes = file.read_bytes_slice(6..11).unwrap();
        assert_eq!(bytes.as_slice(), b"world");
        assert_eq!(directory.atomic_read(path).unwrap(), b"hello world");
        assert_eq!(directory.total_mem_usage(), 11);
    }

    #[test]
    fn test_missing_file() {
        let directory = RamDirectory::new();
        let result = directory.open_read(Path::new("missing"));
        assert!(matches!(result, Err(OpenReadError::FileDoesNotExist(_))));
    }
}
