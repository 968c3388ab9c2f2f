use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use tantivy_common::file_slice::{FileSlice, WrapFile};

use super::{error::OpenReadError, Directory};

/// Directory backed by a root folder on the local filesystem.
#[derive(Clone, Debug)]
pub struct FsDirectory {
    root: PathBuf,
}

impl FsDirectory {
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Directory for FsDirectory {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        self.resolve(path).try_exists()
    }

    fn open_read(&self, path: &Path) -> Result<FileSlice, OpenReadError> {
        let full_path = self.resolve(path);
        let file = File::open(&full_path)
            .map_err(|err| OpenReadError::wrap_io_error(err, path.to_path_buf()))?;
        let file = WrapFile::new(file)
            .map_err(|err| OpenReadError::wrap_io_error(err, path.to_path_buf()))?;
        Ok(FileSlice::new(Arc::new(file)))
    }

    fn atomic_read(&self, path: &Path) -> Result<Vec<u8>, OpenReadError> {
        fs::read(self.resolve(path))
            .map_err(|err| OpenReadError::wrap_io_error(err, path.to_path_buf()))
    }

    fn atomic_write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut tmp_name = full_path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &full_path)
    }
}
