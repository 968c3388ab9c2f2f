use std::{io, path::Path};

use log::debug;

use crate::{Directory, DocId, DocsegError, Result};

use super::{
    PrimaryKey, PrimaryKeyBlockArray, PrimaryKeyBlockArraySegmentReader, PrimaryKeyHashTable,
    PrimaryKeyHashTableSegmentReader, PrimaryKeyIndexConfig, PrimaryKeyIndexType,
    PrimaryKeyIterator, PrimaryKeySortedArray, PrimaryKeySortedArraySegmentReader,
    HASH_TABLE_HEADER_SIZE,
};

/// Primary key access to one segment, in the segment's local docid space.
pub trait PrimaryKeySegmentReader<K: PrimaryKey>: Send + Sync {
    fn lookup(&self, key: K) -> io::Result<Option<DocId>>;

    /// A fresh iterator over all pairs of the segment, ascending by key.
    fn create_iterator(&self) -> io::Result<Box<dyn PrimaryKeyIterator<K>>>;

    /// The doc count recorded in the index data, for representations that store one.
    fn doc_count(&self) -> Option<usize> {
        None
    }
}

pub fn open_segment_reader<K: PrimaryKey>(
    directory: &dyn Directory,
    config: &PrimaryKeyIndexConfig,
    index_path: &Path,
) -> Result<Box<dyn PrimaryKeySegmentReader<K>>> {
    config.check_key_type::<K>()?;
    debug!(
        "Open primary key segment `{}` as {}",
        index_path.display(),
        config.index_type()
    );
    let file = directory.open_read(index_path)?;
    let reader: Box<dyn PrimaryKeySegmentReader<K>> = match config.index_type() {
        PrimaryKeyIndexType::HashTable => {
            let data = file.read_bytes()?;
            if data.len() < HASH_TABLE_HEADER_SIZE {
                return Err(DocsegError::DataCorrupted(format!(
                    "hash table `{}` of {} bytes has no header",
                    index_path.display(),
                    data.len()
                )));
            }
            let data_len = data.len();
            let table = PrimaryKeyHashTable::<K>::init_for_read(data);
            let expected_len =
                PrimaryKeyHashTable::<K>::memory_size(table.pk_count(), table.doc_count());
            if expected_len != data_len {
                return Err(DocsegError::DataCorrupted(format!(
                    "hash table `{}` is {} bytes, header describes {}",
                    index_path.display(),
                    data_len,
                    expected_len
                )));
            }
            Box::new(PrimaryKeyHashTableSegmentReader::new(table))
        }
        PrimaryKeyIndexType::SortedArray => {
            let array = PrimaryKeySortedArray::open(file.read_bytes()?)?;
            Box::new(PrimaryKeySortedArraySegmentReader::new(array))
        }
        PrimaryKeyIndexType::BlockArray => {
            let array = PrimaryKeyBlockArray::open(file)?;
            Box::new(PrimaryKeyBlockArraySegmentReader::new(array))
        }
    };
    Ok(reader)
}
