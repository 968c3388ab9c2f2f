use std::io;

use tantivy_common::file_slice::FileSlice;

use crate::{DocsegError, Result};

use super::{
    BlockArrayPrimaryKeyIterator, KeyDocRecord, PrimaryKey, PrimaryKeyIndexType,
    SortedArrayPrimaryKeyIterator,
};

/// Yields one segment's pairs in ascending key order, local docids.
pub trait PrimaryKeyIterator<K: PrimaryKey>: Send {
    fn has_next(&self) -> bool;

    /// The pair `next` would return. Must only be called while `has_next`.
    fn current(&self) -> KeyDocRecord<K>;

    /// Returns the current pair and advances. Must only be called while `has_next`.
    fn next(&mut self) -> io::Result<KeyDocRecord<K>>;
}

/// An iterator reading a persisted primary key file.
pub trait PrimaryKeyFileIterator<K: PrimaryKey>: PrimaryKeyIterator<K> {
    fn init(&mut self, file: FileSlice) -> io::Result<()>;
}

/// Creates and initializes the ordered iterator matching `index_type`.
///
/// Hash tables store their pairs by docid, not by key, and cannot be streamed
/// in key order from the file.
pub fn create_file_iterator<K: PrimaryKey>(
    index_type: PrimaryKeyIndexType,
    file: FileSlice,
) -> Result<Box<dyn PrimaryKeyIterator<K>>> {
    match index_type {
        PrimaryKeyIndexType::SortedArray => {
            init_iterator(SortedArrayPrimaryKeyIterator::<K>::default(), file)
        }
        PrimaryKeyIndexType::BlockArray => {
            init_iterator(BlockArrayPrimaryKeyIterator::<K>::default(), file)
        }
        PrimaryKeyIndexType::HashTable => Err(DocsegError::Unsupported(format!(
            "ordered iterator over primary key index type `{}`",
            index_type
        ))),
    }
}

fn init_iterator<K: PrimaryKey, I: PrimaryKeyFileIterator<K> + 'static>(
    mut iter: I,
    file: FileSlice,
) -> Result<Box<dyn PrimaryKeyIterator<K>>> {
    iter.init(file)?;
    Ok(Box::new(iter))
}

#[cfg(test)]
mod tests {
    use tantivy_common::file_slice::FileSlice;

    use crate::{
        index::primary_key::{
            write_block_array, write_sorted_array, KeyDocRecord, PrimaryKeyIndexType,
        },
        DocsegError,
    };

    use super::{create_file_iterator, PrimaryKeyIterator};

    fn drain(mut iter: Box<dyn PrimaryKeyIterator<u64>>) -> Vec<KeyDocRecord<u64>> {
        let mut pairs = vec![];
        while iter.has_next() {
            let current = iter.current();
            let pair = iter.next().unwrap();
            assert_eq!(current, pair);
            pairs.push(pair);
        }
        pairs
    }

    #[test]
    fn test_create_file_iterator() {
        let pairs: Vec<_> = (0..10u64).map(|i| KeyDocRecord::new(i * 10, i as i32)).collect();

        let file = FileSlice::from(write_sorted_array(&pairs));
        let iter = create_file_iterator::<u64>(PrimaryKeyIndexType::SortedArray, file).unwrap();
        assert_eq!(drain(iter), pairs);

        let file = FileSlice::from(write_block_array(&pairs, 3));
        let iter = create_file_iterator::<u64>(PrimaryKeyIndexType::BlockArray, file).unwrap();
        assert_eq!(drain(iter), pairs);
    }

    #[test]
    fn test_hash_table_unsupported() {
        let result = create_file_iterator::<u64>(PrimaryKeyIndexType::HashTable, FileSlice::empty());
        assert!(matches!(result, Err(DocsegError::Unsupported(_))));
    }

    #[test]
    fn test_corrupted_file() {
        let result = create_file_iterator::<u64>(
            PrimaryKeyIndexType::SortedArray,
            FileSlice::from(vec![0u8; 5]),
        );
        assert!(matches!(result, Err(DocsegError::IoError(_))));
    }
}
