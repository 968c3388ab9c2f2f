use std::io;

use tantivy_common::file_slice::FileSlice;

use super::{
    KeyDocRecord, PrimaryKey, PrimaryKeyFileIterator, PrimaryKeyIterator, PrimaryKeySortedArray,
};

pub struct SortedArrayPrimaryKeyIterator<K> {
    array: Option<PrimaryKeySortedArray<K>>,
    cursor: usize,
}

impl<K> Default for SortedArrayPrimaryKeyIterator<K> {
    fn default() -> Self {
        Self {
            array: None,
            cursor: 0,
        }
    }
}

impl<K: PrimaryKey> SortedArrayPrimaryKeyIterator<K> {
    pub fn new(array: PrimaryKeySortedArray<K>) -> Self {
        Self {
            array: Some(array),
            cursor: 0,
        }
    }

    fn array(&self) -> &PrimaryKeySortedArray<K> {
        self.array
            .as_ref()
            .expect("sorted array iterator used before init")
    }
}

impl<K: PrimaryKey> PrimaryKeyIterator<K> for SortedArrayPrimaryKeyIterator<K> {
    fn has_next(&self) -> bool {
        self.array
            .as_ref()
            .is_some_and(|array| self.cursor < array.len())
    }

    fn current(&self) -> KeyDocRecord<K> {
        self.array().get(self.cursor)
    }

    fn next(&mut self) -> io::Result<KeyDocRecord<K>> {
        let pair = self.current();
        self.cursor += 1;
        Ok(pair)
    }
}

impl<K: PrimaryKey> PrimaryKeyFileIterator<K> for SortedArrayPrimaryKeyIterator<K> {
    fn init(&mut self, file: FileSlice) -> io::Result<()> {
        let data = file.read_bytes()?;
        let array = PrimaryKeySortedArray::open(data)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.array = Some(array);
        self.cursor = 0;
        Ok(())
    }
}
