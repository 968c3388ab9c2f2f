use std::io;

use crate::DocId;

use super::{
    BlockArrayPrimaryKeyIterator, PrimaryKey, PrimaryKeyBlockArray, PrimaryKeyHashTable,
    PrimaryKeyIterator, PrimaryKeySegmentReader, PrimaryKeySortedArray,
    SortedArrayPrimaryKeyIterator, VecPrimaryKeyIterator,
};

pub struct PrimaryKeyHashTableSegmentReader<K> {
    table: PrimaryKeyHashTable<K>,
}

impl<K: PrimaryKey> PrimaryKeyHashTableSegmentReader<K> {
    pub fn new(table: PrimaryKeyHashTable<K>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PrimaryKeyHashTable<K> {
        &self.table
    }
}

impl<K: PrimaryKey> PrimaryKeySegmentReader<K> for PrimaryKeyHashTableSegmentReader<K> {
    fn lookup(&self, key: K) -> io::Result<Option<DocId>> {
        Ok(self.table.lookup(key))
    }

    fn create_iterator(&self) -> io::Result<Box<dyn PrimaryKeyIterator<K>>> {
        Ok(Box::new(VecPrimaryKeyIterator::from_unsorted(
            self.table.pairs(),
        )))
    }

    fn doc_count(&self) -> Option<usize> {
        Some(self.table.doc_count())
    }
}

pub struct PrimaryKeySortedArraySegmentReader<K> {
    array: PrimaryKeySortedArray<K>,
}

impl<K: PrimaryKey> PrimaryKeySortedArraySegmentReader<K> {
    pub fn new(array: PrimaryKeySortedArray<K>) -> Self {
        Self { array }
    }
}

impl<K: PrimaryKey> PrimaryKeySegmentReader<K> for PrimaryKeySortedArraySegmentReader<K> {
    fn lookup(&self, key: K) -> io::Result<Option<DocId>> {
        Ok(self.array.lookup(key))
    }

    fn create_iterator(&self) -> io::Result<Box<dyn PrimaryKeyIterator<K>>> {
        Ok(Box::new(SortedArrayPrimaryKeyIterator::new(
            self.array.clone(),
        )))
    }
}

pub struct PrimaryKeyBlockArraySegmentReader<K> {
    array: PrimaryKeyBlockArray<K>,
}

impl<K: PrimaryKey> PrimaryKeyBlockArraySegmentReader<K> {
    pub fn new(array: PrimaryKeyBlockArray<K>) -> Self {
        Self { array }
    }
}

impl<K: PrimaryKey> PrimaryKeySegmentReader<K> for PrimaryKeyBlockArraySegmentReader<K> {
    fn lookup(&self, key: K) -> io::Result<Option<DocId>> {
        self.array.lookup(key)
    }

    fn create_iterator(&self) -> io::Result<Box<dyn PrimaryKeyIterator<K>>> {
        Ok(Box::new(BlockArrayPrimaryKeyIterator::new(
            self.array.clone(),
        )?))
    }
}
