use std::{io, sync::Arc};

use crate::DocId;

use super::{
    PrimaryKey, PrimaryKeyBuildingSegmentData, PrimaryKeyIterator, PrimaryKeySegmentReader,
    VecPrimaryKeyIterator,
};

pub struct PrimaryKeyBuildingSegmentReader<K> {
    index_data: Arc<PrimaryKeyBuildingSegmentData<K>>,
}

impl<K: PrimaryKey> PrimaryKeyBuildingSegmentReader<K> {
    pub fn new(index_data: Arc<PrimaryKeyBuildingSegmentData<K>>) -> Self {
        Self { index_data }
    }
}

impl<K: PrimaryKey> PrimaryKeySegmentReader<K> for PrimaryKeyBuildingSegmentReader<K> {
    fn lookup(&self, key: K) -> io::Result<Option<DocId>> {
        Ok(self.index_data.lookup(key))
    }

    fn create_iterator(&self) -> io::Result<Box<dyn PrimaryKeyIterator<K>>> {
        Ok(Box::new(VecPrimaryKeyIterator::new(
            self.index_data.sorted_pairs(),
        )))
    }
}
