use std::sync::Arc;

use crate::{DocId, Result};

use super::{
    hash_primary_key, PrimaryKey, PrimaryKeyBuildingSegmentData, PrimaryKeyBuildingSegmentReader,
    PrimaryKeyHashType, PrimaryKeyIndexConfig,
};

pub struct PrimaryKeyWriter<K> {
    hash_type: PrimaryKeyHashType,
    index_data: Arc<PrimaryKeyBuildingSegmentData<K>>,
}

impl<K: PrimaryKey> PrimaryKeyWriter<K> {
    pub fn new(config: &PrimaryKeyIndexConfig) -> Result<Self> {
        config.check_key_type::<K>()?;
        Ok(Self {
            hash_type: config.hash_type(),
            index_data: Arc::new(PrimaryKeyBuildingSegmentData::new()),
        })
    }

    pub fn add_key(&mut self, key: &str, docid: DocId) -> Result<()> {
        let hashkey = hash_primary_key(key, self.hash_type)?;
        self.add_hashed_key(hashkey, docid);
        Ok(())
    }

    pub fn add_hashed_key(&mut self, key: K, docid: DocId) {
        assert!(docid >= 0, "invalid docid {} for primary key", docid);
        self.index_data.insert(key, docid);
    }

    pub fn index_data(&self) -> &Arc<PrimaryKeyBuildingSegmentData<K>> {
        &self.index_data
    }

    pub fn segment_reader(&self) -> PrimaryKeyBuildingSegmentReader<K> {
        PrimaryKeyBuildingSegmentReader::new(self.index_data.clone())
    }
}
