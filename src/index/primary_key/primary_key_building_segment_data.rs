use std::{collections::HashMap, sync::RwLock};

use crate::DocId;

use super::{KeyDocRecord, PrimaryKey};

/// Primary keys of a segment that is still being built.
///
/// Written by a single writer, readable concurrently. A key added again maps
/// to its latest docid.
pub struct PrimaryKeyBuildingSegmentData<K> {
    inner: RwLock<BuildingKeys<K>>,
}

struct BuildingKeys<K> {
    keys: HashMap<K, DocId>,
    pairs: Vec<KeyDocRecord<K>>,
}

impl<K: PrimaryKey> Default for PrimaryKeyBuildingSegmentData<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PrimaryKey> PrimaryKeyBuildingSegmentData<K> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BuildingKeys {
                keys: HashMap::new(),
                pairs: Vec::new(),
            }),
        }
    }

    pub(super) fn insert(&self, key: K, docid: DocId) {
        let mut inner = self.inner.write().unwrap();
        inner.keys.insert(key, docid);
        inner.pairs.push(KeyDocRecord::new(key, docid));
    }

    pub fn lookup(&self, key: K) -> Option<DocId> {
        self.inner.read().unwrap().keys.get(&key).copied()
    }

    pub fn key_count(&self) -> usize {
        self.inner.read().unwrap().keys.len()
    }

    pub fn pair_count(&self) -> usize {
        self.inner.read().unwrap().pairs.len()
    }

    /// All added pairs ascending by key, equal keys by docid.
    pub fn sorted_pairs(&self) -> Vec<KeyDocRecord<K>> {
        let mut pairs = self.inner.read().unwrap().pairs.clone();
        pairs.sort_unstable_by_key(|pair| (pair.key, pair.docid));
        pairs
    }
}
