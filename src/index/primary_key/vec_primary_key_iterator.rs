use std::io;

use super::{KeyDocRecord, PrimaryKey, PrimaryKeyIterator};

/// Iterates pairs held in memory.
pub struct VecPrimaryKeyIterator<K> {
    pairs: Vec<KeyDocRecord<K>>,
    cursor: usize,
}

impl<K: PrimaryKey> VecPrimaryKeyIterator<K> {
    /// `pairs` must already be ascending by key.
    pub fn new(pairs: Vec<KeyDocRecord<K>>) -> Self {
        debug_assert!(pairs.windows(2).all(|w| w[0].key <= w[1].key));
        Self { pairs, cursor: 0 }
    }

    /// Sorts by key; equal keys keep docid order so the newest document comes last.
    pub fn from_unsorted(mut pairs: Vec<KeyDocRecord<K>>) -> Self {
        pairs.sort_unstable_by_key(|pair| (pair.key, pair.docid));
        Self::new(pairs)
    }
}

impl<K: PrimaryKey> PrimaryKeyIterator<K> for VecPrimaryKeyIterator<K> {
    fn has_next(&self) -> bool {
        self.cursor < self.pairs.len()
    }

    fn current(&self) -> KeyDocRecord<K> {
        self.pairs[self.cursor]
    }

    fn next(&mut self) -> io::Result<KeyDocRecord<K>> {
        let pair = self.pairs[self.cursor];
        self.cursor += 1;
        Ok(pair)
    }
}
