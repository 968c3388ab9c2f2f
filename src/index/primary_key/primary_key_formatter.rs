use std::io;

use super::{
    write_block_array, write_sorted_array, KeyDocRecord, PrimaryKey, PrimaryKeyHashTableWriter,
    PrimaryKeyIndexType, DEFAULT_BLOCK_RECORD_COUNT,
};

/// Collapses an ordered stream to one pair per key, keeping the last
/// occurrence of every key.
///
/// Merged streams list older segments first, so the survivor is the pair from
/// the most recent segment.
pub fn dedup_last_wins<K, I>(stream: I) -> io::Result<Vec<KeyDocRecord<K>>>
where
    K: PrimaryKey,
    I: IntoIterator<Item = io::Result<KeyDocRecord<K>>>,
{
    let mut pairs: Vec<KeyDocRecord<K>> = Vec::new();
    for pair in stream {
        let pair = pair?;
        match pairs.last_mut() {
            Some(last) if last.key == pair.key => *last = pair,
            Some(last) => {
                assert!(
                    last.key < pair.key,
                    "primary key stream is not ordered: {:?} after {:?}",
                    pair.key,
                    last.key
                );
                pairs.push(pair);
            }
            None => pairs.push(pair),
        }
    }
    Ok(pairs)
}

/// Serializes unique, key ordered pairs in the configured representation.
#[derive(Clone, Debug)]
pub struct PrimaryKeyFormatter {
    index_type: PrimaryKeyIndexType,
    block_record_count: usize,
}

impl PrimaryKeyFormatter {
    pub fn new(index_type: PrimaryKeyIndexType) -> Self {
        Self {
            index_type,
            block_record_count: DEFAULT_BLOCK_RECORD_COUNT,
        }
    }

    pub fn with_block_record_count(mut self, block_record_count: usize) -> Self {
        self.block_record_count = block_record_count;
        self
    }

    pub fn index_type(&self) -> PrimaryKeyIndexType {
        self.index_type
    }

    pub fn format<K: PrimaryKey>(&self, pairs: &[KeyDocRecord<K>], doc_count: usize) -> Vec<u8> {
        match self.index_type {
            PrimaryKeyIndexType::HashTable => {
                let mut writer = PrimaryKeyHashTableWriter::<K>::new(pairs.len(), doc_count);
                for &pair in pairs {
                    writer.insert(pair);
                }
                writer.into_inner()
            }
            PrimaryKeyIndexType::SortedArray => write_sorted_array(pairs),
            PrimaryKeyIndexType::BlockArray => write_block_array(pairs, self.block_record_count),
        }
    }
}
