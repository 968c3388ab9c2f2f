use std::io;

use byteorder::{ByteOrder, LittleEndian};
use tantivy_common::{file_slice::FileSlice, HasLen, OwnedBytes};

use crate::{DocId, DocsegError, Result};

use super::{primary_key_sorted_array::search_records, write_sorted_array, KeyDocRecord, PrimaryKey};

pub const DEFAULT_BLOCK_RECORD_COUNT: usize = 256;

const FOOTER_SIZE: usize = 2 * 8;

/// Serializes pairs with strictly ascending keys as fixed size blocks followed
/// by the last key of every block and a footer:
///
/// ```text
/// [ key ++ docid ] x record_count
/// [ key ] x block_count
/// [ record_count: u64 ][ block_record_count: u64 ]
/// ```
pub fn write_block_array<K: PrimaryKey>(
    pairs: &[KeyDocRecord<K>],
    block_record_count: usize,
) -> Vec<u8> {
    assert!(block_record_count > 0, "block must hold at least one record");
    let mut data = write_sorted_array(pairs);
    for block in pairs.chunks(block_record_count) {
        let mut key = vec![0u8; K::SIZE];
        block[block.len() - 1].key.write_to(&mut key);
        data.extend_from_slice(&key);
    }
    let mut footer = [0u8; FOOTER_SIZE];
    LittleEndian::write_u64(&mut footer[0..8], pairs.len() as u64);
    LittleEndian::write_u64(&mut footer[8..16], block_record_count as u64);
    data.extend_from_slice(&footer);
    data
}

/// A persisted block array. Only the block index is kept in memory; blocks
/// are read from the file when a lookup or an iterator needs them.
#[derive(Clone)]
pub struct PrimaryKeyBlockArray<K> {
    file: FileSlice,
    record_count: usize,
    block_record_count: usize,
    block_last_keys: Vec<K>,
}

impl<K: PrimaryKey> PrimaryKeyBlockArray<K> {
    pub fn open(file: FileSlice) -> Result<Self> {
        let file_len = file.len();
        if file_len < FOOTER_SIZE {
            return Err(DocsegError::DataCorrupted(format!(
                "block array of {} bytes has no footer",
                file_len
            )));
        }
        let footer = file.read_bytes_slice(file_len - FOOTER_SIZE..file_len)?;
        let record_count = LittleEndian::read_u64(&footer.as_slice()[0..8]) as usize;
        let block_record_count = LittleEndian::read_u64(&footer.as_slice()[8..16]) as usize;
        if block_record_count == 0 {
            return Err(DocsegError::DataCorrupted(
                "block array with zero records per block".to_string(),
            ));
        }

        let block_count = record_count.div_ceil(block_record_count);
        let records_len = record_count * KeyDocRecord::<K>::SIZE;
        let index_len = block_count * K::SIZE;
        if records_len + index_len + FOOTER_SIZE != file_len {
            return Err(DocsegError::DataCorrupted(format!(
                "block array length {} does not match {} records in blocks of {}",
                file_len, record_count, block_record_count
            )));
        }

        let index = file.read_bytes_slice(records_len..records_len + index_len)?;
        let block_last_keys = index
            .as_slice()
            .chunks_exact(K::SIZE)
            .map(K::read_from)
            .collect();

        Ok(Self {
            file,
            record_count,
            block_record_count,
            block_last_keys,
        })
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn block_count(&self) -> usize {
        self.block_last_keys.len()
    }

    pub fn block_record_count(&self) -> usize {
        self.block_record_count
    }

    pub fn read_block(&self, block: usize) -> io::Result<OwnedBytes> {
        let record_size = KeyDocRecord::<K>::SIZE;
        let start = block * self.block_record_count;
        let end = (start + self.block_record_count).min(self.record_count);
        self.file
            .read_bytes_slice(start * record_size..end * record_size)
    }

    pub fn lookup(&self, key: K) -> io::Result<Option<DocId>> {
        let block = self.block_last_keys.partition_point(|&last| last < key);
        if block == self.block_count() {
            return Ok(None);
        }
        let data = self.read_block(block)?;
        Ok(search_records(data.as_slice(), key))
    }
}
