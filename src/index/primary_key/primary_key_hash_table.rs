//! Immutable open hash table mapping primary keys to docids.
//!
//! The whole table lives in one contiguous buffer so a persisted segment can be
//! mapped and queried in place:
//!
//! ```text
//! [pk_count: u64][doc_count: u64][bucket_count: u64]
//! [ key ++ chain_next: i32 ] x doc_count      slot i belongs to docid i
//! [ head: i32 ] x bucket_count                -1 for an empty bucket
//! ```
//!
//! Collisions are chained through the record array itself: the 4 bytes after a
//! slot's key hold the docid of the previous head of its bucket. A docid is
//! never stored for the slot it names; it is the slot's position.

use std::marker::PhantomData;

use byteorder::{ByteOrder, LittleEndian};
use tantivy_common::OwnedBytes;

use crate::{util::find_prime_at_least, DocId, INVALID_DOCID};

use super::{KeyDocRecord, PrimaryKey, DOCID_SIZE};

pub const HASH_TABLE_HEADER_SIZE: usize = 3 * 8;

/// Content of one record slot of a built table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashEntry<K> {
    pub key: K,
    /// Docid of the next older slot in the same bucket, `None` at the chain end.
    /// This is a link, not the identity of the slot itself.
    pub chain_next: Option<DocId>,
}

impl<K: PrimaryKey> HashEntry<K> {
    fn read_from(bytes: &[u8]) -> Self {
        let record = KeyDocRecord::<K>::read_from(bytes);
        Self {
            key: record.key,
            chain_next: decode_docid(record.docid),
        }
    }

    fn write_to(&self, bytes: &mut [u8]) {
        let chain_next = self.chain_next.unwrap_or(INVALID_DOCID);
        KeyDocRecord::new(self.key, chain_next).write_to(bytes);
    }
}

fn decode_docid(raw: DocId) -> Option<DocId> {
    if raw == INVALID_DOCID {
        None
    } else {
        Some(raw)
    }
}

fn bucket_count_for(pk_count: u64) -> u64 {
    find_prime_at_least(pk_count * 5 / 3)
}

#[derive(Debug)]
struct HashTableLayout<K> {
    pk_count: u64,
    doc_count: u64,
    bucket_count: u64,
    _key: PhantomData<K>,
}

impl<K> Clone for HashTableLayout<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for HashTableLayout<K> {}

impl<K: PrimaryKey> HashTableLayout<K> {
    fn new(pk_count: u64, doc_count: u64) -> Self {
        Self {
            pk_count,
            doc_count,
            bucket_count: bucket_count_for(pk_count),
            _key: PhantomData,
        }
    }

    fn read_header(data: &[u8]) -> Self {
        assert!(
            data.len() >= HASH_TABLE_HEADER_SIZE,
            "hash table buffer of {} bytes has no room for the header",
            data.len()
        );
        Self {
            pk_count: LittleEndian::read_u64(&data[0..8]),
            doc_count: LittleEndian::read_u64(&data[8..16]),
            bucket_count: LittleEndian::read_u64(&data[16..24]),
            _key: PhantomData,
        }
    }

    fn write_header(&self, data: &mut [u8]) {
        LittleEndian::write_u64(&mut data[0..8], self.pk_count);
        LittleEndian::write_u64(&mut data[8..16], self.doc_count);
        LittleEndian::write_u64(&mut data[16..24], self.bucket_count);
    }

    fn memory_size(&self) -> usize {
        self.bucket_offset(0) + self.bucket_count as usize * DOCID_SIZE
    }

    fn record_range(&self, docid: DocId) -> std::ops::Range<usize> {
        assert!(
            docid >= 0 && (docid as u64) < self.doc_count,
            "docid {} out of range [0, {})",
            docid,
            self.doc_count
        );
        let start = HASH_TABLE_HEADER_SIZE + docid as usize * KeyDocRecord::<K>::SIZE;
        start..start + KeyDocRecord::<K>::SIZE
    }

    fn bucket_offset(&self, bucket: usize) -> usize {
        HASH_TABLE_HEADER_SIZE
            + self.doc_count as usize * KeyDocRecord::<K>::SIZE
            + bucket * DOCID_SIZE
    }

    fn bucket_of(&self, key: K) -> usize {
        key.bucket_index(self.bucket_count)
    }
}

/// Builds a table inside a caller provided, exactly sized buffer.
///
/// The buffer must hold at least [`PrimaryKeyHashTable::memory_size`] bytes for
/// the counts it is initialized with. A docid can be inserted at most once;
/// the insertion order decides which of several equal keys
/// [`PrimaryKeyHashTable::find`] returns (the last one inserted).
pub struct PrimaryKeyHashTableWriter<K, B = Vec<u8>> {
    buffer: B,
    layout: HashTableLayout<K>,
    inserted: Vec<bool>,
}

impl<K: PrimaryKey> PrimaryKeyHashTableWriter<K, Vec<u8>> {
    /// Allocates an owned buffer of exactly the required size.
    pub fn new(pk_count: usize, doc_count: usize) -> Self {
        let buffer = vec![0u8; PrimaryKeyHashTable::<K>::memory_size(pk_count, doc_count)];
        Self::init_for_build(buffer, pk_count, doc_count)
    }
}

impl<K: PrimaryKey, B: AsMut<[u8]>> PrimaryKeyHashTableWriter<K, B> {
    pub fn init_for_build(mut buffer: B, pk_count: usize, doc_count: usize) -> Self {
        let layout = HashTableLayout::<K>::new(pk_count as u64, doc_count as u64);
        let size = layout.memory_size();
        let data = buffer.as_mut();
        assert!(
            data.len() >= size,
            "hash table buffer too small: {} bytes, {} required",
            data.len(),
            size
        );
        layout.write_header(data);
        for head in data[layout.bucket_offset(0)..size].chunks_exact_mut(DOCID_SIZE) {
            LittleEndian::write_i32(head, INVALID_DOCID);
        }

        Self {
            buffer,
            layout,
            inserted: vec![false; doc_count],
        }
    }

    pub fn insert(&mut self, pair: KeyDocRecord<K>) {
        let record_range = self.layout.record_range(pair.docid);
        let inserted = &mut self.inserted[pair.docid as usize];
        assert!(!*inserted, "docid {} inserted twice", pair.docid);
        *inserted = true;
        let head_offset = self.layout.bucket_offset(self.layout.bucket_of(pair.key));
        let data = self.buffer.as_mut();
        let head_range = head_offset..head_offset + DOCID_SIZE;

        let entry = HashEntry {
            key: pair.key,
            chain_next: decode_docid(LittleEndian::read_i32(&data[head_range.clone()])),
        };
        entry.write_to(&mut data[record_range]);
        LittleEndian::write_i32(&mut data[head_range], pair.docid);
    }

    pub fn pk_count(&self) -> usize {
        self.layout.pk_count as usize
    }

    pub fn doc_count(&self) -> usize {
        self.layout.doc_count as usize
    }

    pub fn bucket_count(&self) -> usize {
        self.layout.bucket_count as usize
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }
}

/// Read-only view over a serialized table.
///
/// Cloning is cheap and shares the underlying bytes, so one mapped file can
/// serve any number of concurrent readers.
#[derive(Clone)]
pub struct PrimaryKeyHashTable<K> {
    data: OwnedBytes,
    layout: HashTableLayout<K>,
}

impl<K: PrimaryKey> PrimaryKeyHashTable<K> {
    pub fn memory_size(pk_count: usize, doc_count: usize) -> usize {
        HashTableLayout::<K>::new(pk_count as u64, doc_count as u64).memory_size()
    }

    /// Recovers an upper estimate of `pk_count` from a serialized table's length.
    pub fn estimate_pk_count(file_length: usize, doc_count: usize) -> usize {
        let records_end = HASH_TABLE_HEADER_SIZE + doc_count * KeyDocRecord::<K>::SIZE;
        let bucket_count = file_length.saturating_sub(records_end) / DOCID_SIZE;
        let pk_count = bucket_count * 3 / 5;
        pk_count.min(doc_count)
    }

    pub fn estimate_memory_cost_per_doc() -> usize {
        KeyDocRecord::<K>::SIZE + 2 * DOCID_SIZE
    }

    /// Does not validate anything beyond the header being present; lookups on
    /// inconsistent data panic when they step outside the buffer.
    pub fn init_for_read(data: OwnedBytes) -> Self {
        let layout = HashTableLayout::read_header(data.as_slice());
        Self { data, layout }
    }

    pub fn pk_count(&self) -> usize {
        self.layout.pk_count as usize
    }

    pub fn doc_count(&self) -> usize {
        self.layout.doc_count as usize
    }

    pub fn bucket_count(&self) -> usize {
        self.layout.bucket_count as usize
    }

    /// Returns the docid of `key`, or [`INVALID_DOCID`] when it is absent.
    pub fn find(&self, key: K) -> DocId {
        self.lookup(key).unwrap_or(INVALID_DOCID)
    }

    pub fn lookup(&self, key: K) -> Option<DocId> {
        let mut cursor = self.bucket_head(self.layout.bucket_of(key));
        let mut steps = 0u64;
        while let Some(docid) = cursor {
            steps += 1;
            assert!(
                steps <= self.layout.doc_count,
                "hash table chain longer than doc count {}",
                self.layout.doc_count
            );
            let entry = self.entry(docid);
            if entry.key == key {
                return Some(docid);
            }
            cursor = entry.chain_next;
        }
        None
    }

    pub fn entry(&self, docid: DocId) -> HashEntry<K> {
        HashEntry::read_from(&self.data.as_slice()[self.layout.record_range(docid)])
    }

    /// Every inserted pair, found by walking all bucket chains. Slots that were
    /// never inserted are not reachable and not returned.
    pub fn pairs(&self) -> Vec<KeyDocRecord<K>> {
        let mut pairs = Vec::with_capacity(self.pk_count());
        for bucket in 0..self.bucket_count() {
            let mut cursor = self.bucket_head(bucket);
            while let Some(docid) = cursor {
                assert!(
                    pairs.len() < self.doc_count(),
                    "hash table chains reach more slots than doc count {}",
                    self.doc_count()
                );
                let entry = self.entry(docid);
                pairs.push(KeyDocRecord::new(entry.key, docid));
                cursor = entry.chain_next;
            }
        }
        pairs
    }

    fn bucket_head(&self, bucket: usize) -> Option<DocId> {
        let offset = self.layout.bucket_offset(bucket);
        decode_docid(LittleEndian::read_i32(
            &self.data.as_slice()[offset..offset + DOCID_SIZE],
        ))
    }
}
