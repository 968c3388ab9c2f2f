use std::{fmt::Debug, hash::Hash, mem};

use byteorder::{ByteOrder, LittleEndian};
use xxhash_rust::xxh3::{xxh3_128, xxh3_64};

use crate::DocId;

use super::PrimaryKeyType;

pub const DOCID_SIZE: usize = mem::size_of::<DocId>();

/// A fixed-width primary key as stored in the index files.
///
/// Keys are encoded little-endian with an explicit byte width, so a record has
/// the same size and layout wherever it was built.
pub trait PrimaryKey: Copy + Ord + Hash + Debug + Default + Send + Sync + 'static {
    const KEY_TYPE: PrimaryKeyType;
    const SIZE: usize;

    fn read_from(bytes: &[u8]) -> Self;

    fn write_to(self, bytes: &mut [u8]);

    /// Bucket of this key in a table with `bucket_count` buckets.
    fn bucket_index(self, bucket_count: u64) -> usize;

    fn hash_bytes(bytes: &[u8]) -> Self;

    fn parse_number(text: &str) -> Option<Self>;
}

impl PrimaryKey for u64 {
    const KEY_TYPE: PrimaryKeyType = PrimaryKeyType::Uint64;
    const SIZE: usize = 8;

    fn read_from(bytes: &[u8]) -> Self {
        LittleEndian::read_u64(bytes)
    }

    fn write_to(self, bytes: &mut [u8]) {
        LittleEndian::write_u64(bytes, self)
    }

    fn bucket_index(self, bucket_count: u64) -> usize {
        (self % bucket_count) as usize
    }

    fn hash_bytes(bytes: &[u8]) -> Self {
        xxh3_64(bytes)
    }

    fn parse_number(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl PrimaryKey for u128 {
    const KEY_TYPE: PrimaryKeyType = PrimaryKeyType::Uint128;
    const SIZE: usize = 16;

    fn read_from(bytes: &[u8]) -> Self {
        LittleEndian::read_u128(bytes)
    }

    fn write_to(self, bytes: &mut [u8]) {
        LittleEndian::write_u128(bytes, self)
    }

    fn bucket_index(self, bucket_count: u64) -> usize {
        (self % bucket_count as u128) as usize
    }

    fn hash_bytes(bytes: &[u8]) -> Self {
        xxh3_128(bytes)
    }

    fn parse_number(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

/// A primary key together with the docid of the document it belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyDocRecord<K> {
    pub key: K,
    pub docid: DocId,
}

impl<K: PrimaryKey> KeyDocRecord<K> {
    /// Encoded size: the key followed by a 4 byte docid, no padding.
    pub const SIZE: usize = K::SIZE + DOCID_SIZE;

    pub fn new(key: K, docid: DocId) -> Self {
        Self { key, docid }
    }

    pub fn read_from(bytes: &[u8]) -> Self {
        let key = K::read_from(&bytes[..K::SIZE]);
        let docid = LittleEndian::read_i32(&bytes[K::SIZE..Self::SIZE]);
        Self { key, docid }
    }

    pub fn write_to(&self, bytes: &mut [u8]) {
        self.key.write_to(&mut bytes[..K::SIZE]);
        LittleEndian::write_i32(&mut bytes[K::SIZE..Self::SIZE], self.docid);
    }

    pub fn with_base_docid(self, base_docid: DocId) -> Self {
        Self {
            key: self.key,
            docid: self.docid + base_docid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyDocRecord, PrimaryKey};

    #[test]
    fn test_record_size() {
        assert_eq!(KeyDocRecord::<u64>::SIZE, 12);
        assert_eq!(KeyDocRecord::<u128>::SIZE, 20);
    }

    #[test]
    fn test_record_layout() {
        let record = KeyDocRecord::new(0x0102_0304_0506_0708u64, -1);
        let mut bytes = [0u8; 12];
        record.write_to(&mut bytes);
        assert_eq!(
            bytes,
            [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01, 0xff, 0xff, 0xff, 0xff]
        );
        assert_eq!(KeyDocRecord::<u64>::read_from(&bytes), record);

        let record = KeyDocRecord::new(u128::MAX - 1, 7);
        let mut bytes = [0u8; 20];
        record.write_to(&mut bytes);
        assert_eq!(bytes[0], 0xfe);
        assert_eq!(&bytes[1..16], &[0xff; 15]);
        assert_eq!(&bytes[16..], &[7, 0, 0, 0]);
        assert_eq!(KeyDocRecord::<u128>::read_from(&bytes), record);
    }

    #[test]
    fn test_bucket_index() {
        assert_eq!(100u64.bucket_index(7), 2);
        assert_eq!(((1u128 << 64) + 3).bucket_index(7), 5);
        assert_eq!(u128::MAX.bucket_index(13), (u128::MAX % 13) as usize);
    }

    #[test]
    fn test_with_base_docid() {
        let record = KeyDocRecord::new(5u64, 3).with_base_docid(10);
        assert_eq!(record, KeyDocRecord::new(5, 13));
    }
}
