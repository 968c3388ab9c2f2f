use std::marker::PhantomData;

use tantivy_common::OwnedBytes;

use crate::{DocId, DocsegError, Result};

use super::{KeyDocRecord, PrimaryKey};

/// Serializes pairs with strictly ascending keys as a packed record array.
pub fn write_sorted_array<K: PrimaryKey>(pairs: &[KeyDocRecord<K>]) -> Vec<u8> {
    let record_size = KeyDocRecord::<K>::SIZE;
    let mut data = vec![0u8; pairs.len() * record_size];
    for (i, pair) in pairs.iter().enumerate() {
        if i > 0 {
            assert!(
                pairs[i - 1].key < pair.key,
                "sorted array keys must be strictly ascending"
            );
        }
        pair.write_to(&mut data[i * record_size..(i + 1) * record_size]);
    }
    data
}

/// Binary search over a packed, key ordered record array.
pub(crate) fn search_records<K: PrimaryKey>(data: &[u8], key: K) -> Option<DocId> {
    let record_size = KeyDocRecord::<K>::SIZE;
    let mut low = 0;
    let mut high = data.len() / record_size;
    while low < high {
        let mid = low + (high - low) / 2;
        let record = KeyDocRecord::<K>::read_from(&data[mid * record_size..]);
        if record.key < key {
            low = mid + 1;
        } else if record.key > key {
            high = mid;
        } else {
            return Some(record.docid);
        }
    }
    None
}

/// A persisted sorted array: `[key ++ docid] x n`, ascending by key.
#[derive(Clone)]
pub struct PrimaryKeySortedArray<K> {
    data: OwnedBytes,
    _key: PhantomData<K>,
}

impl<K: PrimaryKey> PrimaryKeySortedArray<K> {
    pub fn open(data: OwnedBytes) -> Result<Self> {
        if data.len() % KeyDocRecord::<K>::SIZE != 0 {
            return Err(DocsegError::DataCorrupted(format!(
                "sorted array of {} bytes is not a multiple of record size {}",
                data.len(),
                KeyDocRecord::<K>::SIZE
            )));
        }
        Ok(Self {
            data,
            _key: PhantomData,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len() / KeyDocRecord::<K>::SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, idx: usize) -> KeyDocRecord<K> {
        let record_size = KeyDocRecord::<K>::SIZE;
        KeyDocRecord::read_from(&self.data.as_slice()[idx * record_size..(idx + 1) * record_size])
    }

    pub fn lookup(&self, key: K) -> Option<DocId> {
        search_records(self.data.as_slice(), key)
    }
}

#[cfg(test)]
mod tests {
    use tantivy_common::OwnedBytes;

    use crate::{index::primary_key::KeyDocRecord, DocsegError};

    use super::{write_sorted_array, PrimaryKeySortedArray};

    #[test]
    fn test_basic() {
        let pairs: Vec<_> = (0..100u64).map(|i| KeyDocRecord::new(i * 3, (99 - i) as i32)).collect();
        let data = write_sorted_array(&pairs);
        assert_eq!(data.len(), 100 * 12);

        let array = PrimaryKeySortedArray::<u64>::open(OwnedBytes::new(data)).unwrap();
        assert_eq!(array.len(), 100);
        assert_eq!(array.get(10), pairs[10]);
        for pair in &pairs {
            assert_eq!(array.lookup(pair.key), Some(pair.docid));
            assert_eq!(array.lookup(pair.key + 1), None);
        }
    }

    #[test]
    fn test_empty() {
        let array = PrimaryKeySortedArray::<u128>::open(OwnedBytes::new(write_sorted_array::<u128>(&[]))).unwrap();
        assert!(array.is_empty());
        assert_eq!(array.lookup(0), None);
    }

    #[test]
    fn test_corrupted_length() {
        let result = PrimaryKeySortedArray::<u64>::open(OwnedBytes::new(vec![0u8; 13]));
        assert!(matches!(result, Err(DocsegError::DataCorrupted(_))));
    }

    #[test]
    #[should_panic(expected = "strictly ascending")]
    fn test_unordered_input() {
        write_sorted_array(&[KeyDocRecord::new(2u64, 0), KeyDocRecord::new(1u64, 1)]);
    }
}
