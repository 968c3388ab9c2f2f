use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashSet},
    io,
};

use log::debug;

use crate::{table::SegmentMeta, Directory, DocId, DocsegError, Result};

use super::{
    create_file_iterator, KeyDocRecord, PrimaryKey, PrimaryKeyIndexConfig, PrimaryKeyIterator,
    PrimaryKeySegmentReader,
};

/// Merges the ordered pair streams of several segments into one stream in the
/// global docid space.
///
/// Keys come out non-decreasing. Equal keys from different segments come out
/// in ascending base docid order, so the last occurrence of a key belongs to
/// the newest segment. Duplicates are kept.
pub struct SegmentMergeIterator<K: PrimaryKey> {
    heap: BinaryHeap<MergeEntry<K>>,
}

struct MergeEntry<K: PrimaryKey> {
    current: KeyDocRecord<K>,
    base_docid: DocId,
    iter: Box<dyn PrimaryKeyIterator<K>>,
}

impl<K: PrimaryKey> MergeEntry<K> {
    fn sort_key(&self) -> (K, DocId) {
        (self.current.key, self.base_docid)
    }
}

impl<K: PrimaryKey> PartialEq for MergeEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl<K: PrimaryKey> Eq for MergeEntry<K> {}

impl<K: PrimaryKey> PartialOrd for MergeEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PrimaryKey> Ord for MergeEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.sort_key().cmp(&self.sort_key())
    }
}

impl<K: PrimaryKey> SegmentMergeIterator<K> {
    /// Each source yields local docids of the segment starting at its base docid.
    ///
    /// An empty segment places no documents, so it may share its base docid
    /// with the segment after it. Two non-empty sources may not.
    pub fn new(sources: Vec<(Box<dyn PrimaryKeyIterator<K>>, DocId)>) -> Self {
        let mut base_docids = HashSet::with_capacity(sources.len());
        let mut heap = BinaryHeap::with_capacity(sources.len());
        for (iter, base_docid) in sources {
            if !iter.has_next() {
                continue;
            }
            assert!(
                base_docids.insert(base_docid),
                "two merge sources share base docid {}",
                base_docid
            );
            heap.push(MergeEntry {
                current: iter.current(),
                base_docid,
                iter,
            });
        }
        Self { heap }
    }

    /// Streams the persisted index `index_name` of every non-empty segment.
    pub fn open(
        directory: &dyn Directory,
        config: &PrimaryKeyIndexConfig,
        index_name: &str,
        segments: &[SegmentMeta],
    ) -> Result<Self> {
        config.check_key_type::<K>()?;
        let index_type = config.index_type();
        if !index_type.is_key_ordered() {
            return Err(DocsegError::Unsupported(format!(
                "ordered iterator over primary key index type `{}`",
                index_type
            )));
        }

        let mut sources = Vec::with_capacity(segments.len());
        for segment in segments {
            if segment.doc_count() == 0 {
                debug!(
                    "Skip empty segment `{}` in primary key merge",
                    segment.segment_id().as_str()
                );
                continue;
            }
            let index_path = segment.segment_id().index_directory().join(index_name);
            let file = directory.open_read(&index_path)?;
            let iter = create_file_iterator::<K>(index_type, file)?;
            sources.push((iter, segment.base_docid()));
        }
        Ok(Self::new(sources))
    }

    /// Streams segments that are already resident as readers.
    pub fn from_segment_readers(
        readers: &[(&dyn PrimaryKeySegmentReader<K>, DocId)],
    ) -> io::Result<Self> {
        let mut sources = Vec::with_capacity(readers.len());
        for &(reader, base_docid) in readers {
            sources.push((reader.create_iterator()?, base_docid));
        }
        Ok(Self::new(sources))
    }

    pub fn has_next(&self) -> bool {
        !self.heap.is_empty()
    }
}

impl<K: PrimaryKey> Iterator for SegmentMergeIterator<K> {
    type Item = io::Result<KeyDocRecord<K>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut entry = self.heap.pop()?;
        let pair = match entry.iter.next() {
            Ok(pair) => pair,
            Err(err) => return Some(Err(err)),
        };
        let base_docid = entry.base_docid;
        if entry.iter.has_next() {
            entry.current = entry.iter.current();
            self.heap.push(entry);
        }
        Some(Ok(pair.with_base_docid(base_docid)))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
    use tantivy_common::OwnedBytes;

    use crate::{
        index::primary_key::{
            write_block_array, write_sorted_array, KeyDocRecord, PrimaryKeyFormatter,
            PrimaryKeyHashTable, PrimaryKeyHashTableSegmentReader, PrimaryKeyIndexConfig,
            PrimaryKeyIndexType, PrimaryKeyIterator, PrimaryKeySegmentReader, PrimaryKeyWriter,
            VecPrimaryKeyIterator,
        },
        table::{SegmentId, SegmentMeta},
        Directory, DocId, DocsegError, RamDirectory,
    };

    use super::SegmentMergeIterator;

    fn source(pairs: &[(u64, DocId)], base_docid: DocId) -> (Box<dyn PrimaryKeyIterator<u64>>, DocId) {
        let pairs = pairs
            .iter()
            .map(|&(key, docid)| KeyDocRecord::new(key, docid))
            .collect();
        (Box::new(VecPrimaryKeyIterator::new(pairs)), base_docid)
    }

    fn collect(merge: SegmentMergeIterator<u64>) -> Vec<(u64, DocId)> {
        merge
            .map(|pair| pair.map(|pair| (pair.key, pair.docid)))
            .collect::<io::Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_interleaved_keys() {
        let (k1, k2, k3) = (10, 20, 30);
        let merge = SegmentMergeIterator::new(vec![
            source(&[(k1, 0), (k3, 1)], 0),
            source(&[(k2, 0)], 2),
        ]);
        assert!(merge.has_next());
        assert_eq!(collect(merge), vec![(k1, 0), (k2, 2), (k3, 1)]);
    }

    #[test]
    fn test_equal_keys_by_base_docid() {
        let k = 42;
        for sources in [
            vec![source(&[(k, 5)], 0), source(&[(k, 2)], 10)],
            vec![source(&[(k, 2)], 10), source(&[(k, 5)], 0)],
        ] {
            let merge = SegmentMergeIterator::new(sources);
            assert_eq!(collect(merge), vec![(k, 5), (k, 12)]);
        }
    }

    #[test]
    fn test_random_segments() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let segment_count = rng.random_range(1..8);
            let mut segments = vec![];
            let mut base_docid = 0;
            for _ in 0..segment_count {
                let doc_count = rng.random_range(0..50);
                let mut pairs: Vec<(u64, DocId)> = (0..doc_count)
                    .map(|docid| (rng.random_range(0..100), docid))
                    .collect();
                pairs.sort();
                segments.push((pairs, base_docid));
                base_docid += doc_count;
            }

            let mut expected: Vec<(u64, DocId, DocId)> = segments
                .iter()
                .flat_map(|(pairs, base_docid)| {
                    pairs
                        .iter()
                        .map(move |&(key, docid)| (key, *base_docid, docid + base_docid))
                })
                .collect();
            expected.sort_by_key(|&(key, base_docid, _)| (key, base_docid));
            let expected: Vec<_> = expected
                .into_iter()
                .map(|(key, _, docid)| (key, docid))
                .collect();

            let mut sources: Vec<_> = segments
                .iter()
                .map(|(pairs, base_docid)| source(pairs, *base_docid))
                .collect();
            sources.shuffle(&mut rng);
            let merged = collect(SegmentMergeIterator::new(sources));
            assert_eq!(merged, expected);
        }
    }

    #[test]
    fn test_empty() {
        let merge = SegmentMergeIterator::new(vec![source(&[], 0), source(&[], 3)]);
        assert!(!merge.has_next());
        assert!(collect(merge).is_empty());

        let merge = SegmentMergeIterator::<u64>::new(vec![]);
        assert!(!merge.has_next());
    }

    #[test]
    #[should_panic(expected = "share base docid")]
    fn test_duplicate_base_docid() {
        let _ = SegmentMergeIterator::new(vec![source(&[(1, 0)], 4), source(&[(2, 0)], 4)]);
    }

    #[test]
    fn test_empty_segment_shares_base_docid() {
        let merge = SegmentMergeIterator::new(vec![source(&[], 3), source(&[(1, 0)], 3)]);
        assert_eq!(collect(merge), vec![(1, 3)]);

        let merge = SegmentMergeIterator::new(vec![
            source(&[(4, 1)], 0),
            source(&[], 2),
            source(&[(2, 0), (9, 1)], 2),
            source(&[], 4),
        ]);
        assert_eq!(collect(merge), vec![(2, 2), (4, 1), (9, 3)]);
    }

    #[test]
    fn test_empty_building_segment_reader() {
        let config = PrimaryKeyIndexConfig::default();
        let empty = PrimaryKeyWriter::<u64>::new(&config).unwrap();
        let mut building = PrimaryKeyWriter::<u64>::new(&config).unwrap();
        building.add_hashed_key(7, 0);
        let empty = empty.segment_reader();
        let building = building.segment_reader();

        let readers = [
            (&empty as &dyn PrimaryKeySegmentReader<u64>, 5),
            (&building as &dyn PrimaryKeySegmentReader<u64>, 5),
        ];
        let merge = SegmentMergeIterator::from_segment_readers(&readers).unwrap();
        assert_eq!(collect(merge), vec![(7, 5)]);
    }

    #[test]
    fn test_open_segments() {
        let directory = RamDirectory::new();
        let index_name = "pk";

        let first = SegmentMeta::new(SegmentId::new(), 0, 3);
        let pairs = vec![
            KeyDocRecord::new(5u64, 2),
            KeyDocRecord::new(9, 0),
            KeyDocRecord::new(12, 1),
        ];
        directory
            .atomic_write(
                &first.segment_id().index_directory().join(index_name),
                &write_sorted_array(&pairs),
            )
            .unwrap();

        let empty = SegmentMeta::new(SegmentId::new(), 3, 0);

        let second = SegmentMeta::new(SegmentId::new(), 3, 2);
        let pairs = vec![KeyDocRecord::new(9u64, 1), KeyDocRecord::new(20, 0)];
        directory
            .atomic_write(
                &second.segment_id().index_directory().join(index_name),
                &write_sorted_array(&pairs),
            )
            .unwrap();

        let config = PrimaryKeyIndexConfig::default().with_index_type(PrimaryKeyIndexType::SortedArray);
        let merge =
            SegmentMergeIterator::<u64>::open(&directory, &config, index_name, &[first, empty, second])
                .unwrap();
        assert_eq!(
            collect(merge),
            vec![(5, 2), (9, 0), (9, 4), (12, 1), (20, 3)]
        );
    }

    #[test]
    fn test_open_block_array() {
        let directory = RamDirectory::new();
        let segment = SegmentMeta::new(SegmentId::new(), 100, 10);
        let pairs: Vec<_> = (0..10u64).map(|i| KeyDocRecord::new(i * 3, 9 - i as DocId)).collect();
        directory
            .atomic_write(
                &segment.segment_id().index_directory().join("pk"),
                &write_block_array(&pairs, 4),
            )
            .unwrap();
        let config = PrimaryKeyIndexConfig::default().with_index_type(PrimaryKeyIndexType::BlockArray);
        let merge = SegmentMergeIterator::<u64>::open(&directory, &config, "pk", &[segment]).unwrap();
        let expected: Vec<_> = (0..10u64).map(|i| (i * 3, 109 - i as DocId)).collect();
        assert_eq!(collect(merge), expected);
    }

    #[test]
    fn test_open_unsupported() {
        let directory = RamDirectory::new();
        let config = PrimaryKeyIndexConfig::default();
        let result = SegmentMergeIterator::<u64>::open(&directory, &config, "pk", &[]);
        assert!(matches!(result, Err(DocsegError::Unsupported(_))));

        let config = PrimaryKeyIndexConfig::default().with_index_type(PrimaryKeyIndexType::SortedArray);
        let segment = SegmentMeta::new(SegmentId::new(), 0, 1);
        let result = SegmentMergeIterator::<u64>::open(&directory, &config, "pk", &[segment]);
        assert!(matches!(result, Err(DocsegError::OpenReadError(_))));
    }

    #[test]
    fn test_from_segment_readers() {
        let pairs = vec![KeyDocRecord::new(3u64, 1), KeyDocRecord::new(8, 0)];
        let data = PrimaryKeyFormatter::new(PrimaryKeyIndexType::HashTable).format(&pairs, 2);
        let first =
            PrimaryKeyHashTableSegmentReader::new(PrimaryKeyHashTable::init_for_read(OwnedBytes::new(data)));

        let pairs = vec![KeyDocRecord::new(1u64, 0), KeyDocRecord::new(8, 1)];
        let data = PrimaryKeyFormatter::new(PrimaryKeyIndexType::HashTable).format(&pairs, 2);
        let second =
            PrimaryKeyHashTableSegmentReader::new(PrimaryKeyHashTable::init_for_read(OwnedBytes::new(data)));

        let readers = [
            (&second as &dyn PrimaryKeySegmentReader<u64>, 2),
            (&first as &dyn PrimaryKeySegmentReader<u64>, 0),
        ];
        let merge = SegmentMergeIterator::from_segment_readers(&readers).unwrap();
        assert_eq!(collect(merge), vec![(1, 2), (3, 1), (8, 0), (8, 3)]);
    }
}
