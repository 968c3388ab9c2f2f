use std::io;

use log::debug;

use crate::{table::SegmentMeta, Directory, DocId, Result};

use super::{
    hash_primary_key, open_segment_reader, PrimaryKey, PrimaryKeyHashType, PrimaryKeyIndexConfig,
    PrimaryKeySegmentReader,
};

/// Answers primary key lookups across segments in the global docid space.
pub struct PrimaryKeyReader<K: PrimaryKey> {
    hash_type: PrimaryKeyHashType,
    segments: Vec<(DocId, Box<dyn PrimaryKeySegmentReader<K>>)>,
}

impl<K: PrimaryKey> PrimaryKeyReader<K> {
    pub fn new(hash_type: PrimaryKeyHashType) -> Self {
        Self {
            hash_type,
            segments: vec![],
        }
    }

    /// Opens the persisted index `index_name` of `segments`, oldest first.
    pub fn open(
        directory: &dyn Directory,
        config: &PrimaryKeyIndexConfig,
        index_name: &str,
        segments: &[SegmentMeta],
    ) -> Result<Self> {
        config.check_key_type::<K>()?;
        let mut reader = Self::new(config.hash_type());
        for segment in segments {
            if segment.doc_count() == 0 {
                debug!(
                    "Skip empty segment `{}` in primary key reader",
                    segment.segment_id().as_str()
                );
                continue;
            }
            let index_path = segment.segment_id().index_directory().join(index_name);
            let segment_reader = open_segment_reader(directory, config, &index_path)?;
            reader.add_segment(segment.base_docid(), segment_reader);
        }
        Ok(reader)
    }

    /// Segments must be added oldest first.
    pub fn add_segment(&mut self, base_docid: DocId, reader: Box<dyn PrimaryKeySegmentReader<K>>) {
        self.segments.push((base_docid, reader));
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn get(&self, key: K) -> io::Result<Option<DocId>> {
        for (base_docid, segment) in self.segments.iter().rev() {
            if let Some(docid) = segment.lookup(key)? {
                return Ok(Some(base_docid + docid));
            }
        }
        Ok(None)
    }

    pub fn lookup(&self, key: &str) -> Result<Option<DocId>> {
        let hashkey = hash_primary_key(key, self.hash_type)?;
        Ok(self.get(hashkey)?)
    }
}
