use log::{info, warn};

use crate::{
    table::{SegmentId, SegmentMeta},
    Directory, DocId, DocsegError, Result,
};

use super::{
    dedup_last_wins, open_segment_reader, PrimaryKey, PrimaryKeyFormatter, PrimaryKeyIndexConfig,
    PrimaryKeySegmentReader, SegmentMergeIterator,
};

/// Compacts the primary key index of several segments into one target segment.
pub struct PrimaryKeyMerger {
    config: PrimaryKeyIndexConfig,
    formatter: PrimaryKeyFormatter,
}

impl PrimaryKeyMerger {
    pub fn new(config: PrimaryKeyIndexConfig) -> Self {
        let formatter = PrimaryKeyFormatter::new(config.index_type());
        Self { config, formatter }
    }

    pub fn with_formatter(mut self, formatter: PrimaryKeyFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// `segments` carry base docids already assigned in the target's docid
    /// space, oldest segment first. Returns the number of unique keys written.
    pub fn merge<K: PrimaryKey>(
        &self,
        directory: &dyn Directory,
        index_name: &str,
        segments: &[SegmentMeta],
        target: &SegmentId,
    ) -> Result<usize> {
        self.config.check_key_type::<K>()?;
        let doc_count = segments
            .iter()
            .map(|segment| segment.end_docid())
            .max()
            .unwrap_or(0) as usize;

        let pairs = if self.config.index_type().is_key_ordered() {
            let merge =
                SegmentMergeIterator::<K>::open(directory, &self.config, index_name, segments)?;
            dedup_last_wins(merge)?
        } else {
            let mut readers = Vec::with_capacity(segments.len());
            for segment in segments.iter().filter(|segment| segment.doc_count() > 0) {
                let index_path = segment.segment_id().index_directory().join(index_name);
                let reader = open_segment_reader::<K>(directory, &self.config, &index_path)?;
                if let Some(index_doc_count) = reader.doc_count() {
                    if index_doc_count != segment.doc_count() {
                        warn!(
                            "Segment `{}` has {} docs but its primary key index records {}",
                            segment.segment_id().as_str(),
                            segment.doc_count(),
                            index_doc_count
                        );
                    }
                }
                readers.push((reader, segment.base_docid()));
            }
            let readers: Vec<(&dyn PrimaryKeySegmentReader<K>, DocId)> = readers
                .iter()
                .map(|(reader, base_docid)| (&**reader, *base_docid))
                .collect();
            dedup_last_wins(SegmentMergeIterator::from_segment_readers(&readers)?)?
        };

        if let Some(pair) = pairs
            .iter()
            .find(|pair| pair.docid < 0 || pair.docid as usize >= doc_count)
        {
            return Err(DocsegError::DataCorrupted(format!(
                "merged primary key docid {} outside target doc count {}",
                pair.docid, doc_count
            )));
        }

        let data = self.formatter.format(&pairs, doc_count);
        let index_path = target.index_directory().join(index_name);
        directory.atomic_write(&index_path, &data)?;
        info!(
            "Merged primary key index `{}` of {} segments into `{}`: {} keys, {} docs",
            index_name,
            segments.len(),
            target.as_str(),
            pairs.len(),
            doc_count
        );
        Ok(pairs.len())
    }
}
