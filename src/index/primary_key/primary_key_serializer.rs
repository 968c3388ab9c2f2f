use std::path::Path;

use log::info;

use crate::{Directory, DocsegError, Result};

use super::{
    dedup_last_wins, PrimaryKey, PrimaryKeyBuildingSegmentData, PrimaryKeyFormatter,
    PrimaryKeyIndexConfig,
};

pub struct PrimaryKeySerializer {
    formatter: PrimaryKeyFormatter,
}

impl PrimaryKeySerializer {
    pub fn new(config: &PrimaryKeyIndexConfig) -> Self {
        Self {
            formatter: PrimaryKeyFormatter::new(config.index_type()),
        }
    }

    pub fn with_formatter(formatter: PrimaryKeyFormatter) -> Self {
        Self { formatter }
    }

    /// Writes the building segment's keys to `index_path`, returning the
    /// number of unique keys written.
    pub fn serialize<K: PrimaryKey>(
        &self,
        index_data: &PrimaryKeyBuildingSegmentData<K>,
        doc_count: usize,
        directory: &dyn Directory,
        index_path: &Path,
    ) -> Result<usize> {
        let pairs = dedup_last_wins(index_data.sorted_pairs().into_iter().map(Ok))?;
        if let Some(pair) = pairs.iter().find(|pair| pair.docid as usize >= doc_count) {
            return Err(DocsegError::InvalidArgument(format!(
                "primary key docid {} out of segment doc count {}",
                pair.docid, doc_count
            )));
        }

        let data = self.formatter.format(&pairs, doc_count);
        directory.atomic_write(index_path, &data)?;
        info!(
            "Serialized primary key index `{}` as {}: {} keys, {} docs, {} bytes",
            index_path.display(),
            self.formatter.index_type(),
            pairs.len(),
            doc_count,
            data.len()
        );
        Ok(pairs.len())
    }
}
