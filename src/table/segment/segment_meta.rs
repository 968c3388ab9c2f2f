use serde::{Deserialize, Serialize};

use crate::{Directory, DocId, Result};

use super::SegmentId;

/// What a segment persists about itself, stored as JSON next to its indexes.
#[derive(Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMetaData {
    doc_count: usize,
}

/// A segment placed in a docid space starting at `base_docid`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentMeta {
    segment_id: SegmentId,
    base_docid: DocId,
    doc_count: usize,
}

impl SegmentMetaData {
    pub fn new(doc_count: usize) -> Self {
        Self { doc_count }
    }

    pub fn load(directory: &dyn Directory, segment_id: &SegmentId) -> Result<Self> {
        let json_data = directory.atomic_read(&segment_id.meta_path())?;
        Ok(serde_json::from_slice(&json_data)?)
    }

    pub fn save(&self, directory: &dyn Directory, segment_id: &SegmentId) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        directory.atomic_write(&segment_id.meta_path(), json.as_bytes())?;
        Ok(())
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }
}

impl SegmentMeta {
    pub fn new(segment_id: SegmentId, base_docid: DocId, doc_count: usize) -> Self {
        Self {
            segment_id,
            base_docid,
            doc_count,
        }
    }

    /// Loads the persisted meta data of `segment_id` and places the segment at `base_docid`.
    pub fn open(
        directory: &dyn Directory,
        segment_id: SegmentId,
        base_docid: DocId,
    ) -> Result<Self> {
        let meta_data = SegmentMetaData::load(directory, &segment_id)?;
        Ok(Self::new(segment_id, base_docid, meta_data.doc_count()))
    }

    pub fn segment_id(&self) -> &SegmentId {
        &self.segment_id
    }

    pub fn base_docid(&self) -> DocId {
        self.base_docid
    }

    pub fn set_base_docid(&mut self, base_docid: DocId) {
        self.base_docid = base_docid;
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    pub fn end_docid(&self) -> DocId {
        self.base_docid + (self.doc_count as DocId)
    }

    pub fn inner_docid(&self, docid: DocId) -> DocId {
        assert!(docid >= self.base_docid && docid < self.end_docid());
        docid - self.base_docid
    }
}
