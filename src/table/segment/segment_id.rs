use std::path::PathBuf;

use uuid::Uuid;

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct SegmentId(String);

impl SegmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `segments/<id>`, relative to the directory root.
    pub fn segment_directory(&self) -> PathBuf {
        PathBuf::from("segments").join(&self.0)
    }

    /// Holds one file per index of the segment, named after the index.
    pub fn index_directory(&self) -> PathBuf {
        self.segment_directory().join("index")
    }

    pub fn meta_path(&self) -> PathBuf {
        self.segment_directory().join("meta.json")
    }
}

impl From<String> for SegmentId {
    fn from(value: String) -> Self {
        SegmentId(value)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::SegmentId;

    #[test]
    fn test_paths() {
        let segment_id = SegmentId::from("abc".to_string());
        assert_eq!(segment_id.as_str(), "abc");
        assert_eq!(segment_id.segment_directory(), Path::new("segments/abc"));
        assert_eq!(segment_id.index_directory(), Path::new("segments/abc/index"));
        assert_eq!(segment_id.meta_path(), Path::new("segments/abc/meta.json"));
    }

    #[test]
    fn test_new_is_unique() {
        let a = SegmentId::new();
        let b = SegmentId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }
}
