mod segment;

pub use segment::{SegmentId, SegmentMeta, SegmentMetaData};
