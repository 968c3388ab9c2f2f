mod segment_id;
mod segment_meta;

pub use segment_id::SegmentId;
pub use segment_meta::{SegmentMeta, SegmentMetaData};
