mod block_array_primary_key_iterator;
mod key_doc_record;
mod primary_key_block_array;
mod primary_key_building_segment_data;
mod primary_key_building_segment_reader;
mod primary_key_formatter;
mod primary_key_hash_table;
mod primary_key_hasher;
mod primary_key_index_config;
mod primary_key_iterator;
mod primary_key_merger;
mod primary_key_persistent_segment_reader;
mod primary_key_reader;
mod primary_key_segment_reader;
mod primary_key_serializer;
mod primary_key_sorted_array;
mod primary_key_writer;
mod segment_merge_iterator;
mod sorted_array_primary_key_iterator;
mod vec_primary_key_iterator;

pub use block_array_primary_key_iterator::BlockArrayPrimaryKeyIterator;
pub use key_doc_record::{KeyDocRecord, PrimaryKey, DOCID_SIZE};
pub use primary_key_block_array::{
    write_block_array, PrimaryKeyBlockArray, DEFAULT_BLOCK_RECORD_COUNT,
};
pub use primary_key_building_segment_data::PrimaryKeyBuildingSegmentData;
pub use primary_key_building_segment_reader::PrimaryKeyBuildingSegmentReader;
pub use primary_key_formatter::{dedup_last_wins, PrimaryKeyFormatter};
pub use primary_key_hash_table::{
    HashEntry, PrimaryKeyHashTable, PrimaryKeyHashTableWriter, HASH_TABLE_HEADER_SIZE,
};
pub use primary_key_hasher::hash_primary_key;
pub use primary_key_index_config::{
    PrimaryKeyHashType, PrimaryKeyIndexConfig, PrimaryKeyIndexType, PrimaryKeyType,
};
pub use primary_key_iterator::{create_file_iterator, PrimaryKeyFileIterator, PrimaryKeyIterator};
pub use primary_key_merger::PrimaryKeyMerger;
pub use primary_key_persistent_segment_reader::{
    PrimaryKeyBlockArraySegmentReader, PrimaryKeyHashTableSegmentReader,
    PrimaryKeySortedArraySegmentReader,
};
pub use primary_key_reader::PrimaryKeyReader;
pub use primary_key_segment_reader::{open_segment_reader, PrimaryKeySegmentReader};
pub use primary_key_serializer::PrimaryKeySerializer;
pub use primary_key_sorted_array::{write_sorted_array, PrimaryKeySortedArray};
pub use primary_key_writer::PrimaryKeyWriter;
pub use segment_merge_iterator::SegmentMergeIterator;
pub use sorted_array_primary_key_iterator::SortedArrayPrimaryKeyIterator;
pub use vec_primary_key_iterator::VecPrimaryKeyIterator;
