use std::io;

use tantivy_common::{file_slice::FileSlice, OwnedBytes};

use super::{
    KeyDocRecord, PrimaryKey, PrimaryKeyBlockArray, PrimaryKeyFileIterator, PrimaryKeyIterator,
};

/// Streams a block array one block at a time.
pub struct BlockArrayPrimaryKeyIterator<K> {
    array: Option<PrimaryKeyBlockArray<K>>,
    block: OwnedBytes,
    block_idx: usize,
    cursor: usize,
    current: Option<KeyDocRecord<K>>,
}

impl<K> Default for BlockArrayPrimaryKeyIterator<K> {
    fn default() -> Self {
        Self {
            array: None,
            block: OwnedBytes::empty(),
            block_idx: 0,
            cursor: 0,
            current: None,
        }
    }
}

impl<K: PrimaryKey> BlockArrayPrimaryKeyIterator<K> {
    pub fn new(array: PrimaryKeyBlockArray<K>) -> io::Result<Self> {
        let mut iter = Self::default();
        iter.reset(array)?;
        Ok(iter)
    }

    fn reset(&mut self, array: PrimaryKeyBlockArray<K>) -> io::Result<()> {
        self.block_idx = 0;
        self.cursor = 0;
        self.current = None;
        if array.block_count() > 0 {
            self.block = array.read_block(0)?;
            self.current = Some(self.record_at_cursor());
        }
        self.array = Some(array);
        Ok(())
    }

    fn record_at_cursor(&self) -> KeyDocRecord<K> {
        let record_size = KeyDocRecord::<K>::SIZE;
        let start = self.cursor * record_size;
        KeyDocRecord::read_from(&self.block.as_slice()[start..start + record_size])
    }

    fn advance(&mut self) -> io::Result<()> {
        self.cursor += 1;
        if self.cursor * KeyDocRecord::<K>::SIZE >= self.block.len() {
            let Some(array) = self.array.as_ref() else {
                self.current = None;
                return Ok(());
            };
            self.block_idx += 1;
            self.cursor = 0;
            if self.block_idx >= array.block_count() {
                self.current = None;
                return Ok(());
            }
            self.block = array.read_block(self.block_idx)?;
        }
        self.current = Some(self.record_at_cursor());
        Ok(())
    }
}

impl<K: PrimaryKey> PrimaryKeyIterator<K> for BlockArrayPrimaryKeyIterator<K> {
    fn has_next(&self) -> bool {
        self.current.is_some()
    }

    fn current(&self) -> KeyDocRecord<K> {
        self.current.expect("block array iterator is exhausted")
    }

    fn next(&mut self) -> io::Result<KeyDocRecord<K>> {
        let pair = self.current();
        self.advance()?;
        Ok(pair)
    }
}

impl<K: PrimaryKey> PrimaryKeyFileIterator<K> for BlockArrayPrimaryKeyIterator<K> {
    fn init(&mut self, file: FileSlice) -> io::Result<()> {
        let array = PrimaryKeyBlockArray::open(file)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.reset(array)
    }
}
