pub mod directory;
pub mod error;
pub mod index;
pub mod table;
pub mod util;

pub use directory::{Directory, FsDirectory, RamDirectory};
pub use error::{DocsegError, Result};

pub type DocId = i32;

/// Marks "no document": an empty bucket, the end of a chain, or a failed lookup.
pub const INVALID_DOCID: DocId = -1;
