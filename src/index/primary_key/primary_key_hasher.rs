use crate::{DocsegError, Result};

use super::{PrimaryKey, PrimaryKeyHashType};

/// Turns the textual primary key of a document into its fixed-width key.
pub fn hash_primary_key<K: PrimaryKey>(key: &str, hash_type: PrimaryKeyHashType) -> Result<K> {
    match hash_type {
        PrimaryKeyHashType::Default => Ok(K::hash_bytes(key.as_bytes())),
        PrimaryKeyHashType::Number => K::parse_number(key).ok_or_else(|| {
            DocsegError::InvalidArgument(format!("primary key `{}` is not a number", key))
        }),
    }
}
