use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DocsegError, Result};

use super::PrimaryKey;

/// On-disk representation of a segment's primary key index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryKeyIndexType {
    #[default]
    HashTable,
    SortedArray,
    BlockArray,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryKeyType {
    #[default]
    Uint64,
    Uint128,
}

/// How a textual primary key is turned into a fixed-width key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryKeyHashType {
    /// xxh3 of the key bytes.
    #[default]
    Default,
    /// The key is an unsigned decimal number and is used as is.
    Number,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryKeyIndexConfig {
    index_type: PrimaryKeyIndexType,
    key_type: PrimaryKeyType,
    hash_type: PrimaryKeyHashType,
}

impl PrimaryKeyIndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HashTable => "hash_table",
            Self::SortedArray => "sorted_array",
            Self::BlockArray => "block_array",
        }
    }

    /// Whether the persisted file lists its pairs in ascending key order.
    pub fn is_key_ordered(&self) -> bool {
        !matches!(self, Self::HashTable)
    }
}

impl fmt::Display for PrimaryKeyIndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PrimaryKeyIndexConfig {
    pub fn new(
        index_type: PrimaryKeyIndexType,
        key_type: PrimaryKeyType,
        hash_type: PrimaryKeyHashType,
    ) -> Self {
        Self {
            index_type,
            key_type,
            hash_type,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn index_type(&self) -> PrimaryKeyIndexType {
        self.index_type
    }

    pub fn key_type(&self) -> PrimaryKeyType {
        self.key_type
    }

    pub fn hash_type(&self) -> PrimaryKeyHashType {
        self.hash_type
    }

    pub fn with_index_type(mut self, index_type: PrimaryKeyIndexType) -> Self {
        self.index_type = index_type;
        self
    }

    pub fn with_key_type(mut self, key_type: PrimaryKeyType) -> Self {
        self.key_type = key_type;
        self
    }

    pub fn with_hash_type(mut self, hash_type: PrimaryKeyHashType) -> Self {
        self.hash_type = hash_type;
        self
    }

    /// Fails when the index is configured for a different key width than `K`.
    pub fn check_key_type<K: PrimaryKey>(&self) -> Result<()> {
        if self.key_type == K::KEY_TYPE {
            Ok(())
        } else {
            Err(DocsegError::Unsupported(format!(
                "primary key index configured with key type {:?}, accessed as {:?}",
                self.key_type,
                K::KEY_TYPE
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::DocsegError;

    use super::{PrimaryKeyHashType, PrimaryKeyIndexConfig, PrimaryKeyIndexType, PrimaryKeyType};

    #[test]
    fn test_from_json() {
        let config = PrimaryKeyIndexConfig::from_json(
            r#"{"index_type": "block_array", "key_type": "uint128", "hash_type": "number"}"#,
        )
        .unwrap();
        assert_eq!(config.index_type(), PrimaryKeyIndexType::BlockArray);
        assert_eq!(config.key_type(), PrimaryKeyType::Uint128);
        assert_eq!(config.hash_type(), PrimaryKeyHashType::Number);

        let config = PrimaryKeyIndexConfig::from_json("{}").unwrap();
        assert_eq!(config, PrimaryKeyIndexConfig::default());
        assert_eq!(config.index_type(), PrimaryKeyIndexType::HashTable);
    }

    #[test]
    fn test_unknown_index_type() {
        let result = PrimaryKeyIndexConfig::from_json(r#"{"index_type": "trie"}"#);
        assert!(matches!(result, Err(DocsegError::DataCorrupted(_))));
    }

    #[test]
    fn test_check_key_type() {
        let config = PrimaryKeyIndexConfig::default();
        assert!(config.check_key_type::<u64>().is_ok());
        assert!(matches!(
            config.check_key_type::<u128>(),
            Err(DocsegError::Unsupported(_))
        ));
    }

    #[test]
    fn test_is_key_ordered() {
        assert!(!PrimaryKeyIndexType::HashTable.is_key_ordered());
        assert!(PrimaryKeyIndexType::SortedArray.is_key_ordered());
        assert!(PrimaryKeyIndexType::BlockArray.is_key_ordered());
        assert_eq!(PrimaryKeyIndexType::SortedArray.to_string(), "sorted_array");
    }

    #[test]
    fn test_serialize_snake_case() {
        let config = PrimaryKeyIndexConfig::new(
            PrimaryKeyIndexType::SortedArray,
            PrimaryKeyType::Uint128,
            PrimaryKeyHashType::Default,
        );
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"index_type":"sorted_array","key_type":"uint128","hash_type":"default"}"#
        );
        assert_eq!(PrimaryKeyIndexConfig::from_json(&json).unwrap(), config);

        let config = PrimaryKeyIndexConfig::default();
        assert_eq!(config.key_type(), PrimaryKeyType::Uint64);
        assert_eq!(config.hash_type(), PrimaryKeyHashType::Default);
    }
}
