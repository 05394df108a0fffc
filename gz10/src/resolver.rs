//! Identifier resolver
//!
//! Maps requested object ids to storage rows of one shard through a
//! [`SortIndex`] built from the shard's identifier column.

use std::path::{Path, PathBuf};

use gz10_core::{SortIndex, StorageBackend};
use tracing::debug;

use crate::{
    catalog::CatalogShard,
    error::{Error, Result},
    ids::{IdKind, ObjectId},
};

/// Sorted identifier index of one shard
#[derive(Debug, Clone)]
pub struct Resolver {
    index: SortIndex<ObjectId>,
    kind: IdKind,
    path: PathBuf,
}

impl Resolver {
    /// Build the index from a shard's identifier column
    pub fn build<B: StorageBackend>(shard: &CatalogShard<B>) -> Result<Self> {
        let ids = shard.read_identifiers()?;
        Ok(Self::from_ids(ids, shard.id_kind(), shard.path()))
    }

    /// Build the index from identifiers in storage order
    pub fn from_ids(ids: Vec<ObjectId>, kind: IdKind, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let index = SortIndex::build(ids);
        debug!(path = %path.display(), ids = index.len(), "built identifier index");
        Self { index, kind, path }
    }

    /// Row holding `key`
    ///
    /// Keys are first converted to the column's storage kind. With duplicate
    /// ids the lowest row wins.
    pub fn resolve(&self, key: &ObjectId) -> Result<usize> {
        key.coerce(self.kind)
            .and_then(|key| self.index.position(&key))
            .ok_or_else(|| Error::NotFound {
                key: key.to_string(),
                path: self.path.clone(),
            })
    }

    pub fn contains(&self, key: &ObjectId) -> bool {
        self.resolve(key).is_ok()
    }

    /// Number of indexed identifiers, duplicates included
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn kind(&self) -> IdKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Resolver {
        Resolver::from_ids(
            values.iter().copied().map(ObjectId::Int).collect(),
            IdKind::Int,
            "shard.gzs",
        )
    }

    #[test]
    fn test_resolves_every_stored_id() {
        let ids = [42, -7, 1000, 3, 0];
        let resolver = ints(&ids);
        for (row, &id) in ids.iter().enumerate() {
            assert_eq!(resolver.resolve(&ObjectId::Int(id)).unwrap(), row);
        }
    }

    #[test]
    fn test_absent_id_is_not_found() {
        let resolver = ints(&[10, 20, 30]);
        match resolver.resolve(&ObjectId::Int(25)) {
            Err(Error::NotFound { key, path }) => {
                assert_eq!(key, "25");
                assert_eq!(path, PathBuf::from("shard.gzs"));
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(!resolver.contains(&ObjectId::Int(31)));
    }

    #[test]
    fn test_duplicates_resolve_to_lowest_row() {
        let resolver = ints(&[5, 1, 3, 1]);
        for _ in 0..3 {
            assert_eq!(resolver.resolve(&ObjectId::Int(1)).unwrap(), 1);
        }
        assert_eq!(resolver.len(), 4);
    }

    #[test]
    fn test_keys_are_coerced_to_column_kind() {
        let resolver = ints(&[10, 20, 30]);
        assert_eq!(resolver.resolve(&ObjectId::from("20")).unwrap(), 1);
        assert_eq!(resolver.resolve(&ObjectId::UInt(30)).unwrap(), 2);
        assert!(resolver.resolve(&ObjectId::from("twenty")).is_err());

        let text = Resolver::from_ids(
            vec![ObjectId::from("b"), ObjectId::from("a")],
            IdKind::Text,
            "text.gzs",
        );
        assert_eq!(text.resolve(&ObjectId::from("a")).unwrap(), 1);
    }

    #[test]
    fn test_empty_index() {
        let resolver = ints(&[]);
        assert!(resolver.is_empty());
        assert!(resolver.resolve(&ObjectId::Int(0)).is_err());
    }
}
