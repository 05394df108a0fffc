//! Example generation
//!
//! Drives the per-shard pipeline: open a shard, index its identifiers,
//! resolve each requested id, read the row and emit `(key, record)`. Shards
//! are processed one at a time in the order supplied.

use std::{
    iter::FusedIterator,
    path::{Path, PathBuf},
};

use gz10_core::{StorageBackend, Variant};
use tracing::{debug, warn};

use crate::{
    backend::{DefaultBackend, OpenBackend},
    catalog::CatalogShard,
    error::{Error, Result},
    ids::ObjectId,
    record::Record,
    resolver::Resolver,
};

/// One emitted example: stringified object id and its record
pub type Example = (String, Record);

/// Lazily generate examples from shard files
///
/// With `object_ids`, entry `j` lists the ids to emit from `files[j]`, in
/// order. Without it every stored id of every shard is emitted in storage
/// order. Fails before yielding anything when `files` is empty or the id
/// lists do not pair up with the files.
pub fn generate_examples(
    files: Vec<PathBuf>,
    object_ids: Option<Vec<Vec<ObjectId>>>,
    variant: Variant,
) -> Result<Examples> {
    Examples::new(files, object_ids, variant)
}

/// Records of a single open shard
///
/// Owns the shard and its index; dropping it closes the shard.
pub struct ShardExamples<B: StorageBackend = DefaultBackend> {
    shard: CatalogShard<B>,
    resolver: Resolver,
    keys: std::vec::IntoIter<ObjectId>,
}

impl<B: StorageBackend> ShardExamples<B> {
    /// Index `shard` and prepare to emit `ids`, or every stored id when `None`
    pub fn new(shard: CatalogShard<B>, ids: Option<Vec<ObjectId>>) -> Result<Self> {
        let stored = shard.read_identifiers()?;
        let keys = match ids {
            Some(ids) => ids,
            None => stored.clone(),
        };
        let resolver = Resolver::from_ids(stored, shard.id_kind(), shard.path());

        Ok(Self {
            shard,
            resolver,
            keys: keys.into_iter(),
        })
    }

    pub fn path(&self) -> &Path {
        self.shard.path()
    }

    pub fn shard(&self) -> &CatalogShard<B> {
        &self.shard
    }

    fn example(&self, key: &ObjectId) -> Result<Example> {
        let row = self.resolver.resolve(key)?;
        let record = self.shard.read_record(row)?;
        Ok((record.object_id().to_string(), record))
    }
}

impl<B: StorageBackend> Iterator for ShardExamples<B> {
    type Item = Result<Example>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(self.example(&key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

/// Lazy example stream over several shards
///
/// At most one shard is open at a time. Per-shard and per-id errors are
/// yielded and generation moves on; fatal errors end the stream.
pub struct Examples<B: OpenBackend = DefaultBackend> {
    variant: Variant,
    pending: std::vec::IntoIter<(PathBuf, Option<Vec<ObjectId>>)>,
    current: Option<ShardExamples<B>>,
    finished: bool,
}

impl<B: OpenBackend> Examples<B> {
    pub fn new(
        files: Vec<PathBuf>,
        object_ids: Option<Vec<Vec<ObjectId>>>,
        variant: Variant,
    ) -> Result<Self> {
        if files.is_empty() {
            return Err(Error::Configuration("no input files".to_string()));
        }

        let pending: Vec<(PathBuf, Option<Vec<ObjectId>>)> = match object_ids {
            Some(lists) if lists.len() != files.len() => {
                return Err(Error::Configuration(format!(
                    "{} id lists supplied for {} files",
                    lists.len(),
                    files.len()
                )));
            }
            Some(lists) => files.into_iter().zip(lists.into_iter().map(Some)).collect(),
            None => files.into_iter().map(|path| (path, None)).collect(),
        };

        debug!(shards = pending.len(), variant = %variant, "generating examples");

        Ok(Self {
            variant,
            pending: pending.into_iter(),
            current: None,
            finished: false,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Path of the shard currently open, if any
    pub fn open_shard(&self) -> Option<&Path> {
        self.current.as_ref().map(ShardExamples::path)
    }

    fn open_next(&mut self) -> Option<Result<()>> {
        let (path, ids) = self.pending.next()?;
        let opened = CatalogShard::<B>::open_with(&path, self.variant)
            .and_then(|shard| ShardExamples::new(shard, ids));
        Some(opened.map(|shard| self.current = Some(shard)))
    }

    fn fail(&mut self, err: Error) -> Option<Result<Example>> {
        warn!(error = %err, "example generation error");
        if err.is_fatal() {
            self.current = None;
            self.finished = true;
        } else if err.is_shard_level() {
            // Remaining rows of a broken shard would fail the same way
            self.current = None;
        }
        Some(Err(err))
    }
}

impl<B: OpenBackend> Iterator for Examples<B> {
    type Item = Result<Example>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            if let Some(current) = self.current.as_mut() {
                match current.next() {
                    Some(Ok(example)) => return Some(Ok(example)),
                    Some(Err(err)) => return self.fail(err),
                    None => {
                        debug!(path = %current.path().display(), "finished shard");
                        self.current = None;
                    }
                }
            }

            match self.open_next() {
                Some(Ok(())) => {}
                Some(Err(err)) => return self.fail(err),
                None => {
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

impl<B: OpenBackend> FusedIterator for Examples<B> {}
