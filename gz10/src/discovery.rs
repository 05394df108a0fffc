//! Shard discovery
//!
//! Shards live under `healpix=<n>/` partition directories. Data file
//! patterns are globbed relative to a data directory and grouped by split.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use gz10_core::parse_healpix_bucket;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Default data file pattern, relative to the data directory
pub const DEFAULT_PATTERN: &str = "datafiles/healpix=*/*.gzs";

/// Split used when none is named
pub const DEFAULT_SPLIT: &str = "train";

/// A discovered shard file and its spatial partition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ShardPath {
    pub path: PathBuf,
    pub healpix: Option<u32>,
}

impl ShardPath {
    pub fn new(path: PathBuf) -> Self {
        let healpix = healpix_bucket(&path);
        Self { path, healpix }
    }
}

/// Healpix bucket of the innermost `healpix=<n>` directory of `path`
pub fn healpix_bucket(path: &Path) -> Option<u32> {
    path.parent()?
        .components()
        .rev()
        .filter_map(|component| component.as_os_str().to_str())
        .find_map(|name| parse_healpix_bucket(name).ok())
}

/// Resolve glob patterns relative to `root`
///
/// Results are sorted by path and deduplicated across patterns. A pattern
/// that matches nothing is not an error.
pub fn discover_shards<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Vec<ShardPath>> {
    let root = root.to_str().ok_or_else(|| {
        Error::Configuration(format!("data directory {} is not UTF-8", root.display()))
    })?;
    let root = glob::Pattern::escape(root);

    let mut paths = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let full = if root.is_empty() {
            pattern.to_string()
        } else {
            format!("{}/{}", root.trim_end_matches('/'), pattern)
        };

        let matches = glob::glob(&full)
            .map_err(|err| Error::Configuration(format!("invalid pattern '{pattern}': {err}")))?;
        for entry in matches {
            let path = entry.map_err(|err| {
                let path = err.path().to_path_buf();
                Error::Io {
                    path,
                    source: err.into(),
                }
            })?;
            if path.is_file() {
                paths.push(path);
            }
        }
    }

    paths.sort();
    paths.dedup();
    debug!(root = %root, shards = paths.len(), "discovered shards");

    Ok(paths.into_iter().map(ShardPath::new).collect())
}

/// Data file patterns per split
///
/// Deserializes from a map of split name to either one pattern or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataFiles(BTreeMap<String, Vec<String>>);

#[derive(Deserialize)]
#[serde(untagged)]
enum Patterns {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for DataFiles {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, Patterns>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(split, patterns)| match patterns {
                    Patterns::One(pattern) => (split, vec![pattern]),
                    Patterns::Many(patterns) => (split, patterns),
                })
                .collect(),
        ))
    }
}

impl Default for DataFiles {
    fn default() -> Self {
        Self::single(DEFAULT_SPLIT, DEFAULT_PATTERN)
    }
}

impl DataFiles {
    /// No splits configured
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// One split with one pattern
    pub fn single(split: impl Into<String>, pattern: impl Into<String>) -> Self {
        let mut files = Self::empty();
        files.insert(split, pattern);
        files
    }

    /// Append a pattern to a split, creating the split if needed
    pub fn insert(&mut self, split: impl Into<String>, pattern: impl Into<String>) {
        self.0.entry(split.into()).or_default().push(pattern.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn splits(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.0
            .iter()
            .map(|(name, patterns)| (name.as_str(), patterns.as_slice()))
    }

    /// Resolve every split's patterns under `root`
    pub fn split_generators(&self, root: &Path) -> Result<Vec<SplitGenerator>> {
        if self.is_empty() {
            return Err(Error::Configuration(
                "at least one data file must be specified".to_string(),
            ));
        }

        self.splits()
            .map(|(name, patterns)| {
                let files = discover_shards(root, patterns)?
                    .into_iter()
                    .map(|shard| shard.path)
                    .collect();
                Ok(SplitGenerator {
                    name: name.to_string(),
                    files,
                })
            })
            .collect()
    }
}

/// Files that make up one split
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitGenerator {
    pub name: String,
    pub files: Vec<PathBuf>,
}
