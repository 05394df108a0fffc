//! Storage backends for shard files
//!
//! A backend owns the bytes of one open shard. Dropping it releases the
//! mapping or buffer, and with it every resource tied to the shard file.

#[cfg(feature = "mmap")]
use std::fs::File;
use std::path::Path;

use gz10_core::StorageBackend;
#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};

/// Backends that can be opened from a file path
pub trait OpenBackend: StorageBackend + Sized {
    fn open(path: &Path) -> std::io::Result<Self>;
}

/// Read-only memory mapping of a shard file
///
/// The file descriptor is closed right after mapping; the mapping itself
/// lives until the backend is dropped.
#[cfg(feature = "mmap")]
pub struct MmapBackend {
    mmap: Mmap,
}

#[cfg(feature = "mmap")]
impl OpenBackend for MmapBackend {
    fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;

        // SAFETY: read-only mapping; shards are immutable while the catalog is
        // being read and every access is bounds-checked against the map length
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        Ok(Self { mmap })
    }
}

#[cfg(feature = "mmap")]
impl StorageBackend for MmapBackend {
    fn as_slice(&self) -> &[u8] {
        &self.mmap
    }
}

/// Shard bytes read fully into memory
#[derive(Debug, Clone)]
pub struct BufferBackend {
    data: Vec<u8>,
}

impl BufferBackend {
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl OpenBackend for BufferBackend {
    fn open(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self { data })
    }
}

impl StorageBackend for BufferBackend {
    fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Backend used by [`crate::CatalogShard::open`]
#[cfg(feature = "mmap")]
pub type DefaultBackend = MmapBackend;

/// Backend used by [`crate::CatalogShard::open`]
#[cfg(not(feature = "mmap"))]
pub type DefaultBackend = BufferBackend;
