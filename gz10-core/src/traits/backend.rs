//! Storage backend trait
//!
//! A backend exposes the raw bytes of one shard, regardless of how they are
//! held (memory-mapped file, owned buffer, borrowed slice).

/// Trait for backends that hold shard bytes
pub trait StorageBackend {
    /// Get a slice of the underlying data
    fn as_slice(&self) -> &[u8];

    /// Get the size of the data in bytes
    ///
    /// Default implementation uses the slice length.
    fn size(&self) -> usize {
        self.as_slice().len()
    }
}

impl StorageBackend for &[u8] {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

#[cfg(any(feature = "alloc", test))]
impl StorageBackend for alloc::vec::Vec<u8> {
    fn as_slice(&self) -> &[u8] {
        self
    }
}
