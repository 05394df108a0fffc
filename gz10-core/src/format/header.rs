//! Shard container header
//!
//! Every shard starts with a fixed 64 byte header describing the row count
//! and where the column directory lives.

use core::mem::size_of;

use super::{column::ColumnDescriptor, constants::MAX_COLUMN_COUNT, le_u32, le_u64};
use crate::{FormatError, Result};

/// Fixed-size header for shard files
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShardHeader {
    /// Magic bytes: "GZ10"
    pub magic: [u8; 4],
    /// Format version
    pub version: u8,
    /// Padding for alignment
    pub _padding: [u8; 3],
    /// Number of entries in the column directory
    pub column_count: u32,
    /// Padding for alignment
    pub _padding2: u32,
    /// Number of rows shared by every column
    pub nrows: u64,
    /// Offset to the column directory from file start
    pub directory_offset: u64,
    /// Size of the column directory in bytes
    pub directory_size: u64,
    /// Reserved space for future extensions
    pub reserved: [u8; 24],
}

impl ShardHeader {
    /// Magic bytes for shard files
    pub const MAGIC: [u8; 4] = *b"GZ10";

    /// Current format version
    pub const VERSION: u8 = 1;

    /// Size of the header in bytes
    pub const SIZE: usize = size_of::<Self>();

    /// Create a new header with default values
    pub const fn new() -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            _padding: [0; 3],
            column_count: 0,
            _padding2: 0,
            nrows: 0,
            directory_offset: 0,
            directory_size: 0,
            reserved: [0; 24],
        }
    }

    /// Validate the header magic and version
    pub fn is_valid(&self) -> bool {
        self.magic == Self::MAGIC && self.version <= Self::VERSION
    }

    /// Offset and size of the column directory
    pub fn directory_region(&self) -> (u64, u64) {
        (self.directory_offset, self.directory_size)
    }

    /// Parse and validate a header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::InsufficientBuffer);
        }

        if bytes[0..4] != Self::MAGIC {
            return Err(FormatError::InvalidHeader);
        }

        let version = bytes[4];
        if version > Self::VERSION {
            return Err(FormatError::UnsupportedFormat);
        }

        let mut header = Self::new();
        header.version = version;
        header.column_count = le_u32(bytes, 8)?;
        header.nrows = le_u64(bytes, 16)?;
        header.directory_offset = le_u64(bytes, 24)?;
        header.directory_size = le_u64(bytes, 32)?;
        header.reserved.copy_from_slice(&bytes[40..64]);

        if header.column_count > MAX_COLUMN_COUNT {
            return Err(FormatError::TooManyColumns);
        }

        // The directory sits after the header and holds exactly column_count entries
        let expected_size = (header.column_count as u64)
            .checked_mul(ColumnDescriptor::SIZE as u64)
            .ok_or(FormatError::ArraySizeOverflow)?;
        if header.directory_size != expected_size {
            return Err(FormatError::CorruptedData);
        }
        if header.column_count > 0 && header.directory_offset < Self::SIZE as u64 {
            return Err(FormatError::InvalidHeader);
        }

        Ok(header)
    }

    /// Convert header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        // padding bytes remain zero
        bytes[8..12].copy_from_slice(&self.column_count.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.nrows.to_le_bytes());
        bytes[24..32].copy_from_slice(&self.directory_offset.to_le_bytes());
        bytes[32..40].copy_from_slice(&self.directory_size.to_le_bytes());
        bytes[40..64].copy_from_slice(&self.reserved);
        bytes
    }
}

impl Default for ShardHeader {
    fn default() -> Self {
        Self::new()
    }
}
