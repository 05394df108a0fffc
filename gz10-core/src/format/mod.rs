//! Binary format definitions for GZ10 shard containers
//!
//! This module contains pure data structure definitions for the shard wire
//! format. No I/O operations - only layout, encoding and decoding.

pub mod column;
pub mod constants;
pub mod data_type;
pub mod header;

pub use column::ColumnDescriptor;
pub use data_type::DataType;
pub use header::ShardHeader;

use crate::{FormatError, Result};

/// Read a little-endian u16 at `at`
pub(crate) fn le_u16(bytes: &[u8], at: usize) -> Result<u16> {
    let raw = bytes.get(at..at + 2).ok_or(FormatError::InsufficientBuffer)?;
    Ok(u16::from_le_bytes([raw[0], raw[1]]))
}

/// Read a little-endian u32 at `at`
pub(crate) fn le_u32(bytes: &[u8], at: usize) -> Result<u32> {
    let raw = bytes.get(at..at + 4).ok_or(FormatError::InsufficientBuffer)?;
    Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Read a little-endian u64 at `at`
pub(crate) fn le_u64(bytes: &[u8], at: usize) -> Result<u64> {
    let raw = bytes.get(at..at + 8).ok_or(FormatError::InsufficientBuffer)?;
    Ok(u64::from_le_bytes([
        raw[0], raw[1], raw[2], raw[3], raw[4], raw[5], raw[6], raw[7],
    ]))
}
