//! Column directory entries
//!
//! The directory following the header holds one fixed 80 byte descriptor per
//! named column. Names may contain `/` to express a group path.

use core::mem::size_of;

use super::{
    constants::{ALIGNMENT_BOUNDARY, MAX_NAME_LEN, MAX_RANK},
    data_type::DataType,
    le_u16, le_u32, le_u64,
};
use crate::{
    validation::{validate_column_name, validate_offset_alignment, validate_region},
    FormatError, Result,
};

/// Fixed-size column descriptor (80 bytes, 8-byte aligned)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDescriptor {
    /// UTF-8 column name, NUL padded
    pub name: [u8; MAX_NAME_LEN],
    /// Element data type (see [`DataType`])
    pub data_type: u8,
    /// Number of used entries in `shape`
    pub rank: u8,
    /// Width of one fixed string, byte string columns only
    pub item_width: u16,
    /// Per-row shape, unused trailing entries are zero
    pub shape: [u32; MAX_RANK],
    /// Padding for alignment
    pub _padding: [u8; 4],
    /// Offset to the column data from file start
    pub offset: u64,
    /// Size of the column data in bytes
    pub size: u64,
    /// Reserved space for future extensions
    pub reserved: [u8; 8],
}

impl ColumnDescriptor {
    /// Size of a descriptor in bytes
    pub const SIZE: usize = size_of::<Self>();

    /// Create a descriptor with an empty data region
    pub fn new(name: &str, data_type: DataType, shape: &[u32], item_width: u16) -> Result<Self> {
        validate_column_name(name)?;
        if shape.len() > MAX_RANK || shape.contains(&0) {
            return Err(FormatError::InvalidColumn);
        }
        if (data_type == DataType::Bytes) != (item_width > 0) {
            return Err(FormatError::InvalidColumn);
        }

        let mut descriptor = Self {
            name: [0; MAX_NAME_LEN],
            data_type: data_type.to_u8(),
            rank: shape.len() as u8,
            item_width,
            shape: [0; MAX_RANK],
            _padding: [0; 4],
            offset: 0,
            size: 0,
            reserved: [0; 8],
        };
        descriptor.name[..name.len()].copy_from_slice(name.as_bytes());
        descriptor.shape[..shape.len()].copy_from_slice(shape);
        Ok(descriptor)
    }

    /// Column name without NUL padding
    pub fn name(&self) -> Result<&str> {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(MAX_NAME_LEN);
        core::str::from_utf8(&self.name[..end]).map_err(|_| FormatError::InvalidName)
    }

    /// Decoded element data type
    pub fn data_type(&self) -> Result<DataType> {
        DataType::from_u8(self.data_type).ok_or(FormatError::UnsupportedDataType)
    }

    /// Per-row shape (empty for scalar columns)
    pub fn shape(&self) -> &[u32] {
        &self.shape[..(self.rank as usize).min(MAX_RANK)]
    }

    /// Number of elements stored per row
    pub fn elements_per_row(&self) -> Result<u64> {
        self.shape().iter().try_fold(1u64, |acc, &dim| {
            acc.checked_mul(dim as u64)
                .ok_or(FormatError::ArraySizeOverflow)
        })
    }

    /// Number of bytes stored per row
    pub fn row_width(&self) -> Result<u64> {
        let element_width = match self.data_type()? {
            DataType::Bytes => self.item_width as u64,
            other => other.size_bytes() as u64,
        };
        self.elements_per_row()?
            .checked_mul(element_width)
            .ok_or(FormatError::ArraySizeOverflow)
    }

    /// Expected data size for `nrows` rows
    pub fn expected_size(&self, nrows: u64) -> Result<u64> {
        self.row_width()?
            .checked_mul(nrows)
            .ok_or(FormatError::ArraySizeOverflow)
    }

    /// Offset and size of the column data
    pub fn region(&self) -> (u64, u64) {
        (self.offset, self.size)
    }

    /// Check the descriptor against the shard row count and file length
    pub fn validate(&self, nrows: u64, total_len: usize) -> Result<()> {
        self.name()?;
        if self.rank as usize > MAX_RANK {
            return Err(FormatError::InvalidColumn);
        }
        if self.size != self.expected_size(nrows)? {
            return Err(FormatError::RowCountMismatch);
        }
        let offset = usize::try_from(self.offset).map_err(|_| FormatError::ArraySizeOverflow)?;
        let size = usize::try_from(self.size).map_err(|_| FormatError::ArraySizeOverflow)?;
        validate_offset_alignment(offset, ALIGNMENT_BOUNDARY)?;
        validate_region(offset, size, total_len)
    }

    /// Parse a descriptor from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::InsufficientBuffer);
        }

        let mut name = [0u8; MAX_NAME_LEN];
        name.copy_from_slice(&bytes[0..MAX_NAME_LEN]);

        let mut shape = [0u32; MAX_RANK];
        for (i, dim) in shape.iter_mut().enumerate() {
            *dim = le_u32(bytes, 36 + i * 4)?;
        }

        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&bytes[72..80]);

        let descriptor = Self {
            name,
            data_type: bytes[32],
            rank: bytes[33],
            item_width: le_u16(bytes, 34)?,
            shape,
            _padding: [0; 4],
            offset: le_u64(bytes, 56)?,
            size: le_u64(bytes, 64)?,
            reserved,
        };

        if descriptor.rank as usize > MAX_RANK {
            return Err(FormatError::InvalidColumn);
        }
        descriptor.data_type()?;

        Ok(descriptor)
    }

    /// Convert descriptor to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..MAX_NAME_LEN].copy_from_slice(&self.name);
        bytes[32] = self.data_type;
        bytes[33] = self.rank;
        bytes[34..36].copy_from_slice(&self.item_width.to_le_bytes());
        for (i, dim) in self.shape.iter().enumerate() {
            let at = 36 + i * 4;
            bytes[at..at + 4].copy_from_slice(&dim.to_le_bytes());
        }
        bytes[56..64].copy_from_slice(&self.offset.to_le_bytes());
        bytes[64..72].copy_from_slice(&self.size.to_le_bytes());
        bytes[72..80].copy_from_slice(&self.reserved);
        bytes
    }
}
