//! In-memory shard encoder
//!
//! Builds a complete shard container as a byte vector. The read path never
//! uses this; it exists to produce fixture shards for tests, benches and demos.

use alloc::vec;
use alloc::vec::Vec;

use crate::{
    format::constants::MAX_COLUMN_COUNT,
    validation::align_to_8,
    ColumnDescriptor, ColumnElement, DataType, FormatError, Result, ShardHeader,
};

/// Builder for shard container bytes
#[derive(Debug, Default, Clone)]
pub struct ShardEncoder {
    nrows: Option<u64>,
    columns: Vec<(ColumnDescriptor, Vec<u8>)>,
}

impl ShardEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows fixed by the first column (0 when empty)
    pub fn nrows(&self) -> u64 {
        self.nrows.unwrap_or(0)
    }

    /// Add a numeric column. `values` holds all rows back to back, each row
    /// being `row_shape` elements (one element for scalar columns).
    pub fn add_column<T: ColumnElement>(
        &mut self,
        name: &str,
        row_shape: &[u32],
        values: &[T],
    ) -> Result<&mut Self> {
        let descriptor = ColumnDescriptor::new(name, T::data_type(), row_shape, 0)?;
        let per_row = descriptor.elements_per_row()? as usize;
        if values.len() % per_row != 0 {
            return Err(FormatError::RowCountMismatch);
        }

        let mut data = vec![0u8; values.len() * T::SIZE];
        for (value, out) in values.iter().zip(data.chunks_exact_mut(T::SIZE)) {
            value.write_le(out);
        }

        self.push(descriptor, data, (values.len() / per_row) as u64)
    }

    /// Add a fixed-width byte string column, one string per row
    pub fn add_string_column(&mut self, name: &str, width: u16, values: &[&str]) -> Result<&mut Self> {
        let descriptor = ColumnDescriptor::new(name, DataType::Bytes, &[], width)?;
        let width = width as usize;

        let mut data = vec![0u8; values.len() * width];
        for (value, out) in values.iter().zip(data.chunks_exact_mut(width)) {
            if value.len() > width {
                return Err(FormatError::InsufficientBuffer);
            }
            out[..value.len()].copy_from_slice(value.as_bytes());
        }

        self.push(descriptor, data, values.len() as u64)
    }

    fn push(&mut self, descriptor: ColumnDescriptor, data: Vec<u8>, rows: u64) -> Result<&mut Self> {
        if self.columns.len() as u32 >= MAX_COLUMN_COUNT {
            return Err(FormatError::TooManyColumns);
        }
        if self.columns.iter().any(|(existing, _)| existing.name == descriptor.name) {
            return Err(FormatError::DuplicateColumn);
        }
        match self.nrows {
            Some(nrows) if nrows != rows => return Err(FormatError::RowCountMismatch),
            _ => self.nrows = Some(rows),
        }

        self.columns.push((descriptor, data));
        Ok(self)
    }

    /// Lay out header, directory and 8-byte aligned column data
    pub fn finish(&self) -> Result<Vec<u8>> {
        let directory_size = self.columns.len() * ColumnDescriptor::SIZE;

        let mut header = ShardHeader::new();
        header.column_count = self.columns.len() as u32;
        header.nrows = self.nrows();
        header.directory_offset = ShardHeader::SIZE as u64;
        header.directory_size = directory_size as u64;

        let mut cursor = align_to_8(ShardHeader::SIZE + directory_size);
        let mut placed = Vec::with_capacity(self.columns.len());
        for (descriptor, data) in &self.columns {
            let mut descriptor = *descriptor;
            descriptor.offset = cursor as u64;
            descriptor.size = data.len() as u64;
            placed.push(descriptor);
            cursor = align_to_8(
                cursor
                    .checked_add(data.len())
                    .ok_or(FormatError::ArraySizeOverflow)?,
            );
        }

        let mut bytes = vec![0u8; cursor];
        bytes[..ShardHeader::SIZE].copy_from_slice(&header.to_bytes());
        for (i, (descriptor, (_, data))) in placed.iter().zip(&self.columns).enumerate() {
            let at = ShardHeader::SIZE + i * ColumnDescriptor::SIZE;
            bytes[at..at + ColumnDescriptor::SIZE].copy_from_slice(&descriptor.to_bytes());

            let start = descriptor.offset as usize;
            bytes[start..start + data.len()].copy_from_slice(data);
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_layout_is_valid() {
        let mut encoder = ShardEncoder::new();
        encoder
            .add_column("object_id", &[], &[10i64, 20, 30])
            .unwrap()
            .add_column("ans", &[], &[2u8, 5, 9])
            .unwrap()
            .add_column("redshift", &[], &[0.1f32, 0.2, 0.3])
            .unwrap();
        let bytes = encoder.finish().unwrap();

        let header = ShardHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header.nrows, 3);
        assert_eq!(header.column_count, 3);

        for i in 0..3 {
            let at = header.directory_offset as usize + i * ColumnDescriptor::SIZE;
            let descriptor = ColumnDescriptor::from_bytes(&bytes[at..]).unwrap();
            assert_eq!(descriptor.validate(3, bytes.len()), Ok(()));
        }

        let at = header.directory_offset as usize;
        let ids = ColumnDescriptor::from_bytes(&bytes[at..]).unwrap();
        let start = ids.offset as usize;
        assert_eq!(i64::from_le_slice(&bytes[start + 8..]), 20);
    }

    #[test]
    fn test_rejects_mismatched_row_counts() {
        let mut encoder = ShardEncoder::new();
        encoder.add_column("object_id", &[], &[1i64, 2]).unwrap();
        assert_eq!(
            encoder.add_column("ans", &[], &[1u8, 2, 3]).unwrap_err(),
            FormatError::RowCountMismatch
        );
        assert_eq!(
            encoder.add_column("images", &[2, 2], &[0u8; 7]).unwrap_err(),
            FormatError::RowCountMismatch
        );
    }

    #[test]
    fn test_rejects_duplicate_and_oversized_values() {
        let mut encoder = ShardEncoder::new();
        encoder.add_string_column("object_id", 4, &["ab", "abcd"]).unwrap();
        assert_eq!(
            encoder.add_column("object_id", &[], &[1i64, 2]).unwrap_err(),
            FormatError::DuplicateColumn
        );
        assert_eq!(
            encoder.add_string_column("names", 2, &["abc", "d"]).unwrap_err(),
            FormatError::InsufficientBuffer
        );
    }
}
