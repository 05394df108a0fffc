//! Shard container reader
//!
//! Parses the header and column directory of one shard held by a
//! [`StorageBackend`] and hands out bounds-checked views of its columns.

use std::borrow::Cow;

use gz10_core::{
    validation::validate_region, ColumnDescriptor, ColumnElement, DataType, FormatError, Result,
    ShardHeader, StorageBackend,
};
use hashbrown::HashMap;

/// An open shard: backend bytes plus its decoded column directory
pub struct Shard<B: StorageBackend> {
    backend: B,
    header: ShardHeader,
    columns: HashMap<String, ColumnDescriptor>,
    /// Column names in directory order
    order: Vec<String>,
}

impl<B: StorageBackend> Shard<B> {
    /// Decode and validate the container layout
    pub fn from_backend(backend: B) -> Result<Self> {
        let bytes = backend.as_slice();
        let header = ShardHeader::from_bytes(bytes)?;

        let (offset, size) = header.directory_region();
        let offset = usize::try_from(offset).map_err(|_| FormatError::ArraySizeOverflow)?;
        let size = usize::try_from(size).map_err(|_| FormatError::ArraySizeOverflow)?;
        validate_region(offset, size, bytes.len())?;

        let mut columns = HashMap::with_capacity(header.column_count as usize);
        let mut order = Vec::with_capacity(header.column_count as usize);
        for entry in bytes[offset..offset + size].chunks_exact(ColumnDescriptor::SIZE) {
            let descriptor = ColumnDescriptor::from_bytes(entry)?;
            descriptor.validate(header.nrows, bytes.len())?;

            let name = descriptor.name()?.to_string();
            if columns.insert(name.clone(), descriptor).is_some() {
                return Err(FormatError::DuplicateColumn);
            }
            order.push(name);
        }

        Ok(Self {
            backend,
            header,
            columns,
            order,
        })
    }

    pub fn header(&self) -> &ShardHeader {
        &self.header
    }

    /// Number of rows shared by every column
    pub fn nrows(&self) -> usize {
        self.header.nrows as usize
    }

    /// Column names in directory order
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Bounds-checked view of a named column
    pub fn column(&self, name: &str) -> Option<ColumnView<'_>> {
        let descriptor = self.columns.get(name)?;
        let (offset, size) = descriptor.region();
        // Regions were validated against the backend length in from_backend
        let data = &self.backend.as_slice()[offset as usize..(offset + size) as usize];

        Some(ColumnView {
            descriptor,
            data,
            nrows: self.nrows(),
        })
    }
}

/// Typed read access to one column
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    descriptor: &'a ColumnDescriptor,
    data: &'a [u8],
    nrows: usize,
}

macro_rules! read_scalar_as {
    ($view:expr, $row:expr, $conv:ident) => {
        match $view.data_type() {
            DataType::U8 => $view.get::<u8>($row).map(ColumnElement::$conv),
            DataType::I16 => $view.get::<i16>($row).map(ColumnElement::$conv),
            DataType::I32 => $view.get::<i32>($row).map(ColumnElement::$conv),
            DataType::I64 => $view.get::<i64>($row).map(ColumnElement::$conv),
            DataType::U16 => $view.get::<u16>($row).map(ColumnElement::$conv),
            DataType::U32 => $view.get::<u32>($row).map(ColumnElement::$conv),
            DataType::U64 => $view.get::<u64>($row).map(ColumnElement::$conv),
            DataType::F32 => $view.get::<f32>($row).map(ColumnElement::$conv),
            DataType::F64 => $view.get::<f64>($row).map(ColumnElement::$conv),
            DataType::Bytes => Err(FormatError::UnsupportedDataType),
        }
    };
}

impl<'a> ColumnView<'a> {
    pub fn descriptor(&self) -> &'a ColumnDescriptor {
        self.descriptor
    }

    pub fn data_type(&self) -> DataType {
        // Descriptors with unknown types are rejected when the directory is decoded
        self.descriptor.data_type().unwrap_or(DataType::Bytes)
    }

    /// Per-row shape (empty for scalar columns)
    pub fn shape(&self) -> &'a [u32] {
        self.descriptor.shape()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.nrows
    }

    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    fn row_width(&self) -> usize {
        if self.nrows == 0 {
            0
        } else {
            self.data.len() / self.nrows
        }
    }

    fn is_scalar(&self) -> bool {
        self.descriptor.elements_per_row() == Ok(1)
    }

    /// Raw bytes of one row
    pub fn row_bytes(&self, row: usize) -> Result<&'a [u8]> {
        if row >= self.nrows {
            return Err(FormatError::IndexOutOfBounds);
        }
        let width = self.row_width();
        Ok(&self.data[row * width..(row + 1) * width])
    }

    /// Read one scalar element of exactly type `T`
    pub fn get<T: ColumnElement>(&self, row: usize) -> Result<T> {
        if T::data_type() != self.data_type() || !self.is_scalar() {
            return Err(FormatError::UnsupportedDataType);
        }
        Ok(T::from_le_slice(self.row_bytes(row)?))
    }

    /// Read a numeric scalar of any stored type, converted to f64
    pub fn get_f64(&self, row: usize) -> Result<f64> {
        read_scalar_as!(self, row, to_f64)
    }

    /// Read a numeric scalar of any stored type, converted with `as` semantics
    pub fn get_i64(&self, row: usize) -> Result<i64> {
        read_scalar_as!(self, row, to_i64)
    }

    /// Read a fixed-width UTF-8 string, NUL padding removed
    pub fn get_str(&self, row: usize) -> Result<&'a str> {
        if self.data_type() != DataType::Bytes || !self.is_scalar() {
            return Err(FormatError::UnsupportedDataType);
        }
        let raw = self.row_bytes(row)?;
        let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        core::str::from_utf8(&raw[..end]).map_err(|_| FormatError::InvalidName)
    }

    /// All elements of a column of type `T`
    ///
    /// Borrows the column bytes directly when the host is little-endian and
    /// the region is aligned for `T`; decodes into an owned vector otherwise.
    pub fn values<T: ColumnElement>(&self) -> Result<Cow<'a, [T]>> {
        if T::data_type() != self.data_type() {
            return Err(FormatError::UnsupportedDataType);
        }
        if cfg!(target_endian = "little") {
            if let Ok(values) = bytemuck::try_cast_slice::<u8, T>(self.data) {
                return Ok(Cow::Borrowed(values));
            }
        }
        Ok(Cow::Owned(
            self.data
                .chunks_exact(T::SIZE)
                .map(T::from_le_slice)
                .collect(),
        ))
    }
}
