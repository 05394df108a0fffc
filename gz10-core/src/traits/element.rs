//! Column element type constraints
//!
//! Defines which primitive types can be stored as fixed-width column
//! elements, and how they are decoded from little-endian bytes.

use crate::format::DataType;

/// Trait for types that can be stored as column elements
///
/// Elements are plain old data with a fixed little-endian encoding.
pub trait ColumnElement: bytemuck::Pod + PartialOrd + core::fmt::Debug {
    /// Size of one encoded element in bytes
    const SIZE: usize = core::mem::size_of::<Self>();

    /// Get the DataType representation for this element type
    fn data_type() -> DataType;

    /// Decode from the first `SIZE` little-endian bytes of `bytes`
    ///
    /// Panics if `bytes` is shorter than `SIZE`; callers slice by row width.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Encode into the first `SIZE` bytes of `out`
    fn write_le(self, out: &mut [u8]);

    /// Convert to f64 for generic numeric reads
    fn to_f64(self) -> f64;

    /// Convert to i64 for generic integer reads (`as` semantics)
    fn to_i64(self) -> i64;
}

macro_rules! impl_column_element {
    ($type:ty, $data_type:ident) => {
        impl ColumnElement for $type {
            fn data_type() -> DataType {
                DataType::$data_type
            }

            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$type>()];
                raw.copy_from_slice(&bytes[..core::mem::size_of::<$type>()]);
                <$type>::from_le_bytes(raw)
            }

            fn write_le(self, out: &mut [u8]) {
                out[..core::mem::size_of::<$type>()].copy_from_slice(&self.to_le_bytes());
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn to_i64(self) -> i64 {
                self as i64
            }
        }
    };
}

impl_column_element!(u8, U8);
impl_column_element!(i16, I16);
impl_column_element!(i32, I32);
impl_column_element!(i64, I64);
impl_column_element!(u16, U16);
impl_column_element!(u32, U32);
impl_column_element!(u64, U64);
impl_column_element!(f32, F32);
impl_column_element!(f64, F64);
