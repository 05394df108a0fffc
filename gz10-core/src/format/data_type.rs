//! Column data types

/// Element data types supported in shard columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum DataType {
    /// 8-bit unsigned integer
    U8 = 0,
    /// 16-bit signed integer
    I16 = 1,
    /// 32-bit signed integer
    I32 = 2,
    /// 64-bit signed integer
    I64 = 3,
    /// 16-bit unsigned integer
    U16 = 4,
    /// 32-bit unsigned integer
    U32 = 5,
    /// 64-bit unsigned integer
    U64 = 6,
    /// 32-bit floating point
    F32 = 7,
    /// 64-bit floating point
    F64 = 8,
    /// Fixed-width byte string, NUL padded
    Bytes = 9,
}

impl DataType {
    /// Convert from u8 representation
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DataType::U8),
            1 => Some(DataType::I16),
            2 => Some(DataType::I32),
            3 => Some(DataType::I64),
            4 => Some(DataType::U16),
            5 => Some(DataType::U32),
            6 => Some(DataType::U64),
            7 => Some(DataType::F32),
            8 => Some(DataType::F64),
            9 => Some(DataType::Bytes),
            _ => None,
        }
    }

    /// Convert to u8 representation
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Size in bytes of one element. Byte strings report 1; their width
    /// comes from the column descriptor.
    pub const fn size_bytes(self) -> usize {
        match self {
            DataType::U8 | DataType::Bytes => 1,
            DataType::I16 | DataType::U16 => 2,
            DataType::I32 | DataType::U32 | DataType::F32 => 4,
            DataType::I64 | DataType::U64 | DataType::F64 => 8,
        }
    }

    pub const fn is_signed_integer(self) -> bool {
        matches!(self, DataType::I16 | DataType::I32 | DataType::I64)
    }

    pub const fn is_unsigned_integer(self) -> bool {
        matches!(
            self,
            DataType::U8 | DataType::U16 | DataType::U32 | DataType::U64
        )
    }

    pub const fn is_integer(self) -> bool {
        self.is_signed_integer() || self.is_unsigned_integer()
    }

    pub const fn is_float(self) -> bool {
        matches!(self, DataType::F32 | DataType::F64)
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            DataType::U8 => "u8",
            DataType::I16 => "i16",
            DataType::I32 => "i32",
            DataType::I64 => "i64",
            DataType::U16 => "u16",
            DataType::U32 => "u32",
            DataType::U64 => "u64",
            DataType::F32 => "f32",
            DataType::F64 => "f64",
            DataType::Bytes => "bytes",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_roundtrip_covers_all_types() {
        for raw in 0..=9u8 {
            let dt = DataType::from_u8(raw).unwrap();
            assert_eq!(dt.to_u8(), raw);
        }
        assert_eq!(DataType::from_u8(10), None);
    }

    #[test]
    fn test_type_classes() {
        assert!(DataType::I64.is_signed_integer());
        assert!(DataType::U8.is_unsigned_integer());
        assert!(!DataType::F32.is_integer());
        assert!(DataType::F64.is_float());
        assert!(!DataType::Bytes.is_integer() && !DataType::Bytes.is_float());
        assert_eq!(DataType::F64.size_bytes(), 8);
        assert_eq!(DataType::I16.size_bytes(), 2);
    }
}
