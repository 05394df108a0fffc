//! Object identifiers
//!
//! Identifiers are opaque: a shard stores them as signed or unsigned integers
//! or as fixed-width byte strings. Records always carry them stringified.

use std::fmt;

use gz10_core::{DataType, FormatError};
use serde::{Deserialize, Serialize};

use crate::shard::ColumnView;

/// Storage kind of an identifier column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Int,
    UInt,
    Text,
}

impl IdKind {
    /// Identifier kind for a column data type, if the type can hold identifiers
    pub fn for_data_type(data_type: DataType) -> Option<Self> {
        match data_type {
            DataType::Bytes => Some(IdKind::Text),
            dt if dt.is_signed_integer() => Some(IdKind::Int),
            dt if dt.is_unsigned_integer() => Some(IdKind::UInt),
            _ => None,
        }
    }
}

/// A single object identifier
///
/// Ordering compares values of the same kind naturally; every identifier of
/// one shard has the same kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectId {
    Int(i64),
    UInt(u64),
    Text(String),
}

impl ObjectId {
    pub fn kind(&self) -> IdKind {
        match self {
            ObjectId::Int(_) => IdKind::Int,
            ObjectId::UInt(_) => IdKind::UInt,
            ObjectId::Text(_) => IdKind::Text,
        }
    }

    /// Convert to the storage kind of an identifier column
    ///
    /// Integer text is parsed, signed and unsigned values convert when in
    /// range, integers render as decimal text. Returns `None` when the value
    /// cannot be represented in `kind`.
    pub fn coerce(&self, kind: IdKind) -> Option<ObjectId> {
        match (self, kind) {
            (ObjectId::Int(_), IdKind::Int)
            | (ObjectId::UInt(_), IdKind::UInt)
            | (ObjectId::Text(_), IdKind::Text) => Some(self.clone()),
            (ObjectId::Int(v), IdKind::UInt) => u64::try_from(*v).ok().map(ObjectId::UInt),
            (ObjectId::UInt(v), IdKind::Int) => i64::try_from(*v).ok().map(ObjectId::Int),
            (ObjectId::Int(_) | ObjectId::UInt(_), IdKind::Text) => {
                Some(ObjectId::Text(self.to_string()))
            }
            (ObjectId::Text(s), IdKind::Int) => s.trim().parse().ok().map(ObjectId::Int),
            (ObjectId::Text(s), IdKind::UInt) => s.trim().parse().ok().map(ObjectId::UInt),
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Int(v) => write!(f, "{v}"),
            ObjectId::UInt(v) => write!(f, "{v}"),
            ObjectId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ObjectId {
    fn from(value: i64) -> Self {
        ObjectId::Int(value)
    }
}

impl From<u64> for ObjectId {
    fn from(value: u64) -> Self {
        ObjectId::UInt(value)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        ObjectId::Text(value.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(value: String) -> Self {
        ObjectId::Text(value)
    }
}

/// Read a whole identifier column in storage order
pub fn read_ids(column: &ColumnView<'_>) -> Result<(Vec<ObjectId>, IdKind), FormatError> {
    let kind =
        IdKind::for_data_type(column.data_type()).ok_or(FormatError::UnsupportedDataType)?;
    if !column.shape().is_empty() {
        return Err(FormatError::InvalidColumn);
    }

    let ids: Vec<ObjectId> = match column.data_type() {
        DataType::I64 => column
            .values::<i64>()?
            .iter()
            .map(|&v| ObjectId::Int(v))
            .collect(),
        DataType::U64 => column
            .values::<u64>()?
            .iter()
            .map(|&v| ObjectId::UInt(v))
            .collect(),
        DataType::Bytes => (0..column.len())
            .map(|row| column.get_str(row).map(ObjectId::from))
            .collect::<Result<_, _>>()?,
        _ if kind == IdKind::Int => (0..column.len())
            .map(|row| column.get_i64(row).map(ObjectId::Int))
            .collect::<Result<_, _>>()?,
        _ => (0..column.len())
            .map(|row| column.get_i64(row).map(|v| ObjectId::UInt(v as u64)))
            .collect::<Result<_, _>>()?,
    };

    Ok((ids, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shard::Shard;
    use gz10_core::ShardEncoder;

    #[test]
    fn test_display_renders_raw_value() {
        assert_eq!(ObjectId::Int(-20).to_string(), "-20");
        assert_eq!(ObjectId::UInt(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(ObjectId::from("J0123+4567").to_string(), "J0123+4567");
    }

    #[test]
    fn test_coerce_between_kinds() {
        assert_eq!(ObjectId::from("20").coerce(IdKind::Int), Some(ObjectId::Int(20)));
        assert_eq!(ObjectId::from(" 7 ").coerce(IdKind::UInt), Some(ObjectId::UInt(7)));
        assert_eq!(ObjectId::Int(-1).coerce(IdKind::UInt), None);
        assert_eq!(ObjectId::UInt(u64::MAX).coerce(IdKind::Int), None);
        assert_eq!(ObjectId::Int(5).coerce(IdKind::Text), Some(ObjectId::from("5")));
        assert_eq!(ObjectId::from("abc").coerce(IdKind::Int), None);
    }

    #[test]
    fn test_untagged_deserialization() {
        let ids: Vec<ObjectId> = serde_json::from_str(r#"[20, -3, "J1"]"#).unwrap();
        assert_eq!(ids[0].kind(), IdKind::Int);
        assert_eq!(ids[1], ObjectId::Int(-3));
        assert_eq!(ids[2], ObjectId::from("J1"));
    }

    #[test]
    fn test_read_ids_for_each_storage_kind() {
        let mut encoder = ShardEncoder::new();
        encoder
            .add_column("i32_ids", &[], &[3i32, -1])
            .unwrap()
            .add_column("u16_ids", &[], &[4u16, 9])
            .unwrap()
            .add_string_column("text_ids", 6, &["a", "bc"])
            .unwrap()
            .add_column("float_ids", &[], &[1.0f32, 2.0])
            .unwrap();
        let shard = Shard::from_backend(encoder.finish().unwrap()).unwrap();

        let (ids, kind) = read_ids(&shard.column("i32_ids").unwrap()).unwrap();
        assert_eq!((ids, kind), (vec![ObjectId::Int(3), ObjectId::Int(-1)], IdKind::Int));

        let (ids, kind) = read_ids(&shard.column("u16_ids").unwrap()).unwrap();
        assert_eq!((ids, kind), (vec![ObjectId::UInt(4), ObjectId::UInt(9)], IdKind::UInt));

        let (ids, _) = read_ids(&shard.column("text_ids").unwrap()).unwrap();
        assert_eq!(ids, vec![ObjectId::from("a"), ObjectId::from("bc")]);

        assert_eq!(
            read_ids(&shard.column("float_ids").unwrap()).err(),
            Some(FormatError::UnsupportedDataType)
        );
    }
}
