//! Error types for shard format operations

/// Errors that can occur while decoding or encoding a shard container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Invalid header format
    InvalidHeader,
    /// Unsupported format version
    UnsupportedFormat,
    /// Invalid column descriptor
    InvalidColumn,
    /// Column name is empty, too long or not UTF-8
    InvalidName,
    /// Two columns share a name
    DuplicateColumn,
    /// Column data type is not usable for the requested read
    UnsupportedDataType,
    /// Column length disagrees with the shard row count
    RowCountMismatch,
    /// Too many columns in the directory
    TooManyColumns,
    /// Index out of bounds
    IndexOutOfBounds,
    /// Data corruption detected
    CorruptedData,
    /// Insufficient buffer space
    InsufficientBuffer,
    /// Array not aligned to its element size
    ArrayAlignment,
    /// Array size calculation overflowed
    ArraySizeOverflow,
    /// Malformed range or numeric string
    InvalidRange,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FormatError::InvalidHeader => "Invalid shard header",
            FormatError::UnsupportedFormat => "Unsupported format version",
            FormatError::InvalidColumn => "Invalid column descriptor",
            FormatError::InvalidName => "Invalid column name",
            FormatError::DuplicateColumn => "Duplicate column name",
            FormatError::UnsupportedDataType => "Unsupported column data type",
            FormatError::RowCountMismatch => "Column length does not match row count",
            FormatError::TooManyColumns => "Too many columns",
            FormatError::IndexOutOfBounds => "Index out of bounds",
            FormatError::CorruptedData => "Data corruption detected",
            FormatError::InsufficientBuffer => "Insufficient buffer space",
            FormatError::ArrayAlignment => "Array not aligned to element size",
            FormatError::ArraySizeOverflow => "Array size overflow",
            FormatError::InvalidRange => "Invalid range",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for FormatError {}

/// Result type for shard format operations
pub type Result<T> = core::result::Result<T, FormatError>;
