//! Layout validation for shard containers

use crate::FormatError;

/// Align an offset to a power-of-two boundary
pub const fn align_to_boundary(offset: usize, boundary: usize) -> usize {
    (offset + boundary - 1) & !(boundary - 1)
}

/// Align an offset to the 8-byte column boundary
pub const fn align_to_8(offset: usize) -> usize {
    align_to_boundary(offset, 8)
}

/// Validate that an offset is properly aligned
pub const fn validate_offset_alignment(offset: usize, boundary: usize) -> Result<(), FormatError> {
    if offset % boundary != 0 {
        return Err(FormatError::ArrayAlignment);
    }
    Ok(())
}

/// Validate that `offset..offset + size` lies within `total_len` bytes
pub const fn validate_region(offset: usize, size: usize, total_len: usize) -> Result<(), FormatError> {
    let end = match offset.checked_add(size) {
        Some(end) => end,
        None => return Err(FormatError::ArraySizeOverflow),
    };

    if end > total_len {
        return Err(FormatError::IndexOutOfBounds);
    }

    Ok(())
}
