//! Format constants and magic bytes for shard containers

/// Default alignment boundary for column data regions
pub const ALIGNMENT_BOUNDARY: usize = 8;

/// Maximum number of columns in a shard directory
pub const MAX_COLUMN_COUNT: u32 = 256;

/// Width of the NUL padded column name field
pub const MAX_NAME_LEN: usize = 32;

/// Maximum per-row shape rank of a column
pub const MAX_RANK: usize = 4;

/// Column names of the GZ10 catalog layout
pub mod columns {
    /// Object identifier column
    pub const OBJECT_ID: &str = "object_id";
    /// Galaxy10 class label column
    pub const LABEL: &str = "ans";
    /// Redshift column
    pub const REDSHIFT: &str = "redshift";
    /// RGB cutout column (`height x width x channels`, u8)
    pub const IMAGES: &str = "images";
    /// Pixel scale column, arcsec per pixel
    pub const PIXEL_SCALE: &str = "pxscale";
}
