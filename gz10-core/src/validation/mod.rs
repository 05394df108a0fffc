//! Format validation utilities
//!
//! This module contains pure validation functions with no I/O dependencies.
//! All functions are arithmetic on data layout and format constraints.

pub mod format;
pub mod parsing;

pub use format::{align_to_8, align_to_boundary, validate_offset_alignment, validate_region};
pub use parsing::{parse_healpix_bucket, validate_column_name};
