//! Parsing utilities for shard names and partition directories

use crate::{format::constants::MAX_NAME_LEN, FormatError};

/// Prefix of spatial partition directory names
pub const HEALPIX_PREFIX: &str = "healpix=";

/// Parse a partition directory name of the form `healpix=<n>`
pub fn parse_healpix_bucket(dir_name: &str) -> Result<u32, FormatError> {
    let digits = dir_name
        .strip_prefix(HEALPIX_PREFIX)
        .ok_or(FormatError::InvalidRange)?;
    parse_u32(digits)
}

/// Parse a u32 from a string of ASCII digits
fn parse_u32(s: &str) -> Result<u32, FormatError> {
    if s.is_empty() {
        return Err(FormatError::InvalidRange);
    }

    let mut result: u32 = 0;
    for byte in s.bytes() {
        if !byte.is_ascii_digit() {
            return Err(FormatError::InvalidRange);
        }

        let digit = (byte - b'0') as u32;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(FormatError::ArraySizeOverflow)?;
    }

    Ok(result)
}

/// Validate a column name for the shard directory
///
/// Names are non-empty UTF-8, fit the fixed name field, contain no NUL or
/// control bytes, and use `/` only between non-empty path segments.
pub fn validate_column_name(name: &str) -> Result<(), FormatError> {
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(FormatError::InvalidName);
    }

    if name.bytes().any(|b| b < 32 || b == 127) {
        return Err(FormatError::InvalidName);
    }

    if name.split('/').any(str::is_empty) {
        return Err(FormatError::InvalidName);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_healpix_bucket() {
        assert_eq!(parse_healpix_bucket("healpix=0"), Ok(0));
        assert_eq!(parse_healpix_bucket("healpix=1234"), Ok(1234));

        assert_eq!(parse_healpix_bucket("healpix="), Err(FormatError::InvalidRange));
        assert_eq!(parse_healpix_bucket("healpix=-3"), Err(FormatError::InvalidRange));
        assert_eq!(parse_healpix_bucket("nside=16"), Err(FormatError::InvalidRange));
        assert_eq!(
            parse_healpix_bucket("healpix=99999999999"),
            Err(FormatError::ArraySizeOverflow)
        );
    }

    #[test]
    fn test_validate_column_name() {
        assert_eq!(validate_column_name("object_id"), Ok(()));
        assert_eq!(validate_column_name("meta/pxscale"), Ok(()));

        assert_eq!(validate_column_name(""), Err(FormatError::InvalidName));
        assert_eq!(validate_column_name("a\0b"), Err(FormatError::InvalidName));
        assert_eq!(validate_column_name("/images"), Err(FormatError::InvalidName));
        assert_eq!(validate_column_name("meta//x"), Err(FormatError::InvalidName));
        assert_eq!(
            validate_column_name("a_column_name_that_is_far_too_long"),
            Err(FormatError::InvalidName)
        );
    }
}
