#![no_std]

//! GZ10 Core - Galaxy catalog shard format definitions
//!
//! This crate provides the wire format, schema and lookup primitives for
//! sharded GZ10 catalog files. It performs no I/O; reading shards from disk
//! lives in the `gz10` crate.

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

#[cfg(any(feature = "alloc", test))]
pub mod encoder;
pub mod error;
pub mod format;
pub mod schema;
#[cfg(any(feature = "alloc", test))]
pub mod sort_index;
pub mod traits;
pub mod validation;

#[cfg(any(feature = "alloc", test))]
pub use encoder::ShardEncoder;
pub use error::*;
pub use format::*;
pub use schema::{Feature, FeatureType, Variant};
#[cfg(any(feature = "alloc", test))]
pub use sort_index::SortIndex;
pub use traits::*;
pub use validation::{parse_healpix_bucket, validate_column_name};
