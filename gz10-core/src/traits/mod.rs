//! Abstract interfaces for shard access
//!
//! Traits are pure interfaces - concrete backends live in the `gz10` crate.

pub mod backend;
pub mod element;

pub use backend::StorageBackend;
pub use element::ColumnElement;
