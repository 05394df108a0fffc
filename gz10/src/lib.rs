//! GZ10 - Galaxy10 DECaLS catalog shard reader
//!
//! This library reads the Galaxy10 catalog (class labels, redshifts and RGB
//! cutouts) from shard files partitioned by healpix bucket, looks galaxies up
//! by object id and yields them as typed records.
//!
//! ## Architecture
//!
//! GZ10 separates format definitions from I/O:
//!
//! - **gz10-core**: shard container format, variants and schemas, the sorted
//!   identifier index and validation helpers (no I/O)
//! - **gz10**: memory-mapped shard access, identifier resolution, record
//!   assembly, shard discovery and the example generator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gz10::{generate_examples, BuilderConfig, ObjectId, Variant};
//!
//! fn example() -> gz10::Result<()> {
//!     let config = BuilderConfig::for_variant(Variant::Gz10).with_data_dir("gz10");
//!     for split in config.split_generators()? {
//!         let ids = vec![vec![ObjectId::Int(20)]; split.files.len()];
//!         for example in generate_examples(split.files, Some(ids), config.variant())? {
//!             match example {
//!                 Ok((key, record)) => println!("{key}: label {}", record.gz10_label()),
//!                 Err(err) => eprintln!("skipped: {err}"),
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Memory-mapped I/O** (`mmap`, default): shards are mapped, not read
//! - **Lazy generation**: at most one shard is open at any time
//! - **Deterministic lookup**: stable sorted index, lowest row wins on duplicates
//! - **CLI** (`cli`, default): the `gz10` binary

pub use gz10_core::{
    // Format definitions
    ColumnDescriptor, DataType, ShardHeader,
    // Schema
    Feature, FeatureType, Variant,
    // Index and encoder
    ShardEncoder, SortIndex,
    // Traits and core errors
    ColumnElement, FormatError, StorageBackend,
};

pub mod backend;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod ids;
pub mod info;
pub mod record;
pub mod resolver;
pub mod shard;

pub use backend::{BufferBackend, DefaultBackend, OpenBackend};
#[cfg(feature = "mmap")]
pub use backend::MmapBackend;
pub use catalog::CatalogShard;
pub use config::BuilderConfig;
pub use discovery::{discover_shards, healpix_bucket, DataFiles, ShardPath, SplitGenerator};
pub use error::{Error, Result};
pub use generator::{generate_examples, Example, Examples, ShardExamples};
pub use ids::{IdKind, ObjectId};
pub use info::DatasetInfo;
pub use record::{CatalogFields, ImageRecord, Record, RgbImage, RowValues};
pub use resolver::Resolver;
pub use shard::{ColumnView, Shard};
