//! Catalog accessor
//!
//! A [`CatalogShard`] is one open shard file checked against the columns its
//! variant needs. It owns the backend, so the mapping and file handle are
//! released when the shard is dropped.

use std::path::{Path, PathBuf};

use gz10_core::{format::constants::columns, DataType, FormatError, StorageBackend, Variant};
use tracing::debug;

use crate::{
    backend::{DefaultBackend, OpenBackend},
    error::{Error, Result},
    ids::{read_ids, IdKind, ObjectId},
    record::{Record, RgbImage, RowValues},
    shard::{ColumnView, Shard},
};

/// One shard opened for a configuration variant
pub struct CatalogShard<B: StorageBackend = DefaultBackend> {
    path: PathBuf,
    shard: Shard<B>,
    variant: Variant,
    id_kind: IdKind,
}

impl CatalogShard<DefaultBackend> {
    /// Open a shard file with the default backend
    pub fn open(path: impl AsRef<Path>, variant: Variant) -> Result<Self> {
        Self::open_with(path, variant)
    }
}

impl<B: StorageBackend> CatalogShard<B> {
    /// Open a shard file with an explicit backend type
    pub fn open_with(path: impl AsRef<Path>, variant: Variant) -> Result<Self>
    where
        B: OpenBackend,
    {
        let path = path.as_ref();
        let backend = B::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_backend(path, backend, variant)
    }

    /// Wrap already loaded shard bytes
    ///
    /// `path` is only used to label errors and log lines.
    pub fn from_backend(path: impl Into<PathBuf>, backend: B, variant: Variant) -> Result<Self> {
        let path = path.into();
        let shard =
            Shard::from_backend(backend).map_err(|reason| Error::invalid_shard(&path, reason))?;

        for &name in variant.required_columns() {
            let Some(column) = shard.column(name) else {
                return Err(Error::MissingColumn {
                    path,
                    column: name.to_string(),
                });
            };
            if !column_fits(name, &column) {
                return Err(Error::invalid_shard(&path, FormatError::UnsupportedDataType));
            }
        }

        let id_kind = shard
            .column(columns::OBJECT_ID)
            .and_then(|ids| IdKind::for_data_type(ids.data_type()))
            .ok_or_else(|| Error::invalid_shard(&path, FormatError::UnsupportedDataType))?;

        debug!(
            path = %path.display(),
            rows = shard.nrows(),
            variant = %variant,
            "opened shard"
        );

        Ok(Self {
            path,
            shard,
            variant,
            id_kind,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Number of rows in every column
    pub fn row_count(&self) -> usize {
        self.shard.nrows()
    }

    /// Storage kind of the identifier column
    pub fn id_kind(&self) -> IdKind {
        self.id_kind
    }

    /// The underlying container, for inspection of extra columns
    pub fn shard(&self) -> &Shard<B> {
        &self.shard
    }

    /// The full identifier column in storage order, duplicates kept
    pub fn read_identifiers(&self) -> Result<Vec<ObjectId>> {
        let column = self.required(columns::OBJECT_ID)?;
        let (ids, _) = read_ids(&column).map_err(|reason| self.invalid(reason))?;
        Ok(ids)
    }

    /// Typed values of one row
    ///
    /// Image fields are read only for variants that include images.
    pub fn read_row(&self, row: usize) -> Result<RowValues> {
        let len = self.row_count();
        if row >= len {
            return Err(Error::IndexOutOfBounds { row, len });
        }

        let label = self
            .required(columns::LABEL)?
            .get_i64(row)
            .map_err(|reason| self.invalid(reason))?;
        let redshift = self
            .required(columns::REDSHIFT)?
            .get_f64(row)
            .map_err(|reason| self.invalid(reason))?;
        let object_id = self.read_id(row)?;

        let (image, pixel_scale) = if self.variant.includes_images() {
            let images = self.required(columns::IMAGES)?;
            let pixels = images.row_bytes(row).map_err(|reason| self.invalid(reason))?;
            let image =
                RgbImage::from_row(images.shape(), pixels).map_err(|reason| self.invalid(reason))?;
            let scale = self
                .required(columns::PIXEL_SCALE)?
                .get_f64(row)
                .map_err(|reason| self.invalid(reason))?;
            (Some(image), Some(scale as f32))
        } else {
            (None, None)
        };

        Ok(RowValues {
            label: label as i32,
            redshift: redshift as f32,
            object_id,
            image,
            pixel_scale,
        })
    }

    /// Read one row and assemble it into a record of this shard's variant
    pub fn read_record(&self, row: usize) -> Result<Record> {
        let values = self.read_row(row)?;
        Record::from_row(values, self.variant).map_err(|column| Error::MissingColumn {
            path: self.path.clone(),
            column: column.to_string(),
        })
    }

    fn read_id(&self, row: usize) -> Result<ObjectId> {
        let column = self.required(columns::OBJECT_ID)?;
        let id = match self.id_kind {
            IdKind::Int => column.get_i64(row).map(ObjectId::Int),
            IdKind::UInt => column.get_i64(row).map(|v| ObjectId::UInt(v as u64)),
            IdKind::Text => column.get_str(row).map(ObjectId::from),
        };
        id.map_err(|reason| self.invalid(reason))
    }

    fn required(&self, name: &str) -> Result<ColumnView<'_>> {
        self.shard.column(name).ok_or_else(|| Error::MissingColumn {
            path: self.path.clone(),
            column: name.to_string(),
        })
    }

    fn invalid(&self, reason: FormatError) -> Error {
        Error::invalid_shard(&self.path, reason)
    }
}

/// Whether a required column has the type and shape its field needs
fn column_fits(name: &str, column: &ColumnView<'_>) -> bool {
    let scalar = column.shape().is_empty();
    let data_type = column.data_type();
    match name {
        columns::OBJECT_ID => scalar && IdKind::for_data_type(data_type).is_some(),
        columns::LABEL => scalar && data_type.is_integer(),
        columns::REDSHIFT | columns::PIXEL_SCALE => scalar && data_type != DataType::Bytes,
        columns::IMAGES => data_type == DataType::U8 && matches!(column.shape().len(), 2 | 3),
        _ => true,
    }
}
