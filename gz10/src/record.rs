//! Output records
//!
//! A record is one emitted galaxy. Its shape is fixed by the configuration
//! variant: the catalog fields always, plus the RGB cutout and its pixel
//! scale for image variants.

use gz10_core::{
    format::constants::columns, schema::fields, FormatError, Variant,
};
use serde::Serialize;

use crate::ids::ObjectId;

/// An 8-bit cutout stored row-major as `height x width x channels`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RgbImage {
    pub height: u32,
    pub width: u32,
    pub channels: u32,
    pub pixels: Vec<u8>,
}

impl RgbImage {
    /// Build from an `images` column row and its per-row shape
    ///
    /// Rank 2 shapes are single-channel; rank 3 shapes carry channels last.
    pub fn from_row(shape: &[u32], pixels: &[u8]) -> Result<Self, FormatError> {
        let (height, width, channels) = match *shape {
            [height, width] => (height, width, 1),
            [height, width, channels] => (height, width, channels),
            _ => return Err(FormatError::InvalidColumn),
        };

        let expected = height as usize * width as usize * channels as usize;
        if pixels.len() != expected {
            return Err(FormatError::CorruptedData);
        }

        Ok(Self {
            height,
            width,
            channels,
            pixels: pixels.to_vec(),
        })
    }

    /// Pixel value at row `y`, column `x`, channel `c`
    pub fn pixel(&self, y: u32, x: u32, c: u32) -> Option<u8> {
        if y >= self.height || x >= self.width || c >= self.channels {
            return None;
        }
        let at = ((y as usize * self.width as usize) + x as usize) * self.channels as usize
            + c as usize;
        self.pixels.get(at).copied()
    }
}

/// Typed values of one shard row, as read by the catalog accessor
#[derive(Debug, Clone, PartialEq)]
pub struct RowValues {
    pub label: i32,
    pub redshift: f32,
    pub object_id: ObjectId,
    pub image: Option<RgbImage>,
    pub pixel_scale: Option<f32>,
}

/// Fields present in every record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogFields {
    pub gz10_label: i32,
    pub redshift: f32,
    pub object_id: String,
}

/// Catalog fields plus the RGB cutout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    #[serde(flatten)]
    pub catalog: CatalogFields,
    pub rgb_image: RgbImage,
    pub rgb_pixel_scale: f32,
}

/// One emitted galaxy, shaped by the configuration variant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Gz10(CatalogFields),
    Gz10RgbImages(ImageRecord),
}

impl Record {
    /// Assemble a record for `variant` from row values
    ///
    /// Fails with the name of the missing column when the variant needs
    /// image fields the row does not carry. No partial records are built.
    pub fn from_row(row: RowValues, variant: Variant) -> Result<Self, &'static str> {
        let catalog = CatalogFields {
            gz10_label: row.label,
            redshift: row.redshift,
            object_id: row.object_id.to_string(),
        };

        match variant {
            Variant::Gz10 => Ok(Record::Gz10(catalog)),
            Variant::Gz10RgbImages => {
                let rgb_image = row.image.ok_or(columns::IMAGES)?;
                let rgb_pixel_scale = row.pixel_scale.ok_or(columns::PIXEL_SCALE)?;
                Ok(Record::Gz10RgbImages(ImageRecord {
                    catalog,
                    rgb_image,
                    rgb_pixel_scale,
                }))
            }
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Record::Gz10(_) => Variant::Gz10,
            Record::Gz10RgbImages(_) => Variant::Gz10RgbImages,
        }
    }

    pub fn catalog(&self) -> &CatalogFields {
        match self {
            Record::Gz10(catalog) => catalog,
            Record::Gz10RgbImages(record) => &record.catalog,
        }
    }

    pub fn object_id(&self) -> &str {
        &self.catalog().object_id
    }

    pub fn gz10_label(&self) -> i32 {
        self.catalog().gz10_label
    }

    pub fn redshift(&self) -> f32 {
        self.catalog().redshift
    }

    pub fn rgb_image(&self) -> Option<&RgbImage> {
        match self {
            Record::Gz10(_) => None,
            Record::Gz10RgbImages(record) => Some(&record.rgb_image),
        }
    }

    pub fn rgb_pixel_scale(&self) -> Option<f32> {
        match self {
            Record::Gz10(_) => None,
            Record::Gz10RgbImages(record) => Some(record.rgb_pixel_scale),
        }
    }

    /// Names of the fields this record carries, in schema order
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = vec![fields::LABEL, fields::REDSHIFT, fields::OBJECT_ID];
        if self.rgb_image().is_some() {
            names.extend([fields::RGB_IMAGE, fields::RGB_PIXEL_SCALE]);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn row(with_image: bool) -> RowValues {
        RowValues {
            label: 5,
            redshift: 0.2,
            object_id: ObjectId::Int(20),
            image: with_image.then(|| RgbImage::from_row(&[2, 2, 3], &[1u8; 12]).unwrap()),
            pixel_scale: with_image.then_some(0.262),
        }
    }

    fn json_keys(record: &Record) -> BTreeSet<String> {
        match serde_json::to_value(record).unwrap() {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            other => panic!("record serialized to {other}"),
        }
    }

    #[test]
    fn test_catalog_record_fields() {
        let record = Record::from_row(row(true), Variant::Gz10).unwrap();
        assert_eq!(record.variant(), Variant::Gz10);
        assert_eq!(record.field_names(), vec!["gz10_label", "redshift", "object_id"]);
        assert_eq!(
            json_keys(&record),
            ["gz10_label", "object_id", "redshift"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        );
        assert_eq!(record.object_id(), "20");
        assert!(record.rgb_image().is_none());
    }

    #[test]
    fn test_image_record_fields_match_schema() {
        let record = Record::from_row(row(true), Variant::Gz10RgbImages).unwrap();
        let schema: BTreeSet<String> = Variant::Gz10RgbImages
            .features()
            .iter()
            .map(|f| f.name.to_string())
            .collect();
        assert_eq!(json_keys(&record), schema);
        assert_eq!(record.rgb_pixel_scale(), Some(0.262));
        assert_eq!(record.rgb_image().unwrap().pixel(1, 1, 2), Some(1));
    }

    #[test]
    fn test_image_variant_rejects_incomplete_row() {
        assert_eq!(
            Record::from_row(row(false), Variant::Gz10RgbImages),
            Err("images")
        );
    }

    #[test]
    fn test_rgb_image_shapes() {
        let gray = RgbImage::from_row(&[2, 3], &[0u8; 6]).unwrap();
        assert_eq!(gray.channels, 1);
        assert_eq!(gray.pixel(1, 2, 0), Some(0));
        assert_eq!(gray.pixel(2, 0, 0), None);

        assert_eq!(
            RgbImage::from_row(&[4], &[0u8; 4]),
            Err(FormatError::InvalidColumn)
        );
        assert_eq!(
            RgbImage::from_row(&[2, 2, 3], &[0u8; 11]),
            Err(FormatError::CorruptedData)
        );
    }
}
