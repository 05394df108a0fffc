//! Configuration variants and their record schemas
//!
//! A variant fixes, once per build, which fields every record carries and
//! which shard columns must be present.

use crate::format::constants::columns;

/// Record field names
pub mod fields {
    pub const LABEL: &str = "gz10_label";
    pub const REDSHIFT: &str = "redshift";
    pub const OBJECT_ID: &str = "object_id";
    pub const RGB_IMAGE: &str = "rgb_image";
    pub const RGB_PIXEL_SCALE: &str = "rgb_pixel_scale";
}

/// Semantic type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FeatureType {
    Int32,
    Float32,
    String,
    Image,
}

/// One named field of the record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Feature {
    pub name: &'static str,
    pub dtype: FeatureType,
}

impl Feature {
    const fn new(name: &'static str, dtype: FeatureType) -> Self {
        Self { name, dtype }
    }
}

const CATALOG_FEATURES: [Feature; 3] = [
    Feature::new(fields::LABEL, FeatureType::Int32),
    Feature::new(fields::REDSHIFT, FeatureType::Float32),
    Feature::new(fields::OBJECT_ID, FeatureType::String),
];

const IMAGE_FEATURES: [Feature; 5] = [
    Feature::new(fields::LABEL, FeatureType::Int32),
    Feature::new(fields::REDSHIFT, FeatureType::Float32),
    Feature::new(fields::OBJECT_ID, FeatureType::String),
    Feature::new(fields::RGB_IMAGE, FeatureType::Image),
    Feature::new(fields::RGB_PIXEL_SCALE, FeatureType::Float32),
];

const CATALOG_COLUMNS: [&str; 3] = [columns::OBJECT_ID, columns::LABEL, columns::REDSHIFT];

const IMAGE_COLUMNS: [&str; 5] = [
    columns::OBJECT_ID,
    columns::LABEL,
    columns::REDSHIFT,
    columns::IMAGES,
    columns::PIXEL_SCALE,
];

/// Dataset configuration variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Variant {
    /// Catalog fields only
    Gz10,
    /// Catalog fields plus uint8 RGB cutouts and their pixel scale
    #[default]
    Gz10RgbImages,
}

impl Variant {
    /// All variants, in declaration order
    pub const ALL: [Variant; 2] = [Variant::Gz10, Variant::Gz10RgbImages];

    /// Configuration name
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Gz10 => "gz10",
            Variant::Gz10RgbImages => "gz10_rgb_images",
        }
    }

    /// Look up a variant by configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Variant::Gz10 => {
                "GZ-10 Catalog loaded with Healpix indices (using NSIDE=16). uint8 images not included."
            }
            Variant::Gz10RgbImages => {
                "GZ-10 Catalog loaded with Healpix indices (using NSIDE=16). uint8 images included."
            }
        }
    }

    /// Whether records carry `rgb_image` and `rgb_pixel_scale`
    pub const fn includes_images(self) -> bool {
        matches!(self, Variant::Gz10RgbImages)
    }

    /// Record schema of this variant
    pub const fn features(self) -> &'static [Feature] {
        match self {
            Variant::Gz10 => &CATALOG_FEATURES,
            Variant::Gz10RgbImages => &IMAGE_FEATURES,
        }
    }

    /// Shard columns that must exist for this variant
    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Variant::Gz10 => &CATALOG_COLUMNS,
            Variant::Gz10RgbImages => &IMAGE_COLUMNS,
        }
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Variant {
    type Err = crate::FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or(crate::FormatError::InvalidName)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::from_name("gz10"), Some(Variant::Gz10));
        assert_eq!(
            "gz10_rgb_images".parse::<Variant>(),
            Ok(Variant::Gz10RgbImages)
        );
        assert_eq!(Variant::from_name("gz10_images"), None);
        assert_eq!(Variant::default(), Variant::Gz10RgbImages);
    }

    #[test]
    fn test_feature_sets() {
        let names = |v: Variant| {
            let mut out = [""; 5];
            for (slot, feature) in out.iter_mut().zip(v.features()) {
                *slot = feature.name;
            }
            (out, v.features().len())
        };

        let (catalog, len) = names(Variant::Gz10);
        assert_eq!(len, 3);
        assert_eq!(&catalog[..3], &["gz10_label", "redshift", "object_id"]);

        let (images, len) = names(Variant::Gz10RgbImages);
        assert_eq!(len, 5);
        assert_eq!(
            images,
            ["gz10_label", "redshift", "object_id", "rgb_image", "rgb_pixel_scale"]
        );
    }

    #[test]
    fn test_required_columns() {
        assert!(!Variant::Gz10.required_columns().contains(&"images"));
        assert!(Variant::Gz10RgbImages.required_columns().contains(&"pxscale"));
        assert!(!Variant::Gz10.includes_images());
    }
}
