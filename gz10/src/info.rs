//! Static dataset metadata

use gz10_core::{Feature, Variant};
use serde::Serialize;

pub const HOMEPAGE: &str = "https://astronn.readthedocs.io/en/latest/galaxy10.html";
pub const LICENSE: &str = "MIT License";
pub const VERSION: &str = "1.0.0";

/// Side length in pixels of the RGB cutouts
pub const IMAGE_SIZE: u32 = 256;

/// Number of galaxies in the full catalog
pub const CATALOG_SIZE: usize = 17_736;

pub const DESCRIPTION: &str = "The GZ10 catalog from Leung et al. (2018) is a dataset of 17,736 \
galaxies with labels from the Galaxy Zoo 2 project. The catalog includes the following features \
for each galaxy: right ascension, declination, redshift, and a label from the Galaxy Zoo 2 project.";

/// Acknowledgements followed by the BibTeX entry to cite
pub const CITATION: &str = r#"% ACKNOWLEDGEMENTS
From https://astronn.readthedocs.io/en/stable/galaxy10.html#acknowledgments

The GZ10 catalog from Leung et al. (2018) is a dataset of 17,736 galaxies with labels from the Galaxy Zoo 2 project. The catalog includes the following features for each galaxy: right ascension, declination, redshift, and a label. Galaxy10 DECaLS images come from DESI Legacy Imaging Surveys and labels come from Galaxy Zoo.

Galaxy10 dataset classification labels come from Galaxy Zoo.
Galaxy10 dataset images come from DESI Legacy Imaging Surveys.

Galaxy Zoo is described in Lintott et al. 2008, the GalaxyZoo Data Release 2 is described in Lintott et al. 2011, Galaxy Zoo DECals Campaign is described in Walmsley M. et al. 2021, DESI Legacy Imaging Surveys is described in Dey A. et al., 2019

The Legacy Surveys consist of three individual and complementary projects: the Dark Energy Camera Legacy Survey (DECaLS; Proposal ID #2014B-0404; PIs: David Schlegel and Arjun Dey), the Beijing-Arizona Sky Survey (BASS; NOAO Prop. ID #2015A-0801; PIs: Zhou Xu and Xiaohui Fan), and the Mayall z-band Legacy Survey (MzLS; Prop. ID #2016A-0453; PI: Arjun Dey). DECaLS, BASS and MzLS together include data obtained, respectively, at the Blanco telescope, Cerro Tololo Inter-American Observatory, NSF’s NOIRLab; the Bok telescope, Steward Observatory, University of Arizona; and the Mayall telescope, Kitt Peak National Observatory, NOIRLab. The Legacy Surveys project is honored to be permitted to conduct astronomical research on Iolkam Du’ag (Kitt Peak), a mountain with particular significance to the Tohono O’odham Nation.

% CITATION
@article{walmsley2022galaxy,
  title={Galaxy Zoo DECaLS: Detailed visual morphology measurements from volunteers and deep learning for 314 000 galaxies},
  author={Walmsley, Mike and Lintott, Chris and G{\'e}ron, Tobias and Kruk, Sandor and Krawczyk, Coleman and Willett, Kyle W and Bamford, Steven and Kelvin, Lee S and Fortson, Lucy and Gal, Yarin and others},
  journal={Monthly Notices of the Royal Astronomical Society},
  volume={509},
  number={3},
  pages={3966--3988},
  year={2022},
  publisher={Oxford University Press}
}
"#;

/// Description, provenance and schema of one dataset variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub variant: Variant,
    pub description: &'static str,
    pub config_description: &'static str,
    pub homepage: &'static str,
    pub license: &'static str,
    pub version: &'static str,
    pub citation: &'static str,
    pub num_examples: usize,
    /// Cutout side length, only for variants carrying images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<u32>,
    pub features: &'static [Feature],
}

impl DatasetInfo {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            description: DESCRIPTION,
            config_description: variant.description(),
            homepage: HOMEPAGE,
            license: LICENSE,
            version: VERSION,
            citation: CITATION,
            num_examples: CATALOG_SIZE,
            image_size: variant.includes_images().then_some(IMAGE_SIZE),
            features: variant.features(),
        }
    }
}

impl Default for DatasetInfo {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_follows_variant() {
        let info = DatasetInfo::for_variant(Variant::Gz10);
        assert_eq!(info.features.len(), 3);
        assert!(info.config_description.contains("not included"));

        let info = DatasetInfo::default();
        assert_eq!(info.variant, Variant::Gz10RgbImages);
        assert_eq!(info.features.len(), 5);
        assert_eq!(info.license, "MIT License");
    }

    #[test]
    fn test_info_serializes_feature_types() {
        let value = serde_json::to_value(DatasetInfo::for_variant(Variant::Gz10)).unwrap();
        assert_eq!(value["variant"], "gz10");
        assert_eq!(value["features"][0]["name"], "gz10_label");
        assert_eq!(value["features"][0]["dtype"], "int32");
        assert_eq!(value["version"], "1.0.0");
    }

    #[test]
    fn test_citation_starts_with_acknowledgements() {
        let info = DatasetInfo::default();
        assert!(info.citation.starts_with("% ACKNOWLEDGEMENTS"));
        let citation = info.citation.find("% CITATION").unwrap();
        assert!(info.citation[citation..].contains("@article{walmsley2022galaxy"));
        assert!(info.citation.trim_end().ends_with('}'));
    }

    #[test]
    fn test_sizes_follow_variant() {
        let images = serde_json::to_value(DatasetInfo::for_variant(Variant::Gz10RgbImages)).unwrap();
        assert_eq!(images["num_examples"], 17_736);
        assert_eq!(images["image_size"], 256);

        let catalog = DatasetInfo::for_variant(Variant::Gz10);
        assert_eq!(catalog.num_examples, CATALOG_SIZE);
        assert_eq!(catalog.image_size, None);
        assert!(serde_json::to_value(catalog).unwrap().get("image_size").is_none());
    }
}
