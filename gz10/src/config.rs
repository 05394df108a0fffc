//! Builder configuration
//!
//! A [`BuilderConfig`] selects the variant and the data files for one build.
//! It is constructed with `with_*` methods or loaded from JSON.

use std::path::{Path, PathBuf};

use gz10_core::Variant;
use serde::{Deserialize, Serialize};

use crate::{
    discovery::{DataFiles, SplitGenerator},
    error::{Error, Result},
    generator::{generate_examples, Examples},
    ids::ObjectId,
    info::{DatasetInfo, VERSION},
};

/// Configuration of one dataset build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Variant name, e.g. `gz10_rgb_images`
    pub name: Variant,
    pub version: String,
    /// Overrides the variant description when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Directory data file patterns are resolved against
    pub data_dir: PathBuf,
    pub data_files: DataFiles,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl BuilderConfig {
    /// Default configuration of `variant`
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            name: variant,
            version: VERSION.to_string(),
            description: None,
            data_dir: PathBuf::from("."),
            data_files: DataFiles::default(),
        }
    }

    /// Configuration of the variant called `name`
    pub fn named(name: &str) -> Result<Self> {
        let variant = name
            .parse()
            .map_err(|_| Error::Configuration(format!("unknown configuration '{name}'")))?;
        Ok(Self::for_variant(variant))
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_data_files(mut self, data_files: DataFiles) -> Self {
        self.data_files = data_files;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn variant(&self) -> Variant {
        self.name
    }

    pub fn description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.name.description())
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo::for_variant(self.name)
    }

    /// Parse a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|err| Error::Configuration(format!("invalid configuration: {err}")))
    }

    /// Load a JSON configuration file
    ///
    /// A relative `data_dir` is taken relative to the file's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&json)?;
        if config.data_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.data_dir = parent.join(&config.data_dir);
            }
        }
        Ok(config)
    }

    /// Resolve the configured data files into splits
    pub fn split_generators(&self) -> Result<Vec<SplitGenerator>> {
        self.data_files.split_generators(&self.data_dir)
    }

    /// Generate examples of this configuration's variant from `files`
    pub fn generate(
        &self,
        files: Vec<PathBuf>,
        object_ids: Option<Vec<Vec<ObjectId>>>,
    ) -> Result<Examples> {
        generate_examples(files, object_ids, self.name)
    }
}
