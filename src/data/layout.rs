use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use treepack::{PackError, Padding, RecursivePacker, Seed, SizeMode};

/// A layout file, describing a set of rectangles to be packed together and
/// how they should be packed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Space to leave around each rectangle, either one number for both axes
    /// or a `[x, y]` pair.
    #[serde(default)]
    pub padding: PaddingConfig,

    /// The size of the container to pack into. If not specified, the smallest
    /// container that fits will be found.
    #[serde(default)]
    pub container: Option<(u32, u32)>,

    /// The largest container to try when searching for a size.
    #[serde(default)]
    pub max_size: Option<(u32, u32)>,

    /// Where to start searching for a size, either a `[width, height]` pair or
    /// the name of a size mode to estimate one from the total area.
    #[serde(default)]
    pub seed: Option<SeedConfig>,

    /// The rectangles to pack.
    #[serde(default)]
    pub rects: Vec<RectConfig>,

    /// The path that this layout came from.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl LayoutConfig {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut config: Self = if is_json(path) {
            serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
                path: path.to_owned(),
                source,
            })?
        } else {
            toml::from_str(&contents).map_err(|source| ConfigError::Toml {
                path: path.to_owned(),
                source,
            })?
        };
        config.file_path = path.to_owned();

        log::trace!(
            "Read layout with {} rects from {}",
            config.rects.len(),
            path.display()
        );

        Ok(config)
    }

    pub fn sizes(&self) -> Vec<(u32, u32)> {
        self.rects.iter().map(|rect| rect.size).collect()
    }

    pub fn padding(&self) -> Padding {
        match self.padding {
            PaddingConfig::Uniform(value) => Padding::uniform(value),
            PaddingConfig::PerAxis(pair) => pair.into(),
        }
    }

    /// Builds a packer configured the way this layout asks for.
    pub fn packer(&self) -> Result<RecursivePacker, PackError> {
        let mut packer = RecursivePacker::new().padding(self.padding());

        if let Some(max_size) = self.max_size {
            packer = packer.max_size(max_size);
        }

        match &self.seed {
            Some(SeedConfig::Size(size)) => packer = packer.seed(Seed::Fixed(*size)),
            Some(SeedConfig::Mode(mode)) => {
                let mode: SizeMode = mode.parse()?;
                packer = packer.seed(Seed::Estimate(mode));
            }
            None => {}
        }

        Ok(packer)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaddingConfig {
    Uniform(u32),
    PerAxis((u32, u32)),
}

impl Default for PaddingConfig {
    fn default() -> Self {
        PaddingConfig::Uniform(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedConfig {
    Size((u32, u32)),
    Mode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RectConfig {
    /// A name for this rectangle, used to identify it in the packed output.
    pub name: String,

    pub size: (u32, u32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{source} in {}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{source} in {}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ConfigError {
    /// Tells whether this ConfigError originated because of a path not
    /// existing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io(source) => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
