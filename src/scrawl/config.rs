use crate::error::{Result, ScrawlError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ASSET_DIR: &str = "assets";
const DEFAULT_SIDECAR_EXT: &str = ".drawing";
const DEFAULT_MAX_IMAGE_WIDTH: f32 = 320.0;

/// Configuration for scrawl, stored in the notes directory as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrawlConfig {
    /// Subdirectory of the notes folder where pasted images land
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,

    /// Extension for the drawing sidecar file (e.g. ".drawing")
    #[serde(default = "default_sidecar_ext")]
    pub sidecar_ext: String,

    /// Widest an inline image renders, in points; larger images scale down
    #[serde(default = "default_max_image_width")]
    pub max_image_width: f32,

    /// Days until a new note expires; None disables expiry
    #[serde(default)]
    pub expiry_days: Option<i64>,
}

fn default_asset_dir() -> String {
    DEFAULT_ASSET_DIR.to_string()
}

fn default_sidecar_ext() -> String {
    DEFAULT_SIDECAR_EXT.to_string()
}

fn default_max_image_width() -> f32 {
    DEFAULT_MAX_IMAGE_WIDTH
}

impl Default for ScrawlConfig {
    fn default() -> Self {
        Self {
            asset_dir: default_asset_dir(),
            sidecar_ext: default_sidecar_ext(),
            max_image_width: DEFAULT_MAX_IMAGE_WIDTH,
            expiry_days: None,
        }
    }
}

impl ScrawlConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ScrawlError::Io)?;
        let config: ScrawlConfig =
            serde_json::from_str(&content).map_err(ScrawlError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ScrawlError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ScrawlError::Serialization)?;
        fs::write(config_path, content).map_err(ScrawlError::Io)?;
        Ok(())
    }

    /// Set the sidecar extension (normalizes to start with a dot)
    pub fn set_sidecar_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.sidecar_ext = ext.to_string();
        } else {
            self.sidecar_ext = format!(".{}", ext);
        }
    }
}
