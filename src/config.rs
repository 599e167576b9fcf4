use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};
use crate::source::SourceKind;

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "INSTA_GALLERY_CONFIG";

/// Gallery configuration
///
/// ```toml
/// page_size = 15
/// infinite = true
/// storage_namespace = "chef"
///
/// [source]
/// kind = "feed"
/// location = "./api/chefs.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub source: SourceKind,
    /// Photos revealed per "load more"
    pub page_size: usize,
    /// Keep producing photos once the fetched list is exhausted
    pub infinite: bool,
    /// Prefix of the two reaction storage keys
    pub storage_namespace: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            page_size: 15,
            infinite: true,
            storage_namespace: "chef".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Load from `$INSTA_GALLERY_CONFIG`, else the default location
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::default_path()?,
        };
        Self::load_from(&path)
    }

    /// Load from a specific path; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: GalleryConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/insta-gallery/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| GalleryError::InvalidConfig("could not determine config directory".into()))?;
        path.push("insta-gallery");
        path.push("config.toml");
        Ok(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GalleryError::InvalidConfig("page_size must be at least 1".into()));
        }
        if self.storage_namespace.trim().is_empty() {
            return Err(GalleryError::InvalidConfig("storage_namespace must not be empty".into()));
        }
        Ok(())
    }
}
