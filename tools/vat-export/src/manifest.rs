//! vat.toml manifest parsing
//!
//! ```toml
//! [bake]
//! position_mode = "offsets"
//! wrap_mode = "wrap_crop"
//! flip_y = true
//! normalize = false
//!
//! [frames]
//! start = 1
//! end = 250
//! step = 2
//!
//! [output]
//! dir = "textures"
//! name = "flag"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use vat_common::{BakeSettings, FrameRange};

/// vat.toml manifest structure
#[derive(Debug, Default, Deserialize)]
pub struct VatManifest {
    #[serde(default)]
    pub bake: BakeSettings,
    /// Frames to keep from the dump; all frames when absent
    #[serde(default)]
    pub frames: Option<FrameRange>,
    #[serde(default)]
    pub output: OutputSection,
}

/// Output location section
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the manifest
    pub dir: Option<PathBuf>,
    /// File stem for the written textures (defaults to the dump's stem)
    pub name: Option<String>,
}

impl VatManifest {
    /// Load manifest from file
    ///
    /// A relative output directory is resolved against the manifest's folder.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        let mut manifest = Self::parse(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))?;

        if let (Some(dir), Some(base)) = (manifest.output.dir.as_mut(), path.parent()) {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        Ok(manifest)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content).context("Failed to parse vat.toml")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Some(range) = &self.frames {
            range.validate().context("Invalid [frames] section")?;
        }
        Ok(())
    }
}
