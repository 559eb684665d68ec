//! Bake settings
//!
//! Mirrors the options exposed by the baking panel: how positions are
//! encoded, how the vertex axis is wrapped, and the two finishing passes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VatError;

/// How the vertex axis of a frame is laid out in the texture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// One texture row per frame, `vertex_count` pixels wide
    #[default]
    None,
    /// Split each frame across row-groups of a power-of-two texture
    Wrap,
    /// Like `Wrap`, but crop the texture to `frame_count * num_wraps` rows
    WrapCrop,
}

impl WrapMode {
    /// True for both wrapping variants
    #[inline]
    pub fn is_wrapped(self) -> bool {
        self != WrapMode::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WrapMode::None => "none",
            WrapMode::Wrap => "wrap",
            WrapMode::WrapCrop => "wrap_crop",
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapMode {
    type Err = VatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" => Ok(WrapMode::None),
            "wrap" => Ok(WrapMode::Wrap),
            "wrap_crop" => Ok(WrapMode::WrapCrop),
            _ => Err(VatError::invalid_input(format!(
                "unknown wrap mode '{}' (expected none, wrap or wrap_crop)",
                s
            ))),
        }
    }
}

/// What the offsets texture stores for each vertex
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Displacement from the vertex position in frame 0
    #[default]
    Offsets,
    /// Raw position
    Absolutes,
}

impl PositionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PositionMode::Offsets => "offsets",
            PositionMode::Absolutes => "absolutes",
        }
    }
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionMode {
    type Err = VatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "offsets" => Ok(PositionMode::Offsets),
            "absolutes" => Ok(PositionMode::Absolutes),
            _ => Err(VatError::invalid_input(format!(
                "unknown position mode '{}' (expected offsets or absolutes)",
                s
            ))),
        }
    }
}

/// Options for a single bake
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BakeSettings {
    #[serde(default)]
    pub position_mode: PositionMode,

    #[serde(default)]
    pub wrap_mode: WrapMode,

    /// Reverse the row order of both textures as the last step.
    /// Default: true
    #[serde(default = "default_flip_y")]
    pub flip_y: bool,

    /// Rescale the offsets texture into [0, 1] (useful for 8-bit formats).
    /// Default: false
    #[serde(default)]
    pub normalize: bool,
}

fn default_flip_y() -> bool {
    true
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            position_mode: PositionMode::default(),
            wrap_mode: WrapMode::default(),
            flip_y: default_flip_y(),
            normalize: false,
        }
    }
}

/// Half-open range of animation frames: `start..end` stepping by `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: i32,
    pub end: i32,
    #[serde(default = "default_step")]
    pub step: u32,
}

fn default_step() -> u32 {
    1
}

impl FrameRange {
    pub fn new(start: i32, end: i32, step: u32) -> crate::Result<Self> {
        let range = Self { start, end, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.step == 0 {
            return Err(VatError::invalid_input("frame step must be at least 1"));
        }
        Ok(())
    }

    /// Number of frames the range yields
    pub fn len(&self) -> usize {
        if self.step == 0 || self.end <= self.start {
            return 0;
        }
        let span = (self.end as i64 - self.start as i64) as u64;
        span.div_ceil(self.step as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, frame: i32) -> bool {
        if self.step == 0 || frame < self.start || frame >= self.end {
            return false;
        }
        (frame as i64 - self.start as i64) % self.step as i64 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> {
        let step = self.step.max(1) as usize;
        (self.start..self.end).step_by(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_mode_parse() {
        assert_eq!("none".parse::<WrapMode>().unwrap(), WrapMode::None);
        assert_eq!("WRAP".parse::<WrapMode>().unwrap(), WrapMode::Wrap);
        assert_eq!("wrap-crop".parse::<WrapMode>().unwrap(), WrapMode::WrapCrop);
        assert_eq!("Wrap_Crop".parse::<WrapMode>().unwrap(), WrapMode::WrapCrop);
        assert!(matches!(
            "square".parse::<WrapMode>(),
            Err(VatError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_position_mode_parse() {
        assert_eq!(
            "ABSOLUTES".parse::<PositionMode>().unwrap(),
            PositionMode::Absolutes
        );
        assert!("relative".parse::<PositionMode>().is_err());
    }

    #[test]
    fn test_default_settings() {
        let settings = BakeSettings::default();
        assert_eq!(settings.position_mode, PositionMode::Offsets);
        assert_eq!(settings.wrap_mode, WrapMode::None);
        assert!(settings.flip_y);
        assert!(!settings.normalize);
    }

    #[test]
    fn test_settings_deserialize_defaults() {
        let settings: BakeSettings =
            serde_json::from_str(r#"{ "wrap_mode": "wrap_crop" }"#).unwrap();
        assert_eq!(settings.wrap_mode, WrapMode::WrapCrop);
        assert!(settings.flip_y);
        assert!(!settings.normalize);
    }

    #[test]
    fn test_frame_range_len_matches_half_open_range() {
        assert_eq!(FrameRange::new(1, 250, 1).unwrap().len(), 249);
        assert_eq!(FrameRange::new(1, 250, 2).unwrap().len(), 125);
        assert_eq!(FrameRange::new(0, 10, 3).unwrap().len(), 4);
        assert_eq!(FrameRange::new(5, 5, 1).unwrap().len(), 0);
        assert_eq!(FrameRange::new(10, 2, 1).unwrap().len(), 0);
    }

    #[test]
    fn test_frame_range_contains() {
        let range = FrameRange::new(2, 11, 3).unwrap();
        let frames: Vec<i32> = range.iter().collect();
        assert_eq!(frames, vec![2, 5, 8]);
        assert!(range.contains(5));
        assert!(!range.contains(6));
        assert!(!range.contains(11));
        assert!(!range.contains(-1));
    }

    #[test]
    fn test_frame_range_rejects_zero_step() {
        assert!(matches!(
            FrameRange::new(0, 10, 0),
            Err(VatError::InvalidInput(_))
        ));
    }
}
