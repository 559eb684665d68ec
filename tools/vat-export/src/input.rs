//! Frame dump loading
//!
//! A frame dump is the JSON handed over by the mesh sampler:
//!
//! ```json
//! { "frames": [ { "frame": 1, "positions": [[0, 0, 0]], "normals": [[0, 0, 1]] } ] }
//! ```
//!
//! `frame` is optional; frames without it are numbered by their position in
//! the dump.

use anyhow::{bail, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vat_common::{FrameRange, FrameSample, FrameSequence};

/// Sampled frames in capture order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameDump {
    pub frames: Vec<DumpedFrame>,
}

/// One sampled frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpedFrame {
    /// Scene frame number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<i32>,
    /// World-space vertex positions, by vertex index
    pub positions: Vec<[f32; 3]>,
    /// World-space vertex normals, by vertex index
    pub normals: Vec<[f32; 3]>,
}

impl FrameDump {
    /// Load a frame dump from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read frame dump: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid frame dump: {}", path.display()))
    }

    /// Parse a frame dump from a JSON string
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse frame dump JSON")
    }

    /// Frame number of the dumped frame at `index`
    fn frame_number(&self, index: usize) -> i32 {
        self.frames[index].frame.unwrap_or(index as i32)
    }

    /// Convert to a frame sequence, keeping only frames inside `range`
    pub fn to_sequence(&self, range: Option<&FrameRange>) -> Result<FrameSequence> {
        if let Some(range) = range {
            range.validate()?;
        }

        let mut sequence = FrameSequence::default();
        for (index, dumped) in self.frames.iter().enumerate() {
            let number = self.frame_number(index);
            if range.is_some_and(|r| !r.contains(number)) {
                continue;
            }

            let positions: Vec<Vec3> = dumped.positions.iter().copied().map(Vec3::from).collect();
            let normals: Vec<Vec3> = dumped.normals.iter().copied().map(Vec3::from).collect();
            let sample = FrameSample::from_parts(&positions, &normals)
                .with_context(|| format!("Frame {} is malformed", number))?;
            sequence.push(sample);
        }

        if sequence.is_empty() {
            match range {
                Some(r) => bail!(
                    "No frames in range {}..{} (step {}) out of {} dumped",
                    r.start,
                    r.end,
                    r.step,
                    self.frames.len()
                ),
                None => bail!("Frame dump contains no frames"),
            }
        }

        Ok(sequence)
    }
}
