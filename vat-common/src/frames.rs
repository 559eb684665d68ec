//! Sampled animation frames
//!
//! The mesh sampler produces one [`FrameSample`] per animation frame. Frame 0
//! is the reference pose; every frame must list the same vertices in the same
//! order.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VatError};

/// World-space position and normal of one vertex in one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VertexSample {
    pub position: Vec3,
    pub normal: Vec3,
}

impl VertexSample {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// All vertices of one frame, indexed by vertex index
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameSample {
    pub vertices: Vec<VertexSample>,
}

impl FrameSample {
    pub fn new(vertices: Vec<VertexSample>) -> Self {
        Self { vertices }
    }

    /// Build a frame from parallel position and normal arrays
    pub fn from_parts(positions: &[Vec3], normals: &[Vec3]) -> Result<Self> {
        if positions.len() != normals.len() {
            return Err(VatError::invalid_input(format!(
                "{} positions but {} normals",
                positions.len(),
                normals.len()
            )));
        }
        Ok(Self {
            vertices: positions
                .iter()
                .zip(normals)
                .map(|(&p, &n)| VertexSample::new(p, n))
                .collect(),
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Frames in capture order, first to last
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameSequence {
    frames: Vec<FrameSample>,
}

impl FrameSequence {
    pub fn new(frames: Vec<FrameSample>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[FrameSample] {
        &self.frames
    }

    pub fn push(&mut self, frame: FrameSample) {
        self.frames.push(frame);
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The reference pose (frame 0)
    pub fn reference(&self) -> Option<&FrameSample> {
        self.frames.first()
    }

    /// Vertex count of frame 0
    pub fn vertex_count(&self) -> usize {
        self.reference().map_or(0, FrameSample::vertex_count)
    }

    /// Check the sequence is non-empty and every frame matches frame 0.
    ///
    /// Returns `(vertex_count, frame_count)` as texture dimensions.
    pub fn validate(&self) -> Result<(u32, u32)> {
        let Some(reference) = self.reference() else {
            return Err(VatError::invalid_input("frame sequence is empty"));
        };

        let expected = reference.vertex_count();
        if expected == 0 {
            return Err(VatError::invalid_input("frame 0 has no vertices"));
        }

        if let Some((frame, sample)) = self
            .frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.vertex_count() != expected)
        {
            return Err(VatError::VertexCountMismatch {
                frame,
                expected,
                found: sample.vertex_count(),
            });
        }

        let vertex_count = u32::try_from(expected)
            .map_err(|_| VatError::invalid_input("vertex count exceeds u32"))?;
        let frame_count = u32::try_from(self.frames.len())
            .map_err(|_| VatError::invalid_input("frame count exceeds u32"))?;
        Ok((vertex_count, frame_count))
    }
}

impl From<Vec<FrameSample>> for FrameSequence {
    fn from(frames: Vec<FrameSample>) -> Self {
        Self::new(frames)
    }
}

impl FromIterator<FrameSample> for FrameSequence {
    fn from_iter<I: IntoIterator<Item = FrameSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(n: usize) -> FrameSample {
        FrameSample::new(vec![VertexSample::new(Vec3::ZERO, Vec3::Y); n])
    }

    #[test]
    fn test_validate_uniform_sequence() {
        let seq = FrameSequence::new(vec![frame(3), frame(3), frame(3)]);
        assert_eq!(seq.validate().unwrap(), (3, 3));
    }

    #[test]
    fn test_validate_empty_sequence() {
        let seq = FrameSequence::default();
        assert!(matches!(seq.validate(), Err(VatError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_reports_first_mismatch() {
        let seq = FrameSequence::new(vec![frame(4), frame(4), frame(5), frame(2)]);
        assert_eq!(
            seq.validate(),
            Err(VatError::VertexCountMismatch {
                frame: 2,
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn test_from_parts_rejects_ragged_arrays() {
        let positions = [Vec3::ZERO, Vec3::X];
        let normals = [Vec3::Y];
        assert!(FrameSample::from_parts(&positions, &normals).is_err());
    }
}
