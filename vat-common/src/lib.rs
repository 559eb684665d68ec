//! Vertex animation texture (VAT) encoding
//!
//! Packs per-vertex, per-frame positions and normals into two RGBA float
//! textures that a vertex shader can replay without skeletal data.
//!
//! Shared between:
//! - `vat-export` (command line baking)
//! - any host that samples meshes itself and only needs the encoding
//!
//! # Modules
//!
//! - [`resolution`] - Texture size planning (the shared [`plan`] query)
//! - [`layout`] - Sample emission and wrap tiling
//! - [`finish`] - Normalization and vertical flip
//! - [`uv`] - Export-mesh UVs matching the planned layout
//! - [`bake`] - The three steps above in one call
//!
//! # Example
//!
//! ```ignore
//! use vat_common::{bake, BakeSettings, FrameSequence, WrapMode};
//!
//! let frames: FrameSequence = sample_frames(); // one FrameSample per frame
//! let settings = BakeSettings { wrap_mode: WrapMode::WrapCrop, ..Default::default() };
//! let baked = bake(&frames, &settings)?;
//! store_rgba32f(baked.width(), baked.height(), baked.offsets.as_floats());
//! ```

pub mod bake;
pub mod error;
pub mod finish;
pub mod frames;
pub mod layout;
pub mod pixels;
pub mod resolution;
pub mod settings;
pub mod uv;

pub use bake::{BakedTextures, bake};
pub use error::{Result, VatError};
pub use finish::{OffsetRange, finish, flip_rows, normalize_offsets};
pub use frames::{FrameSample, FrameSequence, VertexSample};
pub use layout::{emit_samples, encode_normal, encode_offset, layout, tile_samples};
pub use pixels::{PAD_DEFINED, PAD_EMPTY, PixelBuffer, Rgba};
pub use resolution::{Resolution, plan};
pub use settings::{BakeSettings, FrameRange, PositionMode, WrapMode};
pub use uv::{export_uvs, vertex_uv};
