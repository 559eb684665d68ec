//! vat-export library
//!
//! Loads sampled frame dumps, applies size policy and writes baked vertex
//! animation textures. The encoding itself lives in `vat-common`.

pub mod export;
pub mod input;
pub mod limits;
pub mod manifest;
pub mod output;

pub use export::{check_dump, describe_resolution, export_vat, ExportOptions};
pub use input::{DumpedFrame, FrameDump};
pub use manifest::VatManifest;
pub use output::{read_pixel_buffer, write_pixel_buffer, OutputPaths, VatMetadata};
