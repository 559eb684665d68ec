//! Error type shared by the planner, layout engine and finisher

/// Result alias used across `vat-common`
pub type Result<T> = std::result::Result<T, VatError>;

/// Failure raised by a bake step.
///
/// Every variant is detected before any output buffer is produced, so a
/// failed call never leaves a partially written texture behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VatError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("frame {frame} has {found} vertices, expected {expected} (frame 0)")]
    VertexCountMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },

    #[error("cannot normalize offsets: every component equals {value}")]
    DegenerateRange { value: f32 },

    #[error(
        "wrapped layout needs {required_rows} rows but the texture only has {available_rows} \
         (try wrap_crop)"
    )]
    LayoutOverflow {
        required_rows: u64,
        available_rows: u32,
    },
}

impl VatError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
