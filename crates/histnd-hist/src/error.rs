//! Error types for histnd-hist

use thiserror::Error;

/// Errors that can occur during histogram operations
///
/// Every variant is detected before any bin is touched, so a failed call
/// leaves the histogram exactly as it was.
#[derive(Debug, Error)]
pub enum HistError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] histnd_core::Error),

    /// A histogram needs at least one axis
    #[error("histogram must have at least one axis")]
    EmptyDimension,

    /// An argument's length disagrees with the histogram dimension
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Axis with zero bins
    #[error("axis {axis} must have at least one bin")]
    InvalidBinSize { axis: usize },

    /// Axis range is empty, reversed or not finite
    #[error("invalid range on axis {axis}: [{min}, {max})")]
    InvalidRange { axis: usize, min: f32, max: f32 },

    /// Input images (or mask) do not share the same shape
    #[error("image size mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    ImageSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Bin coordinate outside `[0, len)` on some axis
    #[error("bin index {index} out of range on axis {axis} (len {len})")]
    IndexOutOfRange {
        axis: usize,
        index: usize,
        len: usize,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for histogram operations
pub type HistResult<T> = Result<T, HistError>;
