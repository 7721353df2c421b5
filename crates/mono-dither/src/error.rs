//! Unified error type for the mono-dither public API.
//!
//! All pipeline failures are caller programming errors, not transient
//! conditions: they are detected before any destination write and the
//! correct policy is fail-fast with no partial mutation.

use std::fmt;

/// Error type for the pixel pipeline.
///
/// Every variant is local and non-retryable. Operations check their
/// preconditions up front and return before touching the destination
/// buffer, so a failed call leaves the destination exactly as it was.
///
/// # Example
///
/// ```
/// use mono_dither::{PipelineError, Rgba8Image, ToneCurve, convert_to_grayscale};
///
/// let src = Rgba8Image::new(4, 4);
/// let mut dst = Rgba8Image::new(4, 2);
/// let err = convert_to_grayscale(&src, &mut dst, &ToneCurve::default()).unwrap_err();
/// assert!(matches!(err, PipelineError::DimensionMismatch { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Source and destination image sizes disagree.
    DimensionMismatch {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },
    /// A parameter value that can never be valid (non-positive gamma,
    /// non-positive kernel divisor, wrong buffer length).
    InvalidConfiguration {
        /// Human-readable description of the rejected value.
        reason: String,
    },
    /// A pixel coordinate outside the image bounds.
    OutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::DimensionMismatch {
                src_width,
                src_height,
                dst_width,
                dst_height,
            } => write!(
                f,
                "dimension mismatch: source is {}x{}, destination is {}x{}",
                src_width, src_height, dst_width, dst_height
            ),
            PipelineError::InvalidConfiguration { reason } => {
                write!(f, "invalid configuration: {}", reason)
            }
            PipelineError::OutOfRange {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "pixel ({}, {}) out of range for {}x{} image",
                x, y, width, height
            ),
        }
    }
}

impl std::error::Error for PipelineError {}
