//! Error type shared by the conversion core and the Bevy bridge.

use bevy::render::render_resource::TextureFormat;

/// Error returned when a height field or configuration cannot be converted.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalMapError {
    /// Either `width` or `height` was zero.
    ZeroDimension { width: u32, height: u32 },
    /// The sample buffer does not hold exactly `width * height` bytes.
    SampleCountMismatch { expected: usize, actual: usize },
    /// `scale` was zero, negative, NaN or infinite.
    InvalidScale(f64),
    /// The channel mapping string was not three distinct letters from `rgba`.
    InvalidChannelMapping(String),
    /// The source image uses a pixel format that cannot be read as heights.
    UnsupportedFormat(TextureFormat),
    /// The source image has no CPU-side pixel data.
    MissingImageData,
    /// The output buffer could not be allocated.
    Allocation { bytes: usize },
}

impl std::fmt::Display for NormalMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalMapError::ZeroDimension { width, height } => write!(
                f,
                "height field dimensions must be non-zero (got {width}×{height})"
            ),
            NormalMapError::SampleCountMismatch { expected, actual } => write!(
                f,
                "height field needs {expected} samples but the buffer holds {actual}"
            ),
            NormalMapError::InvalidScale(scale) => {
                write!(f, "scale must be finite and positive (got {scale})")
            }
            NormalMapError::InvalidChannelMapping(mapping) => write!(
                f,
                "bad channel mapping {mapping:?}: expected three distinct letters from \"rgba\""
            ),
            NormalMapError::UnsupportedFormat(format) => {
                write!(f, "cannot read heights from a {format:?} image")
            }
            NormalMapError::MissingImageData => {
                write!(f, "image has no CPU-side pixel data")
            }
            NormalMapError::Allocation { bytes } => {
                write!(f, "failed to allocate {bytes} bytes for the normal map")
            }
        }
    }
}

impl std::error::Error for NormalMapError {}

/// Dimension guard for height fields.
///
/// Only empty fields are rejected; the size of the output buffer is bounded
/// by what can actually be allocated, which [`convert`](crate::convert())
/// reports as [`NormalMapError::Allocation`].
#[inline]
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), NormalMapError> {
    if width == 0 || height == 0 {
        return Err(NormalMapError::ZeroDimension { width, height });
    }
    Ok(())
}
