//! Borrowed 8-bit height field.
//!
//! A [`HeightField`] is a flat, row-major view over one byte per texel.  The
//! converter never owns the samples; it borrows them for one conversion.

use crate::error::{NormalMapError, validate_dimensions};

/// Immutable, row-major view over a single-channel 8-bit height field.
#[derive(Clone, Copy, Debug)]
pub struct HeightField<'a> {
    width: u32,
    height: u32,
    samples: &'a [u8],
}

impl<'a> HeightField<'a> {
    /// Wrap `samples` as a `width × height` height field.
    ///
    /// Fails if either dimension is zero or if `samples` does not hold exactly
    /// `width * height` bytes.
    pub fn new(width: u32, height: u32, samples: &'a [u8]) -> Result<Self, NormalMapError> {
        validate_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(NormalMapError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn samples(&self) -> &'a [u8] {
        self.samples
    }

    /// Intensity at global image coordinates `(x, y)`.
    ///
    /// Callers must stay inside the image; the slope estimator additionally
    /// keeps every read inside its active tile.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.samples[y as usize * self.width as usize + x as usize]
    }
}
