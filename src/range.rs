//! Global intensity range and the slope scale derived from it.
//!
//! The range is a whole-image statistic: it is computed once, before any tile
//! is visited, and the resulting scale is frozen for the entire conversion.

use crate::height::HeightField;

/// Minimum and maximum intensity observed across a height field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntensityRange {
    pub min: u8,
    pub max: u8,
}

impl IntensityRange {
    /// Scan every sample of `field` once.
    pub fn scan(field: &HeightField<'_>) -> Self {
        let (min, max) = field
            .samples()
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        Self { min, max }
    }

    /// `max - min`, zero for a flat field.
    pub fn span(&self) -> u8 {
        self.max - self.min
    }
}

/// Slope multiplier applied to every raw intensity difference.
///
/// With `normalise` the base `scale` is multiplied by the observed range
/// `(max - min) / 255`; otherwise the raw byte difference is simply brought
/// into `[0, 1]` units by dividing by 255.
pub fn effective_scale(field: &HeightField<'_>, scale: f64, normalise: bool) -> f64 {
    if normalise {
        let range = IntensityRange::scan(field);
        range.span() as f64 / 255.0 * scale
    } else {
        scale / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_finds_extremes() {
        let data = [40u8, 200, 17, 90];
        let field = HeightField::new(2, 2, &data).unwrap();
        assert_eq!(
            IntensityRange::scan(&field),
            IntensityRange { min: 17, max: 200 }
        );
    }

    #[test]
    fn flat_field_has_zero_span() {
        let data = [77u8; 9];
        let field = HeightField::new(3, 3, &data).unwrap();
        assert_eq!(IntensityRange::scan(&field).span(), 0);
        assert_eq!(effective_scale(&field, 3.0, true), 0.0);
    }

    #[test]
    fn full_range_normalises_to_base_scale() {
        let data = [0u8, 255, 255, 0];
        let field = HeightField::new(2, 2, &data).unwrap();
        assert_eq!(effective_scale(&field, 1.0, true), 1.0);
        assert_eq!(effective_scale(&field, 2.5, true), 2.5);
    }

    #[test]
    fn without_normalise_scale_is_per_byte() {
        let data = [10u8, 20, 30, 40];
        let field = HeightField::new(2, 2, &data).unwrap();
        assert!((effective_scale(&field, 1.0, false) - 1.0 / 255.0).abs() < f64::EPSILON);
        assert!((effective_scale(&field, 5.1, false) - 0.02).abs() < 1e-12);
    }
}
