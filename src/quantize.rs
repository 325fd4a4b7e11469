//! 8-bit encodings for normal components.
//!
//! Signed components use an offset-128 encoding: `0.0` maps to 128, `-1.0` to
//! 0 and `+1.0` saturates at 255.  The fraction is truncated toward zero, so
//! small negative and small positive values both land on 128.

/// Encode a component in `[-1, 1]` as offset-128.
#[inline]
pub fn to_signed_byte(v: f64) -> u8 {
    // `as` truncates toward zero and saturates, so NaN and out-of-range input
    // still produce a valid byte.
    let b = ((v * 128.0) as i32).clamp(-128, 127);
    (b + 128) as u8
}

/// Encode a component in `[0, 1]` over the full byte range.
#[inline]
pub fn to_unsigned_byte(v: f64) -> u8 {
    ((v * 256.0) as i32).clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_reference_points() {
        assert_eq!(to_signed_byte(0.0), 128);
        assert_eq!(to_signed_byte(-1.0), 0);
        assert_eq!(to_signed_byte(1.0), 255);
        assert_eq!(to_signed_byte(0.5), 192);
        assert_eq!(to_signed_byte(-0.5), 64);
    }

    #[test]
    fn signed_truncates_toward_zero() {
        assert_eq!(to_signed_byte(-0.001), 128);
        assert_eq!(to_signed_byte(0.001), 128);
        assert_eq!(to_signed_byte(-0.70707), 38);
        assert_eq!(to_signed_byte(0.70707), 218);
    }

    #[test]
    fn unsigned_reference_points() {
        assert_eq!(to_unsigned_byte(0.0), 0);
        assert_eq!(to_unsigned_byte(1.0), 255);
        assert_eq!(to_unsigned_byte(0.5), 128);
        assert_eq!(to_unsigned_byte(0.011), 2);
    }

    #[test]
    fn encodings_are_monotonic() {
        let steps = 4096;
        let mut prev_signed = 0u8;
        let mut prev_unsigned = 0u8;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let s = to_signed_byte(t * 2.0 - 1.0);
            let u = to_unsigned_byte(t);
            assert!(s >= prev_signed, "signed not monotonic at t={t}");
            assert!(u >= prev_unsigned, "unsigned not monotonic at t={t}");
            prev_signed = s;
            prev_unsigned = u;
        }
        assert_eq!(prev_signed, 255);
        assert_eq!(prev_unsigned, 255);
    }

    #[test]
    fn out_of_domain_input_saturates() {
        assert_eq!(to_signed_byte(2.0), 255);
        assert_eq!(to_signed_byte(-2.0), 0);
        assert_eq!(to_signed_byte(f64::NAN), 128);
        assert_eq!(to_unsigned_byte(-0.5), 0);
        assert_eq!(to_unsigned_byte(1.5), 255);
    }
}
