//! This file is part of the xilem_audio_controls project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

//! Range clamping and normalisation shared by the control engine and the widgets.

use std::ops::RangeInclusive;

/// Coerce `value` into `range`.
///
/// A range with `start > end` is a caller error; the result is then unspecified.
pub fn clamp<T: PartialOrd + Copy>(value: T, range: &RangeInclusive<T>) -> T {
    if value < *range.start() {
        *range.start()
    } else if value > *range.end() {
        *range.end()
    } else {
        value
    }
}

/// Coerce `value` into `range`, writing the result back.
pub fn clamp_in_place<T: PartialOrd + Copy>(value: &mut T, range: &RangeInclusive<T>) {
    *value = clamp(*value, range);
}

/// Width of the range.
pub fn span(range: &RangeInclusive<f64>) -> f64 {
    range.end() - range.start()
}

/// Rescale `value` into `0..=1` relative to `range`. A zero-width range maps to 0.
pub fn normalized(value: f64, range: &RangeInclusive<f64>) -> f64 {
    let span = span(range);
    if span.abs() < f64::EPSILON {
        return 0.0;
    }
    clamp((value - range.start()) / span, &(0.0..=1.0))
}

/// Inverse of [`normalized`].
pub fn denormalized(n: f64, range: &RangeInclusive<f64>) -> f64 {
    range.start() + n * span(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamps_below_and_above() {
        assert_eq!(clamp(-3.0, &(0.0..=10.0)), 0.0);
        assert_eq!(clamp(12.5, &(0.0..=10.0)), 10.0);
        assert_eq!(clamp(4.0, &(0.0..=10.0)), 4.0);
    }

    #[test]
    fn clamps_integers() {
        assert_eq!(clamp(20_usize, &(0..=13)), 13);
        assert_eq!(clamp(-1_i32, &(0..=13)), 0);
    }

    #[test]
    fn clamp_in_place_writes_back() {
        let mut v = 140.0;
        clamp_in_place(&mut v, &(0.0..=100.0));
        assert_eq!(v, 100.0);
    }

    #[test]
    fn zero_width_range_normalizes_to_zero() {
        assert_eq!(normalized(5.0, &(5.0..=5.0)), 0.0);
    }

    #[test]
    fn normalizes_bipolar_range() {
        assert!((normalized(0.0, &(-1.0..=1.0)) - 0.5).abs() < 1e-12);
        assert!((denormalized(0.25, &(-1.0..=1.0)) + 0.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(value in -1e6f64..1e6, a in -1e3f64..1e3, b in -1e3f64..1e3) {
            let range = a.min(b)..=a.max(b);
            let c = clamp(value, &range);
            prop_assert!(*range.start() <= c && c <= *range.end());
        }

        #[test]
        fn clamp_is_identity_inside(lower in -1e3f64..0.0, upper in 0.0f64..1e3, t in 0.0f64..=1.0) {
            let range = lower..=upper;
            let value = lower + t * (upper - lower);
            let value = value.min(upper);
            prop_assert_eq!(clamp(value, &range), value);
        }
    }
}
