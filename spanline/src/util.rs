// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "only used when std float methods are unavailable")]
use core_maths::CoreFloat;

pub(crate) fn nearly_eq(x: f32, y: f32) -> bool {
    (x - y).abs() < f32::EPSILON
}

pub(crate) fn nearly_zero(x: f32) -> bool {
    nearly_eq(x, 0.)
}

/// Rounds a measured width to two decimal places.
///
/// Text backends report widths with a little noise (on the order of `0.001`).
/// Rounding every measurement keeps line-break decisions stable when the same
/// geometry is measured repeatedly.
///
/// Non-finite values are returned unchanged.
pub fn round_width(width: f32) -> f32 {
    if !width.is_finite() {
        return width;
    }
    (width * 100.0).round() / 100.0
}

/// Floors a layout width to a whole unit, clamping negative widths to zero.
pub(crate) fn floor_width(width: f32) -> f32 {
    if width.is_infinite() {
        return if width > 0.0 { f32::INFINITY } else { 0.0 };
    }
    width.floor().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_width_is_idempotent() {
        for x in [0.0, 1.0, 0.004, 0.005, 12.345_67, -3.336, 1e6 + 0.25, 99.999] {
            let once = round_width(x);
            assert_eq!(round_width(once), once, "rounding {x} twice changed it");
        }
    }

    #[test]
    fn round_width_absorbs_backend_noise() {
        assert_eq!(round_width(40.000_9), 40.0);
        assert_eq!(round_width(39.999_2), 40.0);
        assert_eq!(round_width(f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn floor_width_clamps() {
        assert_eq!(floor_width(50.9), 50.0);
        assert_eq!(floor_width(-4.0), 0.0);
        assert_eq!(floor_width(f32::INFINITY), f32::INFINITY);
        assert_eq!(floor_width(f32::NEG_INFINITY), 0.0);
    }
}
