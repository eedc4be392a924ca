// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use kurbo::{Size, Vec2};

use crate::ViewTransform;

/// How [`fit_transform`] sizes the image inside its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitScale {
    /// Scale to the largest power of two (in device pixels) at which the
    /// whole image fits in the container.
    #[default]
    Contain,
    /// Show the image 1:1, one image pixel per device pixel.
    Actual,
}

/// Computes a transform that centers a `buffer`-sized image in `container`.
///
/// `container` is measured in CSS pixels and `buffer` in image pixels. The
/// target scale is chosen in device pixels (so that [`FitScale::Actual`]
/// maps one image pixel onto one device pixel) and then divided by
/// `device_pixel_ratio` to express it in CSS pixels. Offsets are snapped
/// down to whole device pixels and then to whole CSS pixels.
///
/// Returns `None` when any input is empty, negative, or not finite; callers
/// should keep their previous transform in that case.
///
/// ```
/// use kurbo::Size;
/// use loupe_view::{FitScale, fit_transform};
///
/// let fit = fit_transform(
///     Size::new(800.0, 600.0),
///     Size::new(400.0, 300.0),
///     1.0,
///     FitScale::Contain,
/// )
/// .unwrap();
/// assert_eq!(fit.scale, 2.0);
/// assert_eq!((fit.offset.x, fit.offset.y), (0.0, 0.0));
/// ```
#[must_use]
pub fn fit_transform(
    container: Size,
    buffer: Size,
    device_pixel_ratio: f64,
    mode: FitScale,
) -> Option<ViewTransform> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(container.width)
        || !positive(container.height)
        || !positive(buffer.width)
        || !positive(buffer.height)
        || !positive(device_pixel_ratio)
    {
        return None;
    }

    let dpr = device_pixel_ratio;
    let device_w = container.width * dpr;
    let device_h = container.height * dpr;

    let scale = match mode {
        FitScale::Actual => 1.0,
        FitScale::Contain => {
            power_of_two_at_most((device_w / buffer.width).min(device_h / buffer.height))?
        }
    };

    let left = (device_w / 2.0 - buffer.width * scale / 2.0).floor();
    let top = (device_h / 2.0 - buffer.height * scale / 2.0).floor();
    Some(ViewTransform::new(
        Vec2::new((left / dpr).floor(), (top / dpr).floor()),
        scale / dpr,
    ))
}

/// Returns the largest power of two that is `<= x`.
///
/// Returns `None` for non-positive or non-finite `x`. The search is exact:
/// it only multiplies or divides by two.
#[must_use]
pub fn power_of_two_at_most(x: f64) -> Option<f64> {
    if !x.is_finite() || x <= 0.0 {
        return None;
    }
    let mut p = 1.0_f64;
    if x >= 1.0 {
        while p * 2.0 <= x {
            p *= 2.0;
        }
    } else {
        while p > x {
            p /= 2.0;
        }
    }
    Some(p)
}

/// Returns the smallest power of two that is strictly greater than `x`.
#[must_use]
pub(crate) fn power_of_two_above(x: f64) -> Option<f64> {
    let p = power_of_two_at_most(x)?;
    Some(p * 2.0)
}

/// Returns the largest power of two that is strictly less than `x`.
#[must_use]
pub(crate) fn power_of_two_below(x: f64) -> Option<f64> {
    let p = power_of_two_at_most(x)?;
    Some(if p < x { p } else { p / 2.0 })
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{FitScale, fit_transform, power_of_two_above, power_of_two_at_most, power_of_two_below};

    fn is_power_of_two(x: f64) -> bool {
        power_of_two_at_most(x) == Some(x)
    }

    #[test]
    fn exact_fit_has_zero_offsets() {
        let fit = fit_transform(
            Size::new(800.0, 600.0),
            Size::new(400.0, 300.0),
            1.0,
            FitScale::Contain,
        )
        .unwrap();
        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.offset.x, 0.0);
        assert_eq!(fit.offset.y, 0.0);
    }

    #[test]
    fn contain_snaps_down_to_power_of_two() {
        // min(1000/300, 700/200) = 3.33.. -> 2
        let fit = fit_transform(
            Size::new(1000.0, 700.0),
            Size::new(300.0, 200.0),
            1.0,
            FitScale::Contain,
        )
        .unwrap();
        assert_eq!(fit.scale, 2.0);
        assert_eq!(fit.offset.x, 200.0);
        assert_eq!(fit.offset.y, 150.0);

        // Shrinking: min(100/1000, 100/300) = 0.1 -> 1/16
        let fit = fit_transform(
            Size::new(100.0, 100.0),
            Size::new(1000.0, 300.0),
            1.0,
            FitScale::Contain,
        )
        .unwrap();
        assert_eq!(fit.scale, 1.0 / 16.0);
        assert!(is_power_of_two(fit.scale));
    }

    #[test]
    fn actual_is_one_device_pixel_per_image_pixel() {
        for (w, h) in [(10.0, 10.0), (800.0, 600.0), (3000.0, 17.0)] {
            let fit = fit_transform(
                Size::new(w, h),
                Size::new(640.0, 480.0),
                1.0,
                FitScale::Actual,
            )
            .unwrap();
            assert_eq!(fit.scale, 1.0);
        }
    }

    #[test]
    fn device_pixel_ratio_is_divided_out() {
        let fit = fit_transform(
            Size::new(400.0, 300.0),
            Size::new(400.0, 300.0),
            2.0,
            FitScale::Actual,
        )
        .unwrap();
        assert_eq!(fit.scale, 0.5);
        // Device container is 800x600; a 1:1 image of 400x300 is centered at (200, 150)
        // device pixels, i.e. (100, 75) CSS pixels.
        assert_eq!(fit.offset.x, 100.0);
        assert_eq!(fit.offset.y, 75.0);

        let fit = fit_transform(
            Size::new(400.0, 300.0),
            Size::new(400.0, 300.0),
            2.0,
            FitScale::Contain,
        )
        .unwrap();
        assert_eq!(fit.scale * 2.0, 2.0);
    }

    #[test]
    fn offsets_are_floored() {
        let fit = fit_transform(
            Size::new(101.0, 51.0),
            Size::new(10.0, 10.0),
            1.0,
            FitScale::Actual,
        )
        .unwrap();
        assert_eq!(fit.offset.x, 45.0);
        assert_eq!(fit.offset.y, 20.0);
    }

    #[test]
    fn degenerate_inputs_yield_none() {
        let buffer = Size::new(10.0, 10.0);
        assert!(fit_transform(Size::ZERO, buffer, 1.0, FitScale::Contain).is_none());
        assert!(fit_transform(Size::new(10.0, 0.0), buffer, 1.0, FitScale::Actual).is_none());
        assert!(fit_transform(Size::new(10.0, 10.0), Size::ZERO, 1.0, FitScale::Contain).is_none());
        assert!(fit_transform(Size::new(10.0, 10.0), buffer, 0.0, FitScale::Contain).is_none());
        assert!(
            fit_transform(Size::new(f64::NAN, 10.0), buffer, 1.0, FitScale::Contain).is_none()
        );
    }

    #[test]
    fn power_of_two_helpers() {
        assert_eq!(power_of_two_at_most(1.0), Some(1.0));
        assert_eq!(power_of_two_at_most(3.9), Some(2.0));
        assert_eq!(power_of_two_at_most(0.3), Some(0.25));
        assert_eq!(power_of_two_at_most(0.0), None);
        assert_eq!(power_of_two_at_most(f64::INFINITY), None);

        assert_eq!(power_of_two_above(2.0), Some(4.0));
        assert_eq!(power_of_two_above(3.0), Some(4.0));
        assert_eq!(power_of_two_below(2.0), Some(1.0));
        assert_eq!(power_of_two_below(3.0), Some(2.0));
        assert_eq!(power_of_two_below(0.5), Some(0.25));
    }
}
