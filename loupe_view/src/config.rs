// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tuning constants for an [`ImageView`](crate::ImageView).
///
/// These are fixed for the lifetime of a view; construct a new view to change
/// them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Multiplicative step applied by a single zoom in (its inverse zooms out).
    pub zoom_factor: f64,
    /// Smallest scale a zoom step may reach.
    pub min_zoom: f64,
    /// Largest scale a zoom step may reach.
    pub max_zoom: f64,
    /// Minimum number of container pixels of the image that must stay visible
    /// along each axis.
    pub min_visible_margin: f64,
    /// Snap zoom steps to powers of two in device pixels.
    pub pixel_perfect: bool,
}

impl ViewConfig {
    /// Default zoom step.
    pub const ZOOM_FACTOR: f64 = 1.2;
    /// Default lower zoom bound.
    pub const MIN_ZOOM: f64 = 1.0 / 64.0;
    /// Default upper zoom bound.
    pub const MAX_ZOOM: f64 = 1000.0;
    /// Default visible margin, in CSS pixels.
    pub const MIN_VISIBLE_MARGIN: f64 = 32.0;

    /// Returns the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zoom_factor: Self::ZOOM_FACTOR,
            min_zoom: Self::MIN_ZOOM,
            max_zoom: Self::MAX_ZOOM,
            min_visible_margin: Self::MIN_VISIBLE_MARGIN,
            pixel_perfect: false,
        }
    }

    /// Sets the zoom step.
    ///
    /// Values that are not finite or not greater than `1.0` are ignored.
    #[must_use]
    pub fn with_zoom_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor > 1.0 {
            self.zoom_factor = factor;
        }
        self
    }

    /// Sets the zoom bounds.
    ///
    /// The range is normalized so that `min_zoom <= max_zoom`. Non-positive or
    /// non-finite bounds are ignored.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        let valid = |z: f64| z.is_finite() && z > 0.0;
        if !valid(min_zoom) || !valid(max_zoom) {
            return self;
        }
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Sets the minimum visible margin in CSS pixels.
    #[must_use]
    pub fn with_min_visible_margin(mut self, margin: f64) -> Self {
        if margin.is_finite() && margin >= 0.0 {
            self.min_visible_margin = margin;
        }
        self
    }

    /// Enables or disables power-of-two zoom steps.
    #[must_use]
    pub fn with_pixel_perfect(mut self, pixel_perfect: bool) -> Self {
        self.pixel_perfect = pixel_perfect;
        self
    }

    /// Returns `true` if `scale` lies within the configured zoom bounds.
    #[must_use]
    pub fn zoom_in_bounds(&self, scale: f64) -> bool {
        self.min_zoom <= scale && scale <= self.max_zoom
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ViewConfig;

    #[test]
    fn defaults_match_constants() {
        let config = ViewConfig::default();
        assert_eq!(config.zoom_factor, 1.2);
        assert_eq!(config.min_zoom, 1.0 / 64.0);
        assert_eq!(config.max_zoom, 1000.0);
        assert_eq!(config.min_visible_margin, 32.0);
        assert!(!config.pixel_perfect);
    }

    #[test]
    fn zoom_limits_are_normalized_and_validated() {
        let config = ViewConfig::new().with_zoom_limits(8.0, 0.5);
        assert_eq!(config.min_zoom, 0.5);
        assert_eq!(config.max_zoom, 8.0);

        let rejected = config.with_zoom_limits(0.0, 4.0);
        assert_eq!(rejected, config);
        let rejected = config.with_zoom_limits(f64::NAN, 4.0);
        assert_eq!(rejected, config);
    }

    #[test]
    fn zoom_factor_must_grow() {
        let config = ViewConfig::new().with_zoom_factor(0.9);
        assert_eq!(config.zoom_factor, ViewConfig::ZOOM_FACTOR);
        let config = config.with_zoom_factor(2.0);
        assert_eq!(config.zoom_factor, 2.0);
    }

    #[test]
    fn bounds_are_inclusive() {
        let config = ViewConfig::default();
        assert!(config.zoom_in_bounds(ViewConfig::MIN_ZOOM));
        assert!(config.zoom_in_bounds(ViewConfig::MAX_ZOOM));
        assert!(!config.zoom_in_bounds(ViewConfig::MAX_ZOOM * 1.0001));
    }
}
