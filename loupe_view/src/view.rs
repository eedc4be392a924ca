// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use kurbo::{Affine, Point, Size, Vec2};

use crate::config::ViewConfig;
use crate::fit::{power_of_two_above, power_of_two_below};

/// Pan offset and uniform scale of the displayed image.
///
/// `offset` is the container-space position (CSS pixels) of the image's
/// top-left corner; `scale` is the number of CSS pixels per image pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTransform {
    /// Container-space position of the image origin.
    pub offset: Vec2,
    /// CSS pixels per image pixel.
    pub scale: f64,
}

impl ViewTransform {
    /// The identity transform: image origin at the container origin, 1:1.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform from an offset and a scale.
    #[must_use]
    pub const fn new(offset: Vec2, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Returns the equivalent affine map from image space to container space.
    #[must_use]
    pub fn to_affine(self) -> Affine {
        // Translate by the offset, then scale about the container origin.
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A container-space point resolved into image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePoint {
    /// Image-space X, in (fractional) image pixels.
    pub x: f64,
    /// Image-space Y, in (fractional) image pixels.
    pub y: f64,
    /// Whether the point lies on the image.
    pub inside: bool,
    /// Row-major pixel index `floor(y) * width + floor(x)`, present only when
    /// [`inside`](Self::inside) is `true`.
    pub index: Option<usize>,
}

impl ImagePoint {
    /// Returns the image-space position as a [`Point`].
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The transform engine of an image viewport.
///
/// `ImageView` owns a [`ViewTransform`] mapping an image of `buffer_size`
/// image pixels into a container of `container_size` CSS pixels. Every
/// mutation goes through [`ImageView::set`], which clamps the offset so that
/// at least [`ViewConfig::min_visible_margin`] pixels of the image remain
/// inside the container on each axis, then rebuilds the cached affine maps.
///
/// The scale is only bounded by [`ImageView::zoom`]; [`ImageView::set`]
/// stores whatever scale it is given.
///
/// ```
/// use kurbo::{Point, Size};
/// use loupe_view::{ImageView, ViewConfig};
///
/// let mut view = ImageView::new(ViewConfig::default());
/// view.set_container_size(Size::new(800.0, 600.0));
/// view.set_buffer_size(Size::new(400.0, 300.0));
///
/// // Zoom in around the container center; the center stays put.
/// let before = view.to_image_space(Point::new(400.0, 300.0));
/// assert!(view.zoom(false, Point::new(400.0, 300.0)));
/// let after = view.to_image_space(Point::new(400.0, 300.0));
/// assert!((before.x - after.x).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct ImageView {
    config: ViewConfig,
    container: Size,
    buffer: Size,
    device_pixel_ratio: f64,
    transform: ViewTransform,
    image_to_container: Affine,
    container_to_image: Affine,
    revision: u64,
}

impl ImageView {
    /// Creates a view with an empty container and buffer and the identity transform.
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            container: Size::ZERO,
            buffer: Size::ZERO,
            device_pixel_ratio: 1.0,
            transform: ViewTransform::IDENTITY,
            image_to_container: Affine::IDENTITY,
            container_to_image: Affine::IDENTITY,
            revision: 0,
        }
    }

    /// Returns the configuration this view was built with.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the container size in CSS pixels.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Updates the container size in CSS pixels.
    ///
    /// The transform is left untouched; the next mutation clamps against the
    /// new size.
    pub fn set_container_size(&mut self, size: Size) {
        self.container = size;
    }

    /// Returns the image size in image pixels.
    #[must_use]
    pub fn buffer_size(&self) -> Size {
        self.buffer
    }

    /// Updates the image size in image pixels.
    pub fn set_buffer_size(&mut self, size: Size) {
        self.buffer = size;
    }

    /// Returns the device pixel ratio used for pixel-perfect zoom steps.
    #[must_use]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Updates the device pixel ratio. Non-positive or non-finite values are ignored.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        if dpr.is_finite() && dpr > 0.0 {
            self.device_pixel_ratio = dpr;
        }
    }

    /// Returns the current transform.
    #[must_use]
    pub fn get(&self) -> ViewTransform {
        self.transform
    }

    /// Stores `offset` and `scale`, clamps the offset, and rebuilds the affine maps.
    ///
    /// The offset is clamped into
    /// `[margin - buffer * scale, container - margin]` per axis. When the
    /// container is narrower than two margins the upper bound wins. The scale
    /// is stored as given.
    pub fn set(&mut self, offset: Vec2, scale: f64) {
        let margin = self.config.min_visible_margin;
        let clamp_axis = |v: f64, image_extent: f64, container_extent: f64| {
            v.max(margin - image_extent * scale)
                .min(container_extent - margin)
        };
        let offset = Vec2::new(
            clamp_axis(offset.x, self.buffer.width, self.container.width),
            clamp_axis(offset.y, self.buffer.height, self.container.height),
        );
        self.transform = ViewTransform::new(offset, scale);
        self.rebuild_transforms();
        self.revision = self.revision.wrapping_add(1);
    }

    /// Applies a complete [`ViewTransform`] through [`ImageView::set`].
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.set(transform.offset, transform.scale);
    }

    /// Pans by a delta in container pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let ViewTransform { offset, scale } = self.transform;
        self.set(offset + delta, scale);
    }

    /// Zooms one step in (or out, if `zoom_out`) keeping `anchor` fixed.
    ///
    /// `anchor` is in container coordinates. If the resulting scale would
    /// leave `[min_zoom, max_zoom]` nothing changes and `false` is returned.
    pub fn zoom(&mut self, zoom_out: bool, anchor: Point) -> bool {
        let ViewTransform { offset, scale } = self.transform;
        let Some(new_scale) = self.next_scale(zoom_out) else {
            return false;
        };
        if !self.config.zoom_in_bounds(new_scale) {
            return false;
        }
        let factor = new_scale / scale;
        let anchor = anchor.to_vec2();
        self.set((offset - anchor) * factor + anchor, new_scale);
        true
    }

    /// Zooms one step about the center of the container.
    pub fn zoom_at_center(&mut self, zoom_out: bool) -> bool {
        let center = Point::new(self.container.width / 2.0, self.container.height / 2.0);
        self.zoom(zoom_out, center)
    }

    /// Converts a container-space point into image space.
    #[must_use]
    pub fn to_image_space(&self, container_pt: Point) -> ImagePoint {
        let ViewTransform { offset, scale } = self.transform;
        let x = (container_pt.x - offset.x) / scale;
        let y = (container_pt.y - offset.y) / scale;
        let inside = 0.0 <= x && x < self.buffer.width && 0.0 <= y && y < self.buffer.height;
        let index = inside.then(|| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "x and y are non-negative and below the buffer extent here."
            )]
            let (col, row, width) = (
                x.floor() as usize,
                y.floor() as usize,
                self.buffer.width as usize,
            );
            row * width + col
        });
        ImagePoint {
            x,
            y,
            inside,
            index,
        }
    }

    /// Converts an image-space point into container space.
    #[must_use]
    pub fn to_container_space(&self, image_pt: Point) -> Point {
        self.image_to_container * image_pt
    }

    /// Returns the affine map from image space to container space.
    ///
    /// This is the transform a rendering surface should apply to the image,
    /// with its origin at the container's top-left corner.
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.image_to_container
    }

    /// Returns the affine map from container space to image space.
    #[must_use]
    pub fn inverse_affine(&self) -> Affine {
        self.container_to_image
    }

    /// Returns a counter that changes whenever [`ImageView::set`] runs.
    ///
    /// Surfaces can compare it against the last value they applied to skip
    /// redundant updates.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn next_scale(&self, zoom_out: bool) -> Option<f64> {
        let scale = self.transform.scale;
        if !self.config.pixel_perfect {
            let factor = if zoom_out {
                1.0 / self.config.zoom_factor
            } else {
                self.config.zoom_factor
            };
            return Some(scale * factor);
        }
        // Step between powers of two of device pixels per image pixel.
        let dpr = self.device_pixel_ratio;
        let device_scale = scale * dpr;
        let next = if zoom_out {
            power_of_two_below(device_scale)?
        } else {
            power_of_two_above(device_scale)?
        };
        Some(next / dpr)
    }

    fn rebuild_transforms(&mut self) {
        self.image_to_container = self.transform.to_affine();
        self.container_to_image = self.image_to_container.inverse();
    }
}

impl Default for ImageView {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}
