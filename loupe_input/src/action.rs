// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use loupe_view::{FitScale, ImagePoint, ImageView, fit_transform};

use crate::{PointerButton, PointerButtons};

/// Which pointer event produced a [`PointerHit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A button was pressed.
    Down,
    /// The pointer moved.
    Move,
    /// A button was released.
    Up,
}

/// A pointer event resolved into image space, for the host application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerHit {
    /// Which event this was.
    pub kind: PointerKind,
    /// The button whose state changed, for presses and releases.
    pub button: Option<PointerButton>,
    /// All buttons held after the event.
    pub buttons: PointerButtons,
    /// Container-relative position, CSS pixels.
    pub position: Point,
    /// The same position in image space.
    pub point: ImagePoint,
}

/// A change the router asks a [`ViewTarget`] to make.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewAction {
    /// Pan by a container-space delta.
    Pan(Vec2),
    /// Zoom one step around `anchor` (container space), or the container
    /// center when `anchor` is `None`.
    Zoom {
        /// Zoom out instead of in.
        zoom_out: bool,
        /// Fixed point of the zoom.
        anchor: Option<Point>,
    },
    /// Refit the image to the container.
    Fit(FitScale),
    /// Begin a captured drag pan.
    BeginDrag,
    /// One drag sample, already negated and divided by the device pixel ratio.
    Drag(Vec2),
    /// End the current drag pan, whatever its phase.
    EndDrag,
    /// Forward a pointer event to the host application.
    Pointer(PointerHit),
    /// Take keyboard focus back.
    Refocus,
}

/// Something a [`ViewAction`] can be applied to.
///
/// The router only reads from the target while routing; all mutation
/// happens in [`ViewTarget::apply`].
pub trait ViewTarget {
    /// Applies one action.
    fn apply(&mut self, action: ViewAction);

    /// Returns the client-space position of the container's top-left corner.
    fn container_origin(&self) -> Point {
        Point::ORIGIN
    }

    /// Returns the current device pixel ratio.
    fn device_pixel_ratio(&self) -> f64;

    /// Resolves a container-space point into image space.
    fn image_point(&self, container_pt: Point) -> ImagePoint;
}

/// A bare [`ImageView`] as a target.
///
/// Drags pan immediately (there is no capture to wait for), fits use the
/// view's own container size, and pointer forwarding and refocusing are
/// ignored.
impl ViewTarget for ImageView {
    fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::Pan(delta) | ViewAction::Drag(delta) => self.pan(delta),
            ViewAction::Zoom { zoom_out, anchor } => {
                match anchor {
                    Some(anchor) => self.zoom(zoom_out, anchor),
                    None => self.zoom_at_center(zoom_out),
                };
            }
            ViewAction::Fit(mode) => {
                if let Some(fit) = fit_transform(
                    self.container_size(),
                    self.buffer_size(),
                    ImageView::device_pixel_ratio(self),
                    mode,
                ) {
                    self.set_transform(fit);
                }
            }
            ViewAction::BeginDrag
            | ViewAction::EndDrag
            | ViewAction::Pointer(_)
            | ViewAction::Refocus => {}
        }
    }

    fn device_pixel_ratio(&self) -> f64 {
        ImageView::device_pixel_ratio(self)
    }

    fn image_point(&self, container_pt: Point) -> ImagePoint {
        self.to_image_space(container_pt)
    }
}
