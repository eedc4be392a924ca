// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use kurbo::Point;
use loupe_drag_lock::{CapturePlatform, DragLock, DragPhase};
use loupe_input::{InputEvent, InputRouter, PointerHit, ViewAction, ViewTarget};
use loupe_view::{FitScale, ImagePoint, ImageView, fit_transform};

use crate::{PixelBuffer, Surface, ViewportConfig};

/// Callback receiving pointer events resolved into image space.
pub type PointerHandler = Box<dyn FnMut(&PointerHit, &mut PointerContext<'_>)>;

/// What a [`PointerHandler`] may touch while it runs.
///
/// The handler runs while the viewport is busy with the event, so it reaches
/// the pixels through here instead of through the viewport.
#[derive(Debug)]
pub struct PointerContext<'a> {
    buffer: Option<&'a mut PixelBuffer>,
    redraw: bool,
}

impl PointerContext<'_> {
    /// Returns the current image, if one was loaded.
    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_deref()
    }

    /// Returns the current image's pixels mutably, if one was loaded.
    pub fn pixels_mut(&mut self) -> Option<&mut [u32]> {
        self.buffer.as_deref_mut().map(PixelBuffer::pixels_mut)
    }

    /// Presents the pixels once the handler returns.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }
}

/// A pannable, zoomable image inside a container.
///
/// `Viewport` ties an [`ImageView`], a [`DragLock`] and an [`InputRouter`]
/// to a platform [`Surface`] and [`CapturePlatform`]. The host application
/// writes pixels into the buffer returned by [`load`](Self::load), calls
/// [`refresh`](Self::refresh) to show them, and feeds input through
/// [`handle`](Self::handle).
pub struct Viewport<S, P> {
    surface: S,
    platform: P,
    view: ImageView,
    drag: DragLock,
    router: InputRouter,
    buffer: Option<PixelBuffer>,
    origin: Point,
    pointer_handler: Option<PointerHandler>,
    applied_revision: Option<u64>,
}

impl<S: fmt::Debug, P: fmt::Debug> fmt::Debug for Viewport<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("surface", &self.surface)
            .field("platform", &self.platform)
            .field("view", &self.view)
            .field("drag", &self.drag)
            .field("router", &self.router)
            .field("buffer", &self.buffer.as_ref().map(PixelBuffer::size))
            .field("origin", &self.origin)
            .field("pointer_handler", &self.pointer_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: Surface, P: CapturePlatform> Viewport<S, P> {
    /// Creates a viewport with no image loaded.
    pub fn new(surface: S, platform: P, config: ViewportConfig) -> Self {
        let mut viewport = Self {
            surface,
            platform,
            view: ImageView::new(config.view),
            drag: DragLock::new(),
            router: InputRouter::new(config.input),
            buffer: None,
            origin: Point::ORIGIN,
            pointer_handler: None,
            applied_revision: None,
        };
        viewport.sync_metrics();
        viewport
    }

    /// Returns the transform engine.
    #[must_use]
    pub fn view(&self) -> &ImageView {
        &self.view
    }

    /// Returns the phase of the drag pan.
    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns the capture platform.
    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Returns the capture platform mutably.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Returns the current image, if one was loaded.
    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// Returns the current image's pixels mutably, if one was loaded.
    pub fn pixels_mut(&mut self) -> Option<&mut [u32]> {
        self.buffer.as_mut().map(PixelBuffer::pixels_mut)
    }

    /// Installs the callback that receives pointer events in image space.
    ///
    /// The callback may edit the pixels through its [`PointerContext`] and
    /// ask for them to be presented afterwards.
    pub fn set_pointer_handler(
        &mut self,
        handler: impl FnMut(&PointerHit, &mut PointerContext<'_>) + 'static,
    ) {
        self.pointer_handler = Some(Box::new(handler));
    }

    /// Removes the pointer callback.
    pub fn clear_pointer_handler(&mut self) {
        self.pointer_handler = None;
    }

    /// Replaces the image with a blank `width` x `height` one.
    ///
    /// The surface is resized, the image is fitted to the container and
    /// presented, and the new pixel store is returned for the caller to fill
    /// before calling [`refresh`](Self::refresh).
    ///
    /// Returns `None`, keeping the current image, when the image would not
    /// fit in memory.
    pub fn load(&mut self, width: u32, height: u32) -> Option<&mut [u32]> {
        let Some(buffer) = PixelBuffer::new(width, height) else {
            tracing::warn!(width, height, "image too large; keeping the current one");
            return None;
        };
        tracing::debug!(width, height, "loading image");
        self.surface.resize_buffer(width, height);
        self.view.set_buffer_size(buffer.size());
        self.fit(FitScale::Contain);
        let buffer = self.buffer.insert(buffer);
        self.surface.present(buffer);
        Some(buffer.pixels_mut())
    }

    /// Presents the current pixels. Does nothing before the first
    /// [`load`](Self::load).
    pub fn refresh(&mut self) {
        if let Some(buffer) = &self.buffer {
            self.surface.present(buffer);
        }
    }

    /// Refits the image to the container.
    ///
    /// The container size and device pixel ratio are re-read first. If either
    /// size is degenerate the current transform is kept.
    pub fn fit(&mut self, mode: FitScale) {
        self.sync_metrics();
        let dpr = self.surface.device_pixel_ratio();
        match fit_transform(
            self.view.container_size(),
            self.view.buffer_size(),
            dpr,
            mode,
        ) {
            Some(fit) => self.view.set_transform(fit),
            None => tracing::debug!(
                container = ?self.view.container_size(),
                buffer = ?self.view.buffer_size(),
                dpr,
                "skipping fit of degenerate image or container"
            ),
        }
        self.push_transform();
    }

    /// Handles one input event.
    ///
    /// Returns `true` if the viewport consumed it; `false` means the host
    /// application may act on it.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        self.sync_metrics();
        let routed = self.router.route(event, &*self);
        let consumed = !routed.is_empty();
        for action in routed {
            self.apply(action);
        }
        self.push_transform();
        consumed
    }

    /// Call when the platform reports a capture change, so that a pending
    /// capture request is resolved.
    pub fn capture_changed(&mut self) -> DragPhase {
        self.drag.pump()
    }

    /// Call when the platform revokes capture on its own.
    pub fn capture_lost(&mut self) {
        self.drag.capture_lost();
    }

    fn sync_metrics(&mut self) {
        let rect = self.surface.container_rect();
        self.origin = rect.origin();
        self.view.set_container_size(rect.size());
        self.view
            .set_device_pixel_ratio(self.surface.device_pixel_ratio());
    }

    fn push_transform(&mut self) {
        let revision = self.view.revision();
        if self.applied_revision != Some(revision) {
            self.surface.set_transform(self.view.affine());
            self.applied_revision = Some(revision);
        }
    }
}

impl<S: Surface, P: CapturePlatform> ViewTarget for Viewport<S, P> {
    fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::Pan(delta) => self.view.pan(delta),
            ViewAction::Zoom { zoom_out, anchor } => {
                match anchor {
                    Some(anchor) => self.view.zoom(zoom_out, anchor),
                    None => self.view.zoom_at_center(zoom_out),
                };
            }
            ViewAction::Fit(mode) => self.fit(mode),
            ViewAction::BeginDrag => {
                self.drag.start(&mut self.platform);
            }
            ViewAction::Drag(delta) => {
                if let Some(delta) = self.drag.drag(delta) {
                    self.view.pan(delta);
                }
            }
            ViewAction::EndDrag => self.drag.end(&mut self.platform),
            ViewAction::Pointer(hit) => {
                let Some(handler) = &mut self.pointer_handler else {
                    return;
                };
                let mut cx = PointerContext {
                    buffer: self.buffer.as_mut(),
                    redraw: false,
                };
                handler(&hit, &mut cx);
                if cx.redraw {
                    self.refresh();
                }
            }
            ViewAction::Refocus => self.surface.focus_container(),
        }
    }

    fn container_origin(&self) -> Point {
        self.origin
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.view.device_pixel_ratio()
    }

    fn image_point(&self, container_pt: Point) -> ImagePoint {
        self.view.to_image_space(container_pt)
    }
}
