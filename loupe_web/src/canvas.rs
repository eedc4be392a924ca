// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};
use loupe_viewport::{PixelBuffer, Surface};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, ImageData, Window};

use crate::WebError;

/// A `<canvas>` inside a container element.
///
/// The canvas backing store has one pixel per image pixel; zoom and pan are
/// CSS transforms on the canvas element, with the transform origin at its
/// top-left corner.
#[derive(Debug)]
pub struct CanvasSurface {
    window: Window,
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Appends a canvas to `container`.
    pub fn new(container: HtmlElement) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = container.owner_document().ok_or(WebError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| WebError::UnexpectedType("HtmlCanvasElement"))?;
        container.append_child(&canvas)?;
        canvas.style().set_property("transform-origin", "0 0")?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::FALSE)?;
        let context: CanvasRenderingContext2d = canvas
            .get_context_with_context_options("2d", &options)?
            .ok_or(WebError::NoContext)?
            .dyn_into()
            .map_err(|_| WebError::UnexpectedType("CanvasRenderingContext2d"))?;

        // Keyboard input needs a focusable container.
        if container.tab_index() < 0 {
            container.set_tab_index(0);
        }

        Ok(Self {
            window,
            container,
            canvas,
            context,
        })
    }

    /// Returns the container element.
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Returns the canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn container_rect(&self) -> Rect {
        let rect = self.container.get_bounding_client_rect();
        Rect::from_origin_size(
            Point::new(rect.x(), rect.y()),
            Size::new(rect.width(), rect.height()),
        )
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.device_pixel_ratio()
    }

    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_transform(&mut self, transform: Affine) {
        let [scale, _, _, _, x, y] = transform.as_coeffs();
        let css = format!("translate({x}px, {y}px) scale({scale})");
        if let Err(err) = self.canvas.style().set_property("transform", &css) {
            tracing::warn!(?err, "failed to set canvas transform");
        }
    }

    fn present(&mut self, buffer: &PixelBuffer) {
        let bytes = buffer.to_rgba8();
        let image = match ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(bytes.as_slice()),
            buffer.width(),
            buffer.height(),
        ) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(?err, "failed to create image data");
                return;
            }
        };
        if let Err(err) = self.context.put_image_data(&image, 0.0, 0.0) {
            tracing::warn!(?err, "failed to put image data");
        }
    }

    fn focus_container(&mut self) {
        if let Err(err) = self.container.focus() {
            tracing::warn!(?err, "failed to focus container");
        }
    }
}
