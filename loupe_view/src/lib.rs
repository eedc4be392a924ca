// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe View: the transform engine of an image viewport.
//!
//! This crate provides a small, headless model of a raster image displayed
//! inside a rectangular container. It focuses on:
//! - The view transform (pan offset + uniform scale) and its edge clamping.
//! - Zooming around a fixed container point within configured bounds.
//! - Fitting the image to the container at a power-of-two scale, or 1:1.
//! - Converting container points back into image pixels.
//!
//! It does **not** own pixels, input handling, or a rendering backend.
//! Callers are expected to:
//! - Feed the container size, image size and device pixel ratio into
//!   [`ImageView`].
//! - Apply [`ImageView::affine`] to whatever surface displays the image.
//! - Route input through a higher layer (for example `loupe_input`).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use loupe_view::{FitScale, ImageView, ViewConfig, fit_transform};
//!
//! let mut view = ImageView::new(ViewConfig::default());
//! view.set_container_size(Size::new(800.0, 600.0));
//! view.set_buffer_size(Size::new(400.0, 300.0));
//!
//! let fit = fit_transform(
//!     view.container_size(),
//!     view.buffer_size(),
//!     1.0,
//!     FitScale::Contain,
//! )
//! .unwrap();
//! view.set_transform(fit);
//! assert_eq!(view.get().scale, 2.0);
//!
//! // Panning far away is clamped so the image stays in reach.
//! view.pan(Vec2::new(1.0e6, 0.0));
//! assert_eq!(view.get().offset.x, 800.0 - 32.0);
//!
//! // Resolve a container point to a pixel.
//! let hit = view.to_image_space(Point::new(780.0, 10.0));
//! assert!(hit.inside);
//! assert_eq!(hit.index, Some(5 * 400 + 6));
//! ```
//!
//! ## Design notes
//!
//! - Scaling is **uniform** and there is no rotation.
//! - [`ImageView::set`] is the single choke point for mutation. It clamps
//!   offsets but never the scale; only [`ImageView::zoom`] honors the zoom
//!   bounds, and out-of-bounds zoom requests are silently ignored.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod fit;
mod view;

pub use config::ViewConfig;
pub use fit::{FitScale, fit_transform, power_of_two_at_most};
pub use view::{ImagePoint, ImageView, ViewTransform};
