// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe Drag Lock: continuous drags that hold exclusive pointer capture.
//!
//! Panning an image by dragging works best when the pointer is captured (or
//! locked) for the duration of the gesture: the pointer can travel beyond the
//! window edge and the platform reports raw relative motion. Capture is
//! granted asynchronously, though, and the gesture may end before the grant
//! arrives. This crate provides:
//!
//! - [`capture_channel`]: a one-shot handshake between the code that wants
//!   capture ([`CaptureRequest`], a cancellable [`Future`](core::future::Future))
//!   and the platform that grants it ([`CaptureResolver`]).
//! - [`CapturePlatform`]: the trait a platform implements to hand out
//!   requests and take capture back.
//! - [`DragLock`]: the `Idle -> Acquiring -> Active` state machine that turns
//!   drag samples into pan deltas only while capture is held.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use loupe_drag_lock::{
//!     CaptureHandle, CapturePlatform, CaptureRequest, CaptureResolver, DragLock, DragPhase,
//!     capture_channel,
//! };
//!
//! #[derive(Default)]
//! struct Platform {
//!     pending: Option<CaptureResolver>,
//! }
//!
//! impl CapturePlatform for Platform {
//!     fn request_capture(&mut self) -> CaptureRequest {
//!         let (resolver, request) = capture_channel();
//!         self.pending = Some(resolver);
//!         request
//!     }
//!
//!     fn release_capture(&mut self, _handle: CaptureHandle) {}
//! }
//!
//! let mut platform = Platform::default();
//! let mut lock = DragLock::new();
//!
//! lock.start(&mut platform);
//! assert_eq!(lock.phase(), DragPhase::Acquiring);
//!
//! // Later, the platform confirms from its own callback.
//! assert!(platform.pending.take().unwrap().grant());
//! assert_eq!(lock.pump(), DragPhase::Active);
//!
//! // The first sample after confirmation is dropped.
//! assert_eq!(lock.drag(Vec2::new(40.0, 0.0)), None);
//! assert_eq!(lock.drag(Vec2::new(2.0, 1.0)), Some(Vec2::new(2.0, 1.0)));
//!
//! lock.end(&mut platform);
//! assert_eq!(lock.phase(), DragPhase::Idle);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod capture;
mod lock;

pub use capture::{
    CaptureError, CaptureHandle, CapturePlatform, CaptureRequest, CaptureResolver,
    capture_channel,
};
pub use lock::{DragLock, DragPhase};
