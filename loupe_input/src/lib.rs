// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe Input: maps user input to image view actions.
//!
//! This crate turns platform-neutral [`InputEvent`]s into [`ViewAction`]s and
//! applies them to a [`ViewTarget`]. It is deliberately small and table-like:
//!
//! | Input | Action |
//! |-------|--------|
//! | pan button down | [`ViewAction::BeginDrag`] |
//! | move with only the pan button held | [`ViewAction::Drag`] (`-movement / dpr`) |
//! | pan button up | [`ViewAction::EndDrag`], then the event is forwarded |
//! | other pointer events | [`ViewAction::Pointer`] with the image-space point |
//! | wheel | [`ViewAction::Zoom`] about the pointer |
//! | arrow keys | [`ViewAction::Pan`] by [`InputConfig::pan_step`] |
//! | `Home` / `F`, `End` / `f` | [`ViewAction::Fit`] (contain, 1:1) |
//! | `+` / `=`, `-` | [`ViewAction::Zoom`] about the container center |
//! | resize | [`ViewAction::Fit`] (contain) |
//! | focus lost to outside | [`ViewAction::Refocus`] |
//!
//! Holding Ctrl, Shift or Alt hands an event back to the host application
//! (the router produces nothing for it). Releasing the pan button is the
//! exception: it always ends the drag so that a drag can never stick.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use loupe_input::{InputEvent, InputRouter, KeyInput};
//! use loupe_view::{ImageView, ViewConfig};
//! use ui_events::keyboard::{Key, NamedKey};
//!
//! let mut view = ImageView::new(ViewConfig::default());
//! view.set_container_size(Size::new(800.0, 600.0));
//! view.set_buffer_size(Size::new(400.0, 300.0));
//!
//! let router = InputRouter::default();
//! let left = InputEvent::KeyDown(KeyInput::new(Key::Named(NamedKey::ArrowLeft)));
//! assert!(router.dispatch(&left, &mut view));
//! assert_eq!(view.get().offset, Vec2::new(32.0, 0.0));
//!
//! // Resizing refits the image.
//! assert!(router.dispatch(&InputEvent::Resize, &mut view));
//! assert_eq!(view.get().scale, 2.0);
//! ```
//!
//! [`ImageView`](loupe_view::ImageView) implements [`ViewTarget`] directly,
//! panning immediately on drag. Hosts that hold pointer capture during drags
//! implement [`ViewTarget`] themselves.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod config;
mod event;
mod router;

pub use action::{PointerHit, PointerKind, ViewAction, ViewTarget};
pub use config::InputConfig;
pub use event::{
    InputEvent, KeyInput, PointerButton, PointerButtons, PointerInput, WheelInput, is_gated,
};
pub use router::{InputRouter, Routed};
