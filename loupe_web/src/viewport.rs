// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use loupe_input::{InputEvent, PointerHit};
use loupe_viewport::{FrameJob, PointerContext, Viewport, ViewportConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, FocusEvent, HtmlElement, KeyboardEvent,
    MouseEvent, WheelEvent,
};

use crate::dom::{key_input, pointer_input, wheel_input};
use crate::{AnimationFrames, CanvasSurface, LockChange, PointerLock, WebError};

type Host = Viewport<CanvasSurface, PointerLock>;
type Shared = Rc<RefCell<Host>>;

/// An event listener that is removed again on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, kind = self.kind, "failed to remove listener");
        }
    }
}

/// Runs `f` on the host unless it is already borrowed.
///
/// Listeners and host calls can arrive while the host is busy, for example
/// from inside the pointer handler; those are skipped.
fn with_host<R>(host: &RefCell<Host>, f: impl FnOnce(&mut Host) -> R) -> Option<R> {
    let Ok(mut host) = host.try_borrow_mut() else {
        tracing::warn!("viewport is busy; skipping");
        return None;
    };
    Some(f(&mut host))
}

/// A [`Viewport`] attached to a DOM container.
///
/// Dropping it removes every listener it installed; the canvas stays in the
/// document.
pub struct WebViewport {
    host: Shared,
    redraw: Rc<RefCell<FrameJob<AnimationFrames>>>,
    listeners: Vec<Listener>,
}

impl core::fmt::Debug for WebViewport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebViewport")
            .field("host", &self.host)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl WebViewport {
    /// Builds a viewport inside `container` and starts listening for input.
    pub fn attach(container: HtmlElement, config: ViewportConfig) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = container.owner_document().ok_or(WebError::NoDocument)?;
        let surface = CanvasSurface::new(container.clone())?;
        let lock = PointerLock::new(document.clone(), container.clone().into());
        let host: Shared = Rc::new(RefCell::new(Viewport::new(surface, lock, config)));

        let redraw = Rc::new_cyclic(|job: &Weak<RefCell<FrameJob<AnimationFrames>>>| {
            let job = job.clone();
            let host = Rc::downgrade(&host);
            let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
                let Some(job) = job.upgrade() else {
                    return;
                };
                if !job.borrow_mut().on_frame() {
                    return;
                }
                if let Some(host) = host.upgrade() {
                    with_host(&host, Host::refresh);
                }
            }) as Box<dyn FnMut(f64)>);
            RefCell::new(FrameJob::new(AnimationFrames::new(window.clone(), callback)))
        });

        let mut viewport = Self {
            host,
            redraw,
            listeners: Vec::new(),
        };

        let container: EventTarget = container.into();
        for kind in ["pointerdown", "pointermove", "pointerup"] {
            viewport.listen(&container, kind, false, |host, event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return false;
                };
                let input = pointer_input(event);
                let event = match event.type_().as_str() {
                    "pointerdown" => InputEvent::PointerDown(input),
                    "pointerup" => InputEvent::PointerUp(input),
                    _ => InputEvent::PointerMove(input),
                };
                host.handle(&event)
            })?;
        }
        viewport.listen(&container, "wheel", false, |host, event| {
            event
                .dyn_ref::<WheelEvent>()
                .is_some_and(|event| host.handle(&InputEvent::Wheel(wheel_input(event))))
        })?;
        viewport.listen(&container, "keydown", false, |host, event| {
            event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|event| host.handle(&InputEvent::KeyDown(key_input(event))))
        })?;
        viewport.listen(&container, "keyup", false, |host, event| {
            event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|event| host.handle(&InputEvent::KeyUp(key_input(event))))
        })?;
        viewport.listen(&container, "blur", true, |host, event| {
            let to_outside = event
                .dyn_ref::<FocusEvent>()
                .is_none_or(|event| event.related_target().is_none());
            host.handle(&InputEvent::FocusLost { to_outside });
            false
        })?;
        viewport.listen(&window.into(), "resize", true, |host, _| {
            host.handle(&InputEvent::Resize);
            false
        })?;

        let document: EventTarget = document.into();
        viewport.listen(&document, "pointerlockchange", true, |host, _| {
            match host.platform_mut().on_lock_change() {
                LockChange::Resolved => {
                    host.capture_changed();
                }
                LockChange::Lost => host.capture_lost(),
                LockChange::Unchanged => {}
            }
            false
        })?;
        viewport.listen(&document, "pointerlockerror", true, |host, _| {
            if host.platform_mut().on_lock_error() == LockChange::Resolved {
                host.capture_changed();
            }
            false
        })?;

        tracing::debug!(listeners = viewport.listeners.len(), "viewport attached");
        Ok(viewport)
    }

    /// Adds a listener that feeds `handler`, which returns whether the event
    /// was consumed. Consumed events have their default action prevented.
    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        mut handler: impl FnMut(&mut Host, &Event) -> bool + 'static,
    ) -> Result<(), WebError> {
        let host = Rc::downgrade(&self.host);
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let Some(host) = host.upgrade() else {
                return;
            };
            if with_host(&host, |host| handler(host, &event)) == Some(true) && !passive {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }

    /// Replaces the image with a blank `width` x `height` one, lets `fill`
    /// write its pixels, and shows it.
    ///
    /// Does nothing if the image would not fit in memory. Inside the pointer
    /// handler, use its [`PointerContext`] instead.
    pub fn load(&self, width: u32, height: u32, fill: impl FnOnce(&mut [u32])) {
        with_host(&self.host, |host| {
            if let Some(pixels) = host.load(width, height) {
                fill(pixels);
                host.refresh();
            }
        });
    }

    /// Lets `update` change the current pixels and schedules a redraw.
    ///
    /// Does nothing before the first [`load`](Self::load).
    pub fn update(&self, update: impl FnOnce(&mut [u32])) {
        let updated = with_host(&self.host, |host| {
            host.pixels_mut().map(update).is_some()
        });
        if updated == Some(true) {
            self.request_redraw();
        }
    }

    /// Shows the current pixels immediately.
    pub fn refresh(&self) {
        with_host(&self.host, Host::refresh);
    }

    /// Shows the current pixels on the next animation frame.
    ///
    /// Several requests before that frame produce a single redraw.
    pub fn request_redraw(&self) {
        self.redraw.borrow_mut().attach(false);
    }

    /// Redraws on every animation frame while `animating` is `true`.
    pub fn set_animating(&self, animating: bool) {
        let mut redraw = self.redraw.borrow_mut();
        if animating {
            redraw.attach(true);
        } else {
            redraw.detach();
        }
    }

    /// Installs the callback receiving pointer events in image space.
    ///
    /// The callback paints through its [`PointerContext`]; calls back into
    /// this `WebViewport` from inside it are skipped.
    pub fn set_pointer_handler(
        &self,
        handler: impl FnMut(&PointerHit, &mut PointerContext<'_>) + 'static,
    ) {
        with_host(&self.host, |host| host.set_pointer_handler(handler));
    }

    /// Runs `f` with the underlying [`Viewport`].
    ///
    /// Returns `None` when called while the viewport is busy, for example
    /// from inside the pointer handler.
    pub fn with_viewport<R>(
        &self,
        f: impl FnOnce(&mut Viewport<CanvasSurface, PointerLock>) -> R,
    ) -> Option<R> {
        with_host(&self.host, f)
    }
}

impl Drop for WebViewport {
    fn drop(&mut self) {
        self.redraw.borrow_mut().detach();
    }
}
