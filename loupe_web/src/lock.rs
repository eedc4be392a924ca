// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use loupe_drag_lock::{
    CaptureError, CaptureHandle, CapturePlatform, CaptureRequest, CaptureResolver,
    capture_channel,
};
use web_sys::{Document, Element};

/// What a `pointerlockchange` event meant for the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockChange {
    /// A pending request was answered.
    Resolved,
    /// The lock went away without being asked to.
    Lost,
    /// Nothing relevant changed.
    Unchanged,
}

/// Drag capture through the Pointer Lock API.
///
/// The browser answers `requestPointerLock` with a `pointerlockchange` or
/// `pointerlockerror` event on the document; forward those to
/// [`on_lock_change`](Self::on_lock_change) and
/// [`on_lock_error`](Self::on_lock_error).
#[derive(Debug)]
pub struct PointerLock {
    document: Document,
    target: Element,
    pending: Option<CaptureResolver>,
}

impl PointerLock {
    /// Locks the pointer to `target` when capture is requested.
    pub fn new(document: Document, target: Element) -> Self {
        Self {
            document,
            target,
            pending: None,
        }
    }

    fn is_locked(&self) -> bool {
        self.document
            .pointer_lock_element()
            .is_some_and(|element| element == self.target)
    }

    /// Handles `pointerlockchange`.
    pub fn on_lock_change(&mut self) -> LockChange {
        let locked = self.is_locked();
        match self.pending.take() {
            Some(resolver) if locked => {
                if !resolver.grant() {
                    // The drag ended before the lock arrived.
                    self.document.exit_pointer_lock();
                }
                LockChange::Resolved
            }
            Some(resolver) => {
                resolver.deny(CaptureError::Lost);
                LockChange::Resolved
            }
            None if locked => LockChange::Unchanged,
            None => LockChange::Lost,
        }
    }

    /// Handles `pointerlockerror`.
    pub fn on_lock_error(&mut self) -> LockChange {
        match self.pending.take() {
            Some(resolver) => {
                resolver.deny(CaptureError::Denied);
                LockChange::Resolved
            }
            None => LockChange::Unchanged,
        }
    }
}

impl CapturePlatform for PointerLock {
    fn request_capture(&mut self) -> CaptureRequest {
        let (resolver, request) = capture_channel();
        // Replacing an unanswered resolver cancels its request.
        self.pending = Some(resolver);
        self.target.request_pointer_lock();
        request
    }

    fn release_capture(&mut self, _handle: CaptureHandle) {
        if self.is_locked() {
            self.document.exit_pointer_lock();
        }
    }
}
