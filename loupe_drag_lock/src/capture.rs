// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capture handshake between a [`DragLock`](crate::DragLock) and the platform.
//!
//! Acquiring exclusive pointer capture is asynchronous on most platforms: the
//! request is made from an input handler and confirmed (or refused) later by
//! a separate platform callback. [`capture_channel`] models that as a
//! one-shot channel:
//!
//! - The [`CaptureRequest`] half is a [`Future`] owned by whoever wants the
//!   capture. Dropping it cancels the request.
//! - The [`CaptureResolver`] half stays with the platform, which calls
//!   [`CaptureResolver::grant`] or [`CaptureResolver::deny`] from its own
//!   event callback.
//!
//! A grant that arrives after the request was dropped is reported back to the
//! platform (`grant` returns `false`) so it can give the capture up again.
//!
//! ```
//! use core::future::Future;
//! use core::pin::pin;
//! use core::task::{Context, Poll, Waker};
//! use loupe_drag_lock::capture_channel;
//!
//! let (resolver, request) = capture_channel();
//! let mut request = pin!(request);
//! let mut cx = Context::from_waker(Waker::noop());
//! assert!(request.as_mut().poll(&mut cx).is_pending());
//!
//! assert!(resolver.grant());
//! assert!(matches!(request.as_mut().poll(&mut cx), Poll::Ready(Ok(_))));
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

/// Why a capture request did not produce a [`CaptureHandle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaptureError {
    /// The platform refused to grant capture.
    Denied,
    /// Capture was taken away before the request could complete.
    Lost,
    /// The request was abandoned before it was answered.
    Cancelled,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied => f.write_str("pointer capture was denied"),
            Self::Lost => f.write_str("pointer capture was lost"),
            Self::Cancelled => f.write_str("pointer capture request was cancelled"),
        }
    }
}

impl core::error::Error for CaptureError {}

/// Proof that pointer capture is currently held.
///
/// Hand it back to [`CapturePlatform::release_capture`] to give the capture up.
#[derive(Debug, PartialEq, Eq)]
pub struct CaptureHandle {
    _private: (),
}

/// A platform that can grant exclusive pointer capture.
pub trait CapturePlatform {
    /// Begins acquiring capture.
    ///
    /// Implementations keep the [`CaptureResolver`] from [`capture_channel`]
    /// and resolve it once the platform confirms or refuses. They may also
    /// resolve it before returning.
    fn request_capture(&mut self) -> CaptureRequest;

    /// Releases capture previously granted through a [`CaptureRequest`].
    fn release_capture(&mut self, handle: CaptureHandle);
}

#[derive(Debug)]
enum Slot {
    Pending,
    Granted,
    Denied(CaptureError),
    /// The request side was dropped while pending.
    Cancelled,
    /// The result has been handed out.
    Taken,
}

#[derive(Debug)]
struct Shared {
    slot: Slot,
    waker: Option<Waker>,
}

/// Creates a linked resolver/request pair.
#[must_use]
pub fn capture_channel() -> (CaptureResolver, CaptureRequest) {
    let shared = Rc::new(RefCell::new(Shared {
        slot: Slot::Pending,
        waker: None,
    }));
    (
        CaptureResolver {
            shared: Rc::clone(&shared),
        },
        CaptureRequest { shared },
    )
}

/// The waiting half of a capture handshake.
///
/// Resolves to a [`CaptureHandle`] once the platform grants capture. Polling
/// again after it has resolved yields [`CaptureError::Cancelled`].
pub struct CaptureRequest {
    shared: Rc<RefCell<Shared>>,
}

impl CaptureRequest {
    /// Returns `true` while the platform has not answered yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.shared.borrow().slot, Slot::Pending)
    }
}

impl fmt::Debug for CaptureRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureRequest")
            .field("slot", &self.shared.borrow().slot)
            .finish_non_exhaustive()
    }
}

impl Future for CaptureRequest {
    type Output = Result<CaptureHandle, CaptureError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut shared = self.shared.borrow_mut();
        match core::mem::replace(&mut shared.slot, Slot::Taken) {
            Slot::Pending => {
                shared.slot = Slot::Pending;
                match &mut shared.waker {
                    Some(waker) if waker.will_wake(cx.waker()) => {}
                    waker => *waker = Some(cx.waker().clone()),
                }
                Poll::Pending
            }
            Slot::Granted => Poll::Ready(Ok(CaptureHandle { _private: () })),
            Slot::Denied(err) => Poll::Ready(Err(err)),
            Slot::Cancelled | Slot::Taken => Poll::Ready(Err(CaptureError::Cancelled)),
        }
    }
}

impl Drop for CaptureRequest {
    fn drop(&mut self) {
        let mut shared = self.shared.borrow_mut();
        if matches!(shared.slot, Slot::Pending) {
            shared.slot = Slot::Cancelled;
        }
        shared.waker = None;
    }
}

/// The platform half of a capture handshake.
///
/// Dropping it without answering resolves the request with
/// [`CaptureError::Cancelled`].
pub struct CaptureResolver {
    shared: Rc<RefCell<Shared>>,
}

impl CaptureResolver {
    /// Reports that capture was granted.
    ///
    /// Returns `false` if the request was cancelled in the meantime; the
    /// platform then holds a capture nobody wants and should release it.
    #[must_use = "a `false` result means the capture must be released again"]
    pub fn grant(self) -> bool {
        self.finish(Slot::Granted)
    }

    /// Reports that capture was refused.
    pub fn deny(self, err: CaptureError) {
        self.finish(Slot::Denied(err));
    }

    /// Returns `true` if the request half was dropped before an answer.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.shared.borrow().slot, Slot::Cancelled)
    }

    fn finish(&self, slot: Slot) -> bool {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            if !matches!(shared.slot, Slot::Pending) {
                return false;
            }
            shared.slot = slot;
            shared.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        true
    }
}

impl fmt::Debug for CaptureResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureResolver")
            .field("slot", &self.shared.borrow().slot)
            .finish_non_exhaustive()
    }
}

impl Drop for CaptureResolver {
    fn drop(&mut self) {
        // No-op when `grant`/`deny` already answered.
        self.finish(Slot::Denied(CaptureError::Cancelled));
    }
}
