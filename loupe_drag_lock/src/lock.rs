// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use kurbo::Vec2;

use crate::capture::{CaptureHandle, CapturePlatform, CaptureRequest};

/// Where a [`DragLock`] is in its capture lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// Capture has been requested but not confirmed.
    Acquiring,
    /// Capture is held; drag deltas are forwarded.
    Active,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Acquiring(CaptureRequest),
    Active {
        handle: CaptureHandle,
        /// Drag samples seen since capture was confirmed.
        samples: u32,
    },
}

/// A continuous drag that holds exclusive pointer capture while it runs.
///
/// The lock is `Idle` until [`start`](Self::start) asks the platform for
/// capture, `Acquiring` until the platform answers, and `Active` while
/// capture is held. Only an `Active` lock turns drag samples into pan
/// deltas, and the first sample after confirmation is dropped: it usually
/// carries the jump caused by the capture itself.
///
/// [`end`](Self::end) is valid in every phase. Ending while `Acquiring`
/// drops the pending [`CaptureRequest`], so a confirmation that arrives later
/// is refused at the resolver and never activates the lock.
#[derive(Debug, Default)]
pub struct DragLock {
    state: State,
}

impl DragLock {
    /// Creates an idle lock.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        match self.state {
            State::Idle => DragPhase::Idle,
            State::Acquiring(_) => DragPhase::Acquiring,
            State::Active { .. } => DragPhase::Active,
        }
    }

    /// Returns `true` while capture is held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::Active { .. })
    }

    /// Requests capture from `platform` and begins acquiring.
    ///
    /// Returns `false` without making a second request when a drag is
    /// already acquiring or active.
    pub fn start<P: CapturePlatform + ?Sized>(&mut self, platform: &mut P) -> bool {
        if !matches!(self.state, State::Idle) {
            tracing::debug!(phase = ?self.phase(), "drag already in progress");
            return false;
        }
        self.state = State::Acquiring(platform.request_capture());
        tracing::debug!("requested pointer capture");
        // The platform may have answered synchronously.
        self.pump();
        true
    }

    /// Drives a pending capture request.
    ///
    /// Returns `Poll::Pending` while the platform has not answered, and the
    /// resulting phase otherwise. Outside `Acquiring` this is immediately
    /// ready with the current phase.
    pub fn poll_capture(&mut self, cx: &mut Context<'_>) -> Poll<DragPhase> {
        let State::Acquiring(request) = &mut self.state else {
            return Poll::Ready(self.phase());
        };
        match Pin::new(request).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(handle)) => {
                tracing::debug!("pointer capture granted");
                self.state = State::Active { handle, samples: 0 };
                Poll::Ready(DragPhase::Active)
            }
            Poll::Ready(Err(err)) => {
                tracing::debug!(error = %err, "pointer capture failed");
                self.state = State::Idle;
                Poll::Ready(DragPhase::Idle)
            }
        }
    }

    /// Polls a pending capture request once, without registering a waker.
    ///
    /// Platforms call this (usually through the host) from the callback that
    /// reports a capture change.
    pub fn pump(&mut self) -> DragPhase {
        let mut cx = Context::from_waker(Waker::noop());
        match self.poll_capture(&mut cx) {
            Poll::Ready(phase) => phase,
            Poll::Pending => DragPhase::Acquiring,
        }
    }

    /// Ends the drag.
    ///
    /// Cancels a pending request, or hands held capture back to `platform`.
    /// Does nothing when idle.
    pub fn end<P: CapturePlatform + ?Sized>(&mut self, platform: &mut P) {
        // Claim a grant that has arrived but not been observed yet, so that
        // it is released instead of leaked.
        self.pump();
        match core::mem::take(&mut self.state) {
            State::Idle => {}
            State::Acquiring(request) => {
                tracing::debug!("cancelling pending pointer capture");
                drop(request);
            }
            State::Active { handle, .. } => {
                tracing::debug!("releasing pointer capture");
                platform.release_capture(handle);
            }
        }
    }

    /// Records that the platform revoked capture on its own.
    ///
    /// The lock returns to `Idle`; nothing is released.
    pub fn capture_lost(&mut self) {
        if matches!(self.state, State::Idle) {
            return;
        }
        tracing::debug!(phase = ?self.phase(), "pointer capture lost");
        self.state = State::Idle;
    }

    /// Feeds one drag sample.
    ///
    /// Returns the delta to pan by, or `None` when the lock is not active,
    /// when this is the first sample since capture was confirmed, or when
    /// the delta is zero.
    pub fn drag(&mut self, delta: Vec2) -> Option<Vec2> {
        self.pump();
        let State::Active { samples, .. } = &mut self.state else {
            return None;
        };
        *samples = samples.saturating_add(1);
        if *samples == 1 || delta == Vec2::ZERO {
            return None;
        }
        Some(delta)
    }
}
