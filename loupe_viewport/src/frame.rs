// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Redraw scheduling with at most one outstanding frame request.
//!
//! [`FrameJob`] wraps a [`FrameScheduler`] (on the web, `requestAnimationFrame`)
//! and makes attaching idempotent: however often a redraw is asked for
//! before the next frame, only one request is in flight.
//!
//! ```
//! use loupe_viewport::{FrameJob, FrameScheduler};
//!
//! #[derive(Default)]
//! struct Counter {
//!     requested: u32,
//! }
//!
//! impl FrameScheduler for Counter {
//!     type Handle = u32;
//!     fn request_frame(&mut self) -> Option<u32> {
//!         self.requested += 1;
//!         Some(self.requested)
//!     }
//!     fn cancel_frame(&mut self, _handle: u32) {}
//! }
//!
//! let mut job = FrameJob::new(Counter::default());
//! job.attach(false);
//! job.attach(false);
//! assert_eq!(job.scheduler().requested, 1);
//!
//! // The frame arrives: run the callback once.
//! assert!(job.on_frame());
//! assert!(!job.is_pending());
//! ```

use core::fmt;

/// Something that can call back on the next display frame.
pub trait FrameScheduler {
    /// Identifies an outstanding request.
    type Handle;

    /// Requests one callback on the next frame.
    ///
    /// Returns `None` if the request could not be made; no callback follows.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Cancels an outstanding request.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// A redraw job with a single outstanding frame request.
pub struct FrameJob<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    periodic: bool,
}

impl<S> fmt::Debug for FrameJob<S>
where
    S: FrameScheduler + fmt::Debug,
    S::Handle: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameJob")
            .field("scheduler", &self.scheduler)
            .field("pending", &self.pending)
            .field("periodic", &self.periodic)
            .finish()
    }
}

impl<S: FrameScheduler> FrameJob<S> {
    /// Creates a detached job.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            periodic: false,
        }
    }

    /// Requests a frame unless one is already outstanding.
    ///
    /// A `periodic` job re-requests after every frame until detached.
    /// Returns `true` if a new request was made. A failed request leaves the
    /// job idle, so the next `attach` tries again.
    pub fn attach(&mut self, periodic: bool) -> bool {
        self.periodic = periodic;
        if self.pending.is_some() {
            return false;
        }
        self.pending = self.scheduler.request_frame();
        self.pending.is_some()
    }

    /// Cancels the outstanding request, if any.
    pub fn detach(&mut self) {
        self.periodic = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Call when the requested frame arrives.
    ///
    /// Returns `true` if the caller should run its callback. A periodic job
    /// has already requested its next frame by then.
    pub fn on_frame(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        if self.periodic {
            self.pending = self.scheduler.request_frame();
        }
        true
    }

    /// Returns `true` while a frame request is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns the scheduler mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{FrameJob, FrameScheduler};

    #[derive(Default)]
    struct Scheduler {
        next: u32,
        failing: bool,
        requested: Vec<u32>,
        cancelled: Vec<u32>,
    }

    impl FrameScheduler for Scheduler {
        type Handle = u32;

        fn request_frame(&mut self) -> Option<u32> {
            if self.failing {
                return None;
            }
            self.next += 1;
            self.requested.push(self.next);
            Some(self.next)
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn attach_twice_makes_one_request() {
        let mut job = FrameJob::new(Scheduler::default());
        assert!(job.attach(false));
        assert!(!job.attach(false));
        assert_eq!(job.scheduler().requested, [1]);
    }

    #[test]
    fn detach_without_request_does_not_cancel() {
        let mut job = FrameJob::new(Scheduler::default());
        job.detach();
        assert!(job.scheduler().cancelled.is_empty());
    }

    #[test]
    fn detach_cancels_the_outstanding_request() {
        let mut job = FrameJob::new(Scheduler::default());
        job.attach(true);
        job.detach();
        assert_eq!(job.scheduler().cancelled, [1]);
        assert!(!job.is_pending());
        // A stale frame after detaching does not run the callback.
        assert!(!job.on_frame());
    }

    #[test]
    fn one_shot_job_runs_once() {
        let mut job = FrameJob::new(Scheduler::default());
        job.attach(false);
        assert!(job.on_frame());
        assert!(!job.is_pending());
        assert!(!job.on_frame());

        // It can be attached again afterwards.
        assert!(job.attach(false));
        assert_eq!(job.scheduler().requested, [1, 2]);
    }

    #[test]
    fn failed_request_is_retried() {
        let mut job = FrameJob::new(Scheduler {
            failing: true,
            ..Scheduler::default()
        });
        assert!(!job.attach(false));
        assert!(!job.is_pending());

        job.scheduler_mut().failing = false;
        assert!(job.attach(false));
        assert!(job.is_pending());
        assert_eq!(job.scheduler().requested, [1]);
    }

    #[test]
    fn periodic_job_stops_when_a_request_fails() {
        let mut job = FrameJob::new(Scheduler::default());
        job.attach(true);
        job.scheduler_mut().failing = true;
        assert!(job.on_frame());
        assert!(!job.is_pending());
        job.detach();
        assert!(job.scheduler().cancelled.is_empty());
    }

    #[test]
    fn periodic_job_rerequests() {
        let mut job = FrameJob::new(Scheduler::default());
        job.attach(true);
        for _ in 0..3 {
            assert!(job.on_frame());
            assert!(job.is_pending());
        }
        assert_eq!(job.scheduler().requested, [1, 2, 3, 4]);
        job.detach();
        assert_eq!(job.scheduler().cancelled, [4]);
    }
}
