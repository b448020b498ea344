//! Frame-coalesced redraw scheduling.
//!
//! Any number of redraw requests between two display frames collapse into a
//! single render pass. The host supplies the "run before next repaint"
//! primitive through `FrameHost`; in the browser that is
//! `requestAnimationFrame`, in tests a fake that records handles.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use crate::error::HostError;

/// Host id for a queued frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host id for a pending one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

/// Host scheduling primitives.
///
/// The host calls back into the engine with the handle it returned here:
/// `Engine::on_frame` for frames, `Engine::on_timer` for timers.
pub trait FrameHost {
    /// Queue one frame callback.
    ///
    /// # Errors
    ///
    /// A host that cannot queue frames returns an error and the engine
    /// renders immediately instead.
    fn request_frame(&mut self) -> Result<FrameHandle, HostError>;

    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Queue one timer callback after `delay_ms`.
    ///
    /// # Errors
    ///
    /// Returns the host's failure to arm the timer.
    fn set_timer(&mut self, delay_ms: u32) -> Result<TimerHandle, HostError>;

    fn cancel_timer(&mut self, handle: TimerHandle);
}

/// Outcome of a redraw request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawRequest {
    /// A new frame callback was queued.
    Queued(FrameHandle),
    /// A frame is already queued; this request merged into it.
    AlreadyPending,
    /// The host refused to queue a frame. The caller should render now.
    RunNow,
}

/// Pending-flag scheduler over a `FrameHost`.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    pending: bool,
    queued: Option<FrameHandle>,
    passes: u64,
}

impl RedrawScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a render pass on the next frame.
    pub fn request_redraw(&mut self, host: &mut impl FrameHost) -> RedrawRequest {
        if self.pending {
            return RedrawRequest::AlreadyPending;
        }
        self.pending = true;
        if let Some(old) = self.queued.take() {
            host.cancel_frame(old);
        }
        match host.request_frame() {
            Ok(handle) => {
                self.queued = Some(handle);
                RedrawRequest::Queued(handle)
            }
            Err(e) => {
                tracing::warn!(error = %e, "frame request failed; rendering immediately");
                self.pending = false;
                self.passes += 1;
                RedrawRequest::RunNow
            }
        }
    }

    /// Frame callback from the host. Returns `true` when a pass should run.
    ///
    /// The pending flag is cleared before the pass runs, so a redraw requested
    /// from inside the pass queues a fresh frame instead of being lost.
    pub fn on_frame(&mut self, handle: FrameHandle) -> bool {
        if self.queued != Some(handle) {
            tracing::debug!(handle = handle.0, "ignoring stale frame callback");
            return false;
        }
        self.queued = None;
        self.pending = false;
        self.passes += 1;
        true
    }

    /// Cancel any queued frame. Later frame callbacks are ignored.
    pub fn teardown(&mut self, host: &mut impl FrameHost) {
        if let Some(handle) = self.queued.take() {
            host.cancel_frame(handle);
        }
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn queued(&self) -> Option<FrameHandle> {
        self.queued
    }

    /// Render passes granted so far.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }
}
