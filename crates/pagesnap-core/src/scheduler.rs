//! Frame-coalesced transition commits
//!
//! At most one commit is pending per controller. Scheduling again cancels the
//! previous frame request, so a burst of index changes between two display
//! refreshes produces a single commit showing the final index.

use tracing::trace;

use crate::host::{FrameHandle, Host};

#[derive(Debug, Default)]
pub struct TransitionScheduler {
    pending: Option<FrameHandle>,
    commits: u64,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a frame, replacing any pending one
    pub fn schedule<H: Host>(&mut self, host: &mut H) -> FrameHandle {
        if let Some(previous) = self.pending.take() {
            trace!(frame = previous.0, "Replacing pending commit");
            host.cancel_frame(previous);
        }
        let handle = host.request_frame();
        self.pending = Some(handle);
        handle
    }

    /// Accept a fired frame; only the most recently scheduled one is claimed
    pub fn claim(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            self.commits += 1;
            true
        } else {
            trace!(frame = handle.0, "Ignoring stale frame");
            false
        }
    }

    /// Drop the pending commit, if any
    pub fn cancel<H: Host>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Number of commits claimed so far
    pub fn commit_count(&self) -> u64 {
        self.commits
    }
}
