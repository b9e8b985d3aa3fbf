//! Animation driver.
//!
//! A start/stop-able loop on the host's frame scheduler. Each tick moves
//! the offset by `speed * elapsed`, measured from real timestamps so the
//! speed holds under variable frame rates.

use crate::host::{Clock, FrameScheduler, FrameToken, TrackSurface};
use crate::offset::OffsetModel;

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DriverState {
    /// No frame scheduled.
    #[default]
    Idle,
    /// A frame is scheduled.
    Running {
        /// Timestamp of the previous tick (ms).
        prev_time: f64,
        /// The frame currently scheduled.
        frame: FrameToken,
    },
}

/// Per-frame animation loop.
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    state: DriverState,
}

impl AnimationDriver {
    /// Creates an idle driver.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DriverState::Idle,
        }
    }

    /// Returns the driver state.
    #[must_use]
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Returns true while a frame is scheduled.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running { .. })
    }

    /// Starts ticking. No-op if already running.
    pub fn start<H: FrameScheduler + Clock + ?Sized>(&mut self, host: &mut H) {
        if self.is_running() {
            return;
        }
        let prev_time = host.now_ms();
        let frame = host.request_frame();
        self.state = DriverState::Running { prev_time, frame };
        tracing::trace!("animation started");
    }

    /// Stops ticking. No-op if idle. No tick runs until the next `start`.
    pub fn stop<H: FrameScheduler + ?Sized>(&mut self, host: &mut H) {
        let DriverState::Running { frame, .. } = self.state else {
            return;
        };
        host.cancel_frame(frame);
        self.state = DriverState::Idle;
        tracing::trace!("animation stopped");
    }

    /// Handles a fired frame.
    ///
    /// Frames that are not the one currently scheduled (stopped, or
    /// superseded by a restart) are dropped silently. Returns true if the
    /// offset moved.
    pub fn tick<H>(
        &mut self,
        host: &mut H,
        frame: FrameToken,
        now: f64,
        speed: f64,
        offset: &mut OffsetModel,
    ) -> bool
    where
        H: FrameScheduler + TrackSurface + ?Sized,
    {
        let DriverState::Running {
            prev_time,
            frame: scheduled,
        } = self.state
        else {
            return false;
        };
        if scheduled != frame {
            return false;
        }

        // Frame timestamps can predate the clock reading taken in `start`.
        let elapsed = ((now - prev_time) / 1000.0).max(0.0);
        offset.advance(speed * elapsed);
        host.set_offset(offset.offset());

        let next = host.request_frame();
        self.state = DriverState::Running {
            prev_time: now,
            frame: next,
        };
        true
    }
}
