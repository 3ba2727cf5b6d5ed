//! Scroll synchronizer: mirrors the grid body's scroll offsets onto the
//! timeline header (horizontal) and the track-title column (vertical).
//!
//! The machine has two states. A scroll or touch-move event on the grid
//! body moves it to `Tracking` and (re)arms an idle deadline; while
//! tracking, every animation frame copies one snapshot of the offsets to
//! both dependent surfaces and asks for another frame. Once the deadline
//! passes without a new event the machine returns to `Idle` and the frame
//! loop ends by not being rescheduled.
//!
//! Time is supplied by the host as a `Duration` since any fixed epoch, so
//! the machine never reads a clock itself.

use std::time::Duration;

use agenda_grid_protocol::ScrollOffsets;
use log::trace;

/// Inactivity after the last qualifying event before tracking stops.
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(1500);

/// Frame cadence for hosts without a display-refresh callback (60 Hz).
pub const FALLBACK_FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// A surface whose scroll position can be written.
pub trait ScrollTarget {
    fn set_scroll_left(&mut self, px: f64);
    fn set_scroll_top(&mut self, px: f64);
}

/// A surface whose scroll position can be read.
pub trait ScrollSource {
    fn scroll_offsets(&self) -> ScrollOffsets;
}

/// Input events that keep the synchronizer tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEventKind {
    Scroll,
    TouchMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Tracking,
}

/// What the host should do with its frame loop after a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Schedule one callback for the next display refresh.
    Schedule,
    /// A frame is already scheduled; do nothing.
    Pending,
    /// Do not reschedule; the loop is over.
    Stop,
}

/// Latest captured offsets plus the tracking flag and idle deadline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub offsets: ScrollOffsets,
    pub active: bool,
    pub idle_deadline: Option<Duration>,
}

/// One synchronizer per mounted grid.
#[derive(Debug, Clone, Default)]
pub struct ScrollSynchronizer {
    state: ScrollState,
}

impl ScrollSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn phase(&self) -> SyncPhase {
        if self.state.active {
            SyncPhase::Tracking
        } else {
            SyncPhase::Idle
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.state.active
    }

    /// Handle a scroll or touch-move on the grid body.
    ///
    /// Captures the offsets and pushes the idle deadline to
    /// `now + IDLE_TIMEOUT`, saturating at [`Duration::MAX`]. Returns [`FrameRequest::Schedule`] only when
    /// this event starts a new tracking period.
    pub fn on_scroll(&mut self, kind: ScrollEventKind, offsets: ScrollOffsets, now: Duration) -> FrameRequest {
        self.state.offsets = offsets;
        self.state.idle_deadline = Some(now.saturating_add(IDLE_TIMEOUT));

        if self.state.active {
            FrameRequest::Pending
        } else {
            trace!("scroll sync: idle -> tracking on {kind:?} at {now:?}");
            self.state.active = true;
            FrameRequest::Schedule
        }
    }

    /// Read the offsets from `source` and handle the event.
    pub fn on_scroll_from(
        &mut self,
        kind: ScrollEventKind,
        source: &impl ScrollSource,
        now: Duration,
    ) -> FrameRequest {
        self.on_scroll(kind, source.scroll_offsets(), now)
    }

    /// Idle timer callback. Ignored if the deadline was pushed back since
    /// the timer was armed.
    pub fn on_idle_timer(&mut self, now: Duration) {
        if let Some(deadline) = self.state.idle_deadline
            && now >= deadline
        {
            self.stop(now);
        }
    }

    /// Animation-frame callback.
    ///
    /// While tracking, writes the captured `left` to `timeline` and `top` to
    /// `tracks` (the same snapshot to both) and asks for the next frame.
    /// Once the idle deadline has passed it writes nothing and stops.
    pub fn on_frame(
        &mut self,
        now: Duration,
        timeline: &mut impl ScrollTarget,
        tracks: &mut impl ScrollTarget,
    ) -> FrameRequest {
        self.on_idle_timer(now);
        if !self.state.active {
            return FrameRequest::Stop;
        }

        let ScrollOffsets { left, top } = self.state.offsets;
        timeline.set_scroll_left(left);
        tracks.set_scroll_top(top);
        FrameRequest::Schedule
    }

    /// Drop all state; used when the grid is rebuilt.
    pub fn reset(&mut self) {
        self.state = ScrollState::default();
    }

    fn stop(&mut self, now: Duration) {
        if self.state.active {
            trace!("scroll sync: tracking -> idle at {now:?}");
        }
        self.state.active = false;
        self.state.idle_deadline = None;
    }
}
