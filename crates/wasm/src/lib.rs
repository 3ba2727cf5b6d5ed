use std::time::Duration;

use agenda_grid_core::sync::ScrollTarget;
use agenda_grid_core::{
    CommandRecorder, FrameRequest, GridConfig, GridMounts, GridView, ScrollEventKind, parse_tracks,
};
use agenda_grid_protocol::ScrollOffsets;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Offsets to apply to the dependent panes for one animation frame.
#[derive(Debug, Serialize)]
struct FrameWrites {
    timeline_left: Option<f64>,
    tracks_top: Option<f64>,
    reschedule: bool,
}

/// Captures what the synchronizer writes to one pane during a frame.
#[derive(Default)]
struct PaneWrites {
    left: Option<f64>,
    top: Option<f64>,
}

impl ScrollTarget for PaneWrites {
    fn set_scroll_left(&mut self, px: f64) {
        self.left = Some(px);
    }

    fn set_scroll_top(&mut self, px: f64) {
        self.top = Some(px);
    }
}

/// Page timestamps in ms. NaN and negatives clamp to zero, overlarge
/// values saturate.
fn millis(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).unwrap_or(Duration::MAX)
}

/// One mounted grid. The page owns the DOM; this handle owns layout and
/// scroll-sync state and tells the page what to change.
#[wasm_bindgen]
pub struct AgendaGrid {
    view: GridView<CommandRecorder>,
}

#[wasm_bindgen]
impl AgendaGrid {
    /// Create a grid. Pass `has_tracks_mount = false` when the track-title
    /// container is missing; rebuilds are then no-ops.
    #[wasm_bindgen(constructor)]
    pub fn new(has_tracks_mount: bool) -> AgendaGrid {
        let mut mounts = GridMounts::recorded();
        if !has_tracks_mount {
            mounts.tracks = None;
        }
        AgendaGrid {
            view: GridView::with_config(CommandRecorder::new(), mounts, GridConfig::default()),
        }
    }

    /// Rebuild from a JSON array of tracks. Returns the surface commands to
    /// replay, as JSON.
    #[wasm_bindgen(js_name = setSessionData)]
    pub fn set_session_data(&mut self, track_json: &[u8]) -> Result<String, JsError> {
        let tracks = parse_tracks(track_json).map_err(|e| JsError::new(&e.to_string()))?;
        self.view.set_session_data(&tracks);
        let commands = self.view.renderer_mut().take_commands();
        serde_json::to_string(&commands).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Scroll or touch-move on the grid body. Returns true when the page
    /// must request an animation frame.
    #[wasm_bindgen(js_name = onScroll)]
    pub fn on_scroll(&mut self, touch: bool, left: f64, top: f64, now_ms: f64) -> bool {
        let kind = if touch {
            ScrollEventKind::TouchMove
        } else {
            ScrollEventKind::Scroll
        };
        self.view
            .on_scroll(kind, ScrollOffsets::new(left, top), millis(now_ms))
            == FrameRequest::Schedule
    }

    /// Animation-frame callback. Returns JSON
    /// `{"timeline_left", "tracks_top", "reschedule"}`.
    #[wasm_bindgen(js_name = onFrame)]
    pub fn on_frame(&mut self, now_ms: f64) -> Result<String, JsError> {
        let mut timeline = PaneWrites::default();
        let mut tracks = PaneWrites::default();
        let request = self.view.on_frame(millis(now_ms), &mut timeline, &mut tracks);
        let writes = FrameWrites {
            timeline_left: timeline.left,
            tracks_top: tracks.top,
            reschedule: request == FrameRequest::Schedule,
        };
        serde_json::to_string(&writes).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Idle-timer callback (armed by the page for 1500 ms after each event).
    #[wasm_bindgen(js_name = onIdleTimer)]
    pub fn on_idle_timer(&mut self, now_ms: f64) {
        self.view.on_idle_timer(millis(now_ms));
    }

    #[wasm_bindgen(js_name = isTracking)]
    pub fn is_tracking(&self) -> bool {
        self.view.synchronizer().is_tracking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACKS: &[u8] = br#"[{"title": "Room", "sessions": []}]"#;

    #[test]
    fn rebuild_returns_commands() {
        let mut grid = AgendaGrid::new(true);
        let json = grid.set_session_data(TRACKS).map_err(|_| ()).unwrap_or_default();
        assert!(json.contains("ClearChildren"));
        assert!(json.contains("\"Room\""));
    }

    #[test]
    fn missing_tracks_mount_yields_no_commands() {
        let mut grid = AgendaGrid::new(false);
        let json = grid.set_session_data(TRACKS).map_err(|_| ()).unwrap_or_default();
        assert_eq!(json, "[]");
    }

    #[test]
    fn frame_reports_both_axes() {
        let mut grid = AgendaGrid::new(true);
        assert!(grid.on_scroll(false, 240.0, 150.0, 0.0));
        assert!(!grid.on_scroll(true, 250.0, 160.0, 5.0));
        let json = grid.on_frame(16.0).map_err(|_| ()).unwrap_or_default();
        assert_eq!(
            json,
            r#"{"timeline_left":250.0,"tracks_top":160.0,"reschedule":true}"#
        );

        grid.on_idle_timer(1505.0);
        assert!(!grid.is_tracking());
        let json = grid.on_frame(1520.0).map_err(|_| ()).unwrap_or_default();
        assert_eq!(
            json,
            r#"{"timeline_left":null,"tracks_top":null,"reschedule":false}"#
        );
    }

    #[test]
    fn non_finite_timestamps_do_not_trap() {
        assert_eq!(millis(f64::NAN), Duration::ZERO);
        assert_eq!(millis(-5.0), Duration::ZERO);
        assert_eq!(millis(f64::INFINITY), Duration::MAX);
        assert_eq!(millis(1500.0), Duration::from_millis(1500));

        let mut grid = AgendaGrid::new(true);
        assert!(grid.on_scroll(false, 1.0, 1.0, f64::INFINITY));
        assert!(grid.on_frame(f64::NAN).is_ok());
        grid.on_idle_timer(f64::INFINITY);
        assert!(!grid.is_tracking());
    }
}
