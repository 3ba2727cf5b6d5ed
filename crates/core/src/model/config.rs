use serde::{Deserialize, Serialize};

/// Row height in pixels.
pub const ROW_HEIGHT: f64 = 150.0;
/// Border width in pixels.
pub const BORDER_WIDTH: f64 = 1.0;
pub const PIXELS_PER_MINUTE: f64 = 4.0;
/// Inner padding of ticks and session blocks, in pixels.
pub const PADDING: f64 = 8.0;

/// Offset applied to the UTC-constructed grid window.
const WINDOW_OFFSET_SECS: i64 = -7 * 3600;
/// 2013-05-15 10:00:00 UTC.
const WINDOW_START_UTC: i64 = 1_368_612_000;
/// 2013-05-17 18:00:00 UTC.
const WINDOW_END_UTC: i64 = 1_368_813_600;

/// How overlapping sessions are assigned to rows within a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackingPolicy {
    /// Lowest-index row whose last session has ended. Never puts two
    /// overlapping sessions in one row when input is start-sorted.
    #[default]
    EarliestAvailable,
    /// Single-pass counter: return to row 0 whenever a session starts at or
    /// after the end of the session that opened the current overlap run,
    /// otherwise take the next row index. Rows vacated inside a run are
    /// not reused.
    Counter,
}

/// Geometry constants for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub row_height: f64,
    pub border_width: f64,
    pub pixels_per_minute: f64,
    pub padding: f64,
    /// Window start, epoch seconds.
    pub grid_start_time: i64,
    /// Window end, epoch seconds.
    pub grid_end_time: i64,
    /// Fixed UTC offset used when printing tick labels.
    pub label_utc_offset_minutes: i32,
    pub packing: PackingPolicy,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            border_width: BORDER_WIDTH,
            pixels_per_minute: PIXELS_PER_MINUTE,
            padding: PADDING,
            grid_start_time: WINDOW_START_UTC + WINDOW_OFFSET_SECS,
            grid_end_time: WINDOW_END_UTC + WINDOW_OFFSET_SECS,
            label_utc_offset_minutes: 0,
            packing: PackingPolicy::default(),
        }
    }
}

impl GridConfig {
    /// Window length in whole seconds, widened so extreme bounds cannot
    /// overflow. Negative for inverted windows.
    pub fn duration_secs(&self) -> i128 {
        i128::from(self.grid_end_time) - i128::from(self.grid_start_time)
    }

    /// Window length in minutes. Negative for inverted windows.
    pub fn duration_minutes(&self) -> f64 {
        self.duration_secs() as f64 / 60.0
    }

    /// Horizontal pixel offset of an epoch-seconds instant.
    pub fn x_for(&self, epoch_secs: f64) -> f64 {
        (epoch_secs - self.grid_start_time as f64) / 60.0 * self.pixels_per_minute
    }
}
