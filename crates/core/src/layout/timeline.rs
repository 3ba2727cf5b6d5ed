use chrono::{DateTime, FixedOffset};

use crate::model::GridConfig;

/// Fixed tick granularity of the timeline header.
pub const TICK_MINUTES: i64 = 60;

/// Upper bound on ticks per timeline: one leap year of hours.
pub const MAX_TIMELINE_TICKS: i64 = 24 * 366;

/// One labeled hour cell of the timeline header.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineTick {
    /// Clock time of the tick start, `HH:MM`, 24-hour, zero-padded.
    pub label: String,
    /// Epoch seconds at which the tick starts.
    pub start_time: i64,
    /// Full cell width, `TICK_MINUTES * pixels_per_minute`.
    pub width_px: f64,
    /// Width left for content once border and padding are taken out.
    pub min_width_px: f64,
    pub padding_px: f64,
}

/// Result of [`build_timeline`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    pub ticks: Vec<TimelineTick>,
    /// `tick width * tick count`; the shared width of every track row.
    pub total_width_px: f64,
}

/// Build the hour ticks covering the grid window.
///
/// Produces `floor(window minutes / 60)` ticks, capped at
/// [`MAX_TIMELINE_TICKS`]. An empty or inverted window yields no ticks and
/// zero width.
pub fn build_timeline(config: &GridConfig) -> Timeline {
    let duration_secs = config.duration_secs();
    if duration_secs <= 0 {
        return Timeline::default();
    }

    let full_ticks = duration_secs / i128::from(TICK_MINUTES * 60);
    let step_count = i64::try_from(full_ticks)
        .unwrap_or(i64::MAX)
        .min(MAX_TIMELINE_TICKS);
    let tick_width = TICK_MINUTES as f64 * config.pixels_per_minute;
    let min_width = tick_width - config.border_width - 2.0 * config.padding;

    let ticks = (0..step_count)
        .map(|i| {
            // Below `grid_end_time` for every i < step_count, so no overflow.
            let start_time = config.grid_start_time + i * TICK_MINUTES * 60;
            TimelineTick {
                label: format_clock_label(start_time, config.label_utc_offset_minutes),
                start_time,
                width_px: tick_width,
                min_width_px: min_width,
                padding_px: config.padding,
            }
        })
        .collect();

    Timeline {
        ticks,
        total_width_px: tick_width * step_count as f64,
    }
}

/// Format epoch seconds as `HH:MM` at a fixed UTC offset.
///
/// Out-of-range instants and offsets format as `--:--`.
pub fn format_clock_label(epoch_secs: i64, utc_offset_minutes: i32) -> String {
    let Some(offset) = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)) else {
        return "--:--".to_string();
    };
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(utc) => utc.with_timezone(&offset).format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}
