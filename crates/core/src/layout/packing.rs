use log::debug;

use crate::model::{GridConfig, PackingPolicy, Session, Track};

/// A positioned session block inside a track row.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionBlock {
    pub title: String,
    /// Index of the containing row within its track.
    pub row_index: usize,
    pub left_px: f64,
    /// Outer width: duration in pixels minus both borders.
    pub width_px: f64,
    /// Width of the inner content box (`width_px` minus both paddings).
    pub content_width_px: f64,
    pub height_px: f64,
    pub padding_px: f64,
    /// Epoch seconds, NaN when the source timestamp was absent.
    pub start_secs: f64,
    pub end_secs: f64,
}

/// Geometry of one full-width row lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRowLayout {
    pub row_index: usize,
    pub height_px: f64,
    pub width_px: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub layout: TrackRowLayout,
    pub sessions: Vec<SessionBlock>,
}

/// Packed rows of one track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    pub title: String,
    pub style_class: Option<String>,
    /// Never empty.
    pub rows: Vec<TrackRow>,
    /// Height of the track-title label, `row_count * row_height`.
    pub title_height_px: f64,
}

impl TrackLayout {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total height of the rows in the grid body, including the extra
    /// border reserved by the first row.
    pub fn body_height_px(&self) -> f64 {
        self.rows.iter().map(|r| r.layout.height_px).sum()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &SessionBlock> {
        self.rows.iter().flat_map(|r| r.sessions.iter())
    }
}

/// Lay out a track's sessions into rows.
///
/// Sessions are visited once in stored order and assigned rows according to
/// `config.packing`. Every track gets at least one row. Every row spans
/// `timeline_width_px`; the first row is `border_width` taller so it meets
/// the track separator.
pub fn pack_track(track: &Track, config: &GridConfig, timeline_width_px: f64) -> TrackLayout {
    let assignments = match config.packing {
        PackingPolicy::EarliestAvailable => assign_earliest_available(&track.sessions),
        PackingPolicy::Counter => assign_by_counter(&track.sessions),
    };
    let row_count = assignments.iter().max().map_or(1, |max| max + 1);

    let mut rows: Vec<TrackRow> = (0..row_count)
        .map(|row_index| TrackRow {
            layout: TrackRowLayout {
                row_index,
                height_px: if row_index == 0 {
                    config.row_height + config.border_width
                } else {
                    config.row_height
                },
                width_px: timeline_width_px,
            },
            sessions: Vec::new(),
        })
        .collect();

    for (session, &row_index) in track.sessions.iter().zip(&assignments) {
        let block = position_session(session, row_index, config);
        debug!(
            "track {:?}: {:?} [{} .. {}] -> row {} at {}px",
            track.title, block.title, block.start_secs, block.end_secs, row_index, block.left_px
        );
        rows[row_index].sessions.push(block);
    }

    TrackLayout {
        title: track.title.clone(),
        style_class: track.class().map(str::to_owned),
        title_height_px: row_count as f64 * config.row_height,
        rows,
    }
}

fn position_session(session: &Session, row_index: usize, config: &GridConfig) -> SessionBlock {
    let start_secs = session.start_secs();
    let end_secs = session.end_secs();
    let duration_minutes = (end_secs - start_secs) / 60.0;
    let width_px = duration_minutes * config.pixels_per_minute - 2.0 * config.border_width;

    SessionBlock {
        title: session.title.clone(),
        row_index,
        left_px: config.x_for(start_secs),
        width_px,
        content_width_px: width_px - 2.0 * config.padding,
        height_px: config.row_height - config.border_width - 2.0 * config.padding,
        padding_px: config.padding,
        start_secs,
        end_secs,
    }
}

/// Greedy interval colouring: first row whose last end is not after the
/// session start. Sessions with non-finite bounds land in row 0 without
/// occupying it.
fn assign_earliest_available(sessions: &[Session]) -> Vec<usize> {
    let mut row_ends: Vec<f64> = Vec::new();
    sessions
        .iter()
        .map(|session| {
            let (start, end) = (session.start_secs(), session.end_secs());
            if !start.is_finite() || !end.is_finite() {
                return 0;
            }
            match row_ends.iter().position(|&row_end| start >= row_end) {
                Some(row) => {
                    row_ends[row] = end;
                    row
                }
                None => {
                    row_ends.push(end);
                    row_ends.len() - 1
                }
            }
        })
        .collect()
}

/// Counter packing. A session that starts at or after the end of the
/// session owning the current run resets to row 0 and becomes the new
/// owner; any other session takes the next row index.
fn assign_by_counter(sessions: &[Session]) -> Vec<usize> {
    let mut current_end: Option<f64> = None;
    let mut next_row = 0;
    let mut assignments = Vec::with_capacity(sessions.len());

    for session in sessions {
        let starts_new_run = match current_end {
            None => true,
            // NaN compares false and falls through to the overlap path.
            Some(end) => session.start_secs() >= end,
        };
        if starts_new_run {
            next_row = 0;
            current_end = Some(session.end_secs());
        }
        assignments.push(next_row);
        next_row += 1;
    }

    assignments
}
