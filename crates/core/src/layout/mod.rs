//! Layout engine: hour ticks for the timeline header and packed rows of
//! positioned session blocks for each track.

pub mod packing;
pub mod timeline;
pub mod validate;

pub use packing::{SessionBlock, TrackLayout, TrackRow, TrackRowLayout, pack_track};
pub use timeline::{MAX_TIMELINE_TICKS, Timeline, TimelineTick, build_timeline, format_clock_label};
pub use validate::{LayoutError, validate_tracks};

use agenda_grid_protocol::Rect;

use crate::model::{GridConfig, Track};

/// Complete layout of one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub timeline: Timeline,
    pub tracks: Vec<TrackLayout>,
    pub row_height: f64,
    pub border_width: f64,
}

/// A session block positioned in grid-body coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBlock<'a> {
    pub track_index: usize,
    pub rect: Rect,
    pub block: &'a SessionBlock,
}

/// Vertical extent of one track in the title column and in the body.
///
/// The two differ: titles are `row_count * row_height` tall while the body
/// rows include the first row's extra border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBand<'a> {
    pub track: &'a TrackLayout,
    pub title_y: f64,
    pub body_y: f64,
}

impl GridLayout {
    pub fn width_px(&self) -> f64 {
        self.timeline.total_width_px
    }

    /// Height of the grid body (sum of every track's rows).
    pub fn body_height_px(&self) -> f64 {
        self.tracks.iter().map(TrackLayout::body_height_px).sum()
    }

    pub fn session_count(&self) -> usize {
        self.tracks.iter().map(|t| t.blocks().count()).sum()
    }

    pub fn track_bands(&self) -> Vec<TrackBand<'_>> {
        let (mut title_y, mut body_y) = (0.0, 0.0);
        self.tracks
            .iter()
            .map(|track| {
                let band = TrackBand {
                    track,
                    title_y,
                    body_y,
                };
                title_y += track.title_height_px;
                body_y += track.body_height_px();
                band
            })
            .collect()
    }

    /// Every block with its outer box (content plus padding), sitting one
    /// border below the top of its row. Blocks with non-finite geometry
    /// are skipped.
    pub fn placed_blocks(&self) -> Vec<PlacedBlock<'_>> {
        let mut placed = Vec::with_capacity(self.session_count());
        let mut row_y = 0.0;
        for (track_index, track) in self.tracks.iter().enumerate() {
            for row in &track.rows {
                for block in &row.sessions {
                    let rect = Rect::new(
                        block.left_px,
                        row_y + self.border_width,
                        block.width_px,
                        block.height_px + 2.0 * block.padding_px,
                    );
                    if rect.x.is_finite() && rect.w.is_finite() {
                        placed.push(PlacedBlock {
                            track_index,
                            rect,
                            block,
                        });
                    }
                }
                row_y += row.layout.height_px;
            }
        }
        placed
    }
}

/// Build the timeline, then pack every track against its total width.
pub fn layout_grid(tracks: &[Track], config: &GridConfig) -> GridLayout {
    let timeline = build_timeline(config);
    let tracks = tracks
        .iter()
        .map(|track| pack_track(track, config, timeline.total_width_px))
        .collect();
    GridLayout {
        timeline,
        tracks,
        row_height: config.row_height,
        border_width: config.border_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Session;

    #[test]
    fn tracks_share_timeline_width() {
        let config = GridConfig::default();
        let start = config.grid_start_time;
        let tracks = vec![
            Track::new("A", vec![Session::new("a", start, start + 1800)]),
            Track::new("B", vec![]),
        ];
        let layout = layout_grid(&tracks, &config);
        assert_eq!(layout.timeline.ticks.len(), 56);
        assert_eq!(layout.width_px(), 56.0 * 240.0);
        assert!(
            layout
                .tracks
                .iter()
                .flat_map(|t| &t.rows)
                .all(|r| r.layout.width_px == layout.width_px())
        );
        assert_eq!(layout.session_count(), 1);
        assert_eq!(layout.body_height_px(), 302.0);
    }

    #[test]
    fn bands_and_blocks_stack_vertically() {
        let config = GridConfig::default();
        let start = config.grid_start_time;
        let tracks = vec![
            Track::new(
                "A",
                vec![
                    Session::new("a1", start, start + 3600),
                    Session::new("a2", start + 600, start + 1200),
                ],
            ),
            Track::new("B", vec![Session::new("b1", start + 3600, start + 7200)]),
        ];
        let layout = layout_grid(&tracks, &config);

        let bands = layout.track_bands();
        assert_eq!(bands[1].title_y, 300.0);
        assert_eq!(bands[1].body_y, 301.0);

        let placed = layout.placed_blocks();
        let ys: Vec<f64> = placed.iter().map(|p| p.rect.y).collect();
        assert_eq!(ys, vec![1.0, 152.0, 302.0]);
        assert_eq!(placed[2].track_index, 1);
        assert_eq!(placed[2].rect.x, 240.0);
        assert_eq!(placed[2].rect.h, 149.0);
    }
}
