use std::time::Duration;

use agenda_grid_protocol::{ScrollOffsets, StyleProperty};
use log::{debug, info};

use crate::layout::{GridLayout, LayoutError, TrackLayout, layout_grid, validate_tracks};
use crate::model::{GridConfig, Track};
use crate::surface::{GridMounts, SurfaceRenderer};
use crate::sync::{FrameRequest, ScrollEventKind, ScrollSynchronizer, ScrollTarget};

const ROW_CLASS: &str = "row";
const FIRST_ROW_CLASS: &str = "first-row";

/// A mounted agenda grid: renders track data through a [`SurfaceRenderer`]
/// and owns the scroll synchronizer for its three panes.
pub struct GridView<R: SurfaceRenderer> {
    renderer: R,
    mounts: GridMounts<R::Node>,
    config: GridConfig,
    sync: ScrollSynchronizer,
    layout: Option<GridLayout>,
}

impl<R: SurfaceRenderer> GridView<R> {
    pub fn new(renderer: R, mounts: GridMounts<R::Node>) -> Self {
        Self::with_config(renderer, mounts, GridConfig::default())
    }

    pub fn with_config(renderer: R, mounts: GridMounts<R::Node>, config: GridConfig) -> Self {
        Self {
            renderer,
            mounts,
            config,
            sync: ScrollSynchronizer::new(),
            layout: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Layout of the last rebuild, if any.
    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn synchronizer(&self) -> &ScrollSynchronizer {
        &self.sync
    }

    /// Rebuild the whole grid from `tracks`.
    ///
    /// Clears the three surfaces, lays the grid out, and emits timeline
    /// ticks, track rows with their session blocks, and track titles. Does
    /// nothing when the track-title surface is not mounted. Malformed
    /// sessions are rendered as-is (NaN geometry), never rejected.
    pub fn set_session_data(&mut self, tracks: &[Track]) {
        let Some(tracks_mount) = self.mounts.tracks.clone() else {
            debug!("track-title surface not mounted; skipping rebuild");
            return;
        };

        self.reset_surfaces(&tracks_mount);
        self.sync.reset();

        let layout = layout_grid(tracks, &self.config);
        info!(
            "rebuilding grid: {} ticks, {} tracks, {} sessions, {}px wide",
            layout.timeline.ticks.len(),
            layout.tracks.len(),
            layout.session_count(),
            layout.width_px()
        );

        self.emit_timeline(&layout);
        for track in &layout.tracks {
            self.emit_track_rows(track);
            self.emit_track_title(&tracks_mount, track);
        }
        self.layout = Some(layout);
    }

    /// Validate configuration and sessions, then rebuild. Nothing is
    /// touched when validation fails.
    pub fn try_set_session_data(&mut self, tracks: &[Track]) -> Result<(), LayoutError> {
        self.config.validate()?;
        validate_tracks(tracks)?;
        self.set_session_data(tracks);
        Ok(())
    }

    /// Forward a scroll or touch-move on the grid body.
    pub fn on_scroll(&mut self, kind: ScrollEventKind, offsets: ScrollOffsets, now: Duration) -> FrameRequest {
        self.sync.on_scroll(kind, offsets, now)
    }

    /// Forward an animation-frame tick.
    pub fn on_frame(
        &mut self,
        now: Duration,
        timeline: &mut impl ScrollTarget,
        tracks: &mut impl ScrollTarget,
    ) -> FrameRequest {
        self.sync.on_frame(now, timeline, tracks)
    }

    /// Forward an idle-timer firing.
    pub fn on_idle_timer(&mut self, now: Duration) {
        self.sync.on_idle_timer(now);
    }

    fn reset_surfaces(&mut self, tracks_mount: &R::Node) {
        self.renderer.clear_children(tracks_mount);
        if let Some(grid_content) = &self.mounts.grid_content {
            self.renderer.clear_children(grid_content);
        }
        if let Some(timeline) = &self.mounts.timeline {
            self.renderer.clear_children(timeline);
        }
        self.layout = None;
    }

    fn emit_timeline(&mut self, layout: &GridLayout) {
        let Some(timeline) = self.mounts.timeline.clone() else {
            return;
        };
        for tick in &layout.timeline.ticks {
            let node = self.renderer.create_label_node(&tick.label);
            self.renderer
                .set_style(&node, StyleProperty::MinWidth, tick.min_width_px);
            self.renderer
                .set_style(&node, StyleProperty::Padding, tick.padding_px);
            self.renderer.append_child(&timeline, &node);
        }
    }

    fn emit_track_rows(&mut self, track: &TrackLayout) {
        let Some(grid_content) = self.mounts.grid_content.clone() else {
            return;
        };
        for row in &track.rows {
            let row_node = self.renderer.create_container_node();
            self.renderer
                .set_style(&row_node, StyleProperty::Height, row.layout.height_px);
            self.renderer
                .set_style(&row_node, StyleProperty::Width, row.layout.width_px);
            self.renderer.add_style_class(&row_node, ROW_CLASS);
            if let Some(class) = &track.style_class {
                self.renderer.add_style_class(&row_node, class);
            }
            if row.layout.row_index == 0 {
                self.renderer.add_style_class(&row_node, FIRST_ROW_CLASS);
            }
            self.renderer.append_child(&grid_content, &row_node);

            for block in &row.sessions {
                let node = self.renderer.create_label_node(&block.title);
                self.renderer.set_style(&node, StyleProperty::Left, block.left_px);
                self.renderer
                    .set_style(&node, StyleProperty::Width, block.content_width_px);
                self.renderer
                    .set_style(&node, StyleProperty::Height, block.height_px);
                self.renderer
                    .set_style(&node, StyleProperty::Padding, block.padding_px);
                self.renderer.append_child(&row_node, &node);
            }
        }
    }

    fn emit_track_title(&mut self, tracks_mount: &R::Node, track: &TrackLayout) {
        let node = self.renderer.create_label_node(&track.title);
        self.renderer
            .set_style(&node, StyleProperty::Height, track.title_height_px);
        if let Some(class) = &track.style_class {
            self.renderer.add_style_class(&node, class);
        }
        self.renderer.append_child(tracks_mount, &node);
    }
}
