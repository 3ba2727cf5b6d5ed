//! Integration test: load a track document, lay it out, render it through
//! the command recorder, and drive the scroll synchronizer through a full
//! tracking period.

use std::time::Duration;

use agenda_grid_core::layout::LayoutError;
use agenda_grid_core::sync::{FALLBACK_FRAME_INTERVAL, IDLE_TIMEOUT, ScrollTarget};
use agenda_grid_core::{
    CommandRecorder, FrameRequest, GridConfig, GridMounts, GridView, PackingPolicy,
    ScrollEventKind, layout_grid, parse_tracks,
};
use agenda_grid_protocol::{MountPoint, NodeRef, ScrollOffsets, SurfaceCommand};

fn fixture() -> Vec<agenda_grid_core::Track> {
    let data = include_bytes!("fixtures/tracks.json");
    parse_tracks(data).expect("fixture should parse")
}

fn titles_by_row(layout: &agenda_grid_core::layout::TrackLayout) -> Vec<Vec<&str>> {
    layout
        .rows
        .iter()
        .map(|r| r.sessions.iter().map(|s| s.title.as_str()).collect())
        .collect()
}

#[test]
fn lays_out_conference_fixture() {
    let tracks = fixture();
    assert_eq!(tracks.len(), 4);

    let layout = layout_grid(&tracks, &GridConfig::default());
    assert_eq!(layout.timeline.ticks.len(), 56);
    assert_eq!(layout.width_px(), 13_440.0);
    assert_eq!(layout.timeline.ticks[0].label, "03:00");

    let rows: Vec<usize> = layout.tracks.iter().map(|t| t.row_count()).collect();
    assert_eq!(rows, vec![2, 3, 1, 1]);

    assert_eq!(
        titles_by_row(&layout.tracks[0]),
        vec![
            vec!["Opening Keynote", "Rendering Performance", "Offline Apps"],
            vec!["Live Demo Overflow"],
        ]
    );
    assert_eq!(
        titles_by_row(&layout.tracks[1]),
        vec![
            vec!["Tooling Deep Dive", "Mobile Web"],
            vec!["Ask the Team"],
            vec!["Lightning Talks"],
        ]
    );

    let keynote = &layout.tracks[0].rows[0].sessions[0];
    assert_eq!(keynote.left_px, 20.0);
    assert_eq!(keynote.width_px, 85.0 * 4.0 - 2.0);

    // Unparseable timestamps lay out as NaN rather than failing.
    let lab = &layout.tracks[3].rows[0].sessions[0];
    assert!(lab.left_px.is_nan());
    assert_eq!(layout.placed_blocks().len(), 8);
}

#[test]
fn counter_policy_matches_on_fixture() {
    let tracks = fixture();
    let config = GridConfig {
        packing: PackingPolicy::Counter,
        ..GridConfig::default()
    };
    let layout = layout_grid(&tracks[..2], &config);
    assert_eq!(titles_by_row(&layout.tracks[1])[2], vec!["Lightning Talks"]);
    assert_eq!(layout.tracks[1].row_count(), 3);
}

#[test]
fn renders_fixture_into_three_mounts() {
    let tracks = fixture();
    let mut view = GridView::new(CommandRecorder::new(), GridMounts::recorded());
    view.set_session_data(&tracks);
    let commands = view.renderer_mut().take_commands();

    let appended = |mount: MountPoint| {
        commands
            .iter()
            .filter(|c| {
                matches!(c, SurfaceCommand::AppendChild { parent: NodeRef::Mount(m), .. } if *m == mount)
            })
            .count()
    };
    assert_eq!(appended(MountPoint::Timeline), 56);
    assert_eq!(appended(MountPoint::GridContent), 2 + 3 + 1 + 1);
    assert_eq!(appended(MountPoint::Tracks), 4);

    // A second rebuild starts from a clean slate again.
    view.set_session_data(&tracks[..1]);
    let again = view.renderer_mut().take_commands();
    assert!(matches!(again[0], SurfaceCommand::ClearChildren { .. }));
    assert_eq!(view.layout().map(|l| l.tracks.len()), Some(1));

    let json = serde_json::to_string(&again).expect("commands serialize");
    assert!(json.contains("Opening Keynote"));
}

#[test]
fn strict_mode_reports_unparseable_session() {
    let tracks = fixture();
    let mut view = GridView::new(CommandRecorder::new(), GridMounts::recorded());
    let err = view.try_set_session_data(&tracks);
    assert!(matches!(
        err,
        Err(LayoutError::MissingTimestamp { ref track, .. }) if track == "Code Labs"
    ));
    assert!(view.layout().is_none());
}

#[derive(Default)]
struct Pane {
    left: f64,
    top: f64,
    writes: usize,
}

impl ScrollTarget for Pane {
    fn set_scroll_left(&mut self, px: f64) {
        self.left = px;
        self.writes += 1;
    }

    fn set_scroll_top(&mut self, px: f64) {
        self.top = px;
        self.writes += 1;
    }
}

#[test]
fn frame_loop_mirrors_then_goes_idle() {
    let mut view = GridView::new(CommandRecorder::new(), GridMounts::recorded());
    view.set_session_data(&fixture());
    let (mut timeline, mut titles) = (Pane::default(), Pane::default());

    let mut now = Duration::ZERO;
    let mut frame_scheduled =
        view.on_scroll(ScrollEventKind::Scroll, ScrollOffsets::new(480.0, 150.0), now)
            == FrameRequest::Schedule;
    assert!(frame_scheduled);

    let mut frames = 0;
    let last_event = now;
    while frame_scheduled {
        now += FALLBACK_FRAME_INTERVAL;
        frames += 1;
        if frames == 3 {
            // Scrolling continues while the loop runs: no extra frame needed.
            assert_eq!(
                view.on_scroll(ScrollEventKind::TouchMove, ScrollOffsets::new(500.0, 160.0), now),
                FrameRequest::Pending
            );
        }
        frame_scheduled =
            view.on_frame(now, &mut timeline, &mut titles) == FrameRequest::Schedule;
        if frames == 1 {
            assert_eq!((timeline.left, titles.top), (480.0, 150.0));
        }
        assert!(frames < 1000, "loop never stopped");
    }

    assert_eq!((timeline.left, titles.top), (500.0, 160.0));
    let third_event = last_event + FALLBACK_FRAME_INTERVAL * 3;
    assert!(now >= third_event + IDLE_TIMEOUT);
    assert!(now < third_event + IDLE_TIMEOUT + FALLBACK_FRAME_INTERVAL);

    // No writes after going idle.
    let writes = timeline.writes + titles.writes;
    view.on_frame(now + IDLE_TIMEOUT, &mut timeline, &mut titles);
    assert_eq!(timeline.writes + titles.writes, writes);
}
