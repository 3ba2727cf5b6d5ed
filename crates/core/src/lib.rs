//! Agenda grid: a conference-style schedule of tracks laid out against an
//! hourly timeline, with session rows packed so overlapping sessions never
//! collide, and a scroll synchronizer that keeps the timeline header and
//! track-title column locked to the grid body.

pub mod grid;
pub mod layout;
pub mod model;
pub mod surface;
pub mod svg;
pub mod sync;

pub use grid::GridView;
pub use layout::{GridLayout, LayoutError, layout_grid};
pub use model::{GridConfig, PackingPolicy, Session, Track};
pub use surface::{CommandRecorder, GridMounts, SurfaceRenderer};
pub use sync::{FrameRequest, ScrollEventKind, ScrollSynchronizer};

/// Parse a track document: a JSON array of tracks.
pub fn parse_tracks(data: &[u8]) -> Result<Vec<Track>, serde_json::Error> {
    serde_json::from_slice(data)
}
