use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Scroll position of a surface, in logical pixels.
///
/// `left` is the horizontal offset (mirrored onto the timeline header),
/// `top` the vertical offset (mirrored onto the track-title column).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffsets {
    pub left: f64,
    pub top: f64,
}

impl ScrollOffsets {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}
