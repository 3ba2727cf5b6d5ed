pub mod commands;
pub mod theme;
pub mod types;

pub use commands::{MountPoint, NodeHandle, NodeRef, StyleProperty, SurfaceCommand};
pub use theme::ThemeToken;
pub use types::{Rect, ScrollOffsets};
