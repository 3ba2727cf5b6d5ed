use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the host's active palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Border,

    // Timeline header
    TimelineBackground,
    TimelineText,

    // Track-title column
    TrackTitleBackground,
    TrackTitleText,

    // Grid body
    RowBackground,
    RowBorder,
    SessionFill,
    SessionBorder,
    SessionText,
}
