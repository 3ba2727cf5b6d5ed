use log::warn;
use thiserror::Error;

use crate::layout::timeline::{MAX_TIMELINE_TICKS, TICK_MINUTES};
use crate::model::{GridConfig, Track};

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("grid window ends at {end} but starts at {start}")]
    EmptyWindow { start: i64, end: i64 },
    #[error("grid window spans {hours} hours, more than the {max} hour limit")]
    WindowTooLong { hours: i128, max: i64 },
    #[error("pixels per minute must be positive and finite, got {0}")]
    InvalidScale(f64),
    #[error("track {track:?}, session {session:?}: missing or non-numeric {field}")]
    MissingTimestamp {
        track: String,
        session: String,
        field: &'static str,
    },
    #[error("track {track:?}, session {session:?}: ends at {end}, not after start {start}")]
    NonPositiveDuration {
        track: String,
        session: String,
        start: i64,
        end: i64,
    },
}

impl GridConfig {
    /// Reject windows that would render empty or exceed
    /// [`MAX_TIMELINE_TICKS`] hours, and non-positive scales.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.check()
            .inspect_err(|e| warn!("rejected grid configuration: {e}"))
    }

    fn check(&self) -> Result<(), LayoutError> {
        if self.grid_end_time <= self.grid_start_time {
            return Err(LayoutError::EmptyWindow {
                start: self.grid_start_time,
                end: self.grid_end_time,
            });
        }
        let hours = self.duration_secs() / i128::from(TICK_MINUTES * 60);
        if hours > i128::from(MAX_TIMELINE_TICKS) {
            return Err(LayoutError::WindowTooLong {
                hours,
                max: MAX_TIMELINE_TICKS,
            });
        }
        if !(self.pixels_per_minute.is_finite() && self.pixels_per_minute > 0.0) {
            return Err(LayoutError::InvalidScale(self.pixels_per_minute));
        }
        Ok(())
    }
}

/// Check every session has both timestamps and a positive duration.
///
/// Layout itself never fails; this is the opt-in strict path for callers
/// that prefer an error to NaN-positioned blocks.
pub fn validate_tracks(tracks: &[Track]) -> Result<(), LayoutError> {
    check_tracks(tracks).inspect_err(|e| warn!("rejected track data: {e}"))
}

fn check_tracks(tracks: &[Track]) -> Result<(), LayoutError> {
    for track in tracks {
        for session in &track.sessions {
            let missing = |field| LayoutError::MissingTimestamp {
                track: track.title.clone(),
                session: session.title.clone(),
                field,
            };
            let start = session.start_timestamp.ok_or_else(|| missing("startTimestamp"))?;
            let end = session.end_timestamp.ok_or_else(|| missing("endTimestamp"))?;
            if end <= start {
                return Err(LayoutError::NonPositiveDuration {
                    track: track.title.clone(),
                    session: session.title.clone(),
                    start,
                    end,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Session;

    #[test]
    fn accepts_well_formed_tracks() {
        let tracks = vec![
            Track::new("A", vec![Session::new("s", 0, 60)]),
            Track::new("B", vec![]),
        ];
        assert_eq!(validate_tracks(&tracks), Ok(()));
        assert_eq!(GridConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_missing_timestamp() {
        let session = Session {
            title: "s".into(),
            start_timestamp: Some(0),
            end_timestamp: None,
        };
        let err = validate_tracks(&[Track::new("A", vec![session])]);
        assert!(matches!(
            err,
            Err(LayoutError::MissingTimestamp { field: "endTimestamp", .. })
        ));
    }

    #[test]
    fn rejects_zero_duration() {
        let err = validate_tracks(&[Track::new("A", vec![Session::new("s", 60, 60)])]);
        assert!(matches!(err, Err(LayoutError::NonPositiveDuration { .. })));
    }

    #[test]
    fn rejects_bad_config() {
        let inverted = GridConfig {
            grid_end_time: 0,
            grid_start_time: 10,
            ..GridConfig::default()
        };
        assert!(matches!(inverted.validate(), Err(LayoutError::EmptyWindow { .. })));

        let extreme = GridConfig {
            grid_start_time: i64::MIN,
            grid_end_time: i64::MAX,
            ..GridConfig::default()
        };
        assert!(matches!(
            extreme.validate(),
            Err(LayoutError::WindowTooLong { max: MAX_TIMELINE_TICKS, .. })
        ));

        let year = GridConfig {
            grid_start_time: 0,
            grid_end_time: MAX_TIMELINE_TICKS * 3600,
            ..GridConfig::default()
        };
        assert_eq!(year.validate(), Ok(()));

        let flat = GridConfig {
            pixels_per_minute: 0.0,
            ..GridConfig::default()
        };
        assert_eq!(flat.validate(), Err(LayoutError::InvalidScale(0.0)));
    }

    #[test]
    fn error_messages_name_the_session() {
        let err = validate_tracks(&[Track::new("Hall", vec![Session::new("Keynote", 60, 0)])]);
        let msg = err.map_err(|e| e.to_string()).err().unwrap_or_default();
        assert!(msg.contains("Hall") && msg.contains("Keynote"), "{msg}");
    }
}
