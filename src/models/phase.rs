//! Competition phase model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Competition phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "phase", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Canvas,
    Mvp,
    Pitch,
}

impl Phase {
    /// All phases in event order
    pub const ALL: [Phase; 3] = [Phase::Canvas, Phase::Mvp, Phase::Pitch];

    /// Get phase as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Canvas => "canvas",
            Self::Mvp => "mvp",
            Self::Pitch => "pitch",
        }
    }

    /// Parse phase from string (exact, lowercase)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "canvas" => Some(Self::Canvas),
            "mvp" => Some(Self::Mvp),
            "pitch" => Some(Self::Pitch),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Submission window configured for a phase
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub phase: Phase,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl PhaseWindow {
    /// Half-open membership: `starts_at <= at < ends_at`
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.starts_at <= at && at < self.ends_at
    }

    /// Where `at` falls relative to this window, given a grace period after it closes
    pub fn status_at(&self, at: DateTime<Utc>, grace: Duration) -> WindowStatus {
        if self.contains(at) {
            WindowStatus::Open
        } else if at >= self.ends_at && at < self.ends_at + grace {
            WindowStatus::Grace
        } else {
            WindowStatus::Closed
        }
    }
}

/// Result of evaluating a phase window at an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    /// No window configured for the phase
    Unrestricted,
    /// Inside the configured window
    Open,
    /// After the window, still inside the grace period
    Grace,
    /// Before the window, or after window and grace
    Closed,
}

impl WindowStatus {
    /// Whether the window accepts submissions on time
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Unrestricted | Self::Open)
    }

    /// Whether a submission is still accepted (possibly late)
    pub fn accepts(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether a submission made now is late
    pub fn is_late(&self) -> bool {
        matches!(self, Self::Grace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> PhaseWindow {
        let start = Utc::now();
        PhaseWindow {
            phase: Phase::Canvas,
            starts_at: start,
            ends_at: start + Duration::hours(2),
        }
    }

    #[test]
    fn test_phase_parsing() {
        assert_eq!(Phase::parse("canvas"), Some(Phase::Canvas));
        assert_eq!(Phase::parse("mvp"), Some(Phase::Mvp));
        assert_eq!(Phase::parse("pitch"), Some(Phase::Pitch));
        assert_eq!(Phase::parse("demo"), None);
        assert_eq!(Phase::parse("MVP"), None);
        assert_eq!(Phase::parse(""), None);
    }

    #[test]
    fn test_window_start_is_inclusive() {
        let w = window();
        assert!(w.contains(w.starts_at));
        assert!(!w.contains(w.starts_at - Duration::milliseconds(1)));
    }

    #[test]
    fn test_window_end_is_exclusive() {
        let w = window();
        assert!(!w.contains(w.ends_at));
        assert!(w.contains(w.ends_at - Duration::milliseconds(1)));
    }

    #[test]
    fn test_status_with_grace() {
        let w = window();
        let grace = Duration::minutes(10);

        assert_eq!(w.status_at(w.starts_at, grace), WindowStatus::Open);
        assert_eq!(w.status_at(w.ends_at, grace), WindowStatus::Grace);
        assert_eq!(
            w.status_at(w.ends_at + Duration::minutes(9), grace),
            WindowStatus::Grace
        );
        assert_eq!(w.status_at(w.ends_at + grace, grace), WindowStatus::Closed);
        assert_eq!(
            w.status_at(w.starts_at - Duration::seconds(1), grace),
            WindowStatus::Closed
        );
    }

    #[test]
    fn test_status_without_grace() {
        let w = window();
        assert_eq!(w.status_at(w.ends_at, Duration::zero()), WindowStatus::Closed);
    }

    #[test]
    fn test_status_flags() {
        assert!(WindowStatus::Unrestricted.is_open());
        assert!(WindowStatus::Open.is_open());
        assert!(!WindowStatus::Grace.is_open());
        assert!(WindowStatus::Grace.accepts());
        assert!(WindowStatus::Grace.is_late());
        assert!(!WindowStatus::Closed.accepts());
    }
}
