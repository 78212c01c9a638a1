//! Score model and per-phase field normalization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::score_ranges;

use super::Phase;

/// Score database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: Uuid,
    pub judge_id: Uuid,
    pub team_id: Uuid,
    pub phase: Phase,
    pub canvas_score: Option<i32>,
    pub mvp_score: Option<i32>,
    pub impact: Option<i32>,
    pub business_model: Option<i32>,
    pub innovation: Option<i32>,
    pub viability: Option<i32>,
    pub extra_criterion: Option<i32>,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Score fields as sent by a client, before normalization
///
/// Values are wide so that any integer a client sends can be clamped
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawScoreFields {
    pub canvas_score: Option<i64>,
    pub mvp_score: Option<i64>,
    pub impact: Option<i64>,
    pub business_model: Option<i64>,
    pub innovation: Option<i64>,
    pub viability: Option<i64>,
    pub extra_criterion: Option<i64>,
}

/// Normalized score fields, ready to persist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreFields {
    pub canvas_score: Option<i32>,
    pub mvp_score: Option<i32>,
    pub impact: Option<i32>,
    pub business_model: Option<i32>,
    pub innovation: Option<i32>,
    pub viability: Option<i32>,
    pub extra_criterion: Option<i32>,
}

impl ScoreFields {
    /// Keep only the fields of `phase`, clamped into their ranges
    ///
    /// Fields that belong to other phases are dropped even when supplied.
    pub fn normalize(phase: Phase, raw: &RawScoreFields) -> Self {
        let clamp = |value: Option<i64>, range: (i32, i32)| value.map(|v| clamp_score(v, range));

        match phase {
            Phase::Canvas => Self {
                canvas_score: clamp(raw.canvas_score, score_ranges::CANVAS),
                ..Self::default()
            },
            Phase::Mvp => Self {
                mvp_score: clamp(raw.mvp_score, score_ranges::MVP),
                ..Self::default()
            },
            Phase::Pitch => Self {
                impact: clamp(raw.impact, score_ranges::PITCH_CRITERION),
                business_model: clamp(raw.business_model, score_ranges::PITCH_CRITERION),
                innovation: clamp(raw.innovation, score_ranges::PITCH_CRITERION),
                viability: clamp(raw.viability, score_ranges::PITCH_CRITERION),
                extra_criterion: clamp(raw.extra_criterion, score_ranges::PITCH_CRITERION),
                ..Self::default()
            },
        }
    }
}

/// Clamp a value into the closed range `[lo, hi]`
pub fn clamp_score(value: i64, (lo, hi): (i32, i32)) -> i32 {
    // Result is within [lo, hi], so the narrowing cast cannot truncate
    value.clamp(i64::from(lo), i64::from(hi)) as i32
}

/// A validated score ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub judge_id: Uuid,
    pub team_id: Uuid,
    pub phase: Phase,
    pub fields: ScoreFields,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGES: [(i32, i32); 3] = [score_ranges::CANVAS, score_ranges::MVP, score_ranges::PITCH_CRITERION];

    #[test]
    fn test_clamp_stays_in_range() {
        let samples = [i64::MIN, -1_000_000, -1, 0, 1, 19, 20, 21, 29, 30, 31, 99, 100, 101, i64::MAX];

        for range in RANGES {
            for v in samples {
                let clamped = clamp_score(v, range);
                assert!(clamped >= range.0 && clamped <= range.1, "{v} -> {clamped} for {range:?}");
            }
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        for range in RANGES {
            for v in [-50_i64, 0, 15, 25, 42, 100, 250] {
                let once = clamp_score(v, range);
                assert_eq!(clamp_score(i64::from(once), range), once);
            }
        }
    }

    #[test]
    fn test_clamp_uses_nearest_bound() {
        assert_eq!(clamp_score(25, score_ranges::CANVAS), 20);
        assert_eq!(clamp_score(-3, score_ranges::CANVAS), 0);
        assert_eq!(clamp_score(31, score_ranges::MVP), 30);
        assert_eq!(clamp_score(12, score_ranges::MVP), 12);
    }

    #[test]
    fn test_normalize_drops_other_phase_fields() {
        let raw = RawScoreFields {
            canvas_score: Some(15),
            mvp_score: Some(28),
            impact: Some(90),
            ..Default::default()
        };

        let fields = ScoreFields::normalize(Phase::Mvp, &raw);
        assert_eq!(
            fields,
            ScoreFields {
                mvp_score: Some(28),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_normalize_pitch_clamps_each_criterion() {
        let raw = RawScoreFields {
            canvas_score: Some(10),
            impact: Some(150),
            business_model: Some(-4),
            innovation: Some(70),
            viability: None,
            extra_criterion: Some(100),
            ..Default::default()
        };

        let fields = ScoreFields::normalize(Phase::Pitch, &raw);
        assert_eq!(fields.canvas_score, None);
        assert_eq!(fields.impact, Some(100));
        assert_eq!(fields.business_model, Some(0));
        assert_eq!(fields.innovation, Some(70));
        assert_eq!(fields.viability, None);
        assert_eq!(fields.extra_criterion, Some(100));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = RawScoreFields {
            canvas_score: Some(25),
            ..Default::default()
        };
        let once = ScoreFields::normalize(Phase::Canvas, &raw);
        let again = ScoreFields::normalize(
            Phase::Canvas,
            &RawScoreFields {
                canvas_score: once.canvas_score.map(i64::from),
                ..Default::default()
            },
        );
        assert_eq!(once, again);
        assert_eq!(once.canvas_score, Some(20));
    }
}
