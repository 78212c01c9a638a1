//! Phase window gate

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::{
    constants::MAX_DELIVERABLE_GRACE_MINUTES,
    db::PhaseWindowStore,
    error::{AppError, AppResult},
    models::{Phase, WindowStatus},
};

/// Decides whether an instant falls inside a phase's submission window
#[derive(Clone)]
pub struct PhaseWindowGate {
    windows: Arc<dyn PhaseWindowStore>,
    fail_open: bool,
    grace: Duration,
}

impl PhaseWindowGate {
    pub fn new(windows: Arc<dyn PhaseWindowStore>, fail_open: bool, grace_minutes: i64) -> Self {
        Self {
            windows,
            fail_open,
            grace: Duration::minutes(grace_minutes.clamp(0, MAX_DELIVERABLE_GRACE_MINUTES)),
        }
    }

    /// Whether `phase` accepts on-time submissions right now
    pub async fn is_open(&self, phase: Phase) -> AppResult<bool> {
        Ok(self.evaluate(phase, Utc::now()).await?.is_open())
    }

    /// Where `at` falls relative to the window of `phase`
    ///
    /// No configured window means unrestricted. A failed lookup is treated as
    /// unrestricted when fail-open is enabled, otherwise it fails the request.
    pub async fn evaluate(&self, phase: Phase, at: DateTime<Utc>) -> AppResult<WindowStatus> {
        match self.windows.window_for(phase).await {
            Ok(None) => Ok(WindowStatus::Unrestricted),
            Ok(Some(window)) => Ok(window.status_at(at, self.grace)),
            Err(e) if self.fail_open => {
                warn!(phase = %phase, error = %e, "Phase window lookup failed, treating window as open");
                Ok(WindowStatus::Unrestricted)
            }
            Err(AppError::Persistence(detail)) => Err(AppError::Persistence(detail)),
            Err(e) => Err(AppError::Persistence(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MockPhaseWindowStore, models::PhaseWindow};
    use chrono::TimeZone;

    fn window(phase: Phase) -> PhaseWindow {
        PhaseWindow {
            phase,
            starts_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
            ends_at: Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
        }
    }

    fn gate_with(window: Option<PhaseWindow>, grace_minutes: i64) -> PhaseWindowGate {
        let mut store = MockPhaseWindowStore::new();
        store
            .expect_window_for()
            .returning(move |_| Ok(window.clone()));
        PhaseWindowGate::new(Arc::new(store), true, grace_minutes)
    }

    fn failing_gate(fail_open: bool) -> PhaseWindowGate {
        let mut store = MockPhaseWindowStore::new();
        store
            .expect_window_for()
            .returning(|_| Err(AppError::Persistence("connection refused".to_string())));
        PhaseWindowGate::new(Arc::new(store), fail_open, 0)
    }

    #[tokio::test]
    async fn test_unconfigured_phase_is_open() {
        let gate = gate_with(None, 0);
        assert!(gate.is_open(Phase::Pitch).await.unwrap());
    }

    #[tokio::test]
    async fn test_window_is_half_open() {
        let w = window(Phase::Canvas);
        let gate = gate_with(Some(w.clone()), 0);
        let second = Duration::seconds(1);

        let cases = [
            (w.starts_at - second, WindowStatus::Closed),
            (w.starts_at, WindowStatus::Open),
            (w.ends_at - second, WindowStatus::Open),
            (w.ends_at, WindowStatus::Closed),
        ];
        for (at, expected) in cases {
            assert_eq!(gate.evaluate(Phase::Canvas, at).await.unwrap(), expected, "at {}", at);
        }
    }

    #[tokio::test]
    async fn test_grace_period_after_close() {
        let w = window(Phase::Mvp);
        let gate = gate_with(Some(w.clone()), 15);

        let status = gate.evaluate(Phase::Mvp, w.ends_at).await.unwrap();
        assert_eq!(status, WindowStatus::Grace);
        assert!(status.accepts() && status.is_late());

        let status = gate
            .evaluate(Phase::Mvp, w.ends_at + Duration::minutes(15))
            .await
            .unwrap();
        assert_eq!(status, WindowStatus::Closed);
    }

    #[tokio::test]
    async fn test_out_of_range_grace_is_capped() {
        let w = window(Phase::Pitch);
        let gate = gate_with(Some(w.clone()), i64::MAX);

        let limit = w.ends_at + Duration::minutes(MAX_DELIVERABLE_GRACE_MINUTES);
        let status = gate.evaluate(Phase::Pitch, limit - Duration::minutes(1)).await.unwrap();
        assert_eq!(status, WindowStatus::Grace);
        let status = gate.evaluate(Phase::Pitch, limit).await.unwrap();
        assert_eq!(status, WindowStatus::Closed);
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_open_when_enabled() {
        assert!(failing_gate(true).is_open(Phase::Canvas).await.unwrap());
    }

    #[tokio::test]
    async fn test_lookup_failure_fails_closed_when_disabled() {
        let err = failing_gate(false).is_open(Phase::Canvas).await.unwrap_err();
        assert_eq!(err.error_code(), "persistence_failure");
    }
}
