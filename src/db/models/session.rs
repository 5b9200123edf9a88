//! Game session data models.
//!
//! A session moves `InProgress -> Completed` exactly once. The end timestamp
//! is set in the same step, so `ended_at.is_some()` always matches
//! `state == Completed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Completed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::InProgress => "InProgress",
            SessionState::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    AlreadyCompleted,
    NotCompleted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSession {
    pub session_id: String,
    pub game_image_id: i64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub state: SessionState,
}

impl GameSession {
    pub fn begin(session_id: String, game_image_id: i64, started_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            game_image_id,
            started_at,
            ended_at: None,
            state: SessionState::InProgress,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Moves the session to `Completed` and returns the elapsed seconds.
    ///
    /// A clock that stepped backwards since the start is treated as zero
    /// elapsed time, keeping `ended_at >= started_at`.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<f64, TransitionError> {
        if self.is_completed() {
            return Err(TransitionError::AlreadyCompleted);
        }

        let ended_at = now.max(self.started_at);
        self.ended_at = Some(ended_at);
        self.state = SessionState::Completed;
        Ok(elapsed_seconds(self.started_at, ended_at))
    }

    /// Elapsed seconds of a completed session, recomputed from the stored
    /// timestamps with the same arithmetic [`GameSession::complete`] used.
    pub fn elapsed_seconds(&self) -> Result<f64, TransitionError> {
        match (self.state, self.ended_at) {
            (SessionState::Completed, Some(ended_at)) => {
                Ok(elapsed_seconds(self.started_at, ended_at))
            }
            _ => Err(TransitionError::NotCompleted),
        }
    }
}

pub fn elapsed_seconds(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> f64 {
    let delta = ended_at.signed_duration_since(started_at);
    let seconds = match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1_000_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    };
    seconds.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn started() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 250_000_000).unwrap()
    }

    #[test]
    fn complete_records_end_and_elapsed() {
        let mut session = GameSession::begin("s1".into(), 1, started());
        let elapsed = session
            .complete(started() + Duration::milliseconds(12_500))
            .unwrap();

        assert_eq!(elapsed, 12.5);
        assert_eq!(session.state, SessionState::Completed);
        assert!(session.ended_at.is_some());
        assert_eq!(session.elapsed_seconds().unwrap(), elapsed);
    }

    #[test]
    fn second_completion_is_rejected() {
        let mut session = GameSession::begin("s1".into(), 1, started());
        session.complete(started() + Duration::seconds(3)).unwrap();
        let ended_at = session.ended_at;

        assert_eq!(
            session.complete(started() + Duration::seconds(9)),
            Err(TransitionError::AlreadyCompleted)
        );
        assert_eq!(session.ended_at, ended_at);
    }

    #[test]
    fn in_progress_session_has_no_elapsed_time() {
        let session = GameSession::begin("s1".into(), 1, started());
        assert_eq!(
            session.elapsed_seconds(),
            Err(TransitionError::NotCompleted)
        );
    }

    #[test]
    fn backwards_clock_clamps_to_zero() {
        let mut session = GameSession::begin("s1".into(), 1, started());
        let elapsed = session
            .complete(started() - Duration::seconds(5))
            .unwrap();

        assert_eq!(elapsed, 0.0);
        assert_eq!(session.ended_at, Some(started()));
    }

    #[test]
    fn state_serializes_with_stored_spelling() {
        for state in [SessionState::InProgress, SessionState::Completed] {
            let json = serde_json::to_value(state).unwrap();
            assert_eq!(json, state.as_str());
        }
    }

    #[test]
    fn sub_second_precision_is_kept() {
        let end = started() + Duration::microseconds(1_234_567);
        assert!((elapsed_seconds(started(), end) - 1.234567).abs() < 1e-9);
    }
}
