use chrono::Utc;

use crate::{
    config::{DEFAULT_LEADERBOARD_LIMIT, DEFAULT_MAX_PLAYER_NAME_LEN},
    db::{Database, HighScore, ScoreRecording},
    error::{GameError, GameResult},
    log_info,
};

const ENABLE_LOGS: bool = true;

/// Turns completed sessions into leaderboard entries and ranks them.
#[derive(Clone)]
pub struct ScoreBoard {
    db: Database,
    default_limit: usize,
    max_name_len: usize,
}

impl ScoreBoard {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            default_limit: DEFAULT_LEADERBOARD_LIMIT,
            max_name_len: DEFAULT_MAX_PLAYER_NAME_LEN,
        }
    }

    pub fn with_limits(mut self, default_limit: usize, max_name_len: usize) -> Self {
        self.default_limit = default_limit.max(1);
        self.max_name_len = max_name_len.max(1);
        self
    }

    /// Records the time of a completed session under `player_name`.
    ///
    /// The time is recomputed from the stored start and end timestamps, so it
    /// equals what ending the session returned.
    pub async fn submit(&self, session_id: &str, player_name: &str) -> GameResult<HighScore> {
        let player_name = self.clean_player_name(player_name)?;

        match self
            .db
            .record_high_score(session_id, &player_name, Utc::now())
            .await?
        {
            ScoreRecording::Recorded(score) => {
                log_info!(
                    "Recorded {:.3}s for {} (session {})",
                    score.time_seconds,
                    score.player_name,
                    score.session_id
                );
                Ok(score)
            }
            ScoreRecording::SessionNotFound => {
                Err(GameError::SessionNotFound(session_id.to_string()))
            }
            ScoreRecording::SessionNotCompleted => {
                Err(GameError::SessionNotCompleted(session_id.to_string()))
            }
            ScoreRecording::AlreadySubmitted => {
                Err(GameError::ScoreAlreadySubmitted(session_id.to_string()))
            }
        }
    }

    /// Fastest scores across every image. `None` uses the configured default.
    pub async fn top_scores(&self, limit: Option<usize>) -> GameResult<Vec<HighScore>> {
        let limit = self.resolve_limit(limit)?;
        Ok(self.db.top_high_scores(limit, None).await?)
    }

    pub async fn top_scores_for_image(
        &self,
        game_image_id: i64,
        limit: Option<usize>,
    ) -> GameResult<Vec<HighScore>> {
        let limit = self.resolve_limit(limit)?;
        Ok(self.db.top_high_scores(limit, Some(game_image_id)).await?)
    }

    fn resolve_limit(&self, limit: Option<usize>) -> GameResult<usize> {
        match limit {
            Some(0) => Err(GameError::InvalidLimit(0)),
            Some(limit) => Ok(limit),
            None => Ok(self.default_limit),
        }
    }

    fn clean_player_name(&self, raw: &str) -> GameResult<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(GameError::InvalidPlayerName("name must not be empty".into()));
        }
        let len = name.chars().count();
        if len > self.max_name_len {
            return Err(GameError::InvalidPlayerName(format!(
                "name is {len} characters; at most {} allowed",
                self.max_name_len
            )));
        }
        Ok(name.to_string())
    }
}
