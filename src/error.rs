use thiserror::Error;

pub type GameResult<T> = Result<T, GameError>;

/// Every failure the game core can report to a caller.
///
/// Variants stay distinct so the calling layer can choose the right response;
/// none of them are retried internally.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("character {0} not found")]
    CharacterNotFound(i64),

    #[error("game session {0} not found")]
    SessionNotFound(String),

    #[error("game image {0} not found")]
    GameImageNotFound(i64),

    #[error("game session {0} is already completed")]
    AlreadyCompleted(String),

    #[error("game session {0} has not been completed")]
    SessionNotCompleted(String),

    #[error("a score was already submitted for game session {0}")]
    ScoreAlreadySubmitted(String),

    #[error("invalid bounding box for {name}: {reason}")]
    InvalidBoundingBox { name: String, reason: String },

    #[error("invalid leaderboard limit {0}; must be at least 1")]
    InvalidLimit(usize),

    #[error("invalid player name: {0}")]
    InvalidPlayerName(String),

    #[error("click coordinates must be finite numbers")]
    InvalidCoordinate,

    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl GameError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GameError::CharacterNotFound(_)
                | GameError::SessionNotFound(_)
                | GameError::GameImageNotFound(_)
        )
    }

    /// Stable machine-readable category for transport layers.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::CharacterNotFound(_)
            | GameError::SessionNotFound(_)
            | GameError::GameImageNotFound(_) => "not_found",
            GameError::AlreadyCompleted(_) => "already_completed",
            GameError::SessionNotCompleted(_) => "not_completed",
            GameError::ScoreAlreadySubmitted(_) => "already_submitted",
            GameError::InvalidBoundingBox { .. }
            | GameError::InvalidLimit(_)
            | GameError::InvalidPlayerName(_)
            | GameError::InvalidCoordinate => "invalid_input",
            GameError::Storage(_) => "storage",
        }
    }
}
