//! Request/response shapes for whatever transport fronts the engine.
//!
//! Every failure becomes a [`CommandError`] whose `kind` tells "not found",
//! "already completed" and "not completed" apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    db::{GameImageDetails, HighScore},
    error::GameError,
};

use super::GameEngine;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandError {
    pub kind: String,
    pub message: String,
}

impl From<GameError> for CommandError {
    fn from(err: GameError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameRequest {
    pub game_image_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub session_id: String,
    pub game_image_id: i64,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub session_id: String,
    pub character_id: i64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndGameRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndGameResponse {
    pub time_seconds: f64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitScoreRequest {
    pub session_id: String,
    pub player_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighScoreResponse {
    pub id: i64,
    pub player_name: String,
    pub time_seconds: f64,
    pub created_at: DateTime<Utc>,
}

impl From<HighScore> for HighScoreResponse {
    fn from(score: HighScore) -> Self {
        Self {
            id: score.id,
            player_name: score.player_name,
            time_seconds: score.time_seconds,
            created_at: score.created_at,
        }
    }
}

pub async fn game_image(engine: &GameEngine) -> CommandResult<GameImageDetails> {
    Ok(engine.catalog.first_game_image().await?)
}

pub async fn start_game(
    engine: &GameEngine,
    request: StartGameRequest,
) -> CommandResult<StartGameResponse> {
    let session = engine.sessions.start(request.game_image_id).await?;
    Ok(StartGameResponse {
        session_id: session.session_id,
        game_image_id: session.game_image_id,
        start_time: session.started_at,
    })
}

pub async fn validate_click(
    engine: &GameEngine,
    request: ValidateRequest,
) -> CommandResult<ValidateResponse> {
    if !request.x.is_finite() || !request.y.is_finite() {
        return Err(GameError::InvalidCoordinate.into());
    }

    let outcome = engine
        .validation
        .validate_for_session(&request.session_id, request.character_id, request.x, request.y)
        .await?;

    Ok(ValidateResponse {
        valid: outcome.hit,
        message: outcome.message,
    })
}

pub async fn end_game(
    engine: &GameEngine,
    request: EndGameRequest,
) -> CommandResult<EndGameResponse> {
    let time_seconds = engine.sessions.end(&request.session_id).await?;
    Ok(EndGameResponse {
        time_seconds,
        message: format!("You finished in {time_seconds:.2} seconds!"),
    })
}

pub async fn submit_score(
    engine: &GameEngine,
    request: SubmitScoreRequest,
) -> CommandResult<HighScoreResponse> {
    let score = engine
        .scoreboard
        .submit(&request.session_id, &request.player_name)
        .await?;
    Ok(score.into())
}

pub async fn leaderboard(
    engine: &GameEngine,
    limit: Option<usize>,
) -> CommandResult<Vec<HighScoreResponse>> {
    let scores = engine.scoreboard.top_scores(limit).await?;
    Ok(scores.into_iter().map(HighScoreResponse::from).collect())
}
