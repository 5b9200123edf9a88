use chrono::Utc;
use uuid::Uuid;

use crate::{
    catalog::CharacterCatalog,
    db::{Database, GameSession, SessionCompletion},
    error::{GameError, GameResult},
    log_info, log_warn,
};

const ENABLE_LOGS: bool = true;

/// Owns the session lifecycle: `InProgress -> Completed`, once.
#[derive(Clone)]
pub struct SessionStore {
    db: Database,
    catalog: CharacterCatalog,
}

impl SessionStore {
    pub fn new(db: Database, catalog: CharacterCatalog) -> Self {
        Self { db, catalog }
    }

    /// Starts a timed game on an existing image.
    pub async fn start(&self, game_image_id: i64) -> GameResult<GameSession> {
        let image = self.catalog.image(game_image_id).await?;

        let session = GameSession::begin(Uuid::new_v4().to_string(), image.id, Utc::now());
        self.db.insert_session(&session).await?;

        log_info!(
            "Started session {} on image {} ({})",
            session.session_id,
            image.id,
            image.name
        );
        Ok(session)
    }

    /// Ends a session and returns its elapsed time in seconds.
    ///
    /// A second call for the same session fails with `AlreadyCompleted`.
    pub async fn end(&self, session_id: &str) -> GameResult<f64> {
        match self.db.complete_session(session_id, Utc::now()).await? {
            SessionCompletion::Completed { session, elapsed } => {
                log_info!(
                    "Completed session {} in {elapsed:.3}s",
                    session.session_id
                );
                Ok(elapsed)
            }
            SessionCompletion::NotFound => Err(GameError::SessionNotFound(session_id.to_string())),
            SessionCompletion::AlreadyCompleted => {
                log_warn!("Rejected duplicate end for session {session_id}");
                Err(GameError::AlreadyCompleted(session_id.to_string()))
            }
        }
    }

    pub async fn get(&self, session_id: &str) -> GameResult<GameSession> {
        self.db
            .get_session(session_id)
            .await?
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))
    }
}
