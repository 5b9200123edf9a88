pub mod commands;
pub mod scoreboard;
pub mod sessions;
pub mod validation;

pub use scoreboard::ScoreBoard;
pub use sessions::SessionStore;
pub use validation::{ValidationOutcome, ValidationService};

use crate::{catalog::CharacterCatalog, config::GameConfig, db::Database};

/// All game services wired to one database.
#[derive(Clone)]
pub struct GameEngine {
    db: Database,
    pub catalog: CharacterCatalog,
    pub sessions: SessionStore,
    pub validation: ValidationService,
    pub scoreboard: ScoreBoard,
}

impl GameEngine {
    pub fn new(db: Database, config: &GameConfig) -> Self {
        let catalog = CharacterCatalog::new(db.clone());
        let sessions = SessionStore::new(db.clone(), catalog.clone());
        let validation = ValidationService::new(catalog.clone(), sessions.clone());
        let scoreboard = ScoreBoard::new(db.clone())
            .with_limits(config.default_leaderboard_limit, config.max_player_name_len);

        Self {
            db,
            catalog,
            sessions,
            validation,
            scoreboard,
        }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}
