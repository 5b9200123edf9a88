pub mod connection;
pub mod helpers;
mod migrations;
pub mod models;
pub mod repositories;

pub use connection::Database;
pub use models::{
    Character, CharacterSummary, GameImage, GameImageDetails, GameSession, HighScore,
    SessionState,
};
pub use repositories::{ScoreRecording, SeedOutcome, SessionCompletion};
