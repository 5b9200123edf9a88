pub mod characters;
pub mod game_images;
pub mod high_scores;
pub mod sessions;

pub use game_images::SeedOutcome;
pub use high_scores::ScoreRecording;
pub use sessions::SessionCompletion;
