pub mod character;
pub mod game_image;
pub mod high_score;
pub mod session;

pub use character::Character;
pub use game_image::{CharacterSummary, GameImage, GameImageDetails};
pub use high_score::HighScore;
pub use session::{elapsed_seconds, GameSession, SessionState, TransitionError};
