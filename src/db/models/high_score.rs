use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A finished run recorded on the leaderboard. Never updated once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HighScore {
    pub id: i64,
    pub player_name: String,
    pub game_image_id: i64,
    pub session_id: String,
    pub time_seconds: f64,
    pub created_at: DateTime<Utc>,
}
