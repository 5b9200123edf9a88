use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_datetime, to_i64},
    models::HighScore,
};

use super::sessions::load_session;

/// Result of trying to turn a session into a leaderboard entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreRecording {
    Recorded(HighScore),
    SessionNotFound,
    SessionNotCompleted,
    AlreadySubmitted,
}

fn row_to_high_score(row: &Row) -> Result<HighScore> {
    let created_at: String = row.get("created_at")?;

    Ok(HighScore {
        id: row.get("id")?,
        player_name: row.get("player_name")?,
        game_image_id: row.get("game_image_id")?,
        session_id: row.get("session_id")?,
        time_seconds: row.get("time_seconds")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Records a score for a completed session.
    ///
    /// The elapsed time is recomputed from the stored session timestamps inside
    /// the same transaction that inserts the score.
    pub async fn record_high_score(
        &self,
        session_id: &str,
        player_name: &str,
        created_at: DateTime<Utc>,
    ) -> Result<ScoreRecording> {
        let session_id = session_id.to_string();
        let player_name = player_name.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let session = match load_session(&tx, &session_id)? {
                Some(session) => session,
                None => return Ok(ScoreRecording::SessionNotFound),
            };

            let time_seconds = match session.elapsed_seconds() {
                Ok(elapsed) => elapsed,
                Err(_) => return Ok(ScoreRecording::SessionNotCompleted),
            };

            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM high_scores WHERE session_id = ?1",
                    params![session_id],
                    |row| row.get(0),
                )
                .optional()?;
            if existing.is_some() {
                return Ok(ScoreRecording::AlreadySubmitted);
            }

            tx.execute(
                "INSERT INTO high_scores
                     (player_name, game_image_id, session_id, time_seconds, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    player_name,
                    session.game_image_id,
                    session_id,
                    time_seconds,
                    format_datetime(&created_at),
                ],
            )
            .with_context(|| "failed to insert high score")?;

            let score = HighScore {
                id: tx.last_insert_rowid(),
                player_name,
                game_image_id: session.game_image_id,
                session_id,
                time_seconds,
                created_at,
            };

            tx.commit()?;
            Ok(ScoreRecording::Recorded(score))
        })
        .await
    }

    /// Fastest scores first; equal times keep insertion order.
    pub async fn top_high_scores(
        &self,
        limit: usize,
        game_image_id: Option<i64>,
    ) -> Result<Vec<HighScore>> {
        let limit = to_i64(limit)?;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, player_name, game_image_id, session_id, time_seconds, created_at
                 FROM high_scores
                 WHERE ?1 IS NULL OR game_image_id = ?1
                 ORDER BY time_seconds ASC, id ASC
                 LIMIT ?2",
            )?;

            let mut rows = stmt.query(params![game_image_id, limit])?;
            let mut scores = Vec::new();
            while let Some(row) = rows.next()? {
                scores.push(row_to_high_score(row)?);
            }

            Ok(scores)
        })
        .await
    }
}
