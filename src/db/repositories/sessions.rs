use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::db::{
    connection::Database,
    helpers::{format_datetime, parse_datetime, parse_optional_datetime, parse_state},
    models::{GameSession, SessionState, TransitionError},
};

/// Result of trying to end a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCompletion {
    Completed { session: GameSession, elapsed: f64 },
    NotFound,
    AlreadyCompleted,
}

fn row_to_session(row: &Row) -> Result<GameSession> {
    let started_at: String = row.get("started_at")?;
    let ended_at: Option<String> = row.get("ended_at")?;
    let state: String = row.get("state")?;

    let session = GameSession {
        session_id: row.get("session_id")?,
        game_image_id: row.get("game_image_id")?,
        started_at: parse_datetime(&started_at, "started_at")?,
        ended_at: parse_optional_datetime(ended_at, "ended_at")?,
        state: parse_state(&state)?,
    };

    if session.is_completed() != session.ended_at.is_some() {
        bail!(
            "session {} has state {} but ended_at {:?}",
            session.session_id,
            session.state.as_str(),
            session.ended_at
        );
    }

    Ok(session)
}

pub(crate) fn load_session(conn: &Connection, session_id: &str) -> Result<Option<GameSession>> {
    let mut stmt = conn.prepare(
        "SELECT session_id, game_image_id, started_at, ended_at, state
         FROM game_sessions
         WHERE session_id = ?1",
    )?;

    let mut rows = stmt.query(params![session_id])?;
    let session = match rows.next()? {
        Some(row) => Some(row_to_session(row)?),
        None => None,
    };
    Ok(session)
}

impl Database {
    pub async fn insert_session(&self, session: &GameSession) -> Result<()> {
        let record = session.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO game_sessions (session_id, game_image_id, started_at, ended_at, state)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.session_id,
                    record.game_image_id,
                    format_datetime(&record.started_at),
                    record.ended_at.as_ref().map(format_datetime),
                    record.state.as_str(),
                ],
            )
            .with_context(|| "failed to insert game session")?;
            Ok(())
        })
        .await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<GameSession>> {
        let session_id = session_id.to_string();
        self.execute(move |conn| load_session(conn, &session_id))
            .await
    }

    /// Ends an in-progress session.
    ///
    /// The read and the conditional update share one transaction, and the
    /// update only matches rows still `InProgress`, so of several concurrent
    /// calls exactly one sees `Completed`.
    pub async fn complete_session(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionCompletion> {
        let session_id = session_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let mut session = match load_session(&tx, &session_id)? {
                Some(session) => session,
                None => return Ok(SessionCompletion::NotFound),
            };

            let elapsed = match session.complete(now) {
                Ok(elapsed) => elapsed,
                Err(TransitionError::AlreadyCompleted) => {
                    return Ok(SessionCompletion::AlreadyCompleted)
                }
                Err(TransitionError::NotCompleted) => {
                    bail!("unexpected transition result for session {session_id}")
                }
            };

            let ended_at = session
                .ended_at
                .as_ref()
                .map(format_datetime)
                .context("completed session is missing ended_at")?;

            let rows_affected = tx
                .execute(
                    "UPDATE game_sessions
                     SET state = ?1,
                         ended_at = ?2
                     WHERE session_id = ?3 AND state = ?4",
                    params![
                        SessionState::Completed.as_str(),
                        ended_at,
                        session_id,
                        SessionState::InProgress.as_str(),
                    ],
                )
                .with_context(|| "failed to complete game session")?;

            if rows_affected == 0 {
                return Ok(SessionCompletion::AlreadyCompleted);
            }

            tx.commit()?;
            Ok(SessionCompletion::Completed { session, elapsed })
        })
        .await
    }

    pub async fn count_sessions(&self, state: SessionState) -> Result<i64> {
        self.execute(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM game_sessions WHERE state = ?1",
                params![state.as_str()],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }
}
