use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};

use crate::{
    db::{connection::Database, models::Character},
    geometry::BoundingBox,
};

fn row_to_character(row: &Row) -> Result<Character, rusqlite::Error> {
    Ok(Character {
        id: row.get("id")?,
        name: row.get("name")?,
        game_image_id: row.get("game_image_id")?,
        bounds: BoundingBox {
            x_min: row.get("x_min")?,
            y_min: row.get("y_min")?,
            x_max: row.get("x_max")?,
            y_max: row.get("y_max")?,
        },
    })
}

impl Database {
    pub async fn get_character(&self, character_id: i64) -> Result<Option<Character>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, game_image_id, x_min, y_min, x_max, y_max
                 FROM characters
                 WHERE id = ?1",
            )?;

            let character = stmt
                .query_row(params![character_id], row_to_character)
                .optional()?;

            Ok(character)
        })
        .await
    }

    /// Characters of one image in insertion order.
    pub async fn list_characters_for_image(&self, game_image_id: i64) -> Result<Vec<Character>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, game_image_id, x_min, y_min, x_max, y_max
                 FROM characters
                 WHERE game_image_id = ?1
                 ORDER BY id ASC",
            )?;

            let characters = stmt
                .query_map(params![game_image_id], row_to_character)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(characters)
        })
        .await
    }
}
