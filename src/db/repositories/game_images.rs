use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row, Transaction};

use crate::{
    catalog::seed::SeedImage,
    db::{connection::Database, helpers::to_u32, models::GameImage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    AlreadySeeded,
    Seeded { images: usize, characters: usize },
}

fn row_to_game_image(row: &Row) -> Result<GameImage> {
    let width: i64 = row.get("width")?;
    let height: i64 = row.get("height")?;

    Ok(GameImage {
        id: row.get("id")?,
        name: row.get("name")?,
        image_url: row.get("image_url")?,
        width: to_u32(width, "width")?,
        height: to_u32(height, "height")?,
    })
}

fn insert_images(tx: &Transaction<'_>, images: &[SeedImage]) -> Result<SeedOutcome> {
    let mut character_count = 0;

    for image in images {
        tx.execute(
            "INSERT INTO game_images (name, image_url, width, height)
             VALUES (?1, ?2, ?3, ?4)",
            params![image.name, image.image_url, image.width, image.height],
        )
        .with_context(|| format!("failed to insert game image {}", image.name))?;

        let game_image_id = tx.last_insert_rowid();

        for character in &image.characters {
            tx.execute(
                "INSERT INTO characters (name, game_image_id, x_min, y_min, x_max, y_max)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    character.name,
                    game_image_id,
                    character.x_min,
                    character.y_min,
                    character.x_max,
                    character.y_max,
                ],
            )
            .with_context(|| format!("failed to insert character {}", character.name))?;
            character_count += 1;
        }
    }

    Ok(SeedOutcome::Seeded {
        images: images.len(),
        characters: character_count,
    })
}

impl Database {
    pub async fn get_game_image(&self, game_image_id: i64) -> Result<Option<GameImage>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, image_url, width, height
                 FROM game_images
                 WHERE id = ?1",
            )?;

            let mut rows = stmt.query(params![game_image_id])?;
            let image = match rows.next()? {
                Some(row) => Some(row_to_game_image(row)?),
                None => None,
            };
            Ok(image)
        })
        .await
    }

    /// The image with the lowest id, served to clients that do not pick one.
    pub async fn first_game_image(&self) -> Result<Option<GameImage>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, image_url, width, height
                 FROM game_images
                 ORDER BY id ASC
                 LIMIT 1",
            )?;

            let mut rows = stmt.query([])?;
            let image = match rows.next()? {
                Some(row) => Some(row_to_game_image(row)?),
                None => None,
            };
            Ok(image)
        })
        .await
    }

    pub async fn list_game_images(&self) -> Result<Vec<GameImage>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, image_url, width, height
                 FROM game_images
                 ORDER BY id ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut images = Vec::new();
            while let Some(row) = rows.next()? {
                images.push(row_to_game_image(row)?);
            }
            Ok(images)
        })
        .await
    }

    /// Inserts the catalog unless one is already present.
    pub async fn seed_catalog(&self, images: Vec<SeedImage>) -> Result<SeedOutcome> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let existing: Option<i64> = tx
                .query_row("SELECT id FROM game_images LIMIT 1", [], |row| row.get(0))
                .optional()?;
            if existing.is_some() {
                return Ok(SeedOutcome::AlreadySeeded);
            }

            let outcome = insert_images(&tx, &images)?;
            tx.commit().context("failed to commit catalog seed")?;
            Ok(outcome)
        })
        .await
    }

    /// Wipes scores, sessions and the catalog, then inserts `images`.
    pub async fn reset_catalog(&self, images: Vec<SeedImage>) -> Result<SeedOutcome> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            tx.execute("DELETE FROM high_scores", [])?;
            tx.execute("DELETE FROM game_sessions", [])?;
            tx.execute("DELETE FROM characters", [])?;
            tx.execute("DELETE FROM game_images", [])?;

            let outcome = insert_images(&tx, &images)?;
            tx.commit().context("failed to commit catalog reset")?;
            Ok(outcome)
        })
        .await
    }
}
