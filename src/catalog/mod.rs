//! Read-only registry of game images and the characters hidden in them.

pub mod seed;

use crate::{
    db::{Character, Database, GameImage, GameImageDetails},
    error::{GameError, GameResult},
};

#[derive(Clone)]
pub struct CharacterCatalog {
    db: Database,
}

impl CharacterCatalog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Looks a character up by id.
    ///
    /// Stored boxes are re-checked on the way out, so a malformed row surfaces
    /// as `InvalidBoundingBox` instead of producing wrong hit results.
    pub async fn find(&self, character_id: i64) -> GameResult<Character> {
        let character = self
            .db
            .get_character(character_id)
            .await?
            .ok_or(GameError::CharacterNotFound(character_id))?;

        character
            .bounds
            .validate()
            .map_err(|reason| GameError::InvalidBoundingBox {
                name: character.name.clone(),
                reason,
            })?;

        Ok(character)
    }

    pub async fn image(&self, game_image_id: i64) -> GameResult<GameImage> {
        self.db
            .get_game_image(game_image_id)
            .await?
            .ok_or(GameError::GameImageNotFound(game_image_id))
    }

    pub async fn characters_for_image(&self, game_image_id: i64) -> GameResult<Vec<Character>> {
        let image = self.image(game_image_id).await?;
        Ok(self.db.list_characters_for_image(image.id).await?)
    }

    pub async fn game_image(&self, game_image_id: i64) -> GameResult<GameImageDetails> {
        let image = self.image(game_image_id).await?;
        self.details(image).await
    }

    /// The default image for a new game; `GameImageNotFound(0)` when nothing
    /// has been seeded yet.
    pub async fn first_game_image(&self) -> GameResult<GameImageDetails> {
        let image = self
            .db
            .first_game_image()
            .await?
            .ok_or(GameError::GameImageNotFound(0))?;
        self.details(image).await
    }

    pub async fn list_game_images(&self) -> GameResult<Vec<GameImage>> {
        Ok(self.db.list_game_images().await?)
    }

    async fn details(&self, image: GameImage) -> GameResult<GameImageDetails> {
        let characters = self.db.list_characters_for_image(image.id).await?;
        Ok(GameImageDetails::new(image, &characters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::{seed, SeedFile};

    async fn seeded_catalog() -> (tempfile::TempDir, CharacterCatalog) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("catalog.sqlite3")).unwrap();
        seed(&db, &SeedFile::test_image()).await.unwrap();
        (dir, CharacterCatalog::new(db))
    }

    #[tokio::test]
    async fn find_returns_seeded_character() {
        let (_dir, catalog) = seeded_catalog().await;
        let details = catalog.first_game_image().await.unwrap();
        let waldo_id = details.characters[0].id;

        let waldo = catalog.find(waldo_id).await.unwrap();
        assert_eq!(waldo.name, "Waldo");
        assert_eq!(waldo.bounds.x_min, 0.1562);
        assert_eq!(waldo.game_image_id, details.id);
    }

    #[tokio::test]
    async fn unknown_character_is_not_found() {
        let (_dir, catalog) = seeded_catalog().await;
        let err = catalog.find(9_999).await.unwrap_err();
        assert!(matches!(err, GameError::CharacterNotFound(9_999)));
    }

    #[tokio::test]
    async fn out_of_range_stored_box_is_rejected_on_find() {
        let (_dir, catalog) = seeded_catalog().await;
        let image_id = catalog.first_game_image().await.unwrap().id;

        let broken_id = catalog
            .db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO characters (name, game_image_id, x_min, y_min, x_max, y_max)
                     VALUES ('Wenda', ?1, 0.2, 0.2, 1.5, 0.3)",
                    [image_id],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .unwrap();

        let err = catalog.find(broken_id).await.unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidBoundingBox { ref name, ref reason }
                if name == "Wenda" && reason.contains("x_max")
        ));
    }

    #[tokio::test]
    async fn image_details_hide_bounding_boxes() {
        let (_dir, catalog) = seeded_catalog().await;
        let details = catalog.first_game_image().await.unwrap();

        assert_eq!(details.width, 1920);
        assert_eq!(details.height, 1280);
        let names: Vec<_> = details.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Waldo", "Wizard", "Odlaw"]);

        let json = serde_json::to_value(&details).unwrap();
        assert!(json["characters"][0].get("bounds").is_none());
        assert_eq!(json["image_url"], details.image_url.as_str());
    }

    #[tokio::test]
    async fn empty_catalog_has_no_default_image() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("empty.sqlite3")).unwrap();
        let catalog = CharacterCatalog::new(db);

        let err = catalog.first_game_image().await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(
            catalog.characters_for_image(1).await,
            Err(GameError::GameImageNotFound(1))
        ));
    }
}
