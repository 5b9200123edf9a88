//! Administrative catalog seeding.
//!
//! A seed file lists every image and the boxes of the characters hidden in
//! it. The whole file is validated before anything is written.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    db::{Database, SeedOutcome},
    error::{GameError, GameResult},
    geometry::BoundingBox,
    log_info,
};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedFile {
    pub images: Vec<SeedImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedImage {
    pub name: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub characters: Vec<SeedCharacter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedCharacter {
    pub name: String,
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl SeedCharacter {
    pub fn bounds(&self) -> Result<BoundingBox, String> {
        BoundingBox::new(self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

impl SeedFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse seed file {}", path.display()))
    }

    /// The generated test scene: three shapes on a 1920×1280 canvas.
    pub fn test_image() -> Self {
        let character = |name: &str, x_min, y_min, x_max, y_max| SeedCharacter {
            name: name.into(),
            x_min,
            y_min,
            x_max,
            y_max,
        };

        Self {
            images: vec![SeedImage {
                name: "Test Game Image".into(),
                image_url: "/static/test_game_image.png".into(),
                width: 1920,
                height: 1280,
                characters: vec![
                    character("Waldo", 0.1562, 0.1953, 0.2083, 0.2734),
                    character("Wizard", 0.4427, 0.4297, 0.4948, 0.5078),
                    character("Odlaw", 0.7812, 0.7422, 0.8333, 0.8203),
                ],
            }],
        }
    }

    /// Rejects the file if any image or character is malformed.
    pub fn validate(&self) -> GameResult<()> {
        for image in &self.images {
            if image.width == 0 || image.height == 0 {
                return Err(GameError::InvalidBoundingBox {
                    name: image.name.clone(),
                    reason: format!(
                        "image dimensions {}x{} must be positive",
                        image.width, image.height
                    ),
                });
            }

            for character in &image.characters {
                character
                    .bounds()
                    .map_err(|reason| GameError::InvalidBoundingBox {
                        name: character.name.clone(),
                        reason,
                    })?;
            }
        }
        Ok(())
    }
}

/// Seeds an empty catalog. A catalog that already holds images is left alone.
pub async fn seed(db: &Database, file: &SeedFile) -> GameResult<SeedOutcome> {
    file.validate()?;

    let outcome = db.seed_catalog(file.images.clone()).await?;
    match outcome {
        SeedOutcome::AlreadySeeded => log_info!("Catalog already seeded; skipping"),
        SeedOutcome::Seeded { images, characters } => {
            log_info!("Seeded {images} game image(s) with {characters} character(s)")
        }
    }
    Ok(outcome)
}

/// Deletes all scores, sessions and catalog entries, then seeds `file`.
pub async fn reset_and_seed(db: &Database, file: &SeedFile) -> GameResult<SeedOutcome> {
    file.validate()?;

    let outcome = db.reset_catalog(file.images.clone()).await?;
    log_info!("Catalog reset: {outcome:?}");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_db(dir: &tempfile::TempDir) -> Database {
        Database::new(dir.path().join("seed.sqlite3")).unwrap()
    }

    #[tokio::test]
    async fn seeding_twice_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);

        let first = seed(&db, &SeedFile::test_image()).await.unwrap();
        assert_eq!(
            first,
            SeedOutcome::Seeded {
                images: 1,
                characters: 3
            }
        );

        let second = seed(&db, &SeedFile::test_image()).await.unwrap();
        assert_eq!(second, SeedOutcome::AlreadySeeded);
        assert_eq!(db.list_game_images().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_box_rejects_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);

        let mut file = SeedFile::test_image();
        file.images[0].characters[2].x_min = 0.9;

        let err = seed(&db, &file).await.unwrap_err();
        assert!(matches!(err, GameError::InvalidBoundingBox { ref name, .. } if name == "Odlaw"));
        assert!(db.list_game_images().await.unwrap().is_empty());
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let mut file = SeedFile::test_image();
        file.images[0].height = 0;
        assert!(matches!(
            file.validate(),
            Err(GameError::InvalidBoundingBox { .. })
        ));
    }

    #[tokio::test]
    async fn reset_replaces_existing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let db = open_db(&dir);
        seed(&db, &SeedFile::test_image()).await.unwrap();

        let mut replacement = SeedFile::test_image();
        replacement.images[0].name = "Beach".into();
        replacement.images[0].characters.truncate(1);

        let outcome = reset_and_seed(&db, &replacement).await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                images: 1,
                characters: 1
            }
        );

        let images = db.list_game_images().await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].name, "Beach");
    }

    #[test]
    fn load_reads_json_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(
            &path,
            r#"{"images":[{"name":"Park","image_url":"/static/park.png","width":800,"height":600,
                "characters":[{"name":"Waldo","x_min":0.1,"y_min":0.1,"x_max":0.2,"y_max":0.2}]}]}"#,
        )
        .unwrap();

        let file = SeedFile::load(&path).unwrap();
        assert_eq!(file.images[0].characters[0].name, "Waldo");
        assert!(file.validate().is_ok());
    }
}
