use serde::{Deserialize, Serialize};

use crate::{
    catalog::CharacterCatalog,
    db::Character,
    error::{GameError, GameResult},
};

use super::sessions::SessionStore;

pub const MISS_MESSAGE: &str = "Not quite! Keep looking.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationOutcome {
    pub hit: bool,
    pub character_name: String,
    pub message: String,
}

/// Stateless click checks. A hit never ends the game and misses carry no
/// penalty, so repeating a request always yields the same answer.
#[derive(Clone)]
pub struct ValidationService {
    catalog: CharacterCatalog,
    sessions: SessionStore,
}

impl ValidationService {
    pub fn new(catalog: CharacterCatalog, sessions: SessionStore) -> Self {
        Self { catalog, sessions }
    }

    pub async fn validate(
        &self,
        character_id: i64,
        x: f64,
        y: f64,
    ) -> GameResult<ValidationOutcome> {
        let character = self.catalog.find(character_id).await?;
        Ok(judge(character, x, y))
    }

    /// Validates a click made during `session_id`.
    ///
    /// The session must exist and the character must belong to the session's
    /// image. The session itself is only read, never changed.
    pub async fn validate_for_session(
        &self,
        session_id: &str,
        character_id: i64,
        x: f64,
        y: f64,
    ) -> GameResult<ValidationOutcome> {
        let session = self.sessions.get(session_id).await?;
        let character = self.catalog.find(character_id).await?;

        if character.game_image_id != session.game_image_id {
            return Err(GameError::CharacterNotFound(character_id));
        }

        Ok(judge(character, x, y))
    }
}

fn judge(character: Character, x: f64, y: f64) -> ValidationOutcome {
    if character.bounds.contains(x, y) {
        ValidationOutcome {
            hit: true,
            message: format!("You found {}!", character.name),
            character_name: character.name,
        }
    } else {
        ValidationOutcome {
            hit: false,
            character_name: character.name,
            message: MISS_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::seed::{seed, SeedCharacter, SeedFile, SeedImage},
        db::{Database, SessionState},
    };

    struct Fixture {
        _dir: tempfile::TempDir,
        validation: ValidationService,
        sessions: SessionStore,
        catalog: CharacterCatalog,
    }

    async fn fixture(file: SeedFile) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("validation.sqlite3")).unwrap();
        seed(&db, &file).await.unwrap();
        let catalog = CharacterCatalog::new(db.clone());
        let sessions = SessionStore::new(db, catalog.clone());
        Fixture {
            _dir: dir,
            validation: ValidationService::new(catalog.clone(), sessions.clone()),
            sessions,
            catalog,
        }
    }

    async fn character(catalog: &CharacterCatalog, name: &str) -> Character {
        let image = catalog.first_game_image().await.unwrap();
        let id = image
            .characters
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .unwrap();
        catalog.find(id).await.unwrap()
    }

    #[tokio::test]
    async fn click_inside_box_is_a_hit() {
        let fx = fixture(SeedFile::test_image()).await;
        let waldo = character(&fx.catalog, "Waldo").await;

        let outcome = fx.validation.validate(waldo.id, 0.18, 0.20).await.unwrap();
        assert!(outcome.hit);
        assert_eq!(outcome.character_name, "Waldo");
        assert_eq!(outcome.message, "You found Waldo!");
    }

    #[tokio::test]
    async fn click_outside_box_is_a_miss() {
        let fx = fixture(SeedFile::test_image()).await;
        let waldo = character(&fx.catalog, "Waldo").await;

        let outcome = fx.validation.validate(waldo.id, 0.5, 0.5).await.unwrap();
        assert!(!outcome.hit);
        assert_eq!(outcome.message, MISS_MESSAGE);
    }

    #[tokio::test]
    async fn box_edge_counts_as_hit() {
        let fx = fixture(SeedFile::test_image()).await;
        let wizard = character(&fx.catalog, "Wizard").await;

        let corner = fx
            .validation
            .validate(wizard.id, wizard.bounds.x_max, wizard.bounds.y_min)
            .await
            .unwrap();
        assert!(corner.hit);
    }

    #[tokio::test]
    async fn unknown_character_is_an_error_not_a_miss() {
        let fx = fixture(SeedFile::test_image()).await;
        let err = fx.validation.validate(777, 0.5, 0.5).await.unwrap_err();
        assert!(matches!(err, GameError::CharacterNotFound(777)));
    }

    #[tokio::test]
    async fn validation_is_repeatable_and_leaves_session_running() {
        let fx = fixture(SeedFile::test_image()).await;
        let image = fx.catalog.first_game_image().await.unwrap();
        let odlaw = character(&fx.catalog, "Odlaw").await;
        let session = fx.sessions.start(image.id).await.unwrap();

        let first = fx
            .validation
            .validate_for_session(&session.session_id, odlaw.id, 0.8, 0.8)
            .await
            .unwrap();
        for _ in 0..5 {
            let again = fx
                .validation
                .validate_for_session(&session.session_id, odlaw.id, 0.8, 0.8)
                .await
                .unwrap();
            assert_eq!(again, first);
        }
        assert!(first.hit);

        let stored = fx.sessions.get(&session.session_id).await.unwrap();
        assert_eq!(stored.state, SessionState::InProgress);
    }

    #[tokio::test]
    async fn character_from_other_image_is_not_found() {
        let mut file = SeedFile::test_image();
        file.images.push(SeedImage {
            name: "Harbour".into(),
            image_url: "/static/harbour.png".into(),
            width: 1000,
            height: 800,
            characters: vec![SeedCharacter {
                name: "Wenda".into(),
                x_min: 0.1,
                y_min: 0.1,
                x_max: 0.3,
                y_max: 0.3,
            }],
        });
        let fx = fixture(file).await;

        let images = fx.catalog.list_game_images().await.unwrap();
        let harbour = fx.catalog.game_image(images[1].id).await.unwrap();
        let wenda_id = harbour.characters[0].id;
        let session = fx.sessions.start(images[0].id).await.unwrap();

        let err = fx
            .validation
            .validate_for_session(&session.session_id, wenda_id, 0.2, 0.2)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::CharacterNotFound(id) if id == wenda_id));

        let err = fx
            .validation
            .validate_for_session("nope", wenda_id, 0.2, 0.2)
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::SessionNotFound(_)));
    }
}
