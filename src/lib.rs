pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod game;
pub mod geometry;
pub mod utils;

use anyhow::Result;
use log::{info, warn};

use catalog::seed::{reset_and_seed, seed, SeedFile};
use config::GameConfig;
use db::{Database, SessionState};
use game::GameEngine;

pub use error::{GameError, GameResult};

/// Opens the database named by `config`, seeds the catalog when a seed file is
/// configured, and wires up the game services.
///
/// With `reset_test_image` set, every stored score, session and image is
/// replaced by the built-in test scene.
pub async fn bootstrap(config: &GameConfig, reset_test_image: bool) -> Result<GameEngine> {
    let database = Database::new(config.database_path.clone())?;

    if reset_test_image {
        warn!("Resetting database with the built-in test image");
        reset_and_seed(&database, &SeedFile::test_image()).await?;
    } else if let Some(seed_path) = &config.seed_path {
        let file = SeedFile::load(seed_path)?;
        seed(&database, &file).await?;
    }

    let engine = GameEngine::new(database, config);

    let images = engine.catalog.list_game_images().await?;
    if images.is_empty() {
        warn!("Catalog is empty; configure a seed file to add game images");
    }
    for image in images {
        let characters = engine.catalog.characters_for_image(image.id).await?;
        info!(
            "Image {} \"{}\" ({}x{}) with {} character(s)",
            image.id,
            image.name,
            image.width,
            image.height,
            characters.len()
        );
    }

    let open_sessions = engine.db().count_sessions(SessionState::InProgress).await?;
    if open_sessions > 0 {
        info!("{open_sessions} game session(s) still in progress");
    }

    Ok(engine)
}
