use std::{env, path::PathBuf};

use waldo_lib::{bootstrap, config::GameConfig, utils::logging::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = env::var("WALDO_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("waldo.json"));
    let (config, warnings) = GameConfig::load_with_warnings(&config_path)?;

    init_logging(&config.log_level);
    log::info!("Waldo starting up...");
    for warning in &warnings {
        log::warn!("{warning}");
    }

    if !config_path.exists() {
        match GameConfig::default().persist(&config_path) {
            Ok(()) => log::info!("Wrote default config to {}", config_path.display()),
            Err(err) => log::warn!("Could not write default config: {err:#}"),
        }
    }

    let reset_test_image = env::var("WALDO_RESET_TEST")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let engine = bootstrap(&config, reset_test_image).await?;

    match engine.scoreboard.top_scores(None).await {
        Ok(scores) if scores.is_empty() => log::info!("No high scores recorded yet"),
        Ok(scores) => {
            for (rank, score) in scores.iter().enumerate() {
                log::info!(
                    "#{} {} {:.2}s",
                    rank + 1,
                    score.player_name,
                    score.time_seconds
                );
            }
        }
        Err(err) => log::error!("Failed to load leaderboard: {err}"),
    }

    Ok(())
}
