use std::{env, fmt::Display, fs, path::Path, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
pub const DEFAULT_MAX_PLAYER_NAME_LEN: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub database_path: PathBuf,
    pub seed_path: Option<PathBuf>,
    pub default_leaderboard_limit: usize,
    pub max_player_name_len: usize,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("waldo.sqlite3"),
            seed_path: None,
            default_leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            max_player_name_len: DEFAULT_MAX_PLAYER_NAME_LEN,
            log_level: "info".into(),
        }
    }
}

impl GameConfig {
    /// Reads the JSON config at `path` and logs any problems found on the way.
    pub fn load(path: &Path) -> Result<Self> {
        let (config, warnings) = Self::load_with_warnings(path)?;
        for warning in &warnings {
            warn!("{warning}");
        }
        Ok(config)
    }

    /// Like `load`, but hands the warnings back instead of logging them, for
    /// callers that read the config before a logger exists.
    ///
    /// A missing or malformed file falls back to defaults. `WALDO_*`
    /// environment variables override individual fields.
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<String>)> {
        let mut warnings = Vec::new();
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warnings.push(format!(
                        "Ignoring malformed config {}: {err}",
                        path.display()
                    ));
                    GameConfig::default()
                }
            }
        } else {
            GameConfig::default()
        };

        config.apply_overrides(|key| env::var(key).ok(), &mut warnings);
        config.sanitize(&mut warnings);
        Ok((config, warnings))
    }

    fn apply_overrides<F>(&mut self, lookup: F, warnings: &mut Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = var("WALDO_DB_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(path) = var("WALDO_SEED_PATH") {
            self.seed_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = var("WALDO_LEADERBOARD_LIMIT") {
            if let Some(limit) = parse_override("WALDO_LEADERBOARD_LIMIT", &raw, warnings) {
                self.default_leaderboard_limit = limit;
            }
        }
        if let Some(raw) = var("WALDO_MAX_PLAYER_NAME") {
            if let Some(len) = parse_override("WALDO_MAX_PLAYER_NAME", &raw, warnings) {
                self.max_player_name_len = len;
            }
        }
        if let Some(level) = var("WALDO_LOG_LEVEL") {
            self.log_level = level;
        }
    }

    fn sanitize(&mut self, warnings: &mut Vec<String>) {
        if self.default_leaderboard_limit == 0 {
            warnings.push(format!(
                "default_leaderboard_limit must be positive; using {DEFAULT_LEADERBOARD_LIMIT}"
            ));
            self.default_leaderboard_limit = DEFAULT_LEADERBOARD_LIMIT;
        }
        if self.max_player_name_len == 0 {
            warnings.push(format!(
                "max_player_name_len must be positive; using {DEFAULT_MAX_PLAYER_NAME_LEN}"
            ));
            self.max_player_name_len = DEFAULT_MAX_PLAYER_NAME_LEN;
        }
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

fn parse_override<T: FromStr>(key: &str, raw: &str, warnings: &mut Vec<String>) -> Option<T>
where
    T::Err: Display,
{
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warnings.push(format!("Invalid {key} value {raw:?}: {err}"));
            None
        }
    }
}
