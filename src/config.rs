use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::game::{GameRules, DEFAULT_MAX_MISTAKES, DEFAULT_TIME_LIMIT_SECS};

const APP_NAME: &str = "hangman";
const CONFIG_FILE: &str = "config.json";
const DATA_DIR_ENV: &str = "HANGMAN_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the database, key and result artifacts live.
    /// Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub max_mistakes: u32,
    pub time_limit_secs: u32,
    /// Also write the sealed result artifact after each game.
    pub encrypt_results: bool,
    /// Rules text file replacing the built-in rules.
    pub rules_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_mistakes: DEFAULT_MAX_MISTAKES,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            encrypt_results: true,
            rules_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user's config directory, then apply
    /// environment overrides.
    /// Returns defaults if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        let mut config = match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    fn try_load() -> Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            self.data_dir = Some(PathBuf::from(dir));
        }
    }

    pub fn rules(&self) -> Result<GameRules> {
        GameRules::new(self.max_mistakes, self.time_limit_secs)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let dirs = directories::ProjectDirs::from("", "", APP_NAME)
            .ok_or(Error::NoProjectDirs("data"))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("hangman.db"))
    }

    pub fn key_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("results.key"))
    }

    pub fn results_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("results"))
    }
}

fn get_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)
        .ok_or(Error::NoProjectDirs("config"))?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}
