use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GameError;
use crate::session::SessionConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub name_size: usize,
    pub alphabet: String,
    pub rounds: usize,
    pub categories: Vec<String>,
    pub first_token_category: Option<usize>,
    pub base_time_secs: u64,
    pub time_decrement_secs: u64,
    pub min_players: usize,
    pub max_players: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name_size: 20,
            alphabet: "ABCDEFGHIJLMNOPQRSTUVXZ".to_string(),
            rounds: 5,
            categories: ["Nome", "Animal", "Fruta", "Cor", "Objeto", "Lugar"]
                .into_iter()
                .map(String::from)
                .collect(),
            first_token_category: Some(0),
            base_time_secs: 10,
            time_decrement_secs: 2,
            min_players: 2,
            max_players: 10,
        }
    }
}

impl TryFrom<&Config> for SessionConfig {
    type Error = GameError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        if cfg.min_players == 0 || cfg.min_players > cfg.max_players {
            return Err(GameError::Config(format!(
                "player range [{}, {}] is empty",
                cfg.min_players, cfg.max_players
            )));
        }
        let session = SessionConfig {
            name_size: cfg.name_size,
            alphabet: cfg
                .alphabet
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
            rounds: cfg.rounds,
            categories: cfg.categories.clone(),
            first_token_category: cfg.first_token_category,
            base_time: Duration::from_secs(cfg.base_time_secs),
            time_decrement: Duration::from_secs(cfg.time_decrement_secs),
        };
        session.validate()?;
        session.validate_budget(cfg.max_players)?;
        Ok(session)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "adedonha") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("adedonha_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable config"),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
