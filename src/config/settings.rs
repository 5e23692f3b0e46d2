use std::path::PathBuf;

use crate::domain::ScoreColumn;

pub const DATA_DIR_ENV: &str = "GAME_RECS_DATA_DIR";
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendSettings {
    /// Neighbours must correlate strictly above this value
    pub similarity_threshold: f64,
    pub max_results: usize,
    pub score_column: ScoreColumn,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.1,
            max_results: 5,
            score_column: ScoreColumn::Overall,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data_store"),
            database_path: PathBuf::from("game_recs.db"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub recommend: RecommendSettings,
    pub data: DataSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with data locations taken from the environment when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(dir) = lookup(DATA_DIR_ENV) {
            config.data.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup(DATABASE_PATH_ENV) {
            config.data.database_path = PathBuf::from(path);
        }

        config
    }
}
