//! CSV data store: `reviews.csv`, `collections.csv` and `games.csv` in one directory.
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use csv::StringRecord;
use log::info;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{CollectionStore, GameStore, OwnershipStore, RatingStore, owned_from_collections};
use crate::domain::models::parse_game_ids;
use crate::domain::{Collection, Game, GameId, Rating};
use crate::errors::{RecommendError, load_context, parse_context};

pub const REVIEW_DATA: &str = "reviews.csv";
pub const COLLECTION_DATA: &str = "collections.csv";
pub const GAME_DATA: &str = "games.csv";

pub const REVIEW_TERMS: [&str; 6] = [
    "user_id",
    "game_id",
    "complexity_score",
    "gameplay_score",
    "visual_score",
    "overall_score",
];
pub const COLLECTION_TERMS: [&str; 3] = ["collection_id", "user_id", "game_ids"];
pub const GAME_TERMS: [&str; 5] = ["game_id", "game_type", "genre", "keywords", "mechanic"];

#[derive(Debug, Clone)]
pub struct CsvDataStore {
    data_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CollectionRecord {
    collection_id: String,
    user_id: String,
    #[serde(default)]
    game_ids: String,
}

impl From<CollectionRecord> for Collection {
    fn from(record: CollectionRecord) -> Self {
        Collection {
            collection_id: record.collection_id,
            user_id: record.user_id,
            game_ids: parse_game_ids(&record.game_ids),
        }
    }
}

impl CsvDataStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn read_records<T: DeserializeOwned>(&self, file: &str, terms: &[&str], what: &str) -> Result<Vec<T>> {
        let path = self.data_dir.join(file);
        let mut reader = open_reader(&path).with_context(|| load_context(what, &path))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header row of {}", path.display()))?
            .clone();
        require_columns(&headers, terms, &path)?;

        let mut records = Vec::new();
        for (row_idx, result) in reader.deserialize::<T>().enumerate() {
            let record = result.with_context(|| parse_context(what, row_idx + 1))?;
            records.push(record);
        }

        info!("Loaded {} {} from {}", records.len(), what, path.display());
        Ok(records)
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    if !path.exists() {
        bail!("Data store file not found: {}", path.display());
    }

    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))
}

fn require_columns(headers: &StringRecord, terms: &[&str], path: &Path) -> Result<()> {
    let missing: Vec<&str> = terms
        .iter()
        .copied()
        .filter(|term| !headers.iter().any(|h| h == *term))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(RecommendError::InvalidInput(format!(
        "Invalid data store {}. Missing columns: {} (required: {})",
        path.display(),
        missing.join(", "),
        terms.join(", ")
    ))
    .into())
}

impl RatingStore for CsvDataStore {
    fn all_ratings(&self) -> Result<Vec<Rating>> {
        self.read_records(REVIEW_DATA, &REVIEW_TERMS, "reviews")
    }
}

impl GameStore for CsvDataStore {
    fn all_games(&self) -> Result<Vec<Game>> {
        self.read_records(GAME_DATA, &GAME_TERMS, "games")
    }
}

impl CollectionStore for CsvDataStore {
    fn collections(&self, user_id: Option<&str>) -> Result<Vec<Collection>> {
        let records: Vec<CollectionRecord> =
            self.read_records(COLLECTION_DATA, &COLLECTION_TERMS, "collections")?;

        Ok(records
            .into_iter()
            .filter(|r| user_id.is_none_or(|id| r.user_id == id))
            .map(Collection::from)
            .collect())
    }
}

impl OwnershipStore for CsvDataStore {
    fn owned_games(&self, user_id: &str) -> Result<HashSet<GameId>> {
        let collections = self.collections(Some(user_id))?;
        Ok(owned_from_collections(&collections))
    }
}
