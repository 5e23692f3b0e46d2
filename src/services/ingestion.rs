use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::database::{self, DbConn, collections, games, reviews};
use crate::domain::{Collection, Game, Rating};
use crate::store::{CollectionStore, CsvDataStore, GameStore, RatingStore};

/// Rebuilds the SQLite database from the CSV data store.
pub struct IngestionService {
    source: CsvDataStore,
    database_path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionSummary {
    pub games: usize,
    pub reviews: usize,
    pub collections: usize,
}

impl IngestionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            source: CsvDataStore::new(&config.data.data_dir),
            database_path: config.data.database_path.clone(),
        }
    }

    /// Load everything into `<path>.tmp`, then swap it over the live database.
    pub fn run(&self) -> Result<IngestionSummary> {
        let temp_path = temp_path(&self.database_path);

        info!("=== Starting Ingestion ===");
        info!(
            "Source: {}, Target DB: {}, Temp DB: {}",
            self.source.data_dir().display(),
            self.database_path.display(),
            temp_path.display()
        );

        if temp_path.exists() {
            std::fs::remove_file(&temp_path)
                .with_context(|| format!("Failed to remove stale {}", temp_path.display()))?;
        }

        let summary = self.ingest_to_db(&temp_path)?;

        std::fs::rename(&temp_path, &self.database_path).with_context(|| {
            format!("Failed to move {} into place", temp_path.display())
        })?;
        info!("Swapped database to {}", self.database_path.display());

        info!("=== Ingestion Complete ===");
        Ok(summary)
    }

    fn ingest_to_db(&self, db_path: &Path) -> Result<IngestionSummary> {
        let catalogue = self.source.all_games()?;
        let ratings = self.source.all_ratings()?;
        let owned = self.source.collections(None)?;

        let pool = database::create_pool(db_path)?;
        let mut conn = database::get_connection(&pool)?;

        database::setup::reset_database(&mut conn)?;
        info!("  → Database schema reset");

        conn.execute_batch("BEGIN;")?;
        let result = write_all(&mut conn, &catalogue, &ratings, &owned);
        match result {
            Ok(()) => conn.execute_batch("COMMIT;")?,
            Err(e) => {
                conn.execute_batch("ROLLBACK;")?;
                return Err(e);
            }
        }

        Ok(IngestionSummary {
            games: catalogue.len(),
            reviews: ratings.len(),
            collections: owned.len(),
        })
    }
}

fn write_all(
    conn: &mut DbConn,
    catalogue: &[Game],
    ratings: &[Rating],
    owned: &[Collection],
) -> Result<()> {
    for game in catalogue {
        games::upsert_game(conn, game)?;
    }
    info!("  → Inserted {} games", catalogue.len());

    for review in ratings {
        reviews::insert_review(conn, review)?;
    }
    info!("  → Inserted {} reviews", ratings.len());

    let now = chrono::Utc::now().naive_utc();
    for collection in owned {
        collections::insert_collection(conn, &collection.collection_id, &collection.user_id, now)?;
        for game_id in &collection.game_ids {
            collections::add_game(conn, &collection.collection_id, game_id, now)?;
        }
    }
    info!("  → Inserted {} collections", owned.len());

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
