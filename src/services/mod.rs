pub mod collections;
pub mod ingestion;
pub mod output;

use anyhow::Result;
use log::debug;

use crate::config::AppConfig;
use crate::database::setup::ensure_schema;
use crate::database::{SqliteStore, create_pool, get_connection};
use crate::store::{CsvDataStore, DataStore};

/// The CSV data store, or the SQLite database when `use_db` is set.
pub fn open_store(config: &AppConfig, use_db: bool) -> Result<Box<dyn DataStore>> {
    if use_db {
        debug!("Reading from database {}", config.data.database_path.display());
        let pool = create_pool(&config.data.database_path)?;
        ensure_schema(&mut get_connection(&pool)?)?;
        Ok(Box::new(SqliteStore::new(pool)))
    } else {
        debug!("Reading from data store {}", config.data.data_dir.display());
        Ok(Box::new(CsvDataStore::new(&config.data.data_dir)))
    }
}
