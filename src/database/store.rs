use std::collections::HashSet;

use anyhow::Result;

use super::connection::{DbPool, get_connection};
use super::{collections, games, reviews};
use crate::domain::{Collection, Game, GameId, Rating};
use crate::store::{CollectionStore, GameStore, OwnershipStore, RatingStore, owned_from_collections};

/// Read side of the SQLite database for the recommender and catalogue
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl RatingStore for SqliteStore {
    fn all_ratings(&self) -> Result<Vec<Rating>> {
        let mut conn = get_connection(&self.pool)?;
        reviews::list_all(&mut conn)
    }
}

impl GameStore for SqliteStore {
    fn all_games(&self) -> Result<Vec<Game>> {
        let mut conn = get_connection(&self.pool)?;
        games::list_all(&mut conn)
    }
}

impl CollectionStore for SqliteStore {
    fn collections(&self, user_id: Option<&str>) -> Result<Vec<Collection>> {
        let mut conn = get_connection(&self.pool)?;
        collections::load_collections(&mut conn, user_id)
    }
}

impl OwnershipStore for SqliteStore {
    fn owned_games(&self, user_id: &str) -> Result<HashSet<GameId>> {
        let collections = self.collections(Some(user_id))?;
        Ok(owned_from_collections(&collections))
    }
}
