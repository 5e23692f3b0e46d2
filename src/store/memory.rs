use std::collections::HashSet;

use anyhow::Result;

use super::{CollectionStore, GameStore, OwnershipStore, RatingStore, owned_from_collections};
use crate::domain::{Collection, Game, GameId, Rating};

/// Snapshot held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ratings: Vec<Rating>,
    games: Vec<Game>,
    collections: Vec<Collection>,
}

impl MemoryStore {
    pub fn new(ratings: Vec<Rating>, games: Vec<Game>, collections: Vec<Collection>) -> Self {
        Self {
            ratings,
            games,
            collections,
        }
    }

    pub fn with_ratings(ratings: Vec<Rating>) -> Self {
        Self {
            ratings,
            ..Self::default()
        }
    }

    /// Record `game_ids` as owned by `user_id` in a fresh collection.
    pub fn add_owned(&mut self, user_id: &str, game_ids: &[&str]) {
        let collection_id = format!("c_{}", self.collections.len() + 1);
        self.collections.push(Collection {
            collection_id,
            user_id: user_id.to_string(),
            game_ids: game_ids.iter().map(|id| id.to_string()).collect(),
        });
    }
}

impl RatingStore for MemoryStore {
    fn all_ratings(&self) -> Result<Vec<Rating>> {
        Ok(self.ratings.clone())
    }
}

impl OwnershipStore for MemoryStore {
    fn owned_games(&self, user_id: &str) -> Result<HashSet<GameId>> {
        let collections = self.collections(Some(user_id))?;
        Ok(owned_from_collections(&collections))
    }
}

impl GameStore for MemoryStore {
    fn all_games(&self) -> Result<Vec<Game>> {
        Ok(self.games.clone())
    }
}

impl CollectionStore for MemoryStore {
    fn collections(&self, user_id: Option<&str>) -> Result<Vec<Collection>> {
        Ok(self
            .collections
            .iter()
            .filter(|c| user_id.is_none_or(|id| c.user_id == id))
            .cloned()
            .collect())
    }
}
