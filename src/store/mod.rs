//! Data access seams of the recommender.
//!
//! The engine only needs read access: every rating, and the games a user
//! already owns. Games and collections are read by the catalogue commands.

pub mod csv_store;
pub mod memory;

use std::collections::HashSet;

use anyhow::Result;

use crate::domain::{Collection, Game, GameId, Rating};

pub use csv_store::CsvDataStore;
pub use memory::MemoryStore;

pub trait RatingStore {
    fn all_ratings(&self) -> Result<Vec<Rating>>;
}

pub trait OwnershipStore {
    fn owned_games(&self, user_id: &str) -> Result<HashSet<GameId>>;
}

pub trait GameStore {
    fn all_games(&self) -> Result<Vec<Game>>;
}

pub trait CollectionStore {
    /// All collections, or only the given user's.
    fn collections(&self, user_id: Option<&str>) -> Result<Vec<Collection>>;
}

/// Everything the command line needs from one backing store
pub trait DataStore: RatingStore + OwnershipStore + GameStore + CollectionStore {}

impl<T> DataStore for T where T: RatingStore + OwnershipStore + GameStore + CollectionStore {}

impl<T: RatingStore + ?Sized> RatingStore for &T {
    fn all_ratings(&self) -> Result<Vec<Rating>> {
        (**self).all_ratings()
    }
}

impl<T: OwnershipStore + ?Sized> OwnershipStore for &T {
    fn owned_games(&self, user_id: &str) -> Result<HashSet<GameId>> {
        (**self).owned_games(user_id)
    }
}

impl<T: GameStore + ?Sized> GameStore for &T {
    fn all_games(&self) -> Result<Vec<Game>> {
        (**self).all_games()
    }
}

impl<T: CollectionStore + ?Sized> CollectionStore for &T {
    fn collections(&self, user_id: Option<&str>) -> Result<Vec<Collection>> {
        (**self).collections(user_id)
    }
}

/// Union of the game ids held in `collections`.
pub fn owned_from_collections(collections: &[Collection]) -> HashSet<GameId> {
    collections
        .iter()
        .flat_map(|c| c.game_ids.iter().cloned())
        .collect()
}
