use anyhow::{Result, bail};
use chrono::Utc;
use log::info;

use crate::database::{DbCollection, DbConn, DbPool, collections, games, get_connection};

/// Collection edits against the SQLite database.
///
/// Every change to an existing collection names the acting user, who must own it.
pub struct CollectionService {
    pool: DbPool,
}

impl CollectionService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn create(&self, user_id: &str) -> Result<DbCollection> {
        if user_id.trim().is_empty() {
            bail!("User id must not be empty");
        }

        let mut conn = get_connection(&self.pool)?;
        let collection = collections::create_collection(&mut conn, user_id, Utc::now().naive_utc())?;
        info!("Created collection {} for user {}", collection.collection_id, user_id);
        Ok(collection)
    }

    /// `false` when the game was already in the collection.
    pub fn add_game(&self, collection_id: &str, user_id: &str, game_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        self.check_owner(&mut conn, collection_id, user_id)?;

        if games::find_by_id(&mut conn, game_id)?.is_none() {
            bail!("Game not found: {}", game_id);
        }

        let added = collections::add_game(&mut conn, collection_id, game_id, Utc::now().naive_utc())?;
        info!("Add {} to {}: {}", game_id, collection_id, added);
        Ok(added)
    }

    /// `false` when the game was not in the collection.
    pub fn remove_game(&self, collection_id: &str, user_id: &str, game_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        self.check_owner(&mut conn, collection_id, user_id)?;

        let removed =
            collections::remove_game(&mut conn, collection_id, game_id, Utc::now().naive_utc())?;
        info!("Remove {} from {}: {}", game_id, collection_id, removed);
        Ok(removed)
    }

    pub fn delete(&self, collection_id: &str, user_id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;
        self.check_owner(&mut conn, collection_id, user_id)?;

        collections::delete_collection(&mut conn, collection_id)?;
        info!("Deleted collection {}", collection_id);
        Ok(())
    }

    fn check_owner(
        &self,
        conn: &mut DbConn,
        collection_id: &str,
        user_id: &str,
    ) -> Result<DbCollection> {
        let Some(collection) = collections::find_by_id(conn, collection_id)? else {
            bail!("Collection not found: {}", collection_id);
        };

        if collection.user_id != user_id {
            bail!(
                "Collection {} does not belong to user {}",
                collection_id,
                user_id
            );
        }

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::TempDatabase;
    use crate::domain::Game;

    fn service_with_games(db: &TempDatabase) -> CollectionService {
        let mut conn = db.connection();
        for id in ["g1", "g2"] {
            let game = Game {
                game_id: id.to_string(),
                name: None,
                game_type: "BOARD GAME".to_string(),
                genre: "family".to_string(),
                keywords: "tiles".to_string(),
                mechanic: "tile placement".to_string(),
            };
            games::upsert_game(&mut conn, &game).unwrap();
        }
        CollectionService::new(db.pool().clone())
    }

    #[test]
    fn test_owner_can_edit() {
        let db = TempDatabase::new("service_owner");
        let service = service_with_games(&db);

        let collection = service.create("u1").unwrap();
        let id = collection.collection_id.as_str();

        assert!(service.add_game(id, "u1", "g1").unwrap());
        assert!(!service.add_game(id, "u1", "g1").unwrap());
        assert!(service.remove_game(id, "u1", "g1").unwrap());
        service.delete(id, "u1").unwrap();

        let err = service.add_game(id, "u1", "g2").unwrap_err();
        assert!(err.to_string().contains("Collection not found"));
    }

    #[test]
    fn test_other_user_rejected() {
        let db = TempDatabase::new("service_other_user");
        let service = service_with_games(&db);
        let id = service.create("u1").unwrap().collection_id;

        let err = service.add_game(&id, "u2", "g1").unwrap_err();
        assert!(err.to_string().contains("does not belong"));
        assert!(service.delete(&id, "u2").is_err());
    }

    #[test]
    fn test_unknown_game_rejected() {
        let db = TempDatabase::new("service_unknown_game");
        let service = service_with_games(&db);
        let id = service.create("u1").unwrap().collection_id;

        let err = service.add_game(&id, "u1", "g404").unwrap_err();
        assert!(err.to_string().contains("Game not found"));
    }

    #[test]
    fn test_empty_user_rejected() {
        let db = TempDatabase::new("service_empty_user");
        let service = service_with_games(&db);
        assert!(service.create("  ").is_err());
    }
}
