use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::{CollectionGameRow, DbCollection};
use crate::domain::Collection;

const COLLECTION_ID_PREFIX: &str = "c_";

/// Create an empty collection with the next free `c_<n>` id.
pub fn create_collection(conn: &mut DbConn, user_id: &str, now: NaiveDateTime) -> Result<DbCollection> {
    let collection_id = next_collection_id(conn)?;
    insert_collection(conn, &collection_id, user_id, now)
}

pub fn insert_collection(
    conn: &mut DbConn,
    collection_id: &str,
    user_id: &str,
    now: NaiveDateTime,
) -> Result<DbCollection> {
    let sql = "INSERT INTO collections (collection_id, user_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?3) RETURNING collection_id, user_id, created_at, updated_at";

    conn.query_row(sql, params![collection_id, user_id, now], parse_collection_row)
        .with_context(|| format!("Failed to insert collection {}", collection_id))
}

// Ids count up from the number of rows; gaps left by deletes are skipped over.
fn next_collection_id(conn: &mut DbConn) -> Result<String> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM collections", [], |row| row.get(0))
        .context("Failed to count collections")?;

    let mut n = count + 1;
    loop {
        let candidate = format!("{}{}", COLLECTION_ID_PREFIX, n);
        if find_by_id(conn, &candidate)?.is_none() {
            return Ok(candidate);
        }
        n += 1;
    }
}

fn parse_collection_row(row: &rusqlite::Row) -> rusqlite::Result<DbCollection> {
    Ok(DbCollection {
        collection_id: row.get(0)?,
        user_id: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, collection_id: &str) -> Result<Option<DbCollection>> {
    let sql = "SELECT collection_id, user_id, created_at, updated_at FROM collections WHERE collection_id = ?1";

    conn.query_row(sql, params![collection_id], parse_collection_row)
        .optional()
        .context("Failed to query collection by id")
}

pub fn list(conn: &mut DbConn, user_id: Option<&str>) -> Result<Vec<DbCollection>> {
    let sql = "SELECT collection_id, user_id, created_at, updated_at FROM collections WHERE ?1 IS NULL OR user_id = ?1 ORDER BY rowid";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![user_id], parse_collection_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn list_game_rows(conn: &mut DbConn, user_id: Option<&str>) -> Result<Vec<CollectionGameRow>> {
    let sql = "SELECT cg.collection_id, cg.game_id FROM collection_games cg \
               JOIN collections c ON c.collection_id = cg.collection_id \
               WHERE ?1 IS NULL OR c.user_id = ?1 \
               ORDER BY cg.collection_id, cg.position";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok(CollectionGameRow {
                collection_id: row.get(0)?,
                game_id: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Collections with their games, optionally for one user only.
pub fn load_collections(conn: &mut DbConn, user_id: Option<&str>) -> Result<Vec<Collection>> {
    let headers = list(conn, user_id)?;
    let game_rows = list_game_rows(conn, user_id)?;

    Ok(headers
        .into_iter()
        .map(|header| {
            let game_ids = game_rows
                .iter()
                .filter(|row| row.collection_id == header.collection_id)
                .map(|row| row.game_id.clone())
                .collect();
            Collection {
                collection_id: header.collection_id,
                user_id: header.user_id,
                game_ids,
            }
        })
        .collect())
}

fn contains_game(conn: &mut DbConn, collection_id: &str, game_id: &str) -> Result<bool> {
    let sql = "SELECT 1 FROM collection_games WHERE collection_id = ?1 AND game_id = ?2";

    conn.query_row(sql, params![collection_id, game_id], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .context("Failed to query collection games")
}

fn touch(conn: &mut DbConn, collection_id: &str, now: NaiveDateTime) -> Result<()> {
    conn.execute(
        "UPDATE collections SET updated_at = ?1 WHERE collection_id = ?2",
        params![now, collection_id],
    )
    .context("Failed to update collection timestamp")
    .map(|_| ())
}

/// Append a game; `false` if it was already in the collection.
pub fn add_game(conn: &mut DbConn, collection_id: &str, game_id: &str, now: NaiveDateTime) -> Result<bool> {
    if contains_game(conn, collection_id, game_id)? {
        return Ok(false);
    }

    let sql = "INSERT INTO collection_games (collection_id, game_id, position) \
               SELECT ?1, ?2, COALESCE(MAX(position), 0) + 1 FROM collection_games WHERE collection_id = ?1";
    conn.execute(sql, params![collection_id, game_id])
        .with_context(|| format!("Failed to add game {} to collection {}", game_id, collection_id))?;

    touch(conn, collection_id, now)?;
    Ok(true)
}

/// `false` if the game was not in the collection.
pub fn remove_game(conn: &mut DbConn, collection_id: &str, game_id: &str, now: NaiveDateTime) -> Result<bool> {
    let removed = conn
        .execute(
            "DELETE FROM collection_games WHERE collection_id = ?1 AND game_id = ?2",
            params![collection_id, game_id],
        )
        .with_context(|| format!("Failed to remove game {} from collection {}", game_id, collection_id))?;

    if removed > 0 {
        touch(conn, collection_id, now)?;
    }
    Ok(removed > 0)
}

/// `false` if no such collection existed.
pub fn delete_collection(conn: &mut DbConn, collection_id: &str) -> Result<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM collections WHERE collection_id = ?1",
            params![collection_id],
        )
        .with_context(|| format!("Failed to delete collection {}", collection_id))?;

    Ok(deleted > 0)
}
