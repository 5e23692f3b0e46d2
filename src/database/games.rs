use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::Game;

pub fn upsert_game(conn: &mut DbConn, game: &Game) -> Result<()> {
    let sql = "INSERT INTO games (game_id, name, game_type, genre, keywords, mechanic) VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
               ON CONFLICT (game_id) DO UPDATE SET name = excluded.name, game_type = excluded.game_type, genre = excluded.genre, keywords = excluded.keywords, mechanic = excluded.mechanic";

    conn.execute(
        sql,
        params![
            game.game_id,
            game.name,
            game.game_type,
            game.genre,
            game.keywords,
            game.mechanic
        ],
    )
    .with_context(|| format!("Failed to upsert game {}", game.game_id))
    .map(|_| ())
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<Game> {
    Ok(Game {
        game_id: row.get(0)?,
        name: row.get(1)?,
        game_type: row.get(2)?,
        genre: row.get(3)?,
        keywords: row.get(4)?,
        mechanic: row.get(5)?,
    })
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Game>> {
    let sql = "SELECT game_id, name, game_type, genre, keywords, mechanic FROM games ORDER BY rowid";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn find_by_id(conn: &mut DbConn, game_id: &str) -> Result<Option<Game>> {
    let sql = "SELECT game_id, name, game_type, genre, keywords, mechanic FROM games WHERE game_id = ?1";

    conn.query_row(sql, params![game_id], parse_game_row)
        .optional()
        .context("Failed to query game by id")
}
