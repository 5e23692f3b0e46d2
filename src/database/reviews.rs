use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::Rating;

pub fn insert_review(conn: &mut DbConn, review: &Rating) -> Result<()> {
    let sql = "INSERT INTO reviews (user_id, game_id, complexity_score, gameplay_score, visual_score, overall_score) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

    conn.execute(
        sql,
        params![
            review.user_id,
            review.game_id,
            review.complexity_score,
            review.gameplay_score,
            review.visual_score,
            review.overall_score
        ],
    )
    .context("Failed to insert review")
    .map(|_| ())
}

fn parse_review_row(row: &rusqlite::Row) -> rusqlite::Result<Rating> {
    Ok(Rating {
        user_id: row.get(0)?,
        game_id: row.get(1)?,
        complexity_score: row.get(2)?,
        gameplay_score: row.get(3)?,
        visual_score: row.get(4)?,
        overall_score: row.get(5)?,
    })
}

/// Every review in insertion order.
pub fn list_all(conn: &mut DbConn) -> Result<Vec<Rating>> {
    let sql = "SELECT user_id, game_id, complexity_score, gameplay_score, visual_score, overall_score FROM reviews ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_review_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
