use anyhow::{Context, Result};
use log::info;

use super::connection::DbConn;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables in drop order (children first)
const TABLES: [&str; 4] = ["collection_games", "collections", "reviews", "games"];

/// Create any missing tables; existing data is kept.
pub fn ensure_schema(conn: &mut DbConn) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
        .context("Failed to apply database schema")
}

/// Drop every table and recreate the schema.
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    for table in TABLES {
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {};", table))
            .with_context(|| format!("Failed to drop table {}", table))?;
    }

    ensure_schema(conn)?;
    info!("Database schema reset successfully");
    Ok(())
}
