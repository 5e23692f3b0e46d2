//! Terminal rendering of command results.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::domain::Collection;
use crate::ranking::RankedGame;
use crate::recommend::Recommendation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

const EMPTY_MESSAGE: &str = "No results.";

pub fn render_recommendations(items: &[Recommendation], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Table => {
            let rows = items
                .iter()
                .enumerate()
                .map(|(i, r)| vec![(i + 1).to_string(), r.game_id.clone(), format!("{:.3}", r.score)])
                .collect();
            Ok(render_table(&["#", "game_id", "score"], rows))
        }
    }
}

pub fn render_ranked_games(items: &[RankedGame], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Table => {
            let rows = items
                .iter()
                .map(|r| {
                    vec![
                        r.game.game_id.clone(),
                        r.game.name.clone().unwrap_or_default(),
                        r.game.game_type.clone(),
                        r.game.genre.clone(),
                        format!("{:.2}", r.mean),
                    ]
                })
                .collect();
            Ok(render_table(&["game_id", "name", "game_type", "genre", "mean"], rows))
        }
    }
}

pub fn render_filter_terms(terms: &BTreeMap<String, Vec<String>>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(terms),
        OutputFormat::Table => {
            let rows = terms
                .iter()
                .map(|(column, values)| vec![column.clone(), values.join(", ")])
                .collect();
            Ok(render_table(&["filter", "values"], rows))
        }
    }
}

pub fn render_collections(items: &[Collection], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Table => {
            let rows = items
                .iter()
                .map(|c| vec![c.collection_id.clone(), c.user_id.clone(), c.game_ids.join(", ")])
                .collect();
            Ok(render_table(&["collection_id", "user_id", "game_ids"], rows))
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return EMPTY_MESSAGE.yellow().to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    // Pad before colouring so escape codes do not count towards the width.
    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w).bold().cyan().to_string())
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![header_line.trim_end().to_string()];
    for row in rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}
