use std::collections::BTreeMap;

use super::models::Game;
use crate::errors::{RecommendError, RecommendResult};

/// Columns offered as filter facets
pub const FILTER_TERMS: [&str; 4] = ["game_type", "genre", "keywords", "mechanic"];

const FILTER_KEYS: [&str; 6] = ["game_id", "name", "game_type", "genre", "keywords", "mechanic"];

/// Keep games matching every `(column, value)` pair exactly.
pub fn filter_games(games: &[Game], filters: &[(String, String)]) -> RecommendResult<Vec<Game>> {
    for (key, _) in filters {
        if !FILTER_KEYS.contains(&key.as_str()) {
            return Err(invalid_key(key));
        }
    }

    Ok(games
        .iter()
        .filter(|game| matches_all(game, filters))
        .cloned()
        .collect())
}

fn matches_all(game: &Game, filters: &[(String, String)]) -> bool {
    filters
        .iter()
        .all(|(key, value)| field(game, key).is_some_and(|actual| actual == value))
}

fn field<'a>(game: &'a Game, key: &str) -> Option<&'a str> {
    match key {
        "game_id" => Some(&game.game_id),
        "name" => Some(game.name.as_deref().unwrap_or("")),
        "game_type" => Some(&game.game_type),
        "genre" => Some(&game.genre),
        "keywords" => Some(&game.keywords),
        "mechanic" => Some(&game.mechanic),
        _ => None,
    }
}

fn invalid_key(key: &str) -> RecommendError {
    RecommendError::InvalidInput(format!("Invalid filter key given: {}", key))
}

/// Unique values of each facet column, in first-seen order.
pub fn filter_terms(games: &[Game]) -> BTreeMap<String, Vec<String>> {
    let mut terms = BTreeMap::new();

    for term in FILTER_TERMS {
        let mut values: Vec<String> = Vec::new();
        for game in games {
            let value = field(game, term).unwrap_or_default();
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
        terms.insert(term.to_string(), values);
    }

    terms
}

/// Parse a `key=value` command line filter.
pub fn parse_filter(raw: &str) -> RecommendResult<(String, String)> {
    let (key, value) = raw.split_once('=').ok_or_else(|| {
        RecommendError::InvalidInput(format!("filter must look like key=value, got: {}", raw))
    })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(RecommendError::InvalidInput(format!("filter key is empty: {}", raw)));
    }

    Ok((key.to_string(), value.trim().to_string()))
}
