pub mod filter;
pub mod models;

pub use filter::{filter_games, filter_terms, parse_filter};
pub use models::{Collection, Game, GameId, Rating, ScoreColumn, UserId};
