use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{GameId, UserId};

/// Users whose similarity to the target passed the threshold
pub type Neighborhood = BTreeSet<UserId>;

/// Predicted interest per candidate game
pub type ScoredGameSet = BTreeMap<GameId, f64>;

/// Correlation of every matrix user against one target user.
///
/// `None` marks an undefined correlation (a constant rating row); such
/// users can never become neighbours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityVector {
    entries: Vec<(UserId, Option<f64>)>,
}

impl SimilarityVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, user_id: UserId, similarity: Option<f64>) {
        self.entries.push((user_id, similarity));
    }

    pub fn get(&self, user_id: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(id, _)| id == user_id)
            .and_then(|(_, similarity)| *similarity)
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.entries.iter().any(|(id, _)| id == user_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.entries.iter().map(|(id, s)| (id.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(UserId, Option<f64>)> for SimilarityVector {
    fn from_iter<I: IntoIterator<Item = (UserId, Option<f64>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub game_id: GameId,
    pub score: f64,
}
