use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RecommendError;

pub type UserId = String;
pub type GameId = String;

/// One review of a game by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub game_id: GameId,
    pub complexity_score: f64,
    pub gameplay_score: f64,
    pub visual_score: f64,
    pub overall_score: f64,
}

impl Rating {
    /// Rating with the same value in every score column
    pub fn uniform(user_id: &str, game_id: &str, score: f64) -> Self {
        Self {
            user_id: user_id.to_string(),
            game_id: game_id.to_string(),
            complexity_score: score,
            gameplay_score: score,
            visual_score: score,
            overall_score: score,
        }
    }

    pub fn score(&self, column: ScoreColumn) -> f64 {
        match column {
            ScoreColumn::Complexity => self.complexity_score,
            ScoreColumn::Gameplay => self.gameplay_score,
            ScoreColumn::Visual => self.visual_score,
            ScoreColumn::Overall => self.overall_score,
        }
    }

    pub fn set_score(&mut self, column: ScoreColumn, value: f64) {
        match column {
            ScoreColumn::Complexity => self.complexity_score = value,
            ScoreColumn::Gameplay => self.gameplay_score = value,
            ScoreColumn::Visual => self.visual_score = value,
            ScoreColumn::Overall => self.overall_score = value,
        }
    }

    pub fn scores(&self) -> [f64; 4] {
        ScoreColumn::ALL.map(|column| self.score(column))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreColumn {
    #[serde(rename = "complexity_score")]
    Complexity,
    #[serde(rename = "gameplay_score")]
    Gameplay,
    #[serde(rename = "visual_score")]
    Visual,
    #[serde(rename = "overall_score")]
    Overall,
}

impl ScoreColumn {
    /// Column order used by weightings
    pub const ALL: [ScoreColumn; 4] = [
        ScoreColumn::Complexity,
        ScoreColumn::Gameplay,
        ScoreColumn::Visual,
        ScoreColumn::Overall,
    ];

    /// Index into [`ScoreColumn::ALL`]
    pub fn position(&self) -> usize {
        match self {
            ScoreColumn::Complexity => 0,
            ScoreColumn::Gameplay => 1,
            ScoreColumn::Visual => 2,
            ScoreColumn::Overall => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreColumn::Complexity => "complexity_score",
            ScoreColumn::Gameplay => "gameplay_score",
            ScoreColumn::Visual => "visual_score",
            ScoreColumn::Overall => "overall_score",
        }
    }
}

impl fmt::Display for ScoreColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreColumn {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoreColumn::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = ScoreColumn::ALL.iter().map(|c| c.as_str()).collect();
                RecommendError::InvalidInput(format!(
                    "score column must be one of the following: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Game catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: GameId,
    #[serde(default)]
    pub name: Option<String>,
    pub game_type: String,
    pub genre: String,
    pub keywords: String,
    pub mechanic: String,
}

/// A user's named set of owned games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub collection_id: String,
    pub user_id: UserId,
    pub game_ids: Vec<GameId>,
}

impl Collection {
    pub fn contains(&self, game_id: &str) -> bool {
        self.game_ids.iter().any(|id| id == game_id)
    }
}

/// Split a stored `"g1, g2,g3"` list; blanks are dropped.
pub fn parse_game_ids(raw: &str) -> Vec<GameId> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_game_ids(game_ids: &[GameId]) -> String {
    game_ids.join(", ")
}
