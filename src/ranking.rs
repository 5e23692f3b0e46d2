use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Serialize;

use crate::domain::{Game, Rating, ScoreColumn};
use crate::errors::{RecommendError, RecommendResult};

/// Per-column weights in [`ScoreColumn::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weighting([u32; 4]);

impl Weighting {
    pub fn new(weights: [u32; 4]) -> Self {
        Self(weights)
    }

    pub fn weights(&self) -> [u32; 4] {
        self.0
    }

    /// Sum of the weights, in `u64`
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&w| u64::from(w)).sum()
    }

    /// Overall score only, i.e. a plain mean
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for Weighting {
    fn default() -> Self {
        Self([0, 0, 0, 1])
    }
}

impl TryFrom<Vec<u32>> for Weighting {
    type Error = RecommendError;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        let weights: [u32; 4] = values.try_into().map_err(|v: Vec<u32>| {
            RecommendError::InvalidInput(format!(
                "weighting must be a list of 4 int values, got {}",
                v.len()
            ))
        })?;
        Ok(Self(weights))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGame {
    #[serde(flatten)]
    pub game: Game,
    pub mean: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct ScoreTotals {
    sums: [f64; 4],
    count: usize,
}

impl ScoreTotals {
    fn add(&mut self, rating: &Rating) {
        for (sum, score) in self.sums.iter_mut().zip(rating.scores()) {
            *sum += score;
        }
        self.count += 1;
    }

    fn means(&self) -> [f64; 4] {
        self.sums.map(|sum| sum / self.count as f64)
    }
}

/// Rank `games` by the mean review score of `sort_by`, best first.
///
/// With `sort_by == Overall` and a non-default weighting, the mean is the
/// weighted average of the four per-column means. Games nobody reviewed are
/// left out. A weighting that sums to zero is rejected.
pub fn rank_games(
    games: &[Game],
    reviews: &[Rating],
    sort_by: ScoreColumn,
    weighting: Weighting,
) -> RecommendResult<Vec<RankedGame>> {
    let weighted = sort_by == ScoreColumn::Overall && !weighting.is_default();
    if weighted && weighting.total() == 0 {
        return Err(RecommendError::InvalidInput(
            "weighting must contain at least one non-zero value".to_string(),
        ));
    }

    let totals = accumulate_totals(games, reviews);
    debug!("Aggregated reviews for {} games", totals.len());

    let mut seen = HashSet::new();
    let mut ranked: Vec<RankedGame> = games
        .iter()
        .filter(|game| seen.insert(game.game_id.as_str()))
        .filter_map(|game| {
            let means = totals.get(game.game_id.as_str())?.means();
            let mean = if weighted {
                weighted_mean(&means, weighting)
            } else {
                means[sort_by.position()]
            };
            Some(RankedGame {
                game: game.clone(),
                mean,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.game.game_id.cmp(&b.game.game_id))
    });

    Ok(ranked)
}

fn accumulate_totals<'a>(games: &'a [Game], reviews: &[Rating]) -> HashMap<&'a str, ScoreTotals> {
    let game_ids: HashSet<&str> = games.iter().map(|g| g.game_id.as_str()).collect();
    let mut totals: HashMap<&str, ScoreTotals> = HashMap::new();

    for review in reviews {
        if let Some(&id) = game_ids.get(review.game_id.as_str()) {
            totals.entry(id).or_default().add(review);
        }
    }

    totals
}

fn weighted_mean(means: &[f64; 4], weighting: Weighting) -> f64 {
    let weights = weighting.weights();
    let numerator: f64 = means
        .iter()
        .zip(weights)
        .map(|(mean, weight)| mean * f64::from(weight))
        .sum();
    numerator / weighting.total() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str) -> Game {
        Game {
            game_id: id.to_string(),
            name: None,
            game_type: "BOARD GAME".to_string(),
            genre: "strategy".to_string(),
            keywords: "classic".to_string(),
            mechanic: "area control".to_string(),
        }
    }

    fn review(game_id: &str, scores: [f64; 4]) -> Rating {
        Rating {
            user_id: "u".to_string(),
            game_id: game_id.to_string(),
            complexity_score: scores[0],
            gameplay_score: scores[1],
            visual_score: scores[2],
            overall_score: scores[3],
        }
    }

    fn reviews() -> Vec<Rating> {
        vec![
            review("g1", [1.0, 2.0, 3.0, 4.0]),
            review("g1", [3.0, 2.0, 1.0, 2.0]),
            review("g2", [5.0, 5.0, 1.0, 3.5]),
            review("g9", [5.0, 5.0, 5.0, 5.0]),
        ]
    }

    #[test]
    fn test_simple_mean_sorted_desc() {
        let games = vec![game("g1"), game("g2"), game("g3")];

        let ranked = rank_games(&games, &reviews(), ScoreColumn::Overall, Weighting::default()).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].game.game_id, "g2");
        assert!((ranked[0].mean - 3.5).abs() < 1e-12);
        assert!((ranked[1].mean - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_other_column_ignores_weighting() {
        let games = vec![game("g1"), game("g2")];

        let ranked = rank_games(
            &games,
            &reviews(),
            ScoreColumn::Visual,
            Weighting::new([1, 1, 1, 1]),
        )
        .unwrap();

        assert_eq!(ranked[0].game.game_id, "g1");
        assert!((ranked[0].mean - 2.0).abs() < 1e-12);
        assert!((ranked[1].mean - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_mean() {
        let games = vec![game("g1"), game("g2")];

        let ranked = rank_games(
            &games,
            &reviews(),
            ScoreColumn::Overall,
            Weighting::new([1, 0, 1, 2]),
        )
        .unwrap();

        // g1 means: [2, 2, 2, 3] -> (2 + 2 + 6) / 4 = 2.5
        // g2 means: [5, 5, 1, 3.5] -> (5 + 1 + 7) / 4 = 3.25
        assert_eq!(ranked[0].game.game_id, "g2");
        assert!((ranked[0].mean - 3.25).abs() < 1e-12);
        assert!((ranked[1].mean - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weighting_rejected() {
        let err = rank_games(&[game("g1")], &reviews(), ScoreColumn::Overall, Weighting::new([0; 4]))
            .unwrap_err();
        assert!(matches!(err, RecommendError::InvalidInput(_)));
    }

    #[test]
    fn test_large_weights_do_not_overflow() {
        let weighting = Weighting::try_from(vec![u32::MAX, 1, 0, 0]).unwrap();
        assert_eq!(weighting.total(), u64::from(u32::MAX) + 1);

        let ranked = rank_games(
            &[game("g1")],
            &[Rating::uniform("u", "g1", 3.0)],
            ScoreColumn::Overall,
            weighting,
        )
        .unwrap();

        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].mean - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_weighting_from_vec() {
        assert_eq!(Weighting::try_from(vec![1, 2, 3, 4]).unwrap().weights(), [1, 2, 3, 4]);
        assert!(Weighting::try_from(vec![1]).is_err());
    }
}
