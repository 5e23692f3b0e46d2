use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};

use super::matrix::RatingMatrix;
use super::neighborhood::select_neighbors;
use super::normalization::normalize_ratings;
use super::scoring::score_candidates;
use super::similarity::users_similarity_all;
use super::types::{Recommendation, ScoredGameSet};
use crate::config::RecommendSettings;
use crate::domain::{GameId, Rating};
use crate::errors::RecommendResult;
use crate::store::{OwnershipStore, RatingStore};

/// User-user collaborative filtering over a rating store and an ownership store.
///
/// Holds no state between calls; every request works on the snapshot the
/// stores return at that moment.
pub struct Recommender<R, O> {
    ratings: R,
    ownership: O,
    settings: RecommendSettings,
}

impl<R: RatingStore, O: OwnershipStore> Recommender<R, O> {
    pub fn new(ratings: R, ownership: O, settings: RecommendSettings) -> Self {
        Self {
            ratings,
            ownership,
            settings,
        }
    }

    pub fn settings(&self) -> &RecommendSettings {
        &self.settings
    }

    /// Up to `max_results` unowned game ids, best first.
    pub fn recommend(&self, user_id: &str) -> RecommendResult<Vec<GameId>> {
        Ok(self
            .recommend_scored(user_id)?
            .into_iter()
            .map(|r| r.game_id)
            .collect())
    }

    /// Same as [`Recommender::recommend`], keeping each game's score.
    pub fn recommend_scored(&self, user_id: &str) -> RecommendResult<Vec<Recommendation>> {
        let ratings = self.ratings.all_ratings()?;
        debug!("Loaded {} ratings", ratings.len());

        let recommendations = recommend_from_snapshot(
            &ratings,
            |id| Ok(self.ownership.owned_games(id)?),
            user_id,
            &self.settings,
        )?;

        info!(
            "Recommended {} games for user {}",
            recommendations.len(),
            user_id
        );
        Ok(recommendations)
    }
}

/// Run the whole pipeline over an in-memory rating snapshot.
///
/// `owned_games` is only consulted once the target is known to have ratings.
pub fn recommend_from_snapshot<F>(
    ratings: &[Rating],
    owned_games: F,
    user_id: &str,
    settings: &RecommendSettings,
) -> RecommendResult<Vec<Recommendation>>
where
    F: FnOnce(&str) -> RecommendResult<HashSet<GameId>>,
{
    let column = settings.score_column;

    let normalized_ratings = normalize_ratings(ratings, column);
    let raw = RatingMatrix::build(ratings, column)?;
    let normalized =
        RatingMatrix::build_with_index(&normalized_ratings, column, Arc::clone(raw.index()))?;
    debug!(
        "Built {}x{} rating matrices",
        raw.users().len(),
        raw.games().len()
    );

    let similarities = users_similarity_all(user_id, &raw)?;
    let neighbors = select_neighbors(&similarities, user_id, settings.similarity_threshold);
    debug!("User {} has {} neighbours", user_id, neighbors.len());

    let owned = owned_games(user_id)?;
    let candidates: Vec<GameId> = raw
        .games()
        .iter()
        .filter(|game_id| !owned.contains(*game_id))
        .cloned()
        .collect();
    debug!(
        "User {} owns {} games, {} candidates remain",
        user_id,
        owned.len(),
        candidates.len()
    );

    let scores = score_candidates(&normalized, &similarities, &neighbors, &raw, user_id, &candidates)?;

    Ok(rank_scores(scores, settings.max_results))
}

/// Positive scores only, highest first (ties by game id), at most `limit`.
pub fn rank_scores(scores: ScoredGameSet, limit: usize) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = scores
        .into_iter()
        .filter(|(_, score)| *score > 0.0)
        .map(|(game_id, score)| Recommendation { game_id, score })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.game_id.cmp(&b.game_id))
    });
    ranked.truncate(limit);
    ranked
}
