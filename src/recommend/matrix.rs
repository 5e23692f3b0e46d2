use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use ndarray::{Array2, ArrayView1};

use crate::domain::{GameId, Rating, ScoreColumn, UserId};
use crate::errors::{RecommendError, RecommendResult};

/// Row (user) and column (game) positions shared by every matrix built from
/// one rating snapshot. Both axes are sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixIndex {
    users: Vec<UserId>,
    games: Vec<GameId>,
    user_positions: HashMap<UserId, usize>,
    game_positions: HashMap<GameId, usize>,
}

impl MatrixIndex {
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let users: BTreeSet<&str> = ratings.iter().map(|r| r.user_id.as_str()).collect();
        let games: BTreeSet<&str> = ratings.iter().map(|r| r.game_id.as_str()).collect();

        let users: Vec<UserId> = users.into_iter().map(str::to_string).collect();
        let games: Vec<GameId> = games.into_iter().map(str::to_string).collect();

        let user_positions = positions(&users);
        let game_positions = positions(&games);

        Self {
            users,
            games,
            user_positions,
            game_positions,
        }
    }

    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    pub fn games(&self) -> &[GameId] {
        &self.games
    }

    pub fn user_position(&self, user_id: &str) -> Option<usize> {
        self.user_positions.get(user_id).copied()
    }

    pub fn game_position(&self, game_id: &str) -> Option<usize> {
        self.game_positions.get(game_id).copied()
    }
}

fn positions(ids: &[String]) -> HashMap<String, usize> {
    ids.iter()
        .enumerate()
        .map(|(idx, id)| (id.clone(), idx))
        .collect()
}

/// Dense user x game matrix of one score column. Pairs nobody rated hold 0.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    index: Arc<MatrixIndex>,
    values: Array2<f64>,
}

impl RatingMatrix {
    /// Pivot `ratings` over their own user and game universe.
    pub fn build(ratings: &[Rating], column: ScoreColumn) -> RecommendResult<Self> {
        validate_ratings(ratings, column)?;
        let index = Arc::new(MatrixIndex::from_ratings(ratings));
        Self::build_with_index(ratings, column, index)
    }

    /// Pivot `ratings` onto an existing index so that columns line up with
    /// another matrix built from the same snapshot.
    pub fn build_with_index(
        ratings: &[Rating],
        column: ScoreColumn,
        index: Arc<MatrixIndex>,
    ) -> RecommendResult<Self> {
        validate_ratings(ratings, column)?;

        let mut values = Array2::<f64>::zeros((index.users.len(), index.games.len()));

        // Later records for the same pair overwrite earlier ones.
        for rating in ratings {
            let row = index.user_position(&rating.user_id).ok_or_else(|| {
                RecommendError::InvalidInput(format!(
                    "user {} is not part of the matrix index",
                    rating.user_id
                ))
            })?;
            let col = index.game_position(&rating.game_id).ok_or_else(|| {
                RecommendError::InvalidInput(format!(
                    "game {} is not part of the matrix index",
                    rating.game_id
                ))
            })?;
            values[[row, col]] = rating.score(column);
        }

        Ok(Self { index, values })
    }

    pub fn index(&self) -> &Arc<MatrixIndex> {
        &self.index
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn users(&self) -> &[UserId] {
        self.index.users()
    }

    pub fn games(&self) -> &[GameId] {
        self.index.games()
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.index.user_position(user_id).is_some()
    }

    pub fn row(&self, user_id: &str) -> Option<ArrayView1<'_, f64>> {
        self.index
            .user_position(user_id)
            .map(|pos| self.values.row(pos))
    }

    pub fn value(&self, user_id: &str, game_id: &str) -> Option<f64> {
        let row = self.index.user_position(user_id)?;
        let col = self.index.game_position(game_id)?;
        Some(self.values[[row, col]])
    }

    /// Mean over the whole zero-filled row.
    pub fn row_mean(&self, user_id: &str) -> Option<f64> {
        self.row(user_id).map(|row| row.mean().unwrap_or(0.0))
    }

    pub fn shares_columns_with(&self, other: &RatingMatrix) -> bool {
        Arc::ptr_eq(&self.index, &other.index) || self.index.games == other.index.games
    }
}

fn validate_ratings(ratings: &[Rating], column: ScoreColumn) -> RecommendResult<()> {
    for (row, rating) in ratings.iter().enumerate() {
        if rating.user_id.trim().is_empty() {
            return Err(invalid_row(row, "user_id is empty"));
        }
        if rating.game_id.trim().is_empty() {
            return Err(invalid_row(row, "game_id is empty"));
        }
        if !rating.score(column).is_finite() {
            return Err(invalid_row(row, &format!("{} is not a finite number", column)));
        }
    }
    Ok(())
}

fn invalid_row(row: usize, reason: &str) -> RecommendError {
    RecommendError::InvalidInput(format!("rating {}: {}", row + 1, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Rating> {
        vec![
            Rating::uniform("u2", "g3", 2.0),
            Rating::uniform("u1", "g1", 5.0),
            Rating::uniform("u1", "g2", 1.0),
        ]
    }

    #[test]
    fn test_axes_are_sorted_and_zero_filled() {
        let matrix = RatingMatrix::build(&sample(), ScoreColumn::Overall).unwrap();

        assert_eq!(matrix.users(), ["u1", "u2"]);
        assert_eq!(matrix.games(), ["g1", "g2", "g3"]);
        assert_eq!(matrix.row("u1").unwrap().to_vec(), vec![5.0, 1.0, 0.0]);
        assert_eq!(matrix.row("u2").unwrap().to_vec(), vec![0.0, 0.0, 2.0]);
        for user in matrix.users() {
            assert_eq!(matrix.row(user).unwrap().len(), matrix.games().len());
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut ratings = sample();
        ratings.push(Rating::uniform("u1", "g1", 2.0));

        let matrix = RatingMatrix::build(&ratings, ScoreColumn::Overall).unwrap();
        assert_eq!(matrix.value("u1", "g1"), Some(2.0));
    }

    #[test]
    fn test_shared_index_keeps_columns_aligned() {
        let raw = RatingMatrix::build(&sample(), ScoreColumn::Overall).unwrap();
        let other = RatingMatrix::build_with_index(
            &sample()[..1],
            ScoreColumn::Overall,
            Arc::clone(raw.index()),
        )
        .unwrap();

        assert!(raw.shares_columns_with(&other));
        assert_eq!(other.row("u1").unwrap().to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_row_mean_counts_unrated_games() {
        let matrix = RatingMatrix::build(&sample(), ScoreColumn::Overall).unwrap();
        assert_eq!(matrix.row_mean("u1"), Some(2.0));
        assert_eq!(matrix.row_mean("nobody"), None);
    }

    #[test]
    fn test_invalid_ratings() {
        let mut ratings = sample();
        ratings[0].overall_score = f64::NAN;
        let err = RatingMatrix::build(&ratings, ScoreColumn::Overall).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidInput(_)));

        let mut ratings = sample();
        ratings[1].game_id = " ".to_string();
        assert!(RatingMatrix::build(&ratings, ScoreColumn::Overall).is_err());
    }

    #[test]
    fn test_rating_outside_index() {
        let index = Arc::new(MatrixIndex::from_ratings(&sample()[..1]));
        let err = RatingMatrix::build_with_index(&sample(), ScoreColumn::Overall, index).unwrap_err();
        assert!(matches!(err, RecommendError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_input() {
        let matrix = RatingMatrix::build(&[], ScoreColumn::Overall).unwrap();
        assert!(matrix.users().is_empty());
        assert!(matrix.games().is_empty());
    }
}
