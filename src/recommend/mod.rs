pub mod matrix;
pub mod neighborhood;
pub mod normalization;
pub mod recommender;
pub mod scoring;
pub mod similarity;
pub mod types;

pub use matrix::{MatrixIndex, RatingMatrix};
pub use neighborhood::select_neighbors;
pub use normalization::normalize_ratings;
pub use recommender::{Recommender, rank_scores, recommend_from_snapshot};
pub use scoring::score_candidates;
pub use similarity::{similarity, users_similarity_all};
pub use types::{Neighborhood, Recommendation, ScoredGameSet, SimilarityVector};
