use std::path::Path;

/// Failures of a recommendation or ranking request.
///
/// `Store` carries collaborator failures through untouched. When a
/// collaborator already reported one of our own variants (for example a CSV
/// file that is missing required columns) the conversion from
/// `anyhow::Error` unwraps it again, so callers can still match on
/// `InvalidInput`.
#[derive(thiserror::Error, Debug)]
pub enum RecommendError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error(transparent)]
    Store(anyhow::Error),
}

impl From<anyhow::Error> for RecommendError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<RecommendError>() {
            Ok(inner) => inner,
            Err(other) => RecommendError::Store(other),
        }
    }
}

pub type RecommendResult<T> = Result<T, RecommendError>;

/// Add context to data store load errors
pub fn load_context(what: &str, path: &Path) -> String {
    format!("Failed to load {} from: {}", what, path.display())
}

/// Add context to parse errors
pub fn parse_context(data_type: &str, row: usize) -> String {
    format!("Failed to parse {} at row {}", data_type, row)
}
