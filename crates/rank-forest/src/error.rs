use thiserror::Error;

/// Errors reported by [`crate::RankList`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
