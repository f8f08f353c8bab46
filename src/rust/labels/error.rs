use std::io;

/// Represents the different types of errors that can occur while loading or
/// querying a label table.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// The label resource could not be opened or read
    #[error("Failed to read label resource: {0}")]
    ResourceLoad(#[from] io::Error),
    /// The resource was read but did not contain the expected number of entries
    #[error("Label table load error: expected {expected} entries, found {actual}")]
    TableLoad { expected: usize, actual: usize },
    /// The resource contained a blank line where a label was expected
    #[error("Label table load error: entry {index} is empty")]
    EmptyLabel { index: usize },
    /// A lookup used an index with no label bound to it
    #[error("Index of: {0} is out of range")]
    LabelNotFound(i64),
    /// A score vector did not have one score per label
    #[error("Score vector has {actual} entries, expected {expected}")]
    ScoreShape { expected: usize, actual: usize },
}

impl LabelError {
    /// Returns true if the error means the resource was readable but did not
    /// hold a valid label table.
    pub fn is_table_load_error(&self) -> bool {
        matches!(self, Self::TableLoad { .. } | Self::EmptyLabel { .. })
    }
}
