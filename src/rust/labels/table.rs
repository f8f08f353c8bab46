use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::builder::LabelTableBuilder;
use super::error::LabelError;

/// An immutable mapping from a classifier's output index to its class name.
///
/// # Thread Safety
///
/// The labels live behind an `Arc<[String]>` and are never mutated after
/// construction, so a table is `Send + Sync` and clones share storage.
///
/// ```rust
/// use inceptionv4::LabelTable;
/// use std::thread;
///
/// let table = LabelTable::builder()
///     .expected_entries(2)
///     .load_bytes(b"cat\ndog\n")?;
///
/// let shared = table.clone();
/// let handle = thread::spawn(move || shared.label(0).map(str::to_owned));
/// assert_eq!(handle.join().unwrap()?, "cat");
/// # Ok::<(), inceptionv4::LabelError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    pub(super) labels: Arc<[String]>,
}

// Compile-time verification of thread-safety
const _: fn() = || {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LabelTable>();
};

impl LabelTable {
    /// Creates a new LabelTableBuilder for configured loading
    pub fn builder() -> LabelTableBuilder {
        LabelTableBuilder::new()
    }

    /// Loads the standard 1001-entry Inception V4 table from `reader`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LabelError> {
        LabelTableBuilder::new().load(reader)
    }

    /// Loads the standard 1001-entry Inception V4 table from a file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LabelError> {
        LabelTableBuilder::new().load_path(path)
    }

    pub(super) fn from_labels(labels: Vec<String>) -> Self {
        Self { labels: labels.into() }
    }

    /// Returns the label bound to `index`.
    ///
    /// # Errors
    /// `LabelNotFound` if `index` is negative or not less than [`len`](Self::len).
    pub fn label(&self, index: i64) -> Result<&str, LabelError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.get(i))
            .ok_or(LabelError::LabelNotFound(index))
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates over `(index, label)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.labels.iter().map(String::as_str).enumerate()
    }

    /// Returns the first index bound to `label`, if any
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

impl FromStr for LabelTable {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LabelTableBuilder::new().load_bytes(s.as_bytes())
    }
}
