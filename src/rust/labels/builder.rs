use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use log::{debug, error};

use super::error::LabelError;
use super::table::LabelTable;
use super::INCEPTION_V4_CLASS_COUNT;

/// A builder for loading a [`LabelTable`] with a fluent interface.
///
/// The defaults match the pretrained Inception V4 resource: exactly
/// [`INCEPTION_V4_CLASS_COUNT`] entries, with a trailing `\r` stripped from
/// each line.
#[derive(Debug, Clone)]
pub struct LabelTableBuilder {
    expected_entries: usize,
    trim_carriage_returns: bool,
}

impl Default for LabelTableBuilder {
    fn default() -> Self {
        Self {
            expected_entries: INCEPTION_V4_CLASS_COUNT,
            trim_carriage_returns: true,
        }
    }
}

impl LabelTableBuilder {
    /// Creates a builder with the default Inception V4 configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exact number of entries the resource must contain.
    ///
    /// Use this for custom classification tails whose output feature count
    /// differs from the pretrained head.
    ///
    /// # Example
    /// ```
    /// use inceptionv4::LabelTable;
    ///
    /// let table = LabelTable::builder()
    ///     .expected_entries(2)
    ///     .load_bytes(b"cat\ndog\n")?;
    /// assert_eq!(table.label(1)?, "dog");
    /// # Ok::<(), inceptionv4::LabelError>(())
    /// ```
    pub fn expected_entries(mut self, count: usize) -> Self {
        self.expected_entries = count;
        self
    }

    /// Controls whether a `\r` at the end of each line is removed
    pub fn trim_carriage_returns(mut self, trim: bool) -> Self {
        self.trim_carriage_returns = trim;
        self
    }

    /// Reads the whole stream and builds the table.
    ///
    /// The reader is consumed and dropped before this returns, whether or not
    /// loading succeeds.
    ///
    /// # Errors
    /// - `ResourceLoad` if the stream cannot be read or is not valid UTF-8
    /// - `TableLoad` if the number of lines differs from the expected count
    /// - `EmptyLabel` if any line is blank
    pub fn load<R: Read>(&self, mut reader: R) -> Result<LabelTable, LabelError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        drop(reader);
        self.parse_text(&contents)
    }

    /// Opens the file at `path` and builds the table from its contents
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<LabelTable, LabelError> {
        let path = path.as_ref();
        debug!("Loading labels from {:?}", path);
        let file = File::open(path)?;
        self.load(BufReader::new(file))
    }

    /// Builds the table from an in-memory resource
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<LabelTable, LabelError> {
        self.load(bytes)
    }

    /// Splits on `\n`. A single empty segment after a final newline is not an
    /// entry; a final line without a newline is.
    fn parse_text(&self, contents: &str) -> Result<LabelTable, LabelError> {
        let mut labels = Vec::new();

        if !contents.is_empty() {
            let body = contents.strip_suffix('\n').unwrap_or(contents);
            for (index, line) in body.split('\n').enumerate() {
                let line = if self.trim_carriage_returns {
                    line.strip_suffix('\r').unwrap_or(line)
                } else {
                    line
                };
                if line.is_empty() {
                    error!("Label resource has an empty entry at index {}", index);
                    return Err(LabelError::EmptyLabel { index });
                }
                labels.push(line.to_string());
            }
        }

        if labels.len() != self.expected_entries {
            error!(
                "Label resource has {} entries, expected {}",
                labels.len(),
                self.expected_entries
            );
            return Err(LabelError::TableLoad {
                expected: self.expected_entries,
                actual: labels.len(),
            });
        }

        debug!("Loaded {} labels", labels.len());
        Ok(LabelTable::from_labels(labels))
    }
}
