use std::cmp::Ordering;
use ndarray::Array1;

use super::error::LabelError;
use super::table::LabelTable;

/// A single decoded class score
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub label: String,
    pub score: f32,
}

impl LabelTable {
    /// Returns the highest scoring class for a classifier output.
    ///
    /// NaN scores rank below every other score.
    ///
    /// # Example
    /// ```
    /// use inceptionv4::LabelTable;
    /// use ndarray::array;
    ///
    /// let table = LabelTable::builder()
    ///     .expected_entries(3)
    ///     .load_bytes(b"cat\ndog\nfish\n")?;
    /// let best = table.predict(&array![0.1, 0.7, 0.2])?;
    /// assert_eq!(best.label, "dog");
    /// # Ok::<(), inceptionv4::LabelError>(())
    /// ```
    pub fn predict(&self, scores: &Array1<f32>) -> Result<Prediction, LabelError> {
        self.check_scores(scores)?;
        let (index, score) = scores
            .iter()
            .enumerate()
            .max_by(|a, b| compare_scores(*a.1, *b.1).then(b.0.cmp(&a.0)))
            .map(|(i, &s)| (i, s))
            .ok_or(LabelError::ScoreShape { expected: self.len(), actual: 0 })?;
        Ok(self.prediction(index, score))
    }

    /// Returns the `k` highest scoring classes, best first.
    ///
    /// Equal scores keep index order, NaN scores come last and `k` is clamped
    /// to the table size.
    pub fn top_k(&self, scores: &Array1<f32>, k: usize) -> Result<Vec<Prediction>, LabelError> {
        self.check_scores(scores)?;
        let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| compare_scores(b.1, a.1).then(a.0.cmp(&b.0)));
        Ok(ranked
            .into_iter()
            .take(k)
            .map(|(index, score)| self.prediction(index, score))
            .collect())
    }

    fn check_scores(&self, scores: &Array1<f32>) -> Result<(), LabelError> {
        if scores.len() != self.len() {
            return Err(LabelError::ScoreShape {
                expected: self.len(),
                actual: scores.len(),
            });
        }
        Ok(())
    }

    fn prediction(&self, index: usize, score: f32) -> Prediction {
        Prediction {
            index,
            label: self.labels[index].clone(),
            score,
        }
    }
}

/// Total order on scores with NaN below everything else
fn compare_scores(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.total_cmp(&b),
    }
}
