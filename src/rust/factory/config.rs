use ndarray::{Array1, Array2};

use super::error::FactoryError;

/// Width of the pooled Inception V4 feature vector that feeds the final
/// dense layer.
pub const INCEPTION_V4_TAIL_INPUT_FEATURES: usize = 1536;

/// Regularisation settings for the final dense layer.
///
/// `Default` gives no weight penalty and no dropout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalLayerConfig {
    regularisation_lambda: f32,
    dropout_keep_probability: f32,
}

impl Default for FinalLayerConfig {
    fn default() -> Self {
        Self {
            regularisation_lambda: 0.0,
            dropout_keep_probability: 1.0,
        }
    }
}

impl FinalLayerConfig {
    /// Creates a validated final layer configuration
    ///
    /// # Arguments
    /// * `regularisation_lambda` - Weight penalty, finite and non-negative
    /// * `dropout_keep_probability` - Fraction of inputs retained during
    ///   training, in `(0, 1]`
    ///
    /// # Example
    /// ```
    /// use inceptionv4::FinalLayerConfig;
    ///
    /// let config = FinalLayerConfig::new(0.01, 0.8)?;
    /// assert_eq!(config.dropout_keep_probability(), 0.8);
    /// assert!(FinalLayerConfig::new(-1.0, 0.8).is_err());
    /// # Ok::<(), inceptionv4::FactoryError>(())
    /// ```
    pub fn new(regularisation_lambda: f32, dropout_keep_probability: f32) -> Result<Self, FactoryError> {
        if !regularisation_lambda.is_finite() || regularisation_lambda < 0.0 {
            return Err(FactoryError::InvalidConfig(format!(
                "Regularisation lambda must be a non-negative number, got {}",
                regularisation_lambda
            )));
        }
        if !(dropout_keep_probability > 0.0 && dropout_keep_probability <= 1.0) {
            return Err(FactoryError::InvalidConfig(format!(
                "Dropout keep probability must be in (0, 1], got {}",
                dropout_keep_probability
            )));
        }
        Ok(Self {
            regularisation_lambda,
            dropout_keep_probability,
        })
    }

    pub fn regularisation_lambda(&self) -> f32 {
        self.regularisation_lambda
    }

    pub fn dropout_keep_probability(&self) -> f32 {
        self.dropout_keep_probability
    }

    /// True when neither regularisation nor dropout is applied
    pub fn is_unregularised(&self) -> bool {
        self.regularisation_lambda == 0.0 && self.dropout_keep_probability == 1.0
    }
}

/// A replacement classification head: one dense layer mapping the pooled
/// features to `output_features` scores.
///
/// Weights are laid out `[output_features, INCEPTION_V4_TAIL_INPUT_FEATURES]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTail {
    output_features: usize,
    weights: Array2<f32>,
    biases: Array1<f32>,
    final_layer: FinalLayerConfig,
}

impl CustomTail {
    /// Creates a tail after checking the weight and bias shapes
    ///
    /// # Returns
    /// * `Result<Self, FactoryError>` - The tail, or an error if:
    ///   - `output_features` is zero
    ///   - `weights` is not `[output_features, 1536]`
    ///   - `biases` does not have `output_features` entries
    pub fn new(
        output_features: usize,
        weights: Array2<f32>,
        biases: Array1<f32>,
    ) -> Result<Self, FactoryError> {
        if output_features == 0 {
            return Err(FactoryError::InvalidConfig(
                "A custom tail must have at least one output feature".to_string(),
            ));
        }

        let expected = vec![output_features, INCEPTION_V4_TAIL_INPUT_FEATURES];
        if weights.shape() != expected.as_slice() {
            return Err(FactoryError::TailShape {
                component: "weights",
                expected,
                actual: weights.shape().to_vec(),
            });
        }
        if biases.len() != output_features {
            return Err(FactoryError::TailShape {
                component: "biases",
                expected: vec![output_features],
                actual: biases.shape().to_vec(),
            });
        }

        Ok(Self {
            output_features,
            weights,
            biases,
            final_layer: FinalLayerConfig::default(),
        })
    }

    /// Sets the regularisation applied to this tail's dense layer
    pub fn with_final_layer(mut self, config: FinalLayerConfig) -> Self {
        self.final_layer = config;
        self
    }

    pub fn output_features(&self) -> usize {
        self.output_features
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    pub fn biases(&self) -> &Array1<f32> {
        &self.biases
    }

    pub fn final_layer(&self) -> &FinalLayerConfig {
        &self.final_layer
    }
}
