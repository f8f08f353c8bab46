use crate::labels::LabelError;
use crate::resource_manager::ResourceError;

/// Errors raised while describing or constructing an Inception V4 network.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// A final layer parameter was outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// A custom tail's weights or biases did not match its output features
    #[error("Invalid tail: {component} has shape {actual:?}, expected {expected:?}")]
    TailShape {
        component: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error(transparent)]
    Labels(#[from] LabelError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// Failure reported by the framework that builds the network
    #[error("Network construction failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FactoryError {
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Backend(err.into())
    }
}
