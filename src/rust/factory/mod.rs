//! The contract for building Inception V4 networks.
//!
//! Network construction belongs to whichever framework implements
//! [`InceptionV4Factory`]; this module only fixes the operations and the
//! validated parameter types passed to them.

mod config;
mod error;

pub use config::{CustomTail, FinalLayerConfig, INCEPTION_V4_TAIL_INPUT_FEATURES};
pub use error::FactoryError;

use crate::labels::LabelTable;

/// A factory for Inception V4 networks.
///
/// Every method receives the caller's training or prediction context, which
/// the implementation may configure further while building the network.
pub trait InceptionV4Factory {
    /// The training or inference context networks are built against
    type Context;
    /// The supervised feed-forward network produced by this factory
    type Network;

    /// Creates the pretrained network with the given final layer settings
    fn create_inception_v4(
        &self,
        context: &mut Self::Context,
        final_layer: &FinalLayerConfig,
    ) -> Result<Self::Network, FactoryError>;

    /// Creates the pretrained network without regularisation or dropout
    fn create_inception_v4_default(
        &self,
        context: &mut Self::Context,
    ) -> Result<Self::Network, FactoryError> {
        self.create_inception_v4(context, &FinalLayerConfig::default())
    }

    /// Creates the network with `tail` replacing the default classification head
    fn create_inception_v4_with_custom_tail(
        &self,
        context: &mut Self::Context,
        tail: &CustomTail,
    ) -> Result<Self::Network, FactoryError>;

    /// Creates only the classification head described by `tail`
    fn create_inception_v4_tail(
        &self,
        context: &mut Self::Context,
        tail: &CustomTail,
    ) -> Result<Self::Network, FactoryError>;

    /// Creates the network up to the pooled features, with no classification head
    fn create_inception_v4_without_tail(
        &self,
        context: &mut Self::Context,
    ) -> Result<Self::Network, FactoryError>;

    /// Returns the labels for the pretrained networks built by this factory
    fn create_inception_v4_labels(&self) -> Result<LabelTable, FactoryError>;
}
