//! Class labels for Inception V4 classifier outputs.

mod builder;
mod error;
mod prediction;
mod table;

pub use builder::LabelTableBuilder;
pub use error::LabelError;
pub use prediction::Prediction;
pub use table::LabelTable;

/// Number of classes produced by the pretrained Inception V4 head
/// (1000 ImageNet classes plus background).
pub const INCEPTION_V4_CLASS_COUNT: usize = 1001;

/// Conventional file name of the label resource
pub const LABELS_RESOURCE_NAME: &str = "inceptionv4classes.txt";
