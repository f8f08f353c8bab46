//! Inception V4 class labels and the factory contract for Inception V4 networks.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use inceptionv4::LabelTable;
//!
//! let resource: String = (0..1001).map(|i| format!("class {}\n", i)).collect();
//! let labels = LabelTable::from_reader(resource.as_bytes())?;
//!
//! assert_eq!(labels.len(), 1001);
//! assert_eq!(labels.label(7)?, "class 7");
//! assert!(labels.label(1001).is_err());
//! # Ok(())
//! # }
//! ```
//!
//! # Cached Resources
//!
//! The label file can be downloaded once and reused from the local cache:
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use inceptionv4::{ResourceInfo, ResourceManager};
//!
//! let manager = ResourceManager::new_default()?;
//! let info = ResourceInfo::labels("https://example.com/inceptionv4classes.txt");
//! manager.ensure_resource_downloaded(&info).await?;
//! let labels = manager.load_label_table(&info)?;
//! println!("{}", labels.label(0)?);
//! # Ok(())
//! # }
//! ```

pub mod factory;
pub mod labels;
pub mod resource_manager;

pub use factory::{CustomTail, FactoryError, FinalLayerConfig, InceptionV4Factory, INCEPTION_V4_TAIL_INPUT_FEATURES};
pub use labels::{LabelError, LabelTable, LabelTableBuilder, Prediction, INCEPTION_V4_CLASS_COUNT, LABELS_RESOURCE_NAME};
pub use resource_manager::{ResourceError, ResourceInfo, ResourceManager};

pub fn init_logger() {
    env_logger::init();
}
