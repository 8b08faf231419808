//! Eir dataset preparation.
//!
//! The first stage of the diagnosis pipeline: load a tabular medical
//! dataset, standardize it, reduce it with PCA, rescale the reduced
//! features into rotation angles, split into train/test sets and persist
//! the split as a single JSON archive consumed by every downstream stage.
//!
//! ```ignore
//! use eir_data::{Dataset, PrepareConfig, prepare};
//!
//! let dataset = Dataset::synthetic(569, 42);
//! let (split, report) = prepare(&dataset, &PrepareConfig::default())?;
//! split.save("processed_data.json")?;
//! println!("retained variance: {:.3}", report.retained_variance);
//! ```

pub mod archive;
pub mod dataset;
pub mod error;
pub mod pca;
pub mod pipeline;
pub mod scale;
pub mod split;

pub use archive::DatasetSplit;
pub use dataset::Dataset;
pub use error::{DataError, DataResult};
pub use pca::Pca;
pub use pipeline::{PrepareConfig, PrepareReport, prepare};
pub use scale::{AngleScaler, StandardScaler};
pub use split::stratified_split;
