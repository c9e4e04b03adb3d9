//! NABirds to Pascal VOC converter
//!
//! This library reads the flat NABirds annotation files into lookup tables, joins
//! them per image and writes one VOC XML annotation plus a flattened image copy
//! for every converted image.

pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod io;
pub mod types;
pub mod utils;
pub mod voc;

// Re-export commonly used types and functions
pub use config::{Args, Split};
pub use dataset::{convert, process_dataset, setup_output_directories};
pub use error::{Error, Result};
pub use types::{
    BoundingBox, ConversionStats, Dataset, ImageSize, OutputDirs, PartLocation, PartSlots,
    TrainTestSplit,
};
pub use voc::Annotation;
