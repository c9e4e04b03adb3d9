use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io;

// Number of part slots kept per image; part ids index directly into it
pub const PART_SLOTS: usize = 11;

/// Axis-aligned box in pixel coordinates, as listed in bounding_boxes.txt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

// Loading rejects boxes whose far corner does not fit in an i64
impl BoundingBox {
    pub fn xmax(&self) -> i64 {
        self.x + self.width
    }

    pub fn ymax(&self) -> i64 {
        self.y + self.height
    }
}

// One row of parts/part_locs.txt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartLocation {
    pub x: i64,
    pub y: i64,
    pub visible: i64,
}

/// Per-image part annotations indexed by part id; `None` marks a part the
/// file does not mention for that image.
pub type PartSlots = [Option<PartLocation>; PART_SLOTS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

// Image ids in train_test_split.txt order, grouped by their flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<String>,
    pub test: Vec<String>,
}

/// Every lookup table of the dataset, loaded once per run
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub image_paths: HashMap<String, PathBuf>,
    pub image_sizes: HashMap<String, ImageSize>,
    pub bounding_boxes: HashMap<String, BoundingBox>,
    pub parts: HashMap<String, PartSlots>,
    pub image_labels: HashMap<String, String>,
    pub class_names: HashMap<String, String>,
    pub class_hierarchy: HashMap<String, String>,
    pub part_names: HashMap<u32, String>,
    pub photographers: HashMap<String, String>,
    pub split: TrainTestSplit,
}

impl Dataset {
    /// Run every loader against `dataset_path`. Image paths are prefixed with
    /// `image_root`, which is not resolved against the dataset directory.
    pub fn load(dataset_path: &Path, image_root: &Path) -> Result<Self> {
        let dataset = Self {
            image_paths: io::load_image_paths(dataset_path, image_root)?,
            image_sizes: io::load_image_sizes(dataset_path)?,
            bounding_boxes: io::load_bounding_box_annotations(dataset_path)?,
            parts: io::load_part_annotations(dataset_path)?,
            image_labels: io::load_image_labels(dataset_path)?,
            class_names: io::load_class_names(dataset_path)?,
            class_hierarchy: io::load_hierarchy(dataset_path)?,
            part_names: io::load_part_names(dataset_path)?,
            photographers: io::load_photographers(dataset_path)?,
            split: io::load_train_test_split(dataset_path)?,
        };

        info!(
            "Loaded {} images, {} classes, {} part names ({} train / {} test).",
            dataset.image_paths.len(),
            dataset.class_names.len(),
            dataset.part_names.len(),
            dataset.split.train.len(),
            dataset.split.test.len()
        );
        debug!("Part ids: {:?}", dataset.part_ids());

        Ok(dataset)
    }

    /// Part ids named in parts.txt, ascending
    pub fn part_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.part_names.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

// Paths of the two output directories
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub annotations_dir: PathBuf,
    pub images_dir: PathBuf,
}

// Counters reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub images_considered: usize,
    pub annotations_written: usize,
    pub images_copied: usize,
    pub skipped_by_split: usize,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_written(&mut self) {
        self.annotations_written += 1;
    }

    pub fn increment_copied(&mut self) {
        self.images_copied += 1;
    }

    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Images considered: {}", self.images_considered);
        log::info!("Annotations written: {}", self.annotations_written);
        log::info!("Images copied: {}", self.images_copied);
        if self.skipped_by_split > 0 {
            log::info!("Skipped (outside selected split): {}", self.skipped_by_split);
        }
    }
}
