//! Loaders for the NABirds annotation text files
//!
//! Every file is whitespace-delimited with one record per line. Each loader
//! reads one fixed file below the dataset directory and returns a lookup table;
//! the first malformed line aborts the load with an error naming file and line.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::{
    BoundingBox, ImageSize, PartLocation, PartSlots, TrainTestSplit, PART_SLOTS,
};

pub const BOUNDING_BOXES_FILE: &str = "bounding_boxes.txt";
pub const PART_LOCS_FILE: &str = "parts/part_locs.txt";
pub const PART_NAMES_FILE: &str = "parts/parts.txt";
pub const CLASSES_FILE: &str = "classes.txt";
pub const IMAGE_LABELS_FILE: &str = "image_class_labels.txt";
pub const IMAGES_FILE: &str = "images.txt";
pub const SIZES_FILE: &str = "sizes.txt";
pub const HIERARCHY_FILE: &str = "hierarchy.txt";
pub const PHOTOGRAPHERS_FILE: &str = "photographers.txt";
pub const TRAIN_TEST_SPLIT_FILE: &str = "train_test_split.txt";

/// One non-blank line of an annotation file, split on whitespace
struct Record<'a> {
    path: &'a Path,
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            path: self.path.to_path_buf(),
            line: self.line,
            message: message.into(),
        }
    }

    fn expect_exactly(&self, count: usize) -> Result<()> {
        if self.fields.len() != count {
            return Err(self.error(format!(
                "expected {} fields, found {}",
                count,
                self.fields.len()
            )));
        }
        Ok(())
    }

    fn expect_at_least(&self, count: usize) -> Result<()> {
        if self.fields.len() < count {
            return Err(self.error(format!(
                "expected at least {} fields, found {}",
                count,
                self.fields.len()
            )));
        }
        Ok(())
    }

    fn key(&self) -> String {
        self.fields[0].to_string()
    }

    fn parse<T: FromStr>(&self, index: usize) -> Result<T> {
        let token = self.fields[index];
        token.parse().map_err(|_| {
            self.error(format!(
                "field {} is not a valid {}: '{}'",
                index + 1,
                std::any::type_name::<T>(),
                token
            ))
        })
    }

    // Tokens from `index` on, joined by single spaces
    fn rest(&self, index: usize) -> String {
        self.fields[index..].join(" ")
    }
}

/// Read `relative` below `dataset_path` and hand every non-blank line to `f`
fn for_each_record<F>(dataset_path: &Path, relative: &str, mut f: F) -> Result<()>
where
    F: FnMut(&Record) -> Result<()>,
{
    let path = dataset_path.join(relative);
    let file = File::open(&path).map_err(|e| Error::io(&path, e))?;
    let reader = BufReader::new(file);

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(&path, e))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        f(&Record {
            path: &path,
            line: index + 1,
            fields,
        })?;
    }

    Ok(())
}

/// image id → bounding box
pub fn load_bounding_box_annotations(dataset_path: &Path) -> Result<HashMap<String, BoundingBox>> {
    let mut bboxes = HashMap::new();
    for_each_record(dataset_path, BOUNDING_BOXES_FILE, |record| {
        record.expect_exactly(5)?;
        let bbox = BoundingBox {
            x: record.parse(1)?,
            y: record.parse(2)?,
            width: record.parse(3)?,
            height: record.parse(4)?,
        };
        if bbox.x.checked_add(bbox.width).is_none() || bbox.y.checked_add(bbox.height).is_none() {
            return Err(record.error("box corner overflows an i64"));
        }
        bboxes.insert(record.key(), bbox);
        Ok(())
    })?;
    Ok(bboxes)
}

/// image id → part slots. Slots not listed for an image stay `None`.
pub fn load_part_annotations(dataset_path: &Path) -> Result<HashMap<String, PartSlots>> {
    let mut parts: HashMap<String, PartSlots> = HashMap::new();
    for_each_record(dataset_path, PART_LOCS_FILE, |record| {
        record.expect_exactly(5)?;
        let part_id: usize = record.parse(1)?;
        if part_id >= PART_SLOTS {
            return Err(record.error(format!(
                "part id {} is outside 0..{}",
                part_id, PART_SLOTS
            )));
        }
        let location = PartLocation {
            x: record.parse(2)?,
            y: record.parse(3)?,
            visible: record.parse(4)?,
        };
        parts.entry(record.key()).or_insert([None; PART_SLOTS])[part_id] = Some(location);
        Ok(())
    })?;
    Ok(parts)
}

/// part id → part name
pub fn load_part_names(dataset_path: &Path) -> Result<HashMap<u32, String>> {
    let mut names: HashMap<u32, String> = HashMap::new();
    for_each_record(dataset_path, PART_NAMES_FILE, |record| {
        names.insert(record.parse(0)?, record.rest(1));
        Ok(())
    })?;
    Ok(names)
}

/// class id → class name
pub fn load_class_names(dataset_path: &Path) -> Result<HashMap<String, String>> {
    let mut names = HashMap::new();
    for_each_record(dataset_path, CLASSES_FILE, |record| {
        names.insert(record.key(), record.rest(1));
        Ok(())
    })?;
    Ok(names)
}

/// image id → class id
pub fn load_image_labels(dataset_path: &Path) -> Result<HashMap<String, String>> {
    let mut labels = HashMap::new();
    for_each_record(dataset_path, IMAGE_LABELS_FILE, |record| {
        record.expect_at_least(2)?;
        labels.insert(record.key(), record.fields[1].to_string());
        Ok(())
    })?;
    Ok(labels)
}

/// image id → `path_prefix` joined with the relative image path
pub fn load_image_paths(
    dataset_path: &Path,
    path_prefix: &Path,
) -> Result<HashMap<String, PathBuf>> {
    let mut paths = HashMap::new();
    for_each_record(dataset_path, IMAGES_FILE, |record| {
        record.expect_at_least(2)?;
        paths.insert(record.key(), path_prefix.join(record.fields[1]));
        Ok(())
    })?;
    Ok(paths)
}

/// image id → image size
pub fn load_image_sizes(dataset_path: &Path) -> Result<HashMap<String, ImageSize>> {
    let mut sizes = HashMap::new();
    for_each_record(dataset_path, SIZES_FILE, |record| {
        record.expect_exactly(3)?;
        let size = ImageSize {
            width: record.parse(1)?,
            height: record.parse(2)?,
        };
        sizes.insert(record.key(), size);
        Ok(())
    })?;
    Ok(sizes)
}

/// child class id → parent class id
pub fn load_hierarchy(dataset_path: &Path) -> Result<HashMap<String, String>> {
    let mut parents = HashMap::new();
    for_each_record(dataset_path, HIERARCHY_FILE, |record| {
        record.expect_exactly(2)?;
        parents.insert(record.key(), record.fields[1].to_string());
        Ok(())
    })?;
    Ok(parents)
}

/// image id → photographer name
pub fn load_photographers(dataset_path: &Path) -> Result<HashMap<String, String>> {
    let mut photographers = HashMap::new();
    for_each_record(dataset_path, PHOTOGRAPHERS_FILE, |record| {
        photographers.insert(record.key(), record.rest(1));
        Ok(())
    })?;
    Ok(photographers)
}

/// Train and test image ids, each in file order
pub fn load_train_test_split(dataset_path: &Path) -> Result<TrainTestSplit> {
    let mut split = TrainTestSplit::default();
    for_each_record(dataset_path, TRAIN_TEST_SPLIT_FILE, |record| {
        record.expect_at_least(2)?;
        let is_train: i64 = record.parse(1)?;
        if is_train != 0 {
            split.train.push(record.key());
        } else {
            split.test.push(record.key());
        }
        Ok(())
    })?;
    Ok(split)
}
