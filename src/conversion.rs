use log::debug;
use std::fs::copy;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{BoundingBox, Dataset, ImageSize, OutputDirs};
use crate::utils::{annotation_file_name, file_name_of, folder_of};
use crate::voc::{Annotation, Object, Owner, Size, Source};

/// All per-image data needed for one annotation, joined across the tables
#[derive(Debug, Clone)]
pub struct ImageRecord<'a> {
    pub image_id: &'a str,
    pub image_path: &'a Path,
    pub class_name: &'a str,
    pub photographer: &'a str,
    pub size: ImageSize,
    pub bbox: BoundingBox,
}

/// Look up every table for `image_id`; a missing entry is an error
pub fn join_image_record<'a>(dataset: &'a Dataset, image_id: &'a str) -> Result<ImageRecord<'a>> {
    let image_path = dataset
        .image_paths
        .get(image_id)
        .ok_or_else(|| Error::missing("images.txt", image_id))?;
    let bbox = *dataset
        .bounding_boxes
        .get(image_id)
        .ok_or_else(|| Error::missing("bounding_boxes.txt", image_id))?;
    let size = *dataset
        .image_sizes
        .get(image_id)
        .ok_or_else(|| Error::missing("sizes.txt", image_id))?;
    let class_id = dataset
        .image_labels
        .get(image_id)
        .ok_or_else(|| Error::missing("image_class_labels.txt", image_id))?;
    let class_name = dataset
        .class_names
        .get(class_id)
        .ok_or_else(|| Error::missing("classes.txt", class_id))?;
    let photographer = dataset
        .photographers
        .get(image_id)
        .ok_or_else(|| Error::missing("photographers.txt", image_id))?;

    Ok(ImageRecord {
        image_id,
        image_path,
        class_name,
        photographer,
        size,
        bbox,
    })
}

/// Build the VOC annotation for a joined record
pub fn build_annotation(record: &ImageRecord) -> Result<Annotation> {
    Ok(Annotation {
        folder: folder_of(record.image_path),
        filename: file_name_of(record.image_path)?,
        source: Source::default(),
        owner: Owner {
            name: record.photographer.to_string(),
        },
        size: Size::from(record.size),
        object: Object::new(record.class_name.to_string(), record.bbox),
    })
}

/// Copy the source image into the flat images directory, keeping its base name.
/// An existing file of the same name is overwritten.
pub fn copy_image(image_path: &Path, images_dir: &Path) -> Result<PathBuf> {
    let output_path = images_dir.join(file_name_of(image_path)?);
    copy(image_path, &output_path).map_err(|e| Error::io(image_path, e))?;
    Ok(output_path)
}

/// Convert one image: copy it, then write annotation number `counter`.
/// Returns the annotation and the path it was written to.
pub fn process_image(
    dataset: &Dataset,
    image_id: &str,
    counter: usize,
    output_dirs: &OutputDirs,
) -> Result<(PathBuf, Annotation)> {
    let record = join_image_record(dataset, image_id)?;

    let image_output_path = copy_image(record.image_path, &output_dirs.images_dir)?;

    let annotation = build_annotation(&record)?;
    let annotation_path = output_dirs
        .annotations_dir
        .join(annotation_file_name(counter));
    annotation.write_to(&annotation_path)?;

    debug!(
        "{} -> {} ({})",
        record.image_id,
        annotation_path.display(),
        image_output_path.display()
    );

    Ok((annotation_path, annotation))
}
