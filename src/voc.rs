//! Pascal VOC annotation data structures
//!
//! The structs mirror the element tree of a VOC annotation file; field order is
//! element order. Serialization goes through quick-xml's serde support.

use quick_xml::se::Serializer;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{BoundingBox, ImageSize};

pub const DATABASE_NAME: &str = "NABirds V1";
pub const ANNOTATION_SOURCE: &str = "NABirds V1";
pub const IMAGE_SOURCE: &str = "NABirds";
pub const DEFAULT_POSE: &str = "Unspecified";
pub const IMAGE_DEPTH: u32 = 3;

const ROOT_ELEMENT: &str = "annotation";
const INDENT_WIDTH: usize = 2;

/// Root `<annotation>` element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub folder: String,
    pub filename: String,
    pub source: Source,
    pub owner: Owner,
    pub size: Size,
    pub object: Object,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    pub database: String,
    pub annotation: String,
    pub image: String,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            database: DATABASE_NAME.to_string(),
            annotation: ANNOTATION_SOURCE.to_string(),
            image: IMAGE_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Owner {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl From<ImageSize> for Size {
    fn from(size: ImageSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            depth: IMAGE_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Object {
    pub name: String,
    pub pose: String,
    pub truncated: u8,
    pub difficult: u8,
    pub bndbox: BndBox,
}

impl Object {
    /// A fully visible, non-difficult object with an unspecified pose
    pub fn new(name: String, bbox: BoundingBox) -> Self {
        Self {
            name,
            pose: DEFAULT_POSE.to_string(),
            truncated: 0,
            difficult: 0,
            bndbox: bbox.into(),
        }
    }
}

/// Corner representation of a box: `xmax = x + width`, `ymax = y + height`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BndBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl From<BoundingBox> for BndBox {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            xmin: bbox.x,
            ymin: bbox.y,
            xmax: bbox.xmax(),
            ymax: bbox.ymax(),
        }
    }
}

impl Annotation {
    /// Render as an indented XML document ending in a newline
    pub fn to_xml(&self) -> Result<String> {
        let mut buffer = String::new();
        let mut serializer = Serializer::with_root(&mut buffer, Some(ROOT_ELEMENT))?;
        serializer.indent(' ', INDENT_WIDTH);
        self.serialize(serializer)?;
        buffer.push('\n');
        Ok(buffer)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml()?;
        fs::write(path, xml).map_err(|e| Error::io(path, e))
    }
}
