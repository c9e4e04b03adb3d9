//! Error types for the NABirds to VOC converter

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a conversion run
#[derive(Debug, Error)]
pub enum Error {
    /// Reading, creating or copying a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of an annotation file could not be parsed
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// An image id (or class id) has no entry in one of the joined tables
    #[error("no entry for {key} in {table}")]
    MissingRecord { table: &'static str, key: String },

    /// A path has no file name component
    #[error("path has no file name: {}", .path.display())]
    InvalidPath { path: PathBuf },

    /// The annotation could not be serialized to XML
    #[error("failed to serialize annotation: {0}")]
    Xml(#[from] quick_xml::DeError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing(table: &'static str, key: &str) -> Self {
        Error::MissingRecord {
            table,
            key: key.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
