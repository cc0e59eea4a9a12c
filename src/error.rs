//! Error types for photo scanning and map output

use std::path::PathBuf;
use thiserror::Error;

/// Why a single photo was left off the map.
///
/// These never escape the folder scan: the scanner logs them and moves on to
/// the next file.
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("file could not be read as an image: {message}")]
    UnreadableImage { message: String },

    #[error("no EXIF metadata found")]
    MissingMetadata,

    #[error("no EXIF geotagging found")]
    MissingGeoTag,

    #[error("geotag has no {field} field")]
    IncompleteGeoTag { field: &'static str },

    #[error("no DateTimeOriginal field")]
    MissingDate,

    #[error("capture date {value:?} is not in YYYY:MM:DD HH:MM:SS form")]
    DateParse {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("invalid {field} value: {reason}")]
    InvalidCoordinateComponent { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Folder-level and output failures. Any of these aborts the run before a
/// map file is written.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("photos folder not found: {}", path.display())]
    FolderNotFound { path: PathBuf },

    #[error("permission denied reading photos folder: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to read photos folder {}: {source}", path.display())]
    FolderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no photos with both GPS coordinates and a capture date were found")]
    EmptyResultSet,

    #[error("failed to serialize route data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write map to {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MapError {
    /// Classifies an I/O error hit while opening the photos folder.
    pub fn from_folder_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => MapError::FolderNotFound { path },
            std::io::ErrorKind::PermissionDenied => MapError::PermissionDenied { path },
            _ => MapError::FolderIo { path, source },
        }
    }
}
