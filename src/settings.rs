use crate::constants::{DEFAULT_OUTPUT_FILE, DEFAULT_ZOOM};
use std::path::{Path, PathBuf};

/// Everything one run needs. Built from the command line; nothing is read
/// from or saved to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub photos_dir: PathBuf,
    pub output_path: PathBuf,
    pub zoom: u8,
}

impl Settings {
    pub fn new<P: AsRef<Path>>(photos_dir: P) -> Self {
        Self {
            photos_dir: photos_dir.as_ref().to_path_buf(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn with_output<P: AsRef<Path>>(mut self, output_path: P) -> Self {
        self.output_path = output_path.as_ref().to_path_buf();
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }
}
