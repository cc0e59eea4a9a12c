use crate::error::PhotoError;
use exif::{Field, In, Tag};
use image::ImageReader;
use std::fs::File;
use std::io::{BufReader, Seek};
use std::path::Path;
use tracing::debug;

/// Metadata fields read from one photo, in file order.
#[derive(Debug, Clone, Default)]
pub struct RawMetadata {
    fields: Vec<Field>,
}

impl RawMetadata {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn from_exif(exif: &exif::Exif) -> Self {
        Self::new(exif.fields().cloned().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields of the primary image (IFD0 and its Exif/GPS sub-IFDs).
    pub fn primary_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.ifd_num == In::PRIMARY)
    }

    pub fn get(&self, tag: Tag) -> Option<&Field> {
        self.primary_fields().find(|f| f.tag == tag)
    }
}

/// Turns a file on disk into its embedded metadata.
///
/// `Ok(None)` means the file is a readable image that simply carries no
/// metadata block.
pub trait MetadataSource {
    fn read_metadata(&self, path: &Path) -> Result<Option<RawMetadata>, PhotoError>;
}

/// Reads EXIF from JPEG, PNG, TIFF and WebP files.
///
/// The image header is decoded first so that files that are not images at all
/// are rejected before the EXIF reader looks at them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifFileSource;

impl MetadataSource for ExifFileSource {
    fn read_metadata(&self, path: &Path) -> Result<Option<RawMetadata>, PhotoError> {
        let file = File::open(path)?;
        let mut bufreader = BufReader::new(file);

        let image_reader = ImageReader::new(&mut bufreader).with_guessed_format()?;
        if image_reader.format().is_none() {
            return Err(PhotoError::UnreadableImage {
                message: "unrecognised image format".to_string(),
            });
        }
        image_reader.into_dimensions().map_err(|e| PhotoError::UnreadableImage {
            message: e.to_string(),
        })?;

        bufreader.rewind()?;

        let mut exifreader = exif::Reader::new();
        exifreader.continue_on_error(true); // Tolerate non-standard EXIF structures

        match exifreader.read_from_container(&mut bufreader) {
            Ok(exif) => Ok(Some(RawMetadata::from_exif(&exif))),
            Err(exif::Error::PartialResult(partial)) => {
                let (exif, errors) = partial.into_inner();
                debug!("⚠️  {} EXIF errors ignored in {}", errors.len(), path.display());
                Ok(Some(RawMetadata::from_exif(&exif)))
            }
            Err(exif::Error::NotFound(_)) => Ok(None),
            Err(e) => Err(PhotoError::UnreadableImage {
                message: format!("EXIF: {}", e),
            }),
        }
    }
}
