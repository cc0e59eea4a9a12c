use crate::error::{MapError, PhotoError};
use crate::exif_parser::{
    extract_capture_date, extract_geotag, get_coordinates, ExifFileSource, MetadataSource,
};
use crate::photo::PhotoRecord;
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A file left off the map, and why.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: PhotoError,
}

/// Result of scanning one folder.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Photos with both a position and a capture date, keyed by file path.
    pub photos: BTreeMap<PathBuf, PhotoRecord>,
    pub skipped: Vec<SkippedFile>,
    pub examined: usize,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Scans the photos directory with the EXIF file reader.
pub fn scan_folder(photos_dir: &Path) -> Result<ScanReport, MapError> {
    scan_folder_with(photos_dir, &ExifFileSource)
}

/// Scans the immediate files of `photos_dir` in file-name order.
///
/// Only folder-level failures are returned as errors. A file that cannot be
/// read, or lacks GPS or a capture date, is logged and skipped.
pub fn scan_folder_with<S: MetadataSource + ?Sized>(
    photos_dir: &Path,
    source: &S,
) -> Result<ScanReport, MapError> {
    info!("🔍 Scanning photos directory: {}", photos_dir.display());

    let files = list_files(photos_dir)?;
    info!("✅ Found {} files. Starting processing...", files.len());

    let start_time = Instant::now();
    let mut report = ScanReport {
        examined: files.len(),
        ..Default::default()
    };

    for path in files {
        match process_file(&path, source) {
            Ok(record) => {
                debug!("📍 {} -> {:?} on {}", path.display(), record.coordinates, record.date);
                report.photos.insert(path, record);
            }
            Err(reason) => {
                info!("⏭️  Skipping {}: {}", path.display(), reason);
                report.skipped.push(SkippedFile { path, reason });
            }
        }
    }

    info!(
        "📊 Examined {} files: {} mapped, {} skipped in {:.2} s",
        report.examined,
        report.photos.len(),
        report.skipped.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Regular files directly inside `photos_dir`, sorted by name. Links to
/// regular files count; links to folders are not entered.
fn list_files(photos_dir: &Path) -> Result<Vec<PathBuf>, MapError> {
    let folder_error = |e: std::io::Error| MapError::from_folder_io(photos_dir.to_path_buf(), e);

    let metadata = fs::metadata(photos_dir).map_err(folder_error)?;
    if !metadata.is_dir() {
        return Err(MapError::NotADirectory {
            path: photos_dir.to_path_buf(),
        });
    }
    // Surface an unreadable folder here instead of as a walker error entry
    fs::read_dir(photos_dir).map_err(folder_error)?;

    let walker = WalkBuilder::new(photos_dir)
        .standard_filters(false)
        .hidden(false)
        .follow_links(true)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.depth() == 1 && entry.file_type().is_some_and(|ft| ft.is_file()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!("⚠️  Could not list entry: {}", e),
        }
    }

    Ok(files)
}

fn process_file<S: MetadataSource + ?Sized>(
    path: &Path,
    source: &S,
) -> Result<PhotoRecord, PhotoError> {
    let metadata = source
        .read_metadata(path)?
        .ok_or(PhotoError::MissingMetadata)?;

    let geotag = extract_geotag(&metadata)?;
    let date = extract_capture_date(&metadata)?;
    let coordinates = get_coordinates(&geotag)?;

    Ok(PhotoRecord {
        path: path.to_path_buf(),
        date,
        coordinates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif_parser::RawMetadata;
    use crate::photo::Coordinates;
    use chrono::NaiveDate;
    use exif::{Field, In, Rational, Tag, Value};
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// Serves canned metadata by file name; anything else is "corrupt".
    #[derive(Default)]
    struct CannedSource {
        by_name: HashMap<String, Option<RawMetadata>>,
    }

    impl CannedSource {
        fn with(mut self, name: &str, metadata: Option<RawMetadata>) -> Self {
            self.by_name.insert(name.to_string(), metadata);
            self
        }
    }

    impl MetadataSource for CannedSource {
        fn read_metadata(&self, path: &Path) -> Result<Option<RawMetadata>, PhotoError> {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            self.by_name
                .get(&name)
                .cloned()
                .ok_or_else(|| PhotoError::UnreadableImage {
                    message: "corrupt".to_string(),
                })
        }
    }

    fn field(tag: Tag, value: Value) -> Field {
        Field { tag, ifd_num: In::PRIMARY, value }
    }

    fn ascii(text: &str) -> Value {
        Value::Ascii(vec![text.as_bytes().to_vec()])
    }

    fn whole_degrees(deg: u32) -> Value {
        Value::Rational(vec![
            Rational { num: deg, denom: 1 },
            Rational { num: 0, denom: 1 },
            Rational { num: 0, denom: 1 },
        ])
    }

    fn photo(date: &str, lat: u32, lng: u32) -> Option<RawMetadata> {
        Some(RawMetadata::new(vec![
            field(Tag::DateTimeOriginal, ascii(date)),
            field(Tag::GPSLatitudeRef, ascii("N")),
            field(Tag::GPSLatitude, whole_degrees(lat)),
            field(Tag::GPSLongitudeRef, ascii("W")),
            field(Tag::GPSLongitude, whole_degrees(lng)),
        ]))
    }

    fn photos_dir(names: &[&str]) -> TempDir {
        let dir = tempfile::Builder::new().prefix("photos").tempdir().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"jpeg bytes").unwrap();
        }
        dir
    }

    #[test]
    fn empty_folder_yields_empty_report() {
        let dir = photos_dir(&[]);
        let report = scan_folder_with(dir.path(), &CannedSource::default()).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.examined, 0);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn corrupt_file_does_not_stop_the_scan() {
        let dir = photos_dir(&["broken.jpg", "good.jpg"]);
        let source = CannedSource::default().with("good.jpg", photo("2023:01:01 09:00:00", 10, 20));

        let report = scan_folder_with(dir.path(), &source).unwrap();

        assert_eq!(report.photos.len(), 1);
        let record = &report.photos[&dir.path().join("good.jpg")];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(record.coordinates, Coordinates::new(10.0, -20.0));

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, dir.path().join("broken.jpg"));
        assert!(matches!(report.skipped[0].reason, PhotoError::UnreadableImage { .. }));
    }

    #[test]
    fn partial_metadata_disqualifies_the_file() {
        let dir = photos_dir(&["a.jpg", "b.jpg", "c.jpg"]);
        let date_only = RawMetadata::new(vec![field(Tag::DateTimeOriginal, ascii("2023:01:01 09:00:00"))]);
        let gps_only = RawMetadata::new(vec![
            field(Tag::GPSLatitudeRef, ascii("N")),
            field(Tag::GPSLatitude, whole_degrees(1)),
            field(Tag::GPSLongitudeRef, ascii("E")),
            field(Tag::GPSLongitude, whole_degrees(2)),
        ]);
        let source = CannedSource::default()
            .with("a.jpg", Some(date_only))
            .with("b.jpg", Some(gps_only))
            .with("c.jpg", None);

        let report = scan_folder_with(dir.path(), &source).unwrap();

        assert!(report.is_empty());
        let reasons: Vec<&PhotoError> = report.skipped.iter().map(|s| &s.reason).collect();
        assert!(matches!(reasons[0], PhotoError::MissingGeoTag));
        assert!(matches!(reasons[1], PhotoError::MissingDate));
        assert!(matches!(reasons[2], PhotoError::MissingMetadata));
    }

    #[test]
    fn only_immediate_files_are_examined() {
        let dir = photos_dir(&["top.jpg"]);
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("deep.jpg"), b"jpeg bytes").unwrap();

        let source = CannedSource::default()
            .with("top.jpg", photo("2023:01:01 09:00:00", 1, 1))
            .with("deep.jpg", photo("2023:01:01 09:00:00", 3, 3));

        let report = scan_folder_with(dir.path(), &source).unwrap();

        assert_eq!(report.examined, 1);
        let paths: Vec<&PathBuf> = report.photos.keys().collect();
        assert_eq!(paths, vec![&dir.path().join("top.jpg")]);
    }

    #[test]
    fn dot_files_are_scanned_like_any_other_photo() {
        let dir = photos_dir(&[".IMG_0001.jpg", "IMG_0002.jpg"]);
        let source = CannedSource::default()
            .with(".IMG_0001.jpg", photo("2023:01:01 09:15:00", 48, 2))
            .with("IMG_0002.jpg", photo("2023:01:01 10:00:00", 48, 3));

        let report = scan_folder_with(dir.path(), &source).unwrap();

        assert_eq!(report.examined, 2);
        assert_eq!(report.photos.len(), 2);
        assert!(report.photos.contains_key(&dir.path().join(".IMG_0001.jpg")));
    }

    #[cfg(unix)]
    #[test]
    fn links_to_photos_are_followed_but_linked_folders_are_not() {
        let dir = photos_dir(&[]);
        let elsewhere = photos_dir(&["original.jpg", "inside.jpg"]);
        std::os::unix::fs::symlink(elsewhere.path().join("original.jpg"), dir.path().join("link.jpg"))
            .unwrap();
        std::os::unix::fs::symlink(elsewhere.path(), dir.path().join("album")).unwrap();

        let source = CannedSource::default()
            .with("link.jpg", photo("2023:01:01 09:15:00", 48, 2))
            .with("inside.jpg", photo("2023:01:01 09:15:00", 10, 10));

        let report = scan_folder_with(dir.path(), &source).unwrap();

        assert_eq!(report.examined, 1);
        let paths: Vec<&PathBuf> = report.photos.keys().collect();
        assert_eq!(paths, vec![&dir.path().join("link.jpg")]);
    }

    #[test]
    fn files_are_visited_in_name_order() {
        let dir = photos_dir(&["c.jpg", "a.jpg", "b.jpg"]);
        let report = scan_folder_with(dir.path(), &CannedSource::default()).unwrap();

        let skipped: Vec<PathBuf> = report.skipped.into_iter().map(|s| s.path).collect();
        assert_eq!(
            skipped,
            vec![dir.path().join("a.jpg"), dir.path().join("b.jpg"), dir.path().join("c.jpg")]
        );
    }

    #[test]
    fn missing_folder_is_fatal() {
        let dir = photos_dir(&[]);
        let result = scan_folder_with(&dir.path().join("nope"), &CannedSource::default());
        assert!(matches!(result, Err(MapError::FolderNotFound { .. })));
    }

    #[test]
    fn file_instead_of_folder_is_fatal() {
        let dir = photos_dir(&["photo.jpg"]);
        let result = scan_folder_with(&dir.path().join("photo.jpg"), &CannedSource::default());
        assert!(matches!(result, Err(MapError::NotADirectory { .. })));
    }
}
