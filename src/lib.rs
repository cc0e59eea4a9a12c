//! Reads GPS positions and capture dates from a folder of photos and draws
//! them as a day-by-day route on a Leaflet map.

pub mod constants;
pub mod error;
pub mod exif_parser;
pub mod html_template;
pub mod photo;
pub mod processing;
pub mod route;
pub mod settings;

pub use error::{MapError, PhotoError};
pub use photo::{Coordinates, PhotoRecord};
pub use processing::{scan_folder, scan_folder_with, ScanReport};
pub use route::{RouteColor, RouteSegment};
pub use settings::Settings;

use tracing::info;

/// What a finished run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub examined: usize,
    pub mapped: usize,
    pub skipped: usize,
    pub days: usize,
}

/// Scans `settings.photos_dir` and writes the route map to `settings.output_path`.
///
/// Fails without writing anything when the folder cannot be read or holds no
/// usable photos.
pub fn run(settings: &Settings) -> Result<RunSummary, MapError> {
    let report = scan_folder(&settings.photos_dir)?;
    if report.is_empty() {
        return Err(MapError::EmptyResultSet);
    }

    let segments = route::build(report.photos.values());
    info!(
        "🧭 Built {} day routes from {} photos",
        segments.len(),
        report.photos.len()
    );

    html_template::save_map(&segments, settings.zoom, &settings.output_path)?;

    Ok(RunSummary {
        examined: report.examined,
        mapped: report.photos.len(),
        skipped: report.skipped.len(),
        days: segments.len(),
    })
}
