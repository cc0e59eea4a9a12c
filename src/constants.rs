// Map defaults
pub const DEFAULT_OUTPUT_FILE: &str = "map.html";
pub const DEFAULT_ZOOM: u8 = 12;

// Route line style
pub const ROUTE_LINE_WEIGHT: f64 = 2.5;
pub const ROUTE_LINE_OPACITY: f64 = 1.0;

// EXIF DateTimeOriginal layout, e.g. "2023:01:31 14:05:09"
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

// Decimal degrees keep 5 fractional digits (~1 m)
pub const COORDINATE_PRECISION: i32 = 5;
