pub mod dms;
pub mod generic;
pub mod geotag;

pub use dms::{to_decimal, Dms, Hemisphere};
pub use generic::{ExifFileSource, MetadataSource, RawMetadata};
pub use geotag::{extract_capture_date, extract_geotag, get_coordinates, GeoTag};
