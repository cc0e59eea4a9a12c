use super::dms::{self, Dms, Hemisphere};
use super::generic::RawMetadata;
use crate::constants::EXIF_DATETIME_FORMAT;
use crate::error::PhotoError;
use crate::photo::Coordinates;
use chrono::{NaiveDate, NaiveDateTime};
use exif::{Context, Tag, Value};
use std::collections::BTreeMap;

/// GPS fields of one photo, keyed by tag name (`GPSLatitude`, `GPSLatitudeRef`, ...).
#[derive(Debug, Clone, Default)]
pub struct GeoTag {
    fields: BTreeMap<String, Value>,
}

impl GeoTag {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

pub fn extract_geotag(metadata: &RawMetadata) -> Result<GeoTag, PhotoError> {
    if metadata.is_empty() {
        return Err(PhotoError::MissingMetadata);
    }

    let fields: BTreeMap<String, Value> = metadata
        .primary_fields()
        .filter(|f| f.tag.context() == Context::Gps)
        .map(|f| (f.tag.to_string(), f.value.clone()))
        .collect();

    let has_gps_pointer = metadata.get(Tag::GPSInfoIFDPointer).is_some();
    if fields.is_empty() && !has_gps_pointer {
        return Err(PhotoError::MissingGeoTag);
    }

    Ok(GeoTag { fields })
}

/// Calendar date of `DateTimeOriginal`; the time of day is dropped.
pub fn extract_capture_date(metadata: &RawMetadata) -> Result<NaiveDate, PhotoError> {
    let field = metadata
        .get(Tag::DateTimeOriginal)
        .ok_or(PhotoError::MissingDate)?;

    let text = match field.value {
        Value::Ascii(ref chunks) => {
            let bytes = chunks.first().map(Vec::as_slice).unwrap_or_default();
            std::str::from_utf8(bytes)
                .map_err(|_| PhotoError::DateParse {
                    value: String::from_utf8_lossy(bytes).into_owned(),
                    source: None,
                })?
                .trim_end_matches('\0')
                .trim()
                .to_string()
        }
        ref other => {
            return Err(PhotoError::DateParse {
                value: format!("{:?}", other),
                source: None,
            })
        }
    };

    NaiveDateTime::parse_from_str(&text, EXIF_DATETIME_FORMAT)
        .map(|datetime| datetime.date())
        .map_err(|e| PhotoError::DateParse {
            value: text,
            source: Some(e),
        })
}

pub fn get_coordinates(geotag: &GeoTag) -> Result<Coordinates, PhotoError> {
    let lat = get_gps_coord(geotag, "GPSLatitude", "GPSLatitudeRef")?;
    let lng = get_gps_coord(geotag, "GPSLongitude", "GPSLongitudeRef")?;
    Ok(Coordinates::new(lat, lng))
}

fn get_gps_coord(
    geotag: &GeoTag,
    coord_field: &'static str,
    ref_field: &'static str,
) -> Result<f64, PhotoError> {
    let coord = geotag
        .get(coord_field)
        .ok_or(PhotoError::IncompleteGeoTag { field: coord_field })?;
    let reference = geotag
        .get(ref_field)
        .ok_or(PhotoError::IncompleteGeoTag { field: ref_field })?;

    let dms = Dms::from_exif_value(coord_field, coord)?;
    let hemisphere = Hemisphere::from_exif_value(ref_field, reference)?;
    dms::to_decimal(dms, hemisphere)
}
