use crate::constants::COORDINATE_PRECISION;
use crate::error::PhotoError;
use exif::Value;

/// A GPS angle as stored in EXIF: degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self { degrees, minutes, seconds }
    }

    /// Reads the three-rational value of `GPSLatitude` / `GPSLongitude`.
    pub fn from_exif_value(field: &'static str, value: &Value) -> Result<Self, PhotoError> {
        let parts = match value {
            Value::Rational(parts) => parts,
            other => {
                return Err(PhotoError::InvalidCoordinateComponent {
                    field,
                    reason: format!("expected three rationals, found {:?}", other),
                })
            }
        };

        if parts.len() != 3 {
            return Err(PhotoError::InvalidCoordinateComponent {
                field,
                reason: format!("expected three components, found {}", parts.len()),
            });
        }

        if let Some(zero) = parts.iter().position(|r| r.denom == 0) {
            return Err(PhotoError::InvalidCoordinateComponent {
                field,
                reason: format!("component {} has a zero denominator", zero),
            });
        }

        Ok(Self::new(parts[0].to_f64(), parts[1].to_f64(), parts[2].to_f64()))
    }
}

/// Hemisphere reference from `GPSLatitudeRef` / `GPSLongitudeRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// South and west are the negative halves.
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    pub fn from_letter(field: &'static str, text: &str) -> Result<Self, PhotoError> {
        match text.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('N') => Ok(Hemisphere::North),
            Some('S') => Ok(Hemisphere::South),
            Some('E') => Ok(Hemisphere::East),
            Some('W') => Ok(Hemisphere::West),
            _ => Err(PhotoError::InvalidCoordinateComponent {
                field,
                reason: format!("unknown hemisphere reference {:?}", text),
            }),
        }
    }

    pub fn from_exif_value(field: &'static str, value: &Value) -> Result<Self, PhotoError> {
        match value {
            Value::Ascii(chunks) => {
                let bytes = chunks.first().map(Vec::as_slice).unwrap_or_default();
                Self::from_letter(field, &String::from_utf8_lossy(bytes))
            }
            other => Err(PhotoError::InvalidCoordinateComponent {
                field,
                reason: format!("expected an ASCII reference, found {:?}", other),
            }),
        }
    }
}

/// Converts a DMS angle to signed decimal degrees, rounded to 5 fractional digits.
///
/// For the south and west hemispheres each component is negated before the
/// terms are summed.
pub fn to_decimal(dms: Dms, hemisphere: Hemisphere) -> Result<f64, PhotoError> {
    let mut degrees = dms.degrees;
    let mut minutes = dms.minutes / 60.0;
    let mut seconds = dms.seconds / 3600.0;

    if hemisphere.is_negative() {
        degrees = -degrees;
        minutes = -minutes;
        seconds = -seconds;
    }

    let decimal = degrees + minutes + seconds;
    if !decimal.is_finite() {
        return Err(PhotoError::InvalidCoordinateComponent {
            field: "DMS",
            reason: format!("{:?} does not give a finite angle", dms),
        });
    }

    Ok(round_to_precision(decimal))
}

fn round_to_precision(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    (value * scale).round() / scale
}
