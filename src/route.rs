//! Turns scanned photos into one colored route per day.

use crate::photo::{Coordinates, PhotoRecord};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Marker colors, in the order they are handed out to days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteColor {
    Red,
    Blue,
    Green,
    Purple,
    Orange,
    DarkRed,
    LightRed,
    Beige,
    DarkBlue,
    DarkGreen,
    CadetBlue,
    DarkPurple,
    White,
    Pink,
    LightBlue,
    LightGreen,
    Gray,
    Black,
    LightGray,
}

pub const PALETTE: [RouteColor; 19] = [
    RouteColor::Red,
    RouteColor::Blue,
    RouteColor::Green,
    RouteColor::Purple,
    RouteColor::Orange,
    RouteColor::DarkRed,
    RouteColor::LightRed,
    RouteColor::Beige,
    RouteColor::DarkBlue,
    RouteColor::DarkGreen,
    RouteColor::CadetBlue,
    RouteColor::DarkPurple,
    RouteColor::White,
    RouteColor::Pink,
    RouteColor::LightBlue,
    RouteColor::LightGreen,
    RouteColor::Gray,
    RouteColor::Black,
    RouteColor::LightGray,
];

impl RouteColor {
    /// Color of the `index`-th day, cycling through the palette.
    pub fn for_group(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            RouteColor::Red => "red",
            RouteColor::Blue => "blue",
            RouteColor::Green => "green",
            RouteColor::Purple => "purple",
            RouteColor::Orange => "orange",
            RouteColor::DarkRed => "darkred",
            RouteColor::LightRed => "lightred",
            RouteColor::Beige => "beige",
            RouteColor::DarkBlue => "darkblue",
            RouteColor::DarkGreen => "darkgreen",
            RouteColor::CadetBlue => "cadetblue",
            RouteColor::DarkPurple => "darkpurple",
            RouteColor::White => "white",
            RouteColor::Pink => "pink",
            RouteColor::LightBlue => "lightblue",
            RouteColor::LightGreen => "lightgreen",
            RouteColor::Gray => "gray",
            RouteColor::Black => "black",
            RouteColor::LightGray => "lightgray",
        }
    }

    /// CSS color used for lines and marker fills.
    pub fn hex(self) -> &'static str {
        match self {
            RouteColor::Red => "#d63e2a",
            RouteColor::Blue => "#38aadd",
            RouteColor::Green => "#72b026",
            RouteColor::Purple => "#d252b9",
            RouteColor::Orange => "#f69730",
            RouteColor::DarkRed => "#a23336",
            RouteColor::LightRed => "#ff8e7f",
            RouteColor::Beige => "#ffcb92",
            RouteColor::DarkBlue => "#0067a3",
            RouteColor::DarkGreen => "#728224",
            RouteColor::CadetBlue => "#436978",
            RouteColor::DarkPurple => "#5b396b",
            RouteColor::White => "#fbfbfb",
            RouteColor::Pink => "#ff91ea",
            RouteColor::LightBlue => "#8adaff",
            RouteColor::LightGreen => "#bbf970",
            RouteColor::Gray => "#575757",
            RouteColor::Black => "#303030",
            RouteColor::LightGray => "#a3a3a3",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePoint {
    pub coordinates: Coordinates,
    pub path: PathBuf,
}

/// A numbered stop on one day's route.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// 1-based position within the day.
    pub sequence: usize,
    pub coordinates: Coordinates,
    pub color: RouteColor,
    pub label: String,
}

/// All photos of one calendar day, in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub date: NaiveDate,
    pub color: RouteColor,
    pub points: Vec<RoutePoint>,
}

impl RouteSegment {
    pub fn polyline(&self) -> Vec<Coordinates> {
        self.points.iter().map(|p| p.coordinates).collect()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, point)| Marker {
                sequence: i + 1,
                coordinates: point.coordinates,
                color: self.color,
                label: point.path.display().to_string(),
            })
            .collect()
    }
}

/// Groups photos by capture date, earliest day first.
///
/// Within a day, photos keep the order they are given in.
pub fn build<'a, I>(records: I) -> Vec<RouteSegment>
where
    I: IntoIterator<Item = &'a PhotoRecord>,
{
    let mut by_date: BTreeMap<NaiveDate, Vec<RoutePoint>> = BTreeMap::new();
    for record in records {
        by_date.entry(record.date).or_default().push(RoutePoint {
            coordinates: record.coordinates,
            path: record.path.clone(),
        });
    }

    by_date
        .into_iter()
        .enumerate()
        .map(|(index, (date, points))| RouteSegment {
            date,
            color: RouteColor::for_group(index),
            points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(path: &str, date: NaiveDate, lat: f64, lng: f64) -> PhotoRecord {
        PhotoRecord {
            path: PathBuf::from(path),
            date,
            coordinates: Coordinates::new(lat, lng),
        }
    }

    #[test]
    fn empty_input_builds_no_segments() {
        assert!(build(&Vec::<PhotoRecord>::new()).is_empty());
    }

    #[test]
    fn two_days_become_two_colored_segments() {
        let a = Coordinates::new(48.85822, 2.2945);
        let b = Coordinates::new(48.86061, 2.33764);
        let c = Coordinates::new(43.29695, 5.38107);
        let records = vec![
            record("trip/IMG_1.jpg", date(2023, 1, 1), a.lat, a.lng),
            record("trip/IMG_2.jpg", date(2023, 1, 1), b.lat, b.lng),
            record("trip/IMG_3.jpg", date(2023, 1, 2), c.lat, c.lng),
        ];

        let segments = build(&records);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].date, date(2023, 1, 1));
        assert_eq!(segments[0].color, PALETTE[0]);
        assert_eq!(segments[0].polyline(), vec![a, b]);
        assert_eq!(segments[1].date, date(2023, 1, 2));
        assert_eq!(segments[1].color, PALETTE[1]);
        assert_eq!(segments[1].polyline(), vec![c]);

        let numbers: Vec<Vec<usize>> = segments
            .iter()
            .map(|s| s.markers().iter().map(|m| m.sequence).collect())
            .collect();
        assert_eq!(numbers, vec![vec![1, 2], vec![1]]);
    }

    #[test]
    fn days_are_sorted_by_calendar_not_input_order() {
        let records = vec![
            record("c.jpg", date(2024, 2, 1), 0.0, 0.0),
            record("a.jpg", date(2023, 12, 31), 0.0, 0.0),
            record("b.jpg", date(2024, 1, 15), 0.0, 0.0),
        ];

        let dates: Vec<NaiveDate> = build(&records).iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![date(2023, 12, 31), date(2024, 1, 15), date(2024, 2, 1)]);
    }

    #[test]
    fn points_keep_input_order_within_a_day() {
        let day = date(2023, 5, 5);
        let records = vec![
            record("z.jpg", day, 1.0, 1.0),
            record("a.jpg", day, 2.0, 2.0),
        ];

        let segments = build(&records);
        let labels: Vec<String> = segments[0].markers().into_iter().map(|m| m.label).collect();
        assert_eq!(labels, vec!["z.jpg", "a.jpg"]);
    }

    #[test]
    fn colors_cycle_through_the_palette() {
        let start = date(2023, 1, 1);
        let records: Vec<PhotoRecord> = (0..(PALETTE.len() as i64 * 2 + 3))
            .map(|i| record(&format!("{i}.jpg"), start + chrono::Days::new(i as u64), 0.0, 0.0))
            .collect();

        let segments = build(&records);
        assert_eq!(segments.len(), records.len());
        for i in 0..segments.len() - PALETTE.len() {
            assert_eq!(segments[i].color, segments[i + PALETTE.len()].color);
        }
        assert_ne!(segments[0].color, segments[1].color);
    }

    #[test]
    fn every_day_starts_numbering_at_one() {
        let records: Vec<PhotoRecord> = (1..=4)
            .flat_map(|d| {
                (0..3).map(move |n| record(&format!("{d}-{n}.jpg"), date(2023, 3, d), 0.0, 0.0))
            })
            .collect();

        for segment in build(&records) {
            let markers = segment.markers();
            assert_eq!(markers[0].sequence, 1);
            assert_eq!(markers.last().unwrap().sequence, 3);
            assert!(markers.iter().all(|m| m.color == segment.color));
        }
    }

    #[test]
    fn palette_has_distinct_named_colors() {
        assert_eq!(PALETTE.len(), 19);
        let names: std::collections::HashSet<&str> = PALETTE.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), PALETTE.len());
        assert_eq!(serde_json::to_string(&RouteColor::DarkPurple).unwrap(), "\"darkpurple\"");
    }
}
