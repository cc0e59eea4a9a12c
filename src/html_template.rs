use crate::constants::{ROUTE_LINE_OPACITY, ROUTE_LINE_WEIGHT};
use crate::error::MapError;
use crate::route::RouteSegment;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct MapView {
    center: [f64; 2],
    zoom: u8,
    line_weight: f64,
    line_opacity: f64,
    segments: Vec<SegmentView>,
}

#[derive(Serialize)]
struct SegmentView {
    date: String,
    color: &'static str,
    hex: &'static str,
    polyline: Vec<[f64; 2]>,
    markers: Vec<MarkerView>,
}

#[derive(Serialize)]
struct MarkerView {
    sequence: usize,
    lat: f64,
    lng: f64,
    label: String,
}

/// Renders the route as a standalone Leaflet page.
///
/// The map opens on the first photo of the earliest day. Fails with
/// `EmptyResultSet` when there is nothing to draw.
pub fn render_map(segments: &[RouteSegment], zoom: u8) -> Result<String, MapError> {
    let first = segments
        .iter()
        .find_map(|s| s.points.first())
        .ok_or(MapError::EmptyResultSet)?;

    let view = MapView {
        center: [first.coordinates.lat, first.coordinates.lng],
        zoom,
        line_weight: ROUTE_LINE_WEIGHT,
        line_opacity: ROUTE_LINE_OPACITY,
        segments: segments
            .iter()
            .filter(|s| !s.points.is_empty())
            .map(|s| SegmentView {
                date: s.date.format("%Y-%m-%d").to_string(),
                color: s.color.name(),
                hex: s.color.hex(),
                polyline: s.polyline().iter().map(|c| [c.lat, c.lng]).collect(),
                markers: s
                    .markers()
                    .into_iter()
                    .map(|m| MarkerView {
                        sequence: m.sequence,
                        lat: m.coordinates.lat,
                        lng: m.coordinates.lng,
                        label: m.label,
                    })
                    .collect(),
            })
            .collect(),
    };

    // '<' only occurs inside JSON strings, so "</script>" or "<!--" in a file
    // name cannot end or hide the data block
    let data = serde_json::to_string(&view)?.replace('<', "\\u003c");

    Ok(MAP_HTML.replace("/* ROUTE_DATA_PLACEHOLDER */", &data))
}

/// Renders and writes the map. Nothing is written when rendering fails.
pub fn save_map(segments: &[RouteSegment], zoom: u8, output_path: &Path) -> Result<(), MapError> {
    let html = render_map(segments, zoom)?;

    fs::write(output_path, html).map_err(|source| MapError::OutputWrite {
        path: output_path.to_path_buf(),
        source,
    })?;

    info!("🗺️  Map saved to {}", output_path.display());
    Ok(())
}

// HTML template for the route page
const MAP_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>PhotoRoute</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <style>
        body { margin: 0; padding: 0; font-family: Arial, sans-serif; }
        #map { height: 100vh; width: 100%; }
        .route-marker-pin {
            width: 22px;
            height: 22px;
            line-height: 22px;
            border-radius: 50%;
            border: 2px solid white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.4);
            color: white;
            font-size: 12px;
            font-weight: bold;
            text-align: center;
            text-shadow: 0 0 2px rgba(0,0,0,0.6);
        }
        .route-popup .date {
            color: #666;
            margin-top: 4px;
            font-size: 0.8em;
        }
        .legend {
            padding: 6px 8px;
            font: 13px/18px Arial, Helvetica, sans-serif;
            background: rgba(255,255,255,0.9);
            box-shadow: 0 0 15px rgba(0,0,0,0.2);
            border-radius: 5px;
            max-height: 50vh;
            overflow-y: auto;
        }
        .legend .swatch {
            display: inline-block;
            width: 12px;
            height: 12px;
            margin-right: 6px;
            border-radius: 2px;
            vertical-align: middle;
        }
    </style>
</head>
<body>
    <div id="map"></div>

    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <script>
        const ROUTE = /* ROUTE_DATA_PLACEHOLDER */;

        const map = L.map('map').setView(ROUTE.center, ROUTE.zoom);

        L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
            maxZoom: 19,
            attribution: '&copy; OpenStreetMap contributors'
        }).addTo(map);

        function markerIcon(segment, marker) {
            const pin = document.createElement('div');
            pin.className = 'route-marker-pin';
            pin.style.background = segment.hex;
            pin.textContent = marker.sequence;
            return L.divIcon({
                className: 'route-marker',
                html: pin.outerHTML,
                iconSize: [26, 26],
                iconAnchor: [13, 13],
                popupAnchor: [0, -13]
            });
        }

        function markerPopup(segment, marker) {
            const popup = document.createElement('div');
            popup.className = 'route-popup';
            const label = document.createElement('i');
            label.textContent = marker.label;
            popup.appendChild(label);
            const date = document.createElement('div');
            date.className = 'date';
            date.textContent = segment.date + ' #' + marker.sequence;
            popup.appendChild(date);
            return popup;
        }

        const bounds = [];
        ROUTE.segments.forEach(segment => {
            L.polyline(segment.polyline, {
                color: segment.hex,
                weight: ROUTE.line_weight,
                opacity: ROUTE.line_opacity
            }).addTo(map);

            segment.markers.forEach(marker => {
                L.marker([marker.lat, marker.lng], { icon: markerIcon(segment, marker) })
                    .bindPopup(markerPopup(segment, marker))
                    .addTo(map);
                bounds.push([marker.lat, marker.lng]);
            });
        });

        if (bounds.length > 1) {
            map.fitBounds(bounds, { padding: [20, 20] });
        }

        const legend = L.control({ position: 'topright' });
        legend.onAdd = function () {
            const div = L.DomUtil.create('div', 'legend');
            ROUTE.segments.forEach(segment => {
                const row = document.createElement('div');
                const swatch = document.createElement('span');
                swatch.className = 'swatch';
                swatch.style.background = segment.hex;
                row.appendChild(swatch);
                row.appendChild(document.createTextNode(
                    segment.date + ' (' + segment.markers.length + ')'));
                div.appendChild(row);
            });
            return div;
        };
        legend.addTo(map);
    </script>
</body>
</html>
"##;
