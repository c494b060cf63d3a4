//! Map widgets: fixed sets of markers, a fitted initial view and marker clicks.
//!
//! The view is fitted the way a Web Mercator tile map fits bounds: project at
//! zoom 0 with 256px tiles, take the largest integer zoom at which the padded
//! viewport still holds every point, and centre on the projected midpoint.

use std::f64::consts::PI;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::ContentKind;

const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest bounds containing every point, `None` for no points.
    pub fn covering<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    south: p.lat,
                    west: p.lng,
                    north: p.lat,
                    east: p.lng,
                },
                Some(b) => Bounds {
                    south: b.south.min(p.lat),
                    west: b.west.min(p.lng),
                    north: b.north.max(p.lat),
                    east: b.east.max(p.lng),
                },
            })
        })
    }

    #[cfg(test)]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }
}

/// Pixel size of the map container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 650,
        }
    }
}

/// Initial centre and zoom of a map, with the area it shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    /// Geographic area visible in the viewport at this zoom
    pub visible: Bounds,
}

fn scale(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

fn project(point: &GeoPoint, zoom: f64) -> (f64, f64) {
    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (point.lng + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    (x * scale(zoom), y * scale(zoom))
}

fn unproject(x: f64, y: f64, zoom: f64) -> GeoPoint {
    let (x, y) = (x / scale(zoom), y / scale(zoom));
    let lng = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    GeoPoint::new(lat, lng)
}

/// Fit `bounds` into `viewport`, leaving `padding` pixels on every side.
pub fn fit_view(bounds: &Bounds, viewport: Viewport, padding: u32, max_zoom: u8) -> MapView {
    let (west, north) = project(&GeoPoint::new(bounds.north, bounds.west), 0.0);
    let (east, south) = project(&GeoPoint::new(bounds.south, bounds.east), 0.0);
    let (span_x, span_y) = ((east - west).abs(), (south - north).abs());

    let avail_w = (viewport.width as f64 - 2.0 * padding as f64).max(1.0);
    let avail_h = (viewport.height as f64 - 2.0 * padding as f64).max(1.0);

    let fit = |avail: f64, span: f64| if span > 0.0 { avail / span } else { f64::INFINITY };
    let ratio = fit(avail_w, span_x).min(fit(avail_h, span_y));
    let zoom = if ratio.is_finite() {
        ratio.log2().floor().clamp(0.0, max_zoom as f64) as u8
    } else {
        max_zoom
    };

    let (cx, cy) = ((west + east) / 2.0, (north + south) / 2.0);
    let center = unproject(cx, cy, 0.0);

    let z = zoom as f64;
    let (px, py) = (cx * z.exp2(), cy * z.exp2());
    let (half_w, half_h) = (viewport.width as f64 / 2.0, viewport.height as f64 / 2.0);
    let north_west = unproject(px - half_w, py - half_h, z);
    let south_east = unproject(px + half_w, py + half_h, z);

    MapView {
        center,
        zoom,
        visible: Bounds {
            south: south_east.lat,
            west: north_west.lng,
            north: north_west.lat,
            east: south_east.lng,
        },
    }
}

/// When marker popups are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum PopupBehavior {
    /// Every popup opens on its own after a delay
    AutoOpen {
        #[serde(rename = "delayMs")]
        delay_ms: u64,
    },
    /// A popup opens when its marker is clicked
    OnClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub padding: u32,
    pub max_zoom: u8,
    pub viewport: Viewport,
    pub popup: PopupBehavior,
}

/// A point on a widget linked to a content page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: &'static str,
    pub title: &'static str,
    /// Secondary popup line: country or place
    pub subtitle: &'static str,
    pub point: GeoPoint,
    pub color: Option<&'static str>,
    #[serde(skip)]
    pub target: ContentKind,
    #[serde(skip)]
    pub target_id: &'static str,
}

impl Marker {
    /// Route opened by clicking the marker.
    pub fn href(&self) -> String {
        self.target.detail_path(self.target_id)
    }
}

/// Result of clicking a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerClick {
    /// Marker whose popup is now open
    pub open_popup: &'static str,
    pub navigate_to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapWidget {
    pub name: &'static str,
    pub markers: Vec<Marker>,
    pub config: MapConfig,
}

impl MapWidget {
    pub fn points(&self) -> impl Iterator<Item = &GeoPoint> {
        self.markers.iter().map(|m| &m.point)
    }

    /// Fitted initial view, `None` when the widget has no markers.
    pub fn view(&self) -> Option<MapView> {
        let bounds = Bounds::covering(self.points())?;
        Some(fit_view(
            &bounds,
            self.config.viewport,
            self.config.padding,
            self.config.max_zoom,
        ))
    }

    pub fn marker(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Open the marker's popup and navigate to its content page.
    pub fn click(&self, marker_id: &str) -> Option<MarkerClick> {
        let marker = self.marker(marker_id)?;
        Some(MarkerClick {
            open_popup: marker.id,
            navigate_to: marker.href(),
        })
    }
}

const INDIA: &str = "#2563EB";
const TANZANIA: &str = "#059669";
const ETHIOPIA: &str = "#DC2626";
const NETHERLANDS: &str = "#7C3AED";

#[allow(clippy::too_many_arguments)]
const fn marker(
    id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    lat: f64,
    lng: f64,
    color: Option<&'static str>,
    target: ContentKind,
    target_id: &'static str,
) -> Marker {
    Marker {
        id,
        title,
        subtitle,
        point: GeoPoint::new(lat, lng),
        color,
        target,
        target_id,
    }
}

static CASE_STUDIES: Lazy<MapWidget> = Lazy::new(|| {
    use ContentKind::CaseStudy as Cs;
    MapWidget {
        name: "case-studies",
        markers: vec![
            marker("andhra", "Groundwater based farmer collectives of Andhra Pradesh", "India", 14.11168, 78.15982, Some(INDIA), Cs, "1"),
            marker("gaya", "Indigenous and modern irrigation systems in Gaya", "India", 24.7937, 85.0018, Some(INDIA), Cs, "2"),
            marker("kalyanpura", "Watershed development in Kalyanpura", "India", 25.362281, 75.227060, Some(INDIA), Cs, "3"),
            marker("gurukunj", "Piped distribution in Gurukunj lift irrigation scheme", "India", 20.80677, 77.36450, Some(INDIA), Cs, "4"),
            marker("tanzania", "Farmer-led irrigation schemes of Mtambo and Ismai", "Tanzania", -3.420861, 37.198694, Some(TANZANIA), Cs, "5"),
            marker("melka-chefe", "Melka-Chefe irrigation scheme", "Ethiopia", 10.953583, 39.764528, Some(ETHIOPIA), Cs, "6"),
            marker("kobo-girana", "Kobo-Girana Irrigation Scheme", "Ethiopia", 12.164608, 39.634729, Some(ETHIOPIA), Cs, "7"),
        ],
        config: MapConfig {
            padding: 80,
            max_zoom: 6,
            viewport: Viewport::default(),
            popup: PopupBehavior::AutoOpen { delay_ms: 100 },
        },
    }
});

static PARTNERS: Lazy<MapWidget> = Lazy::new(|| {
    use ContentKind::Partner as P;
    MapWidget {
        name: "partners",
        markers: vec![
            marker("1", "IIT Delhi", "New Delhi, India", 28.5450, 77.1920, Some(INDIA), P, "1"),
            marker("2", "FES", "Bhilwara, Rajasthan", 25.3470, 74.6409, Some(INDIA), P, "2"),
            marker("3", "ATREE", "Bangalore", 12.9716, 77.5946, Some(INDIA), P, "3"),
            marker("4", "IHE Delft", "Delft", 52.0116, 4.3571, Some(NETHERLANDS), P, "4"),
            marker("5", "Wollo University", "Dessie, Ethiopia", 11.1300, 39.6333, Some(ETHIOPIA), P, "5"),
            marker("6", "WoDET", "Dessie, Ethiopia", 11.1350, 39.6383, Some(ETHIOPIA), P, "6"),
            marker("7", "NMAIST", "Arusha, Tanzania", -3.3869, 36.6830, Some(TANZANIA), P, "7"),
            marker("8", "PBWB", "Moshi, Tanzania", -3.3500, 37.3500, Some(TANZANIA), P, "8"),
        ],
        config: MapConfig {
            padding: 80,
            max_zoom: 4,
            viewport: Viewport::default(),
            popup: PopupBehavior::AutoOpen { delay_ms: 100 },
        },
    }
});

static WORLD: Lazy<MapWidget> = Lazy::new(|| {
    use ContentKind::CaseStudy as Cs;
    MapWidget {
        name: "world",
        markers: vec![
            marker("gaya", "Gaya, India", "India", 24.7914, 85.0002, None, Cs, "1"),
            marker("mumbai", "Mumbai, India", "India", 19.0760, 72.8777, None, Cs, "2"),
            marker("pretoria-north", "Pretoria, South Africa", "South Africa", -25.7479, 28.2293, None, Cs, "3"),
            marker("pretoria-south", "Pretoria, South Africa", "South Africa", -25.7579, 28.2293, None, Cs, "3"),
        ],
        config: MapConfig {
            padding: 50,
            max_zoom: 5,
            viewport: Viewport::default(),
            popup: PopupBehavior::OnClick,
        },
    }
});

/// Names of the built-in widgets.
pub const WIDGETS: [&str; 3] = ["case-studies", "partners", "world"];

/// Look up a built-in widget by name.
pub fn widget(name: &str) -> Option<&'static MapWidget> {
    match name {
        "case-studies" => Some(&*CASE_STUDIES),
        "partners" => Some(&*PARTNERS),
        "world" => Some(&*WORLD),
        _ => None,
    }
}
