//! Sensor map state: viewport, markers, overlay label and tile style.

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::GeocodeError;
use crate::geocode::{GeocodeResult, NOT_FOUND_ALERT, SEARCH_ERROR_ALERT};
use crate::theme::Theme;

pub const INITIAL_ZOOM: u8 = 13;
pub const SEARCH_ZOOM: u8 = 15;
pub const INITIAL_LABEL: &str = "STREET VIEW: CHENNAI";
pub const MARKER_STATUS: &str = "Status: Online";

const DARK_TILES: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
const LIGHT_TILES: &str = "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Web-mercator tile containing this point at `zoom`.
    pub fn tile(self, zoom: u8) -> (u32, u32) {
        let n = f64::from(1_u32 << zoom.min(30));
        let x = (self.lon + 180.0) / 360.0 * n;
        let lat = self.lat.to_radians();
        let y = (1.0 - lat.tan().asinh() / PI) / 2.0 * n;
        (x.floor().clamp(0.0, n - 1.0) as u32, y.floor().clamp(0.0, n - 1.0) as u32)
    }
}

pub const CHENNAI: GeoPoint = GeoPoint::new(13.0856, 80.2379);
pub const SENSOR_2: GeoPoint = GeoPoint::new(13.0774, 80.2425);

/// Base-map tile set, switched with the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TileStyle {
    DarkAll,
    LightAll,
}

impl TileStyle {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::DarkAll,
            Theme::Light => Self::LightAll,
        }
    }

    pub const fn template(self) -> &'static str {
        match self {
            Self::DarkAll => DARK_TILES,
            Self::LightAll => LIGHT_TILES,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::DarkAll => "dark_all",
            Self::LightAll => "light_all",
        }
    }

    /// Concrete tile URL on the first subdomain, standard resolution.
    pub fn url(self, zoom: u8, x: u32, y: u32) -> String {
        self.template()
            .replace("{s}", "a")
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{r}", "")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub name: &'static str,
    pub position: GeoPoint,
    pub status: &'static str,
}

/// Map panel state.
///
/// Marker 0 is the primary marker; a successful search moves it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub label: String,
    pub tiles: TileStyle,
    /// A search is in flight; the panel is drawn dimmed.
    pub loading: bool,
}

impl MapView {
    pub fn chennai(theme: Theme) -> Self {
        Self {
            center: CHENNAI,
            zoom: INITIAL_ZOOM,
            markers: vec![
                Marker {
                    name: "Sensor 1",
                    position: CHENNAI,
                    status: MARKER_STATUS,
                },
                Marker {
                    name: "Sensor 2",
                    position: SENSOR_2,
                    status: MARKER_STATUS,
                },
            ],
            label: INITIAL_LABEL.to_string(),
            tiles: TileStyle::for_theme(theme),
            loading: false,
        }
    }

    pub fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.tiles = TileStyle::for_theme(theme);
    }

    pub fn begin_search(&mut self) {
        self.loading = true;
    }

    /// Finishes a search. Returns the alert text to show the user, if any.
    pub fn apply_search(
        &mut self,
        result: Result<Option<GeocodeResult>, GeocodeError>,
    ) -> Option<&'static str> {
        self.loading = false;
        match result {
            Ok(Some(hit)) => {
                tracing::info!(lat = hit.point.lat, lon = hit.point.lon, label = %hit.label, "search hit");
                self.set_view(hit.point, SEARCH_ZOOM);
                if let Some(marker) = self.markers.first_mut() {
                    marker.position = hit.point;
                }
                self.label = hit.label;
                None
            }
            Ok(None) => {
                tracing::info!("search returned no results");
                Some(NOT_FOUND_ALERT)
            }
            Err(err) => {
                tracing::error!(error = %err, "search error");
                Some(SEARCH_ERROR_ALERT)
            }
        }
    }

    /// Visible extent in degrees, roughly two tiles across at the current zoom.
    pub fn span(&self) -> f64 {
        720.0 / f64::from(1_u32 << self.zoom.min(30))
    }

    /// `([west, east], [south, north])` around the centre.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let half = self.span() / 2.0;
        (
            [self.center.lon - half, self.center.lon + half],
            [self.center.lat - half, self.center.lat + half],
        )
    }

    pub fn center_tile_url(&self) -> String {
        let (x, y) = self.center.tile(self.zoom);
        self.tiles.url(self.zoom, x, y)
    }
}
