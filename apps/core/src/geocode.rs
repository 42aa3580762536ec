//! Place search against a Nominatim-style endpoint, restricted to Chennai.

use serde::Deserialize;

use crate::error::GeocodeError;
use crate::map::GeoPoint;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// `left,top,right,bottom` box the search is bounded to.
pub const CHENNAI_VIEWBOX: &str = "80.15,13.20,80.35,12.90";

pub const NOT_FOUND_ALERT: &str =
    "Location not found in Chennai. Please try another specific area name.";
pub const SEARCH_ERROR_ALERT: &str = "Error searching for location.";

/// Queries up to this many characters are never sent.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeRequest {
    query: String,
}

impl GeocodeRequest {
    /// `None` for queries too short to search.
    pub fn new(query: &str) -> Option<Self> {
        (query.chars().count() > MIN_QUERY_CHARS).then(|| Self {
            query: query.to_string(),
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Unencoded query-string pairs, in request order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("q", format!("{}, Chennai", self.query)),
            ("bounded", "1".to_string()),
            ("viewbox", CHENNAI_VIEWBOX.to_string()),
        ]
    }

    /// Decodes a response body for this request.
    pub fn parse_response(&self, body: &str) -> Result<Option<GeocodeResult>, GeocodeError> {
        parse_geocode_response(body, &self.query)
    }
}

/// Coordinates arrive as strings from Nominatim; some mirrors send numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Text(String),
    Number(f64),
}

impl Coordinate {
    fn parse(&self, field: &'static str) -> Result<f64, GeocodeError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| GeocodeError::Coordinate {
                    field,
                    value: text.clone(),
                }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GeocodeHit {
    lat: Coordinate,
    lon: Coordinate,
    #[serde(default)]
    name: Option<String>,
}

/// A resolved place and the overlay label to show for it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub point: GeoPoint,
    pub label: String,
}

/// Takes the first hit. An empty array is `Ok(None)`.
///
/// The label uses the hit's `name`, falling back to the query when the name
/// is missing or empty.
pub fn parse_geocode_response(
    body: &str,
    query: &str,
) -> Result<Option<GeocodeResult>, GeocodeError> {
    let hits: Vec<GeocodeHit> = serde_json::from_str(body)?;
    let Some(first) = hits.into_iter().next() else {
        return Ok(None);
    };

    let point = GeoPoint::new(first.lat.parse("lat")?, first.lon.parse("lon")?);
    let name = first
        .name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| query.to_string());

    Ok(Some(GeocodeResult {
        point,
        label: format!("STREET VIEW: {}", name.to_uppercase()),
    }))
}
