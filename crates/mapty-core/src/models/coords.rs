//! Geographic coordinates in WGS 84 degrees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MaptyError, Result};

/// A (latitude, longitude) pair.
///
/// Serialized as a two-element array `[lat, lng]`, matching the order used by
/// web map widgets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and inside the valid ranges
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(MaptyError::validation(
                "latitude",
                format!("{} is outside [-90, 90]", self.lat),
            ));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(MaptyError::validation(
                "longitude",
                format!("{} is outside [-180, 180]", self.lng),
            ));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"` (whitespace around either part is ignored).
impl FromStr for Coords {
    type Err = MaptyError;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            MaptyError::validation("coordinates", format!("expected 'lat,lng', got '{}'", s))
        })?;

        let lat = lat.trim().parse::<f64>().map_err(|_| {
            MaptyError::validation("latitude", format!("'{}' is not a number", lat.trim()))
        })?;
        let lng = lng.trim().parse::<f64>().map_err(|_| {
            MaptyError::validation("longitude", format!("'{}' is not a number", lng.trim()))
        })?;

        let coords = Coords::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }
}
