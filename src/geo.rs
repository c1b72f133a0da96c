use core::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCoordinatesError {
    #[error("Expected two numbers: latitude and longitude.")]
    WrongShape,
    #[error("Not a number.")]
    NotANumber,
    #[error("Latitude must be within -90..90, longitude within -180..180.")]
    OutOfRange,
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[inline]
    pub fn new(
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ParseCoordinatesError> {
        if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
            return Err(ParseCoordinatesError::OutOfRange);
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses user input like `40.4168 -3.7038` or `40.4168,-3.7038`.
    ///
    /// Only dot-decimal numbers are accepted: a comma-decimal pair is
    /// indistinguishable from a locality query containing a comma.
    #[inline]
    pub fn parse_pair(input: &str) -> Result<Self, ParseCoordinatesError> {
        let numbers: Vec<&str> = input
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        let [latitude, longitude] = numbers.as_slice() else {
            return Err(ParseCoordinatesError::WrongShape);
        };

        let latitude: f64 = latitude
            .parse()
            .map_err(|_ignored| ParseCoordinatesError::NotANumber)?;
        let longitude: f64 = longitude
            .parse()
            .map_err(|_ignored| ParseCoordinatesError::NotANumber)?;

        Self::new(latitude, longitude)
    }

    /// Parses the feed's comma-decimal coordinate fields, e.g. `"40,4168"`.
    #[inline]
    #[must_use]
    pub fn parse_feed(latitude: &str, longitude: &str) -> Option<Self> {
        let latitude: f64 =
            latitude.trim().replace(',', ".").parse().ok()?;
        let longitude: f64 =
            longitude.trim().replace(',', ".").parse().ok()?;

        Self::new(latitude, longitude).ok()
    }

    /// Great-circle distance to `other` in kilometers.
    #[inline]
    #[must_use]
    pub fn haversine_distance_km(&self, other: &Self) -> f64 {
        let lat1_rad = to_radians(self.latitude);
        let lat2_rad = to_radians(other.latitude);
        let dlat = to_radians(other.latitude - self.latitude);
        let dlon = to_radians(other.longitude - self.longitude);

        let a = (dlat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}
