//! Geographic coordinate value type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GeosketchError, Result};

/// An immutable (latitude, longitude) pair in WGS 84 degrees.
///
/// Construction validates the range, so every `Coordinate` in the system
/// satisfies `-90 <= lat <= 90` and `-180 <= lng <= 180`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeosketchError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the WGS 84 range
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Ok(Self { lat, lng })
        } else {
            Err(GeosketchError::CoordinateOutOfRange { lat, lng })
        }
    }

    /// Build from literals already known to be in range
    pub(crate) const fn unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Position in GeoJSON axis order (`[x = lng, y = lat]`)
    pub fn to_position(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Build from a GeoJSON `[lng, lat]` position
    pub fn from_position(position: [f64; 2]) -> Result<Self> {
        Self::new(position[1], position[0])
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.0001, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_position_axis_order() {
        let c = Coordinate::new(57.661273, -2.746539).unwrap();
        assert_eq!(c.to_position(), [-2.746539, 57.661273]);
        assert_eq!(Coordinate::from_position([-2.746539, 57.661273]).unwrap(), c);
    }

    #[test]
    fn test_display_six_decimals() {
        let c = Coordinate::new(10.0, 20.5).unwrap();
        assert_eq!(c.to_string(), "[10.000000, 20.500000]");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinate = serde_json::from_str(r#"{"lat": 1.5, "lng": 2.5}"#).unwrap();
        assert_eq!(ok.lat(), 1.5);

        let bad = serde_json::from_str::<Coordinate>(r#"{"lat": 91.0, "lng": 0.0}"#);
        assert!(bad.is_err());
    }
}
