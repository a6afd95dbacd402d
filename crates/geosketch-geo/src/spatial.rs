//! Spatial helpers built on the `geo` crate.

use geo::{BoundingRect, Coord, MultiPoint, Point};
use serde::{Deserialize, Serialize};

use geosketch_core::models::Coordinate;

/// Axis-aligned bounding box in map coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

fn to_multi_point(points: &[Coordinate]) -> MultiPoint<f64> {
    points.iter().map(|p| Point::new(p.lng(), p.lat())).collect()
}

fn to_coordinate(coord: Coord<f64>) -> Option<Coordinate> {
    Coordinate::new(coord.y, coord.x).ok()
}

/// Bounding box of a set of points, `None` when empty
pub fn bounds(points: &[Coordinate]) -> Option<Bounds> {
    let rect = to_multi_point(points).bounding_rect()?;
    Some(Bounds {
        south_west: to_coordinate(rect.min())?,
        north_east: to_coordinate(rect.max())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_bounds() {
        let b = bounds(&[c(10.0, 20.0), c(12.0, 19.0), c(11.0, 21.5)]).unwrap();
        assert_eq!(b.south_west, c(10.0, 19.0));
        assert_eq!(b.north_east, c(12.0, 21.5));
    }

    #[test]
    fn test_single_point_bounds() {
        let b = bounds(&[c(1.0, 2.0)]).unwrap();
        assert_eq!(b.south_west, b.north_east);
    }

    #[test]
    fn test_empty() {
        assert!(bounds(&[]).is_none());
    }
}
