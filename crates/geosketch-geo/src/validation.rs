use geosketch_core::error::{GeosketchError, Result};
use geosketch_core::models::{Coordinate, MIN_POLYGON_POINTS};

/// Convert a GeoJSON `[lng, lat, ...]` position, checking arity and range
pub fn position_to_coordinate(position: &[f64]) -> Result<Coordinate> {
    match position {
        [lng, lat, ..] => Coordinate::from_position([*lng, *lat]),
        _ => Err(GeosketchError::InvalidGeometry {
            reason: format!("Position must have at least 2 values, found {}", position.len()),
        }),
    }
}

/// Ensure a decoded ring has enough points to form a polygon
pub fn check_min_vertices(found: usize) -> Result<()> {
    if found < MIN_POLYGON_POINTS {
        return Err(GeosketchError::InsufficientVertices { found, minimum: MIN_POLYGON_POINTS });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_axis_swap() {
        let c = position_to_coordinate(&[-2.5, 57.0]).unwrap();
        assert_eq!(c.lat(), 57.0);
        assert_eq!(c.lng(), -2.5);
    }

    #[test]
    fn test_position_with_altitude() {
        let c = position_to_coordinate(&[1.0, 2.0, 350.0]).unwrap();
        assert_eq!(c.to_position(), [1.0, 2.0]);
    }

    #[test]
    fn test_short_position_rejected() {
        assert!(matches!(
            position_to_coordinate(&[1.0]),
            Err(GeosketchError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        // latitude and longitude swapped by the author of the file
        assert!(matches!(
            position_to_coordinate(&[57.0, -200.0]),
            Err(GeosketchError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_min_vertices() {
        assert!(check_min_vertices(3).is_ok());
        assert!(matches!(
            check_min_vertices(2),
            Err(GeosketchError::InsufficientVertices { found: 2, minimum: 3 })
        ));
    }
}
