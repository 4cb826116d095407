use geo::{GeodesicDistance, Point};
use crate::models::Coordinates;

/// Calculate the geodesic distance between two points in kilometers
///
/// Uses Karney's algorithm on the WGS84 ellipsoid, so curvature and
/// flattening are accounted for even at the program's 100 km radius.
///
/// # Arguments
/// * `from` - First point
/// * `to` - Second point
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn geodesic_distance_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let a = Point::new(from.longitude, from.latitude);
    let b = Point::new(to.longitude, to.latitude);

    a.geodesic_distance(&b) / 1000.0
}

/// Round a value to two decimal places for display
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lat: f64, lon: f64) -> Coordinates {
        Coordinates { longitude: lon, latitude: lat }
    }

    #[test]
    fn test_geodesic_distance() {
        // London to Paris (approximately 344 km)
        let london = coords(51.5074, -0.1278);
        let paris = coords(48.8566, 2.3522);

        let distance = geodesic_distance_km(&london, &paris);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = coords(-22.413, -42.965);
        assert!(geodesic_distance_km(&p, &p) < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let school = coords(-22.413, -42.965);
        let farmer = coords(-22.410, -42.970);

        let ab = geodesic_distance_km(&school, &farmer);
        let ba = geodesic_distance_km(&farmer, &school);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_teresopolis_pair() {
        let school = coords(-22.413, -42.965);
        let farmer = coords(-22.410, -42.970);

        let distance = geodesic_distance_km(&school, &farmer);
        assert!(distance > 0.55 && distance < 0.7, "Expected ~0.61km, got {}", distance);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.6149), 0.61);
        assert_eq!(round2(540.0), 540.0);
        assert_eq!(round2(12.345678), 12.35);
    }
}
