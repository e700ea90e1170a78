//! Great-circle distance for geofence checks.

/// Mean Earth radius in meters, matching the constant used by the
/// mobile clients.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two (latitude, longitude)
/// points given in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    // Class center used across the attendance tests (Bangalore).
    const CENTER_LAT: f64 = 12.9716;
    const CENTER_LON: f64 = 77.5946;

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(haversine_distance(CENTER_LAT, CENTER_LON, CENTER_LAT, CENTER_LON), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let d1 = haversine_distance(12.9716, 77.5946, 13.0827, 80.2707);
        let d2 = haversine_distance(13.0827, 80.2707, 12.9716, 77.5946);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_point_150m_north_exceeds_100m_radius() {
        // 0.00135 degrees of latitude is ~150m on a 6371km sphere.
        let d = haversine_distance(CENTER_LAT + 0.00135, CENTER_LON, CENTER_LAT, CENTER_LON);
        assert!((d - 150.1).abs() < 0.5, "expected ~150m, got {d}");
        assert!(d > 100.0);
    }

    #[test]
    fn test_point_50m_north_is_inside_100m_radius() {
        let d = haversine_distance(CENTER_LAT + 0.00045, CENTER_LON, CENTER_LAT, CENTER_LON);
        assert!((d - 50.0).abs() < 0.5, "expected ~50m, got {d}");
        assert!(d < 100.0);
    }

    #[test]
    fn test_known_city_pair() {
        // Bangalore to Chennai, ~290km.
        let d = haversine_distance(12.9716, 77.5946, 13.0827, 80.2707);
        assert!((d - 290_000.0).abs() < 10_000.0, "got {d}");
    }
}
