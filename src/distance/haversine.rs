//! Great-circle distance on a spherical Earth.

use crate::models::GeoPoint;

/// Mean Earth radius used by every distance in the crate.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers.
///
/// The `asin` argument is clamped to `[0, 1]`, so rounding noise near
/// antipodal points never produces `NaN`; identical coordinates give exactly
/// zero.
///
/// # Examples
///
/// ```
/// use pickup_routing::distance::haversine_km;
/// use pickup_routing::models::GeoPoint;
///
/// let a = GeoPoint::new(48.4504, -2.0448);
/// assert_eq!(haversine_km(a, a), 0.0);
///
/// let b = GeoPoint::new(0.0, 0.0);
/// let c = GeoPoint::new(0.0, 180.0);
/// let half_circumference = std::f64::consts::PI * 6371.0;
/// assert!((haversine_km(b, c) - half_circumference).abs() < 1e-6);
/// ```
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().clamp(0.0, 1.0).asin()
}

/// Great-circle distance between two coordinates in meters.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_km(a, b) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coincident_is_zero() {
        let p = GeoPoint::new(-33.8688, 151.2093);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((haversine_km(a, b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(48.4504, -2.0448);
        let b = GeoPoint::new(48.5136, -2.7603);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_antipodal_is_finite() {
        let a = GeoPoint::new(45.0, 10.0);
        let b = GeoPoint::new(-45.0, -170.0);
        let d = haversine_km(a, b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-2);
    }

    #[test]
    fn test_meters() {
        let a = GeoPoint::new(48.45, -2.04);
        let b = GeoPoint::new(48.46, -2.05);
        assert!((haversine_m(a, b) - haversine_km(a, b) * 1000.0).abs() < 1e-9);
    }
}
