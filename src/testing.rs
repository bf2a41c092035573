//! Shared fixtures for unit tests.

use crate::models::{Depot, PickupPoint};

const DEPOT_LAT: f64 = 48.4504;
const DEPOT_LON: f64 = -2.0448;
const KM_PER_DEGREE: f64 = 111.195;

pub(crate) fn depot() -> Depot {
    Depot::new(DEPOT_LAT, DEPOT_LON).expect("valid")
}

/// A pickup `north_km` and `east_km` away from [`depot`], due at 09:00.
pub(crate) fn point_at(id: u64, north_km: f64, east_km: f64, passengers: u32) -> PickupPoint {
    point_due(id, north_km, east_km, passengers, "09:00")
}

/// Like [`point_at`] with an explicit arrival time.
pub(crate) fn point_due(
    id: u64,
    north_km: f64,
    east_km: f64,
    passengers: u32,
    arrival_time: &str,
) -> PickupPoint {
    let lat = DEPOT_LAT + north_km / KM_PER_DEGREE;
    let lon = DEPOT_LON + east_km / (KM_PER_DEGREE * DEPOT_LAT.to_radians().cos());
    PickupPoint::new(id, lat, lon, passengers, arrival_time, format!("P{id}")).expect("valid")
}
