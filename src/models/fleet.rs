//! Homogeneous fleet parameters.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Bounds used by [`Fleet::clamped`] for caller-supplied values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetLimits {
    /// Fewest vehicles a request may ask for.
    pub min_vehicles: u32,
    /// Most vehicles a request may ask for.
    pub max_vehicles: u32,
    /// Smallest per-vehicle seat count.
    pub min_capacity: u32,
    /// Largest per-vehicle seat count.
    pub max_capacity: u32,
    /// Smallest one-way radius in kilometers.
    pub min_distance_km: f64,
    /// Largest one-way radius in kilometers.
    pub max_distance_km: f64,
}

impl Default for FleetLimits {
    fn default() -> Self {
        Self {
            min_vehicles: 1,
            max_vehicles: 5,
            min_capacity: 4,
            max_capacity: 12,
            min_distance_km: 5.0,
            max_distance_km: 20.0,
        }
    }
}

impl FleetLimits {
    /// Returns `true` if every lower bound is at most its upper bound.
    pub fn is_consistent(&self) -> bool {
        self.min_vehicles <= self.max_vehicles
            && self.min_capacity <= self.max_capacity
            && self.min_distance_km.is_finite()
            && self.max_distance_km.is_finite()
            && self.min_distance_km <= self.max_distance_km
    }
}

/// A homogeneous fleet of vehicles based at the depot.
///
/// `max_distance_km` is the one-way radius; a route may cover at most twice
/// that distance.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::{Fleet, FleetLimits};
///
/// let fleet = Fleet::new(3, 8, 15.0).unwrap();
/// assert_eq!(fleet.total_capacity(), 24);
///
/// let clamped = Fleet::clamped(9, 2, 50.0, &FleetLimits::default()).unwrap();
/// assert_eq!(clamped.num_vehicles(), 5);
/// assert_eq!(clamped.capacity_per_vehicle(), 4);
/// assert_eq!(clamped.max_distance_km(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FleetRecord")]
pub struct Fleet {
    num_vehicles: u32,
    capacity_per_vehicle: u32,
    max_distance_km: f64,
}

impl Fleet {
    /// Creates a fleet, rejecting zero counts and non-positive distances.
    pub fn new(
        num_vehicles: u32,
        capacity_per_vehicle: u32,
        max_distance_km: f64,
    ) -> Result<Self, ValidationError> {
        if num_vehicles == 0 {
            return Err(ValidationError::InvalidFleet {
                reason: "at least one vehicle is required".to_owned(),
            });
        }
        if capacity_per_vehicle == 0 {
            return Err(ValidationError::InvalidFleet {
                reason: "vehicle capacity must be positive".to_owned(),
            });
        }
        if !max_distance_km.is_finite() || max_distance_km <= 0.0 {
            return Err(ValidationError::InvalidFleet {
                reason: format!("max distance {max_distance_km} km must be positive and finite"),
            });
        }
        Ok(Self {
            num_vehicles,
            capacity_per_vehicle,
            max_distance_km,
        })
    }

    /// Clamps each value into `limits` before constructing the fleet.
    pub fn clamped(
        num_vehicles: u32,
        capacity_per_vehicle: u32,
        max_distance_km: f64,
        limits: &FleetLimits,
    ) -> Result<Self, ValidationError> {
        if !limits.is_consistent() {
            return Err(ValidationError::InvalidConfig {
                reason: format!("fleet limits are inverted or non-finite: {limits:?}"),
            });
        }
        Self::new(
            num_vehicles.clamp(limits.min_vehicles, limits.max_vehicles),
            capacity_per_vehicle.clamp(limits.min_capacity, limits.max_capacity),
            max_distance_km.clamp(limits.min_distance_km, limits.max_distance_km),
        )
    }

    /// Number of vehicles (one route each).
    pub fn num_vehicles(&self) -> u32 {
        self.num_vehicles
    }

    /// Seats per vehicle, before any slack.
    pub fn capacity_per_vehicle(&self) -> u32 {
        self.capacity_per_vehicle
    }

    /// One-way radius in kilometers.
    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Combined seats across the fleet.
    pub fn total_capacity(&self) -> u64 {
        u64::from(self.num_vehicles) * u64::from(self.capacity_per_vehicle)
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self {
            num_vehicles: 3,
            capacity_per_vehicle: 8,
            max_distance_km: 15.0,
        }
    }
}

#[derive(Deserialize)]
struct FleetRecord {
    #[serde(alias = "num_drivers")]
    num_vehicles: u32,
    #[serde(alias = "capacity_per_driver")]
    capacity_per_vehicle: u32,
    max_distance_km: f64,
}

impl TryFrom<FleetRecord> for Fleet {
    type Error = ValidationError;

    fn try_from(record: FleetRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.num_vehicles,
            record.capacity_per_vehicle,
            record.max_distance_km,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_fleet_new() {
        let fleet = Fleet::new(3, 8, 15.0).expect("valid");
        assert_eq!(fleet.num_vehicles(), 3);
        assert_eq!(fleet.capacity_per_vehicle(), 8);
        assert_eq!(fleet.max_distance_km(), 15.0);
        assert_eq!(fleet.total_capacity(), 24);
    }

    #[rstest]
    #[case(0, 8, 15.0)]
    #[case(3, 0, 15.0)]
    #[case(3, 8, 0.0)]
    #[case(3, 8, f64::NAN)]
    fn test_fleet_rejects(#[case] vehicles: u32, #[case] capacity: u32, #[case] km: f64) {
        assert!(matches!(
            Fleet::new(vehicles, capacity, km),
            Err(ValidationError::InvalidFleet { .. })
        ));
    }

    #[test]
    fn test_fleet_clamped_lower_bounds() {
        let fleet = Fleet::clamped(0, 1, 1.0, &FleetLimits::default()).expect("clamped");
        assert_eq!(fleet.num_vehicles(), 1);
        assert_eq!(fleet.capacity_per_vehicle(), 4);
        assert_eq!(fleet.max_distance_km(), 5.0);
    }

    #[test]
    fn test_fleet_deserialize_driver_aliases() {
        let json = r#"{"num_drivers": 2, "capacity_per_driver": 6, "max_distance_km": 10}"#;
        let fleet: Fleet = serde_json::from_str(json).expect("valid");
        assert_eq!(fleet.num_vehicles(), 2);
        assert_eq!(fleet.capacity_per_vehicle(), 6);

        let json = r#"{"num_drivers": 0, "capacity_per_driver": 6, "max_distance_km": 10}"#;
        assert!(serde_json::from_str::<Fleet>(json).is_err());
    }
}
