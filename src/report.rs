//! Serializable output contracts for map, table and API consumers.

use serde::Serialize;

use crate::distance::haversine_km;
use crate::error::{InfeasibleError, RoutingError, ValidationError};
use crate::fallback::DegradedResult;
use crate::models::{Depot, GeoPoint, Route, Solution, StopKind};
use crate::search::FirstSolutionStrategy;

/// Whether routes came from the optimizer or the fallback distributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Every constraint holds.
    Optimized,
    /// Constraint-naive fallback.
    Degraded,
}

/// A stop as drawn on a map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopReport {
    /// Position in the route, depot start is 0.
    pub stop_num: usize,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Display name.
    pub name: String,
    /// Passengers boarding; absent for depot stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passengers: Option<u32>,
    /// Scheduled arrival time; absent for depot stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

/// One vehicle's route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    /// Vehicle index, starting at 0.
    pub driver_id: usize,
    /// Depot, pickups, depot.
    pub stops: Vec<StopReport>,
    /// Round-trip distance.
    pub distance_km: f64,
    /// Passengers collected.
    pub passengers: u32,
}

impl From<&Route> for RouteReport {
    fn from(route: &Route) -> Self {
        let stops = route
            .stops()
            .iter()
            .enumerate()
            .map(|(stop_num, stop)| {
                let is_pickup = stop.kind == StopKind::Pickup;
                StopReport {
                    stop_num,
                    lat: stop.lat,
                    lon: stop.lon,
                    name: stop.name.clone(),
                    passengers: is_pickup.then_some(stop.passengers),
                    arrival_time: stop.arrival_time.clone(),
                }
            })
            .collect();
        Self {
            driver_id: route.vehicle_id(),
            stops,
            distance_km: route.total_distance_km(),
            passengers: route.total_load(),
        }
    }
}

/// Complete plan as returned to callers.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::Solution;
/// use pickup_routing::report::{PlanStatus, SolutionReport};
/// use pickup_routing::search::FirstSolutionStrategy;
///
/// let solution = Solution::new(0.0, FirstSolutionStrategy::Savings, Vec::new());
/// let report = SolutionReport::from(&solution);
/// assert_eq!(report.status, PlanStatus::Optimized);
/// assert_eq!(report.total_passengers, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionReport {
    /// Optimized or degraded.
    pub status: PlanStatus,
    /// Winning strategy; absent for degraded plans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<FirstSolutionStrategy>,
    /// One entry per vehicle.
    pub routes: Vec<RouteReport>,
    /// Sum of route distances.
    pub total_distance_km: f64,
    /// Sum of route loads.
    pub total_passengers: u32,
}

impl From<&Solution> for SolutionReport {
    fn from(solution: &Solution) -> Self {
        Self {
            status: PlanStatus::Optimized,
            strategy: Some(solution.strategy()),
            routes: solution.routes().iter().map(RouteReport::from).collect(),
            total_distance_km: solution.total_distance_km(),
            total_passengers: solution.total_passengers(),
        }
    }
}

impl From<&DegradedResult> for SolutionReport {
    fn from(degraded: &DegradedResult) -> Self {
        Self {
            status: PlanStatus::Degraded,
            strategy: None,
            routes: degraded.routes().iter().map(RouteReport::from).collect(),
            total_distance_km: degraded.total_distance_km(),
            total_passengers: degraded.total_passengers(),
        }
    }
}

/// One row of the flat stop table, pickups only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopRecord {
    /// Vehicle index, starting at 0.
    pub driver_id: usize,
    /// Pickup position within the route, starting at 1.
    pub stop_number: usize,
    /// Caller-assigned point identity.
    pub point_id: u64,
    /// Display name.
    pub name: String,
    /// Point-of-interest category, if known.
    pub poi_type: Option<String>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Passengers boarding.
    pub passengers: u32,
    /// Great-circle kilometers from the depot.
    pub distance_to_depot: f64,
    /// Arrival time the pickup was scheduled against, `"HH:MM"`.
    pub arrival_time: String,
    /// Arrival time as the caller supplied it.
    pub requested_arrival_time: String,
    /// `true` when `requested_arrival_time` was unusable and replaced.
    pub arrival_repaired: bool,
}

/// Flattens routes into one [`StopRecord`] per pickup.
pub fn stop_records(depot: &Depot, routes: &[Route]) -> Vec<StopRecord> {
    let mut records = Vec::new();
    for route in routes {
        for (i, stop) in route.pickups().enumerate() {
            let Some(point_id) = stop.point_id else {
                continue;
            };
            records.push(StopRecord {
                driver_id: route.vehicle_id(),
                stop_number: i + 1,
                point_id,
                name: stop.name.clone(),
                poi_type: stop.poi_type.clone(),
                lat: stop.lat,
                lon: stop.lon,
                passengers: stop.passengers,
                distance_to_depot: haversine_km(depot.location(), GeoPoint::new(stop.lat, stop.lon)),
                arrival_time: stop.arrival_time.clone().unwrap_or_default(),
                requested_arrival_time: stop.requested_arrival_time.clone().unwrap_or_default(),
                arrival_repaired: stop.arrival_repaired,
            });
        }
    }
    records
}

/// Error category in an [`ErrorReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Input rejected before search.
    ValidationError,
    /// Search exhausted every strategy.
    InfeasibleError,
}

/// Structured details attached to an [`ErrorReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorContext {
    /// Offending point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_id: Option<u64>,
    /// Requested passengers across all points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_passengers: Option<u64>,
    /// Seats across the fleet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fleet_capacity: Option<u64>,
    /// Strategies tried before giving up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategies: Option<Vec<FirstSolutionStrategy>>,
}

/// Serializable error object.
///
/// # Examples
///
/// ```
/// use pickup_routing::error::ValidationError;
/// use pickup_routing::report::{ErrorKind, ErrorReport};
///
/// let err = ValidationError::PointOutOfRange {
///     point_id: 12,
///     distance_km: 16.2,
///     max_distance_km: 15.0,
/// };
/// let report = ErrorReport::from(&err);
/// assert_eq!(report.kind, ErrorKind::ValidationError);
/// assert_eq!(report.context.point_id, Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// Error category.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Structured details.
    pub context: ErrorContext,
}

impl From<&ValidationError> for ErrorReport {
    fn from(err: &ValidationError) -> Self {
        let mut context = ErrorContext {
            point_id: err.point_id(),
            ..ErrorContext::default()
        };
        if let ValidationError::CapacityExceeded {
            total_passengers,
            fleet_capacity,
        } = err
        {
            context.total_passengers = Some(*total_passengers);
            context.fleet_capacity = Some(*fleet_capacity);
        }
        Self {
            kind: ErrorKind::ValidationError,
            message: err.to_string(),
            context,
        }
    }
}

impl From<&InfeasibleError> for ErrorReport {
    fn from(err: &InfeasibleError) -> Self {
        Self {
            kind: ErrorKind::InfeasibleError,
            message: err.to_string(),
            context: ErrorContext {
                strategies: Some(err.strategies.clone()),
                ..ErrorContext::default()
            },
        }
    }
}

impl From<&RoutingError> for ErrorReport {
    fn from(err: &RoutingError) -> Self {
        match err {
            RoutingError::Validation(e) => e.into(),
            RoutingError::Infeasible(e) => e.into(),
        }
    }
}
