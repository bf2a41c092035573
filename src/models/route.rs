//! Route and stop types.

use serde::{Deserialize, Serialize};

/// Role of a stop within a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    /// Departure from the depot.
    DepotStart,
    /// A pickup point.
    Pickup,
    /// Return to the depot.
    DepotEnd,
}

/// A single stop within a route, with running totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Depot or pickup.
    pub kind: StopKind,
    /// Pickup point identity; `None` for depot stops.
    pub point_id: Option<u64>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Display name.
    pub name: String,
    /// Point-of-interest category of the pickup, if known.
    pub poi_type: Option<String>,
    /// Arrival time the pickup was scheduled against (`"HH:MM"`).
    pub arrival_time: Option<String>,
    /// Arrival time as the caller supplied it.
    #[serde(default)]
    pub requested_arrival_time: Option<String>,
    /// `true` when the requested time was unusable and replaced.
    #[serde(default)]
    pub arrival_repaired: bool,
    /// Estimated service start, minutes since midnight.
    pub service_minute: f64,
    /// Passengers boarding at this stop.
    pub passengers: u32,
    /// Cumulative load after this stop.
    pub load_after: u32,
    /// Cumulative distance in meters when reaching this stop.
    pub distance_m: f64,
}

/// An ordered sequence of stops driven by one vehicle.
///
/// A well-formed route starts with a [`StopKind::DepotStart`] stop and ends
/// with a [`StopKind::DepotEnd`] stop; an unused vehicle has just those two.
///
/// # Examples
///
/// ```
/// use pickup_routing::models::{Route, Stop, StopKind};
///
/// let depot = |kind| Stop {
///     kind,
///     point_id: None,
///     lat: 48.45,
///     lon: -2.04,
///     name: "Depot".into(),
///     poi_type: None,
///     arrival_time: None,
///     requested_arrival_time: None,
///     arrival_repaired: false,
///     service_minute: 0.0,
///     passengers: 0,
///     load_after: 0,
///     distance_m: 0.0,
/// };
/// let mut route = Route::new(0);
/// route.push_stop(depot(StopKind::DepotStart));
/// route.push_stop(depot(StopKind::DepotEnd));
/// assert!(route.is_empty());
/// assert!(route.is_depot_anchored());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<Stop>,
}

impl Route {
    /// Creates a route with no stops for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
        }
    }

    /// Appends a stop.
    pub fn push_stop(&mut self, stop: Stop) {
        self.stops.push(stop);
    }

    /// Vehicle (driver) driving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// All stops, depot stops included.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Pickup stops only, in visit order.
    pub fn pickups(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(|s| s.kind == StopKind::Pickup)
    }

    /// Number of pickup stops.
    pub fn len(&self) -> usize {
        self.pickups().count()
    }

    /// Returns `true` if the vehicle visits no pickup.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point ids in visit order.
    pub fn point_ids(&self) -> Vec<u64> {
        self.pickups().filter_map(|s| s.point_id).collect()
    }

    /// Returns `true` if the first and last stops are at the depot.
    pub fn is_depot_anchored(&self) -> bool {
        matches!(
            (self.stops.first(), self.stops.last()),
            (Some(first), Some(last))
                if first.kind == StopKind::DepotStart && last.kind == StopKind::DepotEnd
        )
    }

    /// Round-trip distance in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.stops.last().map_or(0.0, |s| s.distance_m)
    }

    /// Round-trip distance in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m() / 1000.0
    }

    /// Passengers picked up along the route.
    pub fn total_load(&self) -> u32 {
        self.stops.iter().map(|s| s.passengers).sum()
    }
}
