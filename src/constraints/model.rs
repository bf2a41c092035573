//! Validated routing model built from caller input.

use log::{debug, warn};

use super::clock::{format_clock, parse_clock, MINUTES_PER_DAY};
use super::config::{ArrivalTimePolicy, ModelConfig};
use crate::distance::{haversine_km, DistanceMatrix};
use crate::error::ValidationError;
use crate::models::{Depot, Fleet, GeoPoint, PickupPoint, TimeWindow};

/// Node index of the depot in every per-node vector.
pub const DEPOT: usize = 0;

/// Window start the model actually schedules a pickup against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveArrival {
    /// Minutes since midnight.
    pub minute: u32,
    /// `true` when the requested time was unusable and the default start
    /// replaced it.
    pub repaired: bool,
}

impl EffectiveArrival {
    /// The minute as `"HH:MM"`.
    pub fn clock(&self) -> String {
        format_clock(self.minute)
    }
}

/// Everything the search needs to know about one solve call.
///
/// Node 0 is the depot and node `i` is `points[i - 1]`. Built once per call
/// by [`ConstraintModel::build`] and never mutated afterwards, so it can be
/// shared read-only between concurrently running strategies.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4600, -2.0500, 2, "09:00", "Church").unwrap(),
///     PickupPoint::new(2, 48.4400, -2.0300, 3, "10:30", "Harbour").unwrap(),
/// ];
/// let fleet = Fleet::new(2, 8, 15.0).unwrap();
///
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
/// assert_eq!(model.num_nodes(), 3);
/// assert_eq!(model.demand(2), 3);
/// assert_eq!(model.window(1).ready(), 540.0);
/// assert_eq!(model.window(1).due(), 660.0);
/// assert_eq!(model.max_route_distance_m(), 30_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintModel<'a> {
    depot: &'a Depot,
    points: &'a [PickupPoint],
    fleet: Fleet,
    distances: DistanceMatrix,
    demands: Vec<u32>,
    windows: Vec<TimeWindow>,
    arrivals: Vec<EffectiveArrival>,
    depot_distances_km: Vec<f64>,
    vehicle_capacity: u32,
    max_route_distance_m: f64,
    meters_per_minute: f64,
    service_minutes: f64,
}

impl<'a> ConstraintModel<'a> {
    /// Validates the input and assembles the model.
    ///
    /// Checks run in a fixed order and stop at the first failure: model
    /// configuration, fleet, per-point radius, aggregate demand, then arrival
    /// times. The distance matrix is only computed once every check passed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn build(
        depot: &'a Depot,
        points: &'a [PickupPoint],
        fleet: Fleet,
        config: &ModelConfig,
    ) -> Result<Self, ValidationError> {
        config.validate()?;

        let depot_distances_km = check_radius(depot, points, fleet.max_distance_km())?;
        check_total_demand(points, &fleet)?;
        let (windows, arrivals) = build_windows(points, config)?;

        let mut locations = Vec::with_capacity(points.len() + 1);
        locations.push(depot.location());
        locations.extend(points.iter().map(PickupPoint::location));
        let distances = DistanceMatrix::from_locations(&locations);

        let mut demands = Vec::with_capacity(points.len() + 1);
        demands.push(0);
        demands.extend(points.iter().map(PickupPoint::passengers));

        let vehicle_capacity = config.effective_capacity(fleet.capacity_per_vehicle());
        let max_route_distance_m = fleet.max_distance_km() * 2.0 * 1000.0;
        let meters_per_minute = config.average_speed_kmh * 1000.0 / 60.0;

        debug!(
            "built model: {} points, {} vehicles x {} seats (effective {}), route limit {:.0} m",
            points.len(),
            fleet.num_vehicles(),
            fleet.capacity_per_vehicle(),
            vehicle_capacity,
            max_route_distance_m
        );

        Ok(Self {
            depot,
            points,
            fleet,
            distances,
            demands,
            windows,
            arrivals,
            depot_distances_km,
            vehicle_capacity,
            max_route_distance_m,
            meters_per_minute,
            service_minutes: config.service_minutes,
        })
    }

    /// The depot (node 0).
    pub fn depot(&self) -> &'a Depot {
        self.depot
    }

    /// Pickup points in input order (nodes `1..=n`).
    pub fn points(&self) -> &'a [PickupPoint] {
        self.points
    }

    /// The pickup point at `node`, or `None` for the depot.
    pub fn point(&self, node: usize) -> Option<&'a PickupPoint> {
        node.checked_sub(1).and_then(|i| self.points.get(i))
    }

    /// Coordinates of `node`.
    pub fn location(&self, node: usize) -> GeoPoint {
        self.point(node)
            .map_or_else(|| self.depot.location(), PickupPoint::location)
    }

    /// Validated fleet.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Number of vehicles, i.e. the number of routes.
    pub fn num_vehicles(&self) -> usize {
        self.fleet.num_vehicles() as usize
    }

    /// Number of pickup points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.points.len() + 1
    }

    /// Great-circle distance matrix in meters.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance in meters from `from` to `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Passengers boarding at `node` (0 at the depot).
    pub fn demand(&self, node: usize) -> u32 {
        self.demands[node]
    }

    /// Demand per node.
    pub fn demands(&self) -> &[u32] {
        &self.demands
    }

    /// Service window of `node`, in minutes since midnight.
    pub fn window(&self, node: usize) -> TimeWindow {
        self.windows[node]
    }

    /// Window per node.
    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    /// Arrival time scheduled for the pickup at `node`; `None` for the depot.
    pub fn effective_arrival(&self, node: usize) -> Option<EffectiveArrival> {
        node.checked_sub(1)
            .and_then(|i| self.arrivals.get(i))
            .copied()
    }

    /// Kilometers from the depot to `node`.
    pub fn depot_distance_km(&self, node: usize) -> f64 {
        node.checked_sub(1)
            .and_then(|i| self.depot_distances_km.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Per-vehicle capacity after the slack factor.
    pub fn vehicle_capacity(&self) -> u32 {
        self.vehicle_capacity
    }

    /// Maximum round-trip distance of a route, in meters.
    pub fn max_route_distance_m(&self) -> f64 {
        self.max_route_distance_m
    }

    /// Driving time in minutes from `from` to `to`.
    pub fn travel_minutes(&self, from: usize, to: usize) -> f64 {
        self.distance(from, to) / self.meters_per_minute
    }

    /// Dwell time at `node` (zero at the depot).
    pub fn service_minutes(&self, node: usize) -> f64 {
        if node == DEPOT {
            0.0
        } else {
            self.service_minutes
        }
    }

    /// Sum of all demands.
    pub fn total_demand(&self) -> u64 {
        self.demands.iter().map(|&d| u64::from(d)).sum()
    }
}

fn check_radius(
    depot: &Depot,
    points: &[PickupPoint],
    max_distance_km: f64,
) -> Result<Vec<f64>, ValidationError> {
    points
        .iter()
        .map(|p| {
            let distance_km = haversine_km(depot.location(), p.location());
            if distance_km > max_distance_km {
                Err(ValidationError::PointOutOfRange {
                    point_id: p.id(),
                    distance_km,
                    max_distance_km,
                })
            } else {
                Ok(distance_km)
            }
        })
        .collect()
}

fn check_total_demand(points: &[PickupPoint], fleet: &Fleet) -> Result<(), ValidationError> {
    let total_passengers: u64 = points.iter().map(|p| u64::from(p.passengers())).sum();
    let fleet_capacity = fleet.total_capacity();
    if total_passengers > fleet_capacity {
        return Err(ValidationError::CapacityExceeded {
            total_passengers,
            fleet_capacity,
        });
    }
    Ok(())
}

fn build_windows(
    points: &[PickupPoint],
    config: &ModelConfig,
) -> Result<(Vec<TimeWindow>, Vec<EffectiveArrival>), ValidationError> {
    let depot_window = TimeWindow::new(0.0, f64::from(MINUTES_PER_DAY)).ok_or_else(|| {
        ValidationError::InvalidConfig {
            reason: "depot window is empty".to_owned(),
        }
    })?;

    let mut windows = Vec::with_capacity(points.len() + 1);
    let mut arrivals = Vec::with_capacity(points.len());
    windows.push(depot_window);
    for point in points {
        let arrival = window_start(point, config)?;
        let start = arrival.minute;
        let end = (start + config.window_width_minutes).min(config.operating_end_minute);
        let window = TimeWindow::new(f64::from(start), f64::from(end)).ok_or_else(|| {
            ValidationError::InvalidArrivalTime {
                point_id: point.id(),
                value: point.arrival_time().to_owned(),
            }
        })?;
        windows.push(window);
        arrivals.push(arrival);
    }
    Ok((windows, arrivals))
}

fn window_start(
    point: &PickupPoint,
    config: &ModelConfig,
) -> Result<EffectiveArrival, ValidationError> {
    let operating = config.operating_start_minute..=config.operating_end_minute;
    match parse_clock(point.arrival_time()) {
        Some(minute) if operating.contains(&minute) => Ok(EffectiveArrival {
            minute,
            repaired: false,
        }),
        _ => match config.arrival_time_policy {
            ArrivalTimePolicy::Reject => Err(ValidationError::InvalidArrivalTime {
                point_id: point.id(),
                value: point.arrival_time().to_owned(),
            }),
            ArrivalTimePolicy::Repair => {
                warn!(
                    "point {}: arrival time {:?} unusable, using {}",
                    point.id(),
                    point.arrival_time(),
                    format_clock(config.default_window_start_minute)
                );
                Ok(EffectiveArrival {
                    minute: config.default_window_start_minute,
                    repaired: true,
                })
            }
        },
    }
}
