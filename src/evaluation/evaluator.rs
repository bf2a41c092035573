//! Route evaluator that computes timing, load, and feasibility.

use crate::constraints::{ConstraintModel, DEPOT};
use crate::models::{Violation, ViolationType};

/// Tolerance for floating-point limit comparisons.
pub const EPSILON: f64 = 1e-9;

/// Timing and running totals at one node of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visit {
    /// Node index (0 = depot).
    pub node: usize,
    /// Arrival, minutes since midnight.
    pub arrival: f64,
    /// Service start after any waiting.
    pub service_start: f64,
    /// Cumulative load after boarding.
    pub load_after: u32,
    /// Cumulative distance in meters on arrival.
    pub distance_after: f64,
}

/// A fully timed route, depot to depot.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTrace {
    /// Depot start, every pickup, depot end.
    pub visits: Vec<Visit>,
}

impl RouteTrace {
    /// Round-trip distance in meters.
    pub fn distance(&self) -> f64 {
        self.visits.last().map_or(0.0, |v| v.distance_after)
    }

    /// Passengers on board when returning to the depot.
    pub fn load(&self) -> u32 {
        self.visits.last().map_or(0, |v| v.load_after)
    }
}

/// Evaluates node sequences against the capacity, distance, and time
/// dimensions of a [`ConstraintModel`].
///
/// Vehicles leave the depot at minute 0 and wait at a pickup when they
/// arrive before its window opens. Arriving after the window closes is a
/// violation.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::evaluation::RouteEvaluator;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4600, -2.0500, 2, "09:00", "Church").unwrap(),
///     PickupPoint::new(2, 48.4400, -2.0300, 3, "09:30", "Harbour").unwrap(),
/// ];
/// let fleet = Fleet::new(1, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let evaluator = RouteEvaluator::new(&model);
/// let (trace, violations) = evaluator.trace(&[1, 2]);
/// assert!(violations.is_empty());
/// assert_eq!(trace.load(), 5);
/// assert_eq!(trace.visits[1].service_start, 540.0);
/// assert!(evaluator.is_feasible(&[1, 2]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteEvaluator<'m, 'a> {
    model: &'m ConstraintModel<'a>,
}

impl<'m, 'a> RouteEvaluator<'m, 'a> {
    /// Creates an evaluator over the given model.
    pub fn new(model: &'m ConstraintModel<'a>) -> Self {
        Self { model }
    }

    /// Times the route `nodes` (pickups only, depot implied at both ends)
    /// and collects every constraint violation.
    pub fn trace(&self, nodes: &[usize]) -> (RouteTrace, Vec<Violation>) {
        let model = self.model;
        let mut visits = Vec::with_capacity(nodes.len() + 2);
        let mut violations = Vec::new();
        visits.push(Visit {
            node: DEPOT,
            arrival: 0.0,
            service_start: 0.0,
            load_after: 0,
            distance_after: 0.0,
        });

        let mut time = 0.0;
        let mut load: u32 = 0;
        let mut distance = 0.0;
        let mut prev = DEPOT;

        for &node in nodes.iter().chain(std::iter::once(&DEPOT)) {
            distance += model.distance(prev, node);
            let arrival = time + model.travel_minutes(prev, node);
            let window = model.window(node);
            if arrival > window.due() + EPSILON {
                violations.push(Violation::new(ViolationType::TimeWindowViolated {
                    node,
                    arrival,
                    due: window.due(),
                }));
            }
            let service_start = arrival + window.waiting_time(arrival);
            load = load.saturating_add(model.demand(node));
            visits.push(Visit {
                node,
                arrival,
                service_start,
                load_after: load,
                distance_after: distance,
            });
            time = service_start + model.service_minutes(node);
            prev = node;
        }

        if load > model.vehicle_capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                load,
                capacity: model.vehicle_capacity(),
            }));
        }
        if distance > model.max_route_distance_m() + EPSILON {
            violations.push(Violation::new(ViolationType::MaxDistanceExceeded {
                distance,
                max_distance: model.max_route_distance_m(),
            }));
        }

        (RouteTrace { visits }, violations)
    }

    /// Returns `true` if the route satisfies every dimension.
    ///
    /// Stops at the first violated constraint.
    pub fn is_feasible(&self, nodes: &[usize]) -> bool {
        let model = self.model;
        let mut load: u64 = 0;
        for &node in nodes {
            load += u64::from(model.demand(node));
        }
        if load > u64::from(model.vehicle_capacity()) {
            return false;
        }

        let mut time = 0.0;
        let mut distance = 0.0;
        let mut prev = DEPOT;
        for &node in nodes.iter().chain(std::iter::once(&DEPOT)) {
            distance += model.distance(prev, node);
            if distance > model.max_route_distance_m() + EPSILON {
                return false;
            }
            let arrival = time + model.travel_minutes(prev, node);
            let window = model.window(node);
            if arrival > window.due() + EPSILON {
                return false;
            }
            time = arrival + window.waiting_time(arrival) + model.service_minutes(node);
            prev = node;
        }
        true
    }

    /// Round-trip distance of the route in meters.
    pub fn route_distance(&self, nodes: &[usize]) -> f64 {
        let mut prev = DEPOT;
        let mut distance = 0.0;
        for &node in nodes.iter().chain(std::iter::once(&DEPOT)) {
            distance += self.model.distance(prev, node);
            prev = node;
        }
        distance
    }

    /// Passengers boarding along the route.
    pub fn route_load(&self, nodes: &[usize]) -> u64 {
        nodes.iter().map(|&n| u64::from(self.model.demand(n))).sum()
    }

    /// Sum of route distances in meters.
    pub fn total_distance(&self, routes: &[Vec<usize>]) -> f64 {
        routes.iter().map(|r| self.route_distance(r)).sum()
    }

    /// Returns `true` if every route is feasible.
    pub fn all_feasible(&self, routes: &[Vec<usize>]) -> bool {
        routes.iter().all(|r| self.is_feasible(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ModelConfig;
    use crate::models::{Depot, Fleet, PickupPoint};

    fn fixture() -> (Depot, Vec<PickupPoint>) {
        let depot = Depot::new(48.4504, -2.0448).expect("valid");
        let points = vec![
            PickupPoint::new(1, 48.4604, -2.0448, 3, "08:00", "North").expect("valid"),
            PickupPoint::new(2, 48.4504, -2.0298, 3, "08:00", "East").expect("valid"),
            PickupPoint::new(3, 48.4404, -2.0448, 3, "08:00", "South").expect("valid"),
        ];
        (depot, points)
    }

    #[test]
    fn test_empty_route() {
        let (depot, points) = fixture();
        let fleet = Fleet::new(2, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let (trace, violations) = evaluator.trace(&[]);
        assert!(violations.is_empty());
        assert_eq!(trace.visits.len(), 2);
        assert_eq!(trace.distance(), 0.0);
        assert!(evaluator.is_feasible(&[]));
    }

    #[test]
    fn test_capacity_violation() {
        let (depot, points) = fixture();
        let fleet = Fleet::new(2, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let (trace, violations) = evaluator.trace(&[1, 2, 3]);
        assert_eq!(trace.load(), 9);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { load: 9, capacity: 8 }
        ));
        assert!(!evaluator.is_feasible(&[1, 2, 3]));
        assert!(evaluator.is_feasible(&[1, 2]));
    }

    #[test]
    fn test_distance_violation() {
        let (depot, points) = fixture();
        let fleet = Fleet::new(3, 8, 1.2).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        // a single out-and-back stays under 2.4 km
        assert!(evaluator.is_feasible(&[1]));
        let (_, violations) = evaluator.trace(&[1, 3]);
        assert!(violations
            .iter()
            .any(|v| matches!(v.kind, ViolationType::MaxDistanceExceeded { .. })));
        assert!(!evaluator.is_feasible(&[1, 3]));
    }

    #[test]
    fn test_time_window_violation() {
        let depot = Depot::new(48.4504, -2.0448).expect("valid");
        let points = vec![
            PickupPoint::new(1, 48.4604, -2.0448, 1, "08:00", "Early").expect("valid"),
            PickupPoint::new(2, 48.4504, -2.0298, 1, "09:00", "Late").expect("valid"),
        ];
        let fleet = Fleet::new(1, 8, 15.0).expect("valid");
        let config = ModelConfig::default()
            .with_window_width(30)
            .with_service_minutes(90.0);
        let model = ConstraintModel::build(&depot, &points, fleet, &config).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        // service at 1 lasts until 09:30, after the 08:00 window closes at 08:30
        assert!(!evaluator.is_feasible(&[2, 1]));
        assert!(!evaluator.is_feasible(&[1, 2]));
        assert!(evaluator.is_feasible(&[1]));
        let (trace, violations) = evaluator.trace(&[1, 2]);
        assert_eq!(trace.visits[1].service_start, 480.0);
        assert!(matches!(
            violations[0].kind,
            ViolationType::TimeWindowViolated { node: 2, .. }
        ));
    }

    #[test]
    fn test_route_distance_matches_trace() {
        let (depot, points) = fixture();
        let fleet = Fleet::new(2, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let (trace, _) = evaluator.trace(&[2, 1]);
        assert!((trace.distance() - evaluator.route_distance(&[2, 1])).abs() < 1e-9);
        assert_eq!(evaluator.route_load(&[2, 1]), 6);
        let total = evaluator.total_distance(&[vec![1], vec![2, 3]]);
        assert!(total > 0.0);
    }
}
