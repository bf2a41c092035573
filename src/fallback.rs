//! Constraint-naive distribution used when no feasible routing exists.
//!
//! Pickups are split in input order into exactly one contiguous chunk per
//! vehicle. Capacity, distance and time windows are ignored; the violations
//! this causes are recorded on the result so callers can surface them.

use std::ops::Range;

use log::warn;

use crate::constraints::ConstraintModel;
use crate::evaluation::RouteEvaluator;
use crate::extract::extract_route;
use crate::models::{Route, Violation};

/// Splits `len` items into exactly `parts` contiguous ranges.
///
/// The first `len % parts` ranges hold one extra item. Returns no ranges
/// when `parts` is zero.
///
/// # Examples
///
/// ```
/// use pickup_routing::fallback::partition;
///
/// assert_eq!(partition(7, 3), vec![0..3, 3..5, 5..7]);
/// assert_eq!(partition(2, 3), vec![0..1, 1..2, 2..2]);
/// ```
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    if parts == 0 {
        return Vec::new();
    }
    let base = len / parts;
    let extra = len % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Routes produced without constraint checking.
///
/// Unlike a [`Solution`](crate::models::Solution) it carries the violations
/// it contains and reports with status `"degraded"`.
#[derive(Debug, Clone, PartialEq)]
pub struct DegradedResult {
    routes: Vec<Route>,
    violations: Vec<(usize, Violation)>,
}

impl DegradedResult {
    /// Status label used in reports.
    pub const STATUS: &'static str = "degraded";

    /// One route per vehicle, pickups in input order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Constraint violations as `(vehicle, violation)` pairs.
    pub fn violations(&self) -> &[(usize, Violation)] {
        &self.violations
    }

    /// Total distance across all routes, in kilometers.
    pub fn total_distance_km(&self) -> f64 {
        self.routes.iter().map(Route::total_distance_km).sum()
    }

    /// Passengers picked up across all routes.
    pub fn total_passengers(&self) -> u32 {
        self.routes.iter().map(Route::total_load).sum()
    }

    /// Every point id, route by route.
    pub fn point_ids(&self) -> Vec<u64> {
        self.routes.iter().flat_map(Route::point_ids).collect()
    }
}

/// Distributes every pickup across exactly `num_vehicles` routes.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::fallback::distribute;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points: Vec<_> = (1..=5)
///     .map(|i| PickupPoint::new(i, 48.45 + 0.001 * i as f64, -2.04, 1, "09:00", "P").unwrap())
///     .collect();
/// let fleet = Fleet::new(2, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let degraded = distribute(&model);
/// assert_eq!(degraded.routes()[0].point_ids(), vec![1, 2, 3]);
/// assert_eq!(degraded.routes()[1].point_ids(), vec![4, 5]);
/// ```
pub fn distribute(model: &ConstraintModel<'_>) -> DegradedResult {
    let evaluator = RouteEvaluator::new(model);
    let mut routes = Vec::with_capacity(model.num_vehicles());
    let mut violations = Vec::new();

    for (vehicle, range) in partition(model.num_points(), model.num_vehicles())
        .into_iter()
        .enumerate()
    {
        // node i + 1 is point i
        let nodes: Vec<usize> = range.map(|i| i + 1).collect();
        let (_, found) = evaluator.trace(&nodes);
        violations.extend(found.into_iter().map(|v| (vehicle, v)));
        routes.push(extract_route(model, vehicle, &nodes));
    }

    warn!(
        "degraded distribution of {} points over {} vehicles with {} violations",
        model.num_points(),
        model.num_vehicles(),
        violations.len()
    );
    DegradedResult { routes, violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ModelConfig;
    use crate::models::{Fleet, ViolationType};
    use crate::testing::{depot, point_at};
    use rstest::rstest;

    #[rstest]
    #[case(0, 3, vec![0, 0, 0])]
    #[case(3, 3, vec![1, 1, 1])]
    #[case(10, 3, vec![4, 3, 3])]
    #[case(11, 3, vec![4, 4, 3])]
    #[case(1, 5, vec![1, 0, 0, 0, 0])]
    fn test_partition_sizes(#[case] len: usize, #[case] parts: usize, #[case] sizes: Vec<usize>) {
        let ranges = partition(len, parts);
        assert_eq!(ranges.len(), parts);
        let got: Vec<usize> = ranges.iter().map(|r| r.len()).collect();
        assert_eq!(got, sizes);
        assert_eq!(ranges.last().map(|r| r.end), Some(len));
    }

    #[test]
    fn test_partition_zero_parts() {
        assert!(partition(4, 0).is_empty());
    }

    #[test]
    fn test_distribute_records_violations() {
        let depot = depot();
        let points = vec![point_at(1, 1.0, 0.0, 5), point_at(2, -1.0, 0.0, 3)];
        let fleet = Fleet::new(2, 4, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let degraded = distribute(&model);
        assert_eq!(degraded.routes().len(), 2);
        assert_eq!(degraded.point_ids(), vec![1, 2]);
        assert_eq!(degraded.total_passengers(), 8);
        assert_eq!(degraded.violations().len(), 1);
        assert!(matches!(
            degraded.violations()[0],
            (0, Violation { kind: ViolationType::CapacityExceeded { load: 5, capacity: 4 } })
        ));
    }

    #[test]
    fn test_distribute_more_vehicles_than_points() {
        let depot = depot();
        let points = vec![point_at(1, 1.0, 0.0, 1)];
        let fleet = Fleet::new(3, 4, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let degraded = distribute(&model);
        assert_eq!(degraded.routes().len(), 3);
        assert!(degraded.routes()[1].is_empty());
        assert!(degraded.routes().iter().all(Route::is_depot_anchored));
    }
}
