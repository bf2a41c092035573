//! Sweep construction.
//!
//! # Algorithm
//!
//! Sorts pickups by polar angle around the depot, using an equirectangular
//! projection so east-west offsets shrink with latitude. Vehicles are then
//! filled in angle order: each pickup is inserted at its cheapest feasible
//! position in the current route, and the next vehicle opens when it does
//! not fit. Nearby pickups share similar angles and end up together.
//!
//! # Complexity
//!
//! O(n log n) for sorting plus O(n × L²) for insertions.
//!
//! # Reference
//!
//! Gillett, B.E. & Miller, L.R. (1974). "A Heuristic Algorithm for the
//! Vehicle-Dispatch Problem", *Operations Research* 22(2), 340-349.

use super::cheapest_insertion::best_insertion;
use crate::constraints::ConstraintModel;
use crate::evaluation::RouteEvaluator;
use crate::search::Assignment;

/// Polar angle of `node` around the depot, in radians.
pub(crate) fn polar_angle(model: &ConstraintModel<'_>, node: usize) -> f64 {
    let depot = model.depot().location();
    let p = model.location(node);
    let dlat = p.lat - depot.lat;
    let dlon = (p.lon - depot.lon) * depot.lat.to_radians().cos();
    dlat.atan2(dlon)
}

/// Builds an assignment with the sweep heuristic.
///
/// Returns `None` if pickups remain once every vehicle is full.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::constructive::sweep;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4604, -2.0348, 4, "09:00", "NE").unwrap(),
///     PickupPoint::new(2, 48.4404, -2.0548, 4, "09:00", "SW").unwrap(),
///     PickupPoint::new(3, 48.4614, -2.0338, 4, "09:00", "NE2").unwrap(),
/// ];
/// let fleet = Fleet::new(2, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let assignment = sweep(&model).unwrap();
/// assert!(assignment.is_feasible(&model));
/// ```
pub fn sweep(model: &ConstraintModel<'_>) -> Option<Assignment> {
    let evaluator = RouteEvaluator::new(model);
    let mut order: Vec<(usize, f64)> = (1..model.num_nodes())
        .map(|node| (node, polar_angle(model, node)))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut assignment = Assignment::empty(model.num_vehicles());
    let mut vehicle = 0;

    for (node, _) in order {
        loop {
            let route = assignment.routes_mut().get_mut(vehicle)?;
            if let Some((pos, _)) = best_insertion(route, node, model, &evaluator) {
                route.insert(pos, node);
                break;
            }
            if route.is_empty() {
                // cannot be served even alone
                return None;
            }
            vehicle += 1;
        }
    }

    Some(assignment)
}
