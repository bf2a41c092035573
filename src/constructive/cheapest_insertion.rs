//! Global cheapest insertion construction.
//!
//! # Algorithm
//!
//! Starts from one empty route per vehicle. At every step, evaluates each
//! unrouted pickup at each position of each route and commits the feasible
//! insertion with the smallest distance increase. Stops when every pickup is
//! routed or no feasible insertion is left.
//!
//! # Complexity
//!
//! O(n³ × L) where L is the route length checked per candidate.

use crate::constraints::ConstraintModel;
use crate::evaluation::RouteEvaluator;
use crate::local_search::insertion_delta;
use crate::search::Assignment;

/// Cheapest feasible position for `node` in `route`, as `(position, delta)`.
pub(crate) fn best_insertion(
    route: &[usize],
    node: usize,
    model: &ConstraintModel<'_>,
    evaluator: &RouteEvaluator<'_, '_>,
) -> Option<(usize, f64)> {
    if evaluator.route_load(route) + u64::from(model.demand(node))
        > u64::from(model.vehicle_capacity())
    {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    let mut candidate = Vec::with_capacity(route.len() + 1);
    for pos in 0..=route.len() {
        let delta = insertion_delta(route, pos, node, model.distances());
        if best.is_some_and(|(_, d)| delta >= d) {
            continue;
        }
        candidate.clear();
        candidate.extend_from_slice(&route[..pos]);
        candidate.push(node);
        candidate.extend_from_slice(&route[pos..]);
        if evaluator.is_feasible(&candidate) {
            best = Some((pos, delta));
        }
    }
    best
}

/// Builds an assignment by repeated global cheapest insertion.
///
/// Returns `None` if some pickup has no feasible insertion anywhere.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::constructive::cheapest_insertion;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4604, -2.0448, 2, "09:00", "North").unwrap(),
///     PickupPoint::new(2, 48.4404, -2.0448, 2, "09:00", "South").unwrap(),
/// ];
/// let fleet = Fleet::new(2, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let assignment = cheapest_insertion(&model).unwrap();
/// assert!(assignment.is_feasible(&model));
/// ```
pub fn cheapest_insertion(model: &ConstraintModel<'_>) -> Option<Assignment> {
    let evaluator = RouteEvaluator::new(model);
    let mut unrouted: Vec<usize> = (1..model.num_nodes()).collect();
    let mut assignment = Assignment::empty(model.num_vehicles());

    while !unrouted.is_empty() {
        // (index in unrouted, route, position, delta)
        let mut best: Option<(usize, usize, usize, f64)> = None;
        for (k, &node) in unrouted.iter().enumerate() {
            for (r, route) in assignment.routes().iter().enumerate() {
                if let Some((pos, delta)) = best_insertion(route, node, model, &evaluator) {
                    if best.is_none_or(|(_, _, _, d)| delta < d) {
                        best = Some((k, r, pos, delta));
                    }
                }
            }
        }

        let (k, r, pos, _) = best?;
        let node = unrouted.remove(k);
        assignment.routes_mut()[r].insert(pos, node);
    }

    Some(assignment)
}
