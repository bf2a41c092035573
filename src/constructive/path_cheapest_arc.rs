//! Path-cheapest-arc construction.
//!
//! # Algorithm
//!
//! Vehicles are filled one after another. Starting from the depot, each
//! route is repeatedly extended with the nearest unvisited pickup whose
//! addition keeps the route feasible (the return leg to the depot included).
//! When no pickup fits, the route is closed and the next vehicle starts.
//!
//! # Complexity
//!
//! O(n² × L) where L is the route length checked per candidate.

use crate::constraints::{ConstraintModel, DEPOT};
use crate::evaluation::RouteEvaluator;
use crate::search::Assignment;

/// Builds an assignment by greedy nearest feasible extension.
///
/// Returns `None` if pickups remain once every vehicle is closed.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::constructive::path_cheapest_arc;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4704, -2.0448, 2, "09:00", "Far").unwrap(),
///     PickupPoint::new(2, 48.4604, -2.0448, 2, "09:00", "Near").unwrap(),
/// ];
/// let fleet = Fleet::new(1, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let assignment = path_cheapest_arc(&model).unwrap();
/// assert_eq!(assignment.routes()[0], vec![2, 1]);
/// ```
pub fn path_cheapest_arc(model: &ConstraintModel<'_>) -> Option<Assignment> {
    let evaluator = RouteEvaluator::new(model);
    let mut unvisited: Vec<usize> = (1..model.num_nodes()).collect();
    let mut assignment = Assignment::empty(model.num_vehicles());

    for route in assignment.routes_mut() {
        if unvisited.is_empty() {
            break;
        }
        let mut current = DEPOT;
        loop {
            let mut candidates: Vec<usize> = unvisited.clone();
            candidates.sort_by(|&a, &b| {
                model
                    .distance(current, a)
                    .total_cmp(&model.distance(current, b))
            });
            let next = candidates.into_iter().find(|&node| {
                route.push(node);
                let feasible = evaluator.is_feasible(route);
                route.pop();
                feasible
            });
            match next {
                Some(node) => {
                    route.push(node);
                    unvisited.retain(|&u| u != node);
                    current = node;
                }
                None => break,
            }
        }
    }

    if unvisited.is_empty() {
        Some(assignment)
    } else {
        None
    }
}
