//! Intra-route 2-opt operator.
//!
//! # Algorithm
//!
//! Reverses the segment `route[i..=j]`, replacing arcs `(prev(i), i)` and
//! `(j, next(j))` with `(prev(i), j)` and `(i, next(j))`. Arc costs are
//! symmetric, so the reversed interior keeps its cost. A reversal changes
//! visit order, so every improving candidate is re-checked against the
//! time windows before it is taken.
//!
//! # Complexity
//!
//! O(n²) candidates per pass for a route of n pickups.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A Method for Solving Traveling-Salesman Problems",
//! *Operations Research* 6(6), 791-812.

use super::cost::{node_at, prev_node, ArcCost};
use super::IMPROVEMENT_EPSILON;
use crate::evaluation::RouteEvaluator;
use crate::search::Quota;

/// Cost change of reversing `route[i..=j]`.
fn two_opt_delta<C: ArcCost + ?Sized>(route: &[usize], i: usize, j: usize, cost: &C) -> f64 {
    let before = prev_node(route, i);
    let after = node_at(route, j + 1);
    cost.arc(before, route[j]) + cost.arc(route[i], after)
        - cost.arc(before, route[i])
        - cost.arc(route[j], after)
}

/// Applies 2-opt reversals to every route until none improves.
///
/// Returns `true` if any reversal was applied.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::evaluation::RouteEvaluator;
/// use pickup_routing::local_search::two_opt_improve;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
/// use pickup_routing::search::Unbounded;
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4604, -2.0448, 1, "09:00", "N1").unwrap(),
///     PickupPoint::new(2, 48.4704, -2.0448, 1, "09:00", "N2").unwrap(),
///     PickupPoint::new(3, 48.4804, -2.0448, 1, "09:00", "N3").unwrap(),
/// ];
/// let fleet = Fleet::new(1, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let mut routes = vec![vec![2, 1, 3]];
/// two_opt_improve(&mut routes, model.distances(), &RouteEvaluator::new(&model), &Unbounded);
/// assert!(routes[0] == vec![1, 2, 3] || routes[0] == vec![3, 2, 1]);
/// ```
pub fn two_opt_improve<C, Q>(
    routes: &mut [Vec<usize>],
    cost: &C,
    evaluator: &RouteEvaluator<'_, '_>,
    quota: &Q,
) -> bool
where
    C: ArcCost + ?Sized,
    Q: Quota + ?Sized,
{
    let mut changed = false;
    let mut candidate = Vec::new();
    for route in routes.iter_mut() {
        let n = route.len();
        if n < 2 {
            continue;
        }
        let mut improved = true;
        while improved && !quota.is_reached() {
            improved = false;
            'scan: for i in 0..n - 1 {
                for j in (i + 1)..n {
                    if two_opt_delta(route, i, j, cost) >= -IMPROVEMENT_EPSILON {
                        continue;
                    }
                    candidate.clear();
                    candidate.extend_from_slice(route);
                    candidate[i..=j].reverse();
                    if evaluator.is_feasible(&candidate) {
                        route[i..=j].reverse();
                        improved = true;
                        changed = true;
                        break 'scan;
                    }
                }
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{ConstraintModel, ModelConfig};
    use crate::models::Fleet;
    use crate::search::{Assignment, Unbounded};
    use crate::testing::{depot, point_at, point_due};

    #[test]
    fn test_2opt_reverses_crossing() {
        let depot = depot();
        // square loop visited in crossing order
        let points = vec![
            point_at(1, 1.0, 0.0, 1),
            point_at(2, 1.0, 1.0, 1),
            point_at(3, 0.0, 1.0, 1),
        ];
        let fleet = Fleet::new(1, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let mut routes = vec![vec![1, 3, 2]];
        let before = Assignment::new(routes.clone()).cost(&model);
        assert!(two_opt_improve(&mut routes, model.distances(), &evaluator, &Unbounded));
        let after = Assignment::new(routes.clone()).cost(&model);
        assert!(after < before - 1.0);
    }

    #[test]
    fn test_2opt_short_routes_untouched() {
        let depot = depot();
        let points = vec![point_at(1, 1.0, 0.0, 1)];
        let fleet = Fleet::new(2, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let mut routes = vec![vec![1], vec![]];
        assert!(!two_opt_improve(&mut routes, model.distances(), &evaluator, &Unbounded));
        assert_eq!(routes, vec![vec![1], vec![]]);
    }

    #[test]
    fn test_2opt_keeps_window_order() {
        let depot = depot();
        // uncrossing would visit 3 after 2, long after its window closes
        let points = vec![
            point_due(1, 1.0, 0.0, 1, "08:00"),
            point_due(2, 1.0, 1.0, 1, "10:00"),
            point_due(3, 0.0, 1.0, 1, "08:00"),
        ];
        let fleet = Fleet::new(1, 8, 15.0).expect("valid");
        let config = ModelConfig::default().with_window_width(30);
        let model = ConstraintModel::build(&depot, &points, fleet, &config).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let mut routes = vec![vec![1, 3, 2]];
        assert!(evaluator.is_feasible(&routes[0]));
        assert!(!two_opt_improve(&mut routes, model.distances(), &evaluator, &Unbounded));
        assert_eq!(routes[0], vec![1, 3, 2]);
    }
}
