//! Intra-route Or-opt operator.
//!
//! # Algorithm
//!
//! Moves a segment of 1 to 3 consecutive pickups to another position in the
//! same route, keeping its orientation. The first improving feasible move
//! is applied and the scan restarts.
//!
//! # Complexity
//!
//! O(n²) candidates per pass for a route of n pickups.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::cost::{node_at, prev_node, ArcCost};
use super::IMPROVEMENT_EPSILON;
use crate::evaluation::RouteEvaluator;
use crate::search::Quota;

/// Longest segment moved as a unit.
pub const MAX_SEGMENT_LEN: usize = 3;

/// Applies Or-opt segment moves to every route until none improves.
///
/// Returns `true` if any move was applied.
pub fn or_opt_improve<C, Q>(
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
    for route in routes.iter_mut() {
        while !quota.is_reached() {
            match find_or_opt_move(route, cost, evaluator) {
                Some(next) => {
                    *route = next;
                    changed = true;
                }
                None => break,
            }
        }
    }
    changed
}

/// Returns the route after the first improving feasible segment move.
fn find_or_opt_move<C: ArcCost + ?Sized>(
    route: &[usize],
    cost: &C,
    evaluator: &RouteEvaluator<'_, '_>,
) -> Option<Vec<usize>> {
    let n = route.len();
    if n < 2 {
        return None;
    }
    let mut rest = Vec::with_capacity(n);
    for len in 1..=MAX_SEGMENT_LEN.min(n - 1) {
        for start in 0..=(n - len) {
            let end = start + len - 1;
            let first = route[start];
            let last = route[end];
            let before = prev_node(route, start);
            let after = node_at(route, end + 1);
            let removal =
                cost.arc(before, after) - cost.arc(before, first) - cost.arc(last, after);

            rest.clear();
            rest.extend_from_slice(&route[..start]);
            rest.extend_from_slice(&route[end + 1..]);

            for pos in 0..=rest.len() {
                if pos == start {
                    continue;
                }
                let p = prev_node(&rest, pos);
                let q = node_at(&rest, pos);
                let insertion = cost.arc(p, first) + cost.arc(last, q) - cost.arc(p, q);
                if removal + insertion >= -IMPROVEMENT_EPSILON {
                    continue;
                }
                let mut candidate = Vec::with_capacity(n);
                candidate.extend_from_slice(&rest[..pos]);
                candidate.extend_from_slice(&route[start..=end]);
                candidate.extend_from_slice(&rest[pos..]);
                if evaluator.is_feasible(&candidate) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{ConstraintModel, ModelConfig};
    use crate::models::Fleet;
    use crate::search::{Assignment, Unbounded};
    use crate::testing::{depot, point_at};

    fn line_points() -> Vec<crate::models::PickupPoint> {
        (1..=5)
            .map(|i| point_at(i, i as f64, 0.0, 1))
            .collect()
    }

    #[test]
    fn test_or_opt_already_optimal() {
        let depot = depot();
        let points = line_points();
        let fleet = Fleet::new(1, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let mut routes = vec![vec![1, 2, 3, 4, 5]];
        assert!(!or_opt_improve(&mut routes, model.distances(), &evaluator, &Unbounded));
    }

    #[test]
    fn test_or_opt_moves_misplaced_segment() {
        let depot = depot();
        let points = line_points();
        let fleet = Fleet::new(1, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let mut routes = vec![vec![1, 4, 5, 2, 3]];
        let before = Assignment::new(routes.clone()).cost(&model);
        assert!(or_opt_improve(&mut routes, model.distances(), &evaluator, &Unbounded));
        let after = Assignment::new(routes.clone()).cost(&model);
        assert!(after < before - 1.0);
        assert!(Assignment::new(routes).is_complete(5));
    }

    #[test]
    fn test_or_opt_trivial_routes() {
        let depot = depot();
        let points = vec![point_at(1, 1.0, 0.0, 1)];
        let fleet = Fleet::new(2, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let evaluator = RouteEvaluator::new(&model);
        let mut routes = vec![vec![], vec![1]];
        assert!(!or_opt_improve(&mut routes, model.distances(), &evaluator, &Unbounded));
    }
}
