//! Clarke-Wright savings construction.
//!
//! # Algorithm
//!
//! Every pickup starts on its own out-and-back route. Routes are merged end
//! to start in decreasing order of the saving
//!
//! ```text
//! s(i, j) = d(0, i) + d(0, j) - d(i, j)
//! ```
//!
//! and a merge is kept only when the joined route still satisfies the
//! capacity, distance, and time-window dimensions. Unlike the textbook
//! variant the fleet is fixed: if more routes remain than vehicles, the
//! heuristic reports no solution.
//!
//! # Complexity
//!
//! O(n² log n) for the savings list plus O(n) feasibility per merge.
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use crate::constraints::{ConstraintModel, DEPOT};
use crate::evaluation::RouteEvaluator;
use crate::search::Assignment;

#[derive(Debug)]
struct Saving {
    i: usize,
    j: usize,
    value: f64,
}

/// Builds an assignment with the savings algorithm.
///
/// Returns `None` if some pickup cannot be served on its own or the merged
/// routes still outnumber the fleet.
///
/// # Examples
///
/// ```
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::constructive::savings;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4604, -2.0448, 2, "09:00", "A").unwrap(),
///     PickupPoint::new(2, 48.4704, -2.0448, 2, "09:00", "B").unwrap(),
///     PickupPoint::new(3, 48.4804, -2.0448, 2, "09:00", "C").unwrap(),
/// ];
/// let fleet = Fleet::new(1, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let assignment = savings(&model).unwrap();
/// assert_eq!(assignment.routes()[0].len(), 3);
/// ```
pub fn savings(model: &ConstraintModel<'_>) -> Option<Assignment> {
    let n = model.num_nodes();
    let evaluator = RouteEvaluator::new(model);

    for node in 1..n {
        if !evaluator.is_feasible(&[node]) {
            return None;
        }
    }

    let mut savings = Vec::with_capacity(n.saturating_sub(1) * n.saturating_sub(2) / 2);
    for i in 1..n {
        for j in (i + 1)..n {
            let value = model.distance(DEPOT, i) + model.distance(DEPOT, j) - model.distance(i, j);
            savings.push(Saving { i, j, value });
        }
    }
    // stable: equal savings keep index order
    savings.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut route_of: Vec<usize> = (0..n).collect();
    let mut members: Vec<Vec<usize>> = (0..n)
        .map(|i| if i == DEPOT { Vec::new() } else { vec![i] })
        .collect();

    for saving in &savings {
        let ri = route_of[saving.i];
        let rj = route_of[saving.j];
        if ri == rj {
            continue;
        }

        let i_first = members[ri].first() == Some(&saving.i);
        let i_last = members[ri].last() == Some(&saving.i);
        let j_first = members[rj].first() == Some(&saving.j);
        let j_last = members[rj].last() == Some(&saving.j);

        // candidate orientations, i's route first
        let candidates: [(bool, bool, bool); 4] = [
            (i_last && j_first, false, false),
            (i_last && j_last, false, true),
            (i_first && j_first, true, false),
            (i_first && j_last, true, true),
        ];

        let mut merged = None;
        for &(applicable, reverse_i, reverse_j) in &candidates {
            if !applicable {
                continue;
            }
            let mut joined = Vec::with_capacity(members[ri].len() + members[rj].len());
            if reverse_i {
                joined.extend(members[ri].iter().rev().copied());
            } else {
                joined.extend(members[ri].iter().copied());
            }
            if reverse_j {
                joined.extend(members[rj].iter().rev().copied());
            } else {
                joined.extend(members[rj].iter().copied());
            }
            if evaluator.is_feasible(&joined) {
                merged = Some(joined);
                break;
            }
        }

        if let Some(joined) = merged {
            for &node in &joined {
                route_of[node] = ri;
            }
            members[rj].clear();
            members[ri] = joined;
        }
    }

    let routes: Vec<Vec<usize>> = members.into_iter().filter(|m| !m.is_empty()).collect();
    if routes.len() > model.num_vehicles() {
        return None;
    }
    let mut assignment = Assignment::new(routes);
    assignment.pad_to(model.num_vehicles());
    Some(assignment)
}
