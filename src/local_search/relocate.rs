//! Inter-route pickup relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each pickup from its current route to the best insertion
//! position in another route, unused vehicles included. Applies the best
//! improving move whose routes stay feasible, and repeats until no move
//! improves or the quota is reached.
//!
//! # Complexity
//!
//! O(n² × R) candidate moves per pass where n = pickups per route,
//! R = number of routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::cost::{insertion_delta, removal_delta, ArcCost};
use super::IMPROVEMENT_EPSILON;
use crate::evaluation::RouteEvaluator;
use crate::search::Quota;

#[derive(Debug, Clone, Copy)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies inter-route relocate moves until none improves.
///
/// Returns `true` if any move was applied.
pub fn relocate_improve<C, Q>(
    routes: &mut [Vec<usize>],
    cost: &C,
    evaluator: &RouteEvaluator<'_, '_>,
    quota: &Q,
) -> bool
where
    C: ArcCost + ?Sized,
    Q: Quota + ?Sized,
{
    if routes.len() < 2 {
        return false;
    }
    let mut changed = false;
    while !quota.is_reached() {
        let Some(mv) = find_best_relocate(routes, cost, evaluator) else {
            break;
        };
        let node = routes[mv.from_route].remove(mv.from_pos);
        routes[mv.to_route].insert(mv.to_pos, node);
        changed = true;
    }
    changed
}

fn find_best_relocate<C: ArcCost + ?Sized>(
    routes: &[Vec<usize>],
    cost: &C,
    evaluator: &RouteEvaluator<'_, '_>,
) -> Option<RelocateMove> {
    let mut best: Option<RelocateMove> = None;
    let mut shrunk = Vec::new();
    let mut grown = Vec::new();

    for (from_r, from_route) in routes.iter().enumerate() {
        for from_pos in 0..from_route.len() {
            let node = from_route[from_pos];
            let removal = removal_delta(from_route, from_pos, cost);
            let mut source_checked = None;

            for (to_r, to_route) in routes.iter().enumerate() {
                if to_r == from_r {
                    continue;
                }
                for to_pos in 0..=to_route.len() {
                    let delta = removal + insertion_delta(to_route, to_pos, node, cost);
                    if delta >= -IMPROVEMENT_EPSILON
                        || best.is_some_and(|b| delta >= b.delta)
                    {
                        continue;
                    }

                    let source_ok = *source_checked.get_or_insert_with(|| {
                        shrunk.clear();
                        shrunk.extend_from_slice(&from_route[..from_pos]);
                        shrunk.extend_from_slice(&from_route[from_pos + 1..]);
                        evaluator.is_feasible(&shrunk)
                    });
                    if !source_ok {
                        break;
                    }

                    grown.clear();
                    grown.extend_from_slice(&to_route[..to_pos]);
                    grown.push(node);
                    grown.extend_from_slice(&to_route[to_pos..]);
                    if evaluator.is_feasible(&grown) {
                        best = Some(RelocateMove {
                            from_route: from_r,
                            from_pos,
                            to_route: to_r,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }
    best
}
