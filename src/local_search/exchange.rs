//! Inter-route exchange operator (2-opt*).
//!
//! # Algorithm
//!
//! Swaps tail segments between two routes. Given
//! R1 = [a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ] and R2 = [b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ]:
//!
//! ```text
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//! ```
//!
//! Only four arcs change, so each candidate is scored in O(1); the two new
//! routes are checked for feasibility only when the move would beat the
//! best one found so far.
//!
//! # Complexity
//!
//! O(n² × R²) candidate moves per pass.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use super::cost::{node_at, prev_node, ArcCost};
use super::IMPROVEMENT_EPSILON;
use crate::evaluation::RouteEvaluator;
use crate::search::Quota;

#[derive(Debug, Clone, Copy)]
struct ExchangeMove {
    r1: usize,
    cut1: usize,
    r2: usize,
    cut2: usize,
}

/// Applies tail-swap moves between route pairs until none improves.
///
/// Returns `true` if any move was applied.
pub fn exchange_improve<C, Q>(
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
        let Some(mv) = find_best_exchange(routes, cost, evaluator) else {
            break;
        };
        let tail1 = routes[mv.r1].split_off(mv.cut1);
        let tail2 = routes[mv.r2].split_off(mv.cut2);
        routes[mv.r1].extend(tail2);
        routes[mv.r2].extend(tail1);
        changed = true;
    }
    changed
}

/// Cost change of swapping `a[cut1..]` with `b[cut2..]`.
fn exchange_delta<C: ArcCost + ?Sized>(
    a: &[usize],
    cut1: usize,
    b: &[usize],
    cut2: usize,
    cost: &C,
) -> f64 {
    let a_prev = prev_node(a, cut1);
    let a_next = node_at(a, cut1);
    let b_prev = prev_node(b, cut2);
    let b_next = node_at(b, cut2);
    cost.arc(a_prev, b_next) + cost.arc(b_prev, a_next)
        - cost.arc(a_prev, a_next)
        - cost.arc(b_prev, b_next)
}

fn find_best_exchange<C: ArcCost + ?Sized>(
    routes: &[Vec<usize>],
    cost: &C,
    evaluator: &RouteEvaluator<'_, '_>,
) -> Option<ExchangeMove> {
    let mut best: Option<(ExchangeMove, f64)> = None;
    let mut new_a = Vec::new();
    let mut new_b = Vec::new();

    for r1 in 0..routes.len() {
        for r2 in (r1 + 1)..routes.len() {
            let (a, b) = (&routes[r1], &routes[r2]);
            for cut1 in 0..=a.len() {
                for cut2 in 0..=b.len() {
                    // swapping whole routes or two empty tails changes nothing
                    if (cut1 == 0 && cut2 == 0) || (cut1 == a.len() && cut2 == b.len()) {
                        continue;
                    }
                    let delta = exchange_delta(a, cut1, b, cut2, cost);
                    if delta >= -IMPROVEMENT_EPSILON || best.is_some_and(|(_, d)| delta >= d) {
                        continue;
                    }

                    new_a.clear();
                    new_a.extend_from_slice(&a[..cut1]);
                    new_a.extend_from_slice(&b[cut2..]);
                    new_b.clear();
                    new_b.extend_from_slice(&b[..cut2]);
                    new_b.extend_from_slice(&a[cut1..]);
                    if evaluator.is_feasible(&new_a) && evaluator.is_feasible(&new_b) {
                        best = Some((ExchangeMove { r1, cut1, r2, cut2 }, delta));
                    }
                }
            }
        }
    }
    best.map(|(mv, _)| mv)
}
