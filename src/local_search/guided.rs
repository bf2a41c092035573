//! Guided local search over the neighbourhood operators.
//!
//! # Algorithm
//!
//! 1. Descend to a local minimum with the true distance.
//! 2. Set `λ = coefficient × cost / arcs` from that minimum.
//! 3. Repeatedly penalize the arcs of the current assignment with the
//!    highest utility `d(i, j) / (1 + p(i, j))` and descend again under the
//!    augmented cost `d + λ·p`, recording the best true-cost assignment seen.
//!
//! Every move keeps all routes feasible, so every recorded assignment is a
//! valid answer. The search stops at the quota, at the iteration cap, or
//! when no arc is worth penalizing.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use log::debug;
use serde::{Deserialize, Serialize};

use super::cost::{ArcCost, ArcPenalties, PenalizedCost};
use super::{exchange_improve, or_opt_improve, relocate_improve, two_opt_improve};
use crate::constraints::ConstraintModel;
use crate::evaluation::RouteEvaluator;
use crate::search::{Assignment, Quota};

/// Tunables of [`guided_local_search`].
///
/// # Examples
///
/// ```
/// use pickup_routing::local_search::GuidedSearchConfig;
///
/// let config = GuidedSearchConfig::default().with_max_iterations(50);
/// assert_eq!(config.lambda_coefficient, 0.1);
/// assert_eq!(config.max_iterations, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidedSearchConfig {
    /// Scales the penalty weight λ relative to the average arc cost.
    pub lambda_coefficient: f64,
    /// Penalize-and-descend rounds after the first local minimum.
    pub max_iterations: usize,
    /// When `false`, only the first descent runs.
    pub enabled: bool,
}

impl Default for GuidedSearchConfig {
    fn default() -> Self {
        Self {
            lambda_coefficient: 0.1,
            max_iterations: 1000,
            enabled: true,
        }
    }
}

impl GuidedSearchConfig {
    /// Sets the λ coefficient.
    pub fn with_lambda_coefficient(mut self, coefficient: f64) -> Self {
        self.lambda_coefficient = coefficient;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Enables or disables the penalty phase.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Runs every operator until none improves under `cost`.
///
/// Returns `true` if the assignment changed.
pub fn descend<C, Q>(
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
    loop {
        let mut improved = relocate_improve(routes, cost, evaluator, quota);
        improved |= exchange_improve(routes, cost, evaluator, quota);
        improved |= two_opt_improve(routes, cost, evaluator, quota);
        improved |= or_opt_improve(routes, cost, evaluator, quota);
        changed |= improved;
        if !improved || quota.is_reached() {
            return changed;
        }
    }
}

/// Improves a feasible `start` and returns the best assignment found.
///
/// The result is never costlier than the first local minimum, which is
/// never costlier than `start`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::constructive::path_cheapest_arc;
/// use pickup_routing::local_search::{guided_local_search, GuidedSearchConfig};
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
/// use pickup_routing::search::Deadline;
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4604, -2.0348, 2, "09:00", "A").unwrap(),
///     PickupPoint::new(2, 48.4404, -2.0548, 2, "09:00", "B").unwrap(),
///     PickupPoint::new(3, 48.4654, -2.0398, 2, "09:00", "C").unwrap(),
/// ];
/// let fleet = Fleet::new(2, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let start = path_cheapest_arc(&model).unwrap();
/// let config = GuidedSearchConfig::default().with_max_iterations(20);
/// let best = guided_local_search(&model, start.clone(), &config, &Deadline::after(Duration::from_secs(5)));
/// assert!(best.is_feasible(&model));
/// assert!(best.cost(&model) <= start.cost(&model) + 1e-9);
/// ```
pub fn guided_local_search<Q: Quota + ?Sized>(
    model: &ConstraintModel<'_>,
    start: Assignment,
    config: &GuidedSearchConfig,
    quota: &Q,
) -> Assignment {
    let evaluator = RouteEvaluator::new(model);
    let distances = model.distances();
    let mut current = start;

    descend(current.routes_mut(), distances, &evaluator, quota);
    let mut best_cost = current.cost(model);
    let mut best = current.clone();
    debug!("local minimum at {best_cost:.1} m");

    let num_arcs = current.arcs().count();
    if !config.enabled || num_arcs == 0 || best_cost <= 0.0 {
        return best;
    }

    let lambda = config.lambda_coefficient * best_cost / num_arcs as f64;
    let mut penalties = ArcPenalties::new(model.num_nodes());

    for iteration in 0..config.max_iterations {
        if quota.is_reached() {
            debug!("guided search stopped by quota after {iteration} iterations");
            break;
        }
        if !penalize_max_utility(&current, distances, &mut penalties) {
            break;
        }
        let augmented = PenalizedCost::new(distances, &penalties, lambda);
        descend(current.routes_mut(), &augmented, &evaluator, quota);

        let cost = current.cost(model);
        if cost < best_cost - super::IMPROVEMENT_EPSILON {
            debug!("iteration {iteration}: improved {best_cost:.1} -> {cost:.1} m");
            best_cost = cost;
            best = current.clone();
        }
    }
    best
}

/// Penalizes every arc of `assignment` sharing the highest utility.
///
/// Returns `false` when no arc has positive utility.
fn penalize_max_utility<C: ArcCost + ?Sized>(
    assignment: &Assignment,
    distances: &C,
    penalties: &mut ArcPenalties,
) -> bool {
    let utility = |from: usize, to: usize, penalties: &ArcPenalties| {
        distances.arc(from, to) / (1.0 + f64::from(penalties.get(from, to)))
    };
    let max = assignment
        .arcs()
        .map(|(from, to)| utility(from, to, penalties))
        .fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return false;
    }
    let chosen: Vec<(usize, usize)> = assignment
        .arcs()
        .filter(|&(from, to)| utility(from, to, penalties) >= max * (1.0 - 1e-12))
        .collect();
    for (from, to) in chosen {
        penalties.increment(from, to);
    }
    true
}
