//! Best-of construction across every concrete heuristic.

use log::debug;

use super::{cheapest_insertion, path_cheapest_arc, savings, sweep};
use crate::constraints::ConstraintModel;
use crate::search::{Assignment, FirstSolutionStrategy};

/// Runs the concrete heuristic behind `strategy`.
///
/// [`FirstSolutionStrategy::Automatic`] delegates to [`automatic`].
pub fn construct(
    strategy: FirstSolutionStrategy,
    model: &ConstraintModel<'_>,
) -> Option<Assignment> {
    match strategy {
        FirstSolutionStrategy::Savings => savings(model),
        FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(model),
        FirstSolutionStrategy::CheapestInsertion => cheapest_insertion(model),
        FirstSolutionStrategy::Sweep => sweep(model),
        FirstSolutionStrategy::Automatic => automatic(model),
    }
}

/// Runs every concrete heuristic and keeps the cheapest feasible start.
///
/// Ties go to the heuristic listed first in
/// [`FirstSolutionStrategy::CONCRETE`].
pub fn automatic(model: &ConstraintModel<'_>) -> Option<Assignment> {
    let mut best: Option<(f64, Assignment)> = None;
    for strategy in FirstSolutionStrategy::CONCRETE {
        let Some(assignment) = construct(strategy, model) else {
            debug!("automatic: {strategy} found no start");
            continue;
        };
        let cost = assignment.cost(model);
        debug!("automatic: {strategy} start costs {cost:.1} m");
        if best.as_ref().is_none_or(|(c, _)| cost < *c) {
            best = Some((cost, assignment));
        }
    }
    best.map(|(_, assignment)| assignment)
}
