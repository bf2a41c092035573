//! Solve entry points that wire model building, search and extraction.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constraints::{ConstraintModel, ModelConfig};
use crate::error::RoutingError;
use crate::extract::extract_solution;
use crate::fallback::{distribute, DegradedResult};
use crate::models::{Depot, Fleet, PickupPoint, Solution};
use crate::search::{SearchConfig, SearchEngine, SearchOutcome};

/// Result of [`RoutePlanner::plan`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Every constraint holds.
    Optimized(Solution),
    /// Search failed; routes come from the fallback distributor.
    Degraded(DegradedResult),
}

impl PlanOutcome {
    /// Returns `true` for [`PlanOutcome::Optimized`].
    pub fn is_optimized(&self) -> bool {
        matches!(self, Self::Optimized(_))
    }
}

/// Reusable solver configuration.
///
/// Holds no per-call state; one planner may serve many solve calls.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
/// use pickup_routing::planner::RoutePlanner;
/// use pickup_routing::search::SearchConfig;
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4604, -2.0448, 2, "09:00", "Church").unwrap(),
///     PickupPoint::new(2, 48.4404, -2.0448, 4, "10:00", "Harbour").unwrap(),
/// ];
/// let fleet = Fleet::new(2, 8, 15.0).unwrap();
///
/// let planner = RoutePlanner::default()
///     .with_search(SearchConfig::default().with_time_budget(Duration::from_secs(1)));
/// let solution = planner.solve(&depot, &points, fleet).unwrap();
/// assert_eq!(solution.total_passengers(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutePlanner {
    /// Constraint model tunables.
    pub model: ModelConfig,
    /// Search tunables.
    pub search: SearchConfig,
}

impl RoutePlanner {
    /// Creates a planner from both configurations.
    pub fn new(model: ModelConfig, search: SearchConfig) -> Self {
        Self { model, search }
    }

    /// Sets the constraint model tunables.
    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// Sets the search tunables.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Finds feasible routes or fails.
    ///
    /// # Errors
    ///
    /// [`RoutingError::Validation`] when the input is rejected before search,
    /// [`RoutingError::Infeasible`] when no strategy found a feasible
    /// assignment within the budget.
    pub fn solve(
        &self,
        depot: &Depot,
        points: &[PickupPoint],
        fleet: Fleet,
    ) -> Result<Solution, RoutingError> {
        let model = ConstraintModel::build(depot, points, fleet, &self.model)?;
        let result = self.engine().search(&model)?.into_result()?;
        Ok(extract_solution(&model, &result))
    }

    /// Finds feasible routes, falling back to an even distribution when
    /// search fails.
    ///
    /// # Errors
    ///
    /// Only [`RoutingError::Validation`]; search failure yields
    /// [`PlanOutcome::Degraded`].
    pub fn plan(
        &self,
        depot: &Depot,
        points: &[PickupPoint],
        fleet: Fleet,
    ) -> Result<PlanOutcome, RoutingError> {
        let model = ConstraintModel::build(depot, points, fleet, &self.model)?;
        match self.engine().search(&model)? {
            SearchOutcome::Found(result) => {
                debug!("plan optimized by {}", result.strategy());
                Ok(PlanOutcome::Optimized(extract_solution(&model, &result)))
            }
            SearchOutcome::Infeasible(err) => {
                warn!("{err}; falling back to even distribution");
                Ok(PlanOutcome::Degraded(distribute(&model)))
            }
        }
    }

    fn engine(&self) -> SearchEngine {
        SearchEngine::new(self.search.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::local_search::GuidedSearchConfig;
    use crate::testing::{depot, point_at};
    use std::time::Duration;

    fn planner() -> RoutePlanner {
        RoutePlanner::default().with_search(
            SearchConfig::default()
                .with_time_budget(Duration::from_secs(1))
                .with_guided(GuidedSearchConfig::default().with_max_iterations(20)),
        )
    }

    #[test]
    fn test_solve_feasible() {
        let depot = depot();
        let points = vec![
            point_at(1, 2.0, 0.0, 3),
            point_at(2, 0.0, 2.0, 3),
            point_at(3, -2.0, 0.0, 3),
        ];
        let fleet = Fleet::new(2, 8, 15.0).expect("valid");
        let solution = planner().solve(&depot, &points, fleet).expect("feasible");
        assert_eq!(solution.routes().len(), 2);
        let mut ids = solution.point_ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_solve_infeasible_is_typed() {
        let depot = depot();
        let points = vec![point_at(1, 1.0, 0.0, 5)];
        let fleet = Fleet::new(2, 4, 15.0).expect("valid");
        let err = planner().solve(&depot, &points, fleet).unwrap_err();
        assert!(matches!(err, RoutingError::Infeasible(_)));
    }

    #[test]
    fn test_plan_degrades_instead_of_failing() {
        let depot = depot();
        let points = vec![point_at(1, 1.0, 0.0, 5), point_at(2, -1.0, 0.0, 1)];
        let fleet = Fleet::new(2, 4, 15.0).expect("valid");
        match planner().plan(&depot, &points, fleet).expect("not a validation error") {
            PlanOutcome::Degraded(degraded) => {
                assert_eq!(degraded.routes().len(), 2);
                assert_eq!(degraded.point_ids(), vec![1, 2]);
            }
            PlanOutcome::Optimized(_) => panic!("expected degraded plan"),
        }
    }

    #[test]
    fn test_plan_validation_is_not_degraded() {
        let depot = depot();
        let points = vec![point_at(1, 20.0, 0.0, 1)];
        let fleet = Fleet::new(1, 4, 15.0).expect("valid");
        let err = planner().plan(&depot, &points, fleet).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Validation(ValidationError::PointOutOfRange { point_id: 1, .. })
        ));
    }
}
