//! Multi-strategy search with a bounded time budget.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{Assignment, Deadline, FirstSolutionStrategy};
use crate::constraints::ConstraintModel;
use crate::constructive::construct;
use crate::error::{InfeasibleError, ValidationError};
use crate::local_search::{guided_local_search, GuidedSearchConfig};

/// How strategy attempts are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One attempt after another, each with `budget / strategies`.
    #[default]
    Sequential,
    /// All attempts at once under a single shared deadline.
    #[cfg(feature = "parallel")]
    Parallel,
}

/// Tunables of [`SearchEngine`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pickup_routing::search::{FirstSolutionStrategy, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_strategies(vec![FirstSolutionStrategy::Sweep, FirstSolutionStrategy::Savings])
///     .with_time_budget(Duration::from_secs(4));
/// assert_eq!(config.per_strategy_budget(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Strategies tried, in tie-breaking order.
    pub strategies: Vec<FirstSolutionStrategy>,
    /// Total wall-clock budget across all strategies.
    pub time_budget: Duration,
    /// Improvement phase run after each construction.
    pub guided: GuidedSearchConfig,
    /// Sequential or parallel attempts.
    pub execution: ExecutionMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategies: FirstSolutionStrategy::DEFAULT_ORDER.to_vec(),
            time_budget: Duration::from_secs(120),
            guided: GuidedSearchConfig::default(),
            execution: ExecutionMode::Sequential,
        }
    }
}

impl SearchConfig {
    /// Sets the strategy list.
    pub fn with_strategies(mut self, strategies: Vec<FirstSolutionStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Sets the total time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets the guided local search tunables.
    pub fn with_guided(mut self, guided: GuidedSearchConfig) -> Self {
        self.guided = guided;
        self
    }

    /// Sets the execution mode.
    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Equal share of the budget for each strategy.
    pub fn per_strategy_budget(&self) -> Duration {
        let count = u32::try_from(self.strategies.len().max(1)).unwrap_or(u32::MAX);
        self.time_budget / count
    }

    /// Rejects an empty strategy list.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.strategies.is_empty() {
            return Err(ValidationError::InvalidConfig {
                reason: "at least one first-solution strategy is required".to_owned(),
            });
        }
        Ok(())
    }
}

/// Lifecycle of a single strategy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    /// Not run yet.
    NotStarted,
    /// Construction or improvement in progress.
    Searching,
    /// A feasible assignment was found and improved.
    Improved,
    /// Construction found no feasible assignment.
    NoSolution,
}

/// Record of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAttempt {
    /// Strategy used for construction.
    pub strategy: FirstSolutionStrategy,
    /// Final status.
    pub status: AttemptStatus,
    /// Cost after improvement, in meters.
    pub cost: Option<f64>,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl StrategyAttempt {
    fn new(strategy: FirstSolutionStrategy) -> Self {
        Self {
            strategy,
            status: AttemptStatus::NotStarted,
            cost: None,
            elapsed: Duration::ZERO,
        }
    }

    fn transition(&mut self, status: AttemptStatus) {
        debug!("{}: {:?} -> {:?}", self.strategy, self.status, status);
        self.status = status;
    }
}

/// Best assignment across all attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    assignment: Assignment,
    cost: f64,
    strategy: FirstSolutionStrategy,
    attempts: Vec<StrategyAttempt>,
}

impl SearchResult {
    /// Winning assignment, one route per vehicle.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Node sequences of the winning assignment.
    pub fn routes(&self) -> &[Vec<usize>] {
        self.assignment.routes()
    }

    /// Total distance in meters.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Strategy that produced the winner.
    pub fn strategy(&self) -> FirstSolutionStrategy {
        self.strategy
    }

    /// Every attempt, in configured order.
    pub fn attempts(&self) -> &[StrategyAttempt] {
        &self.attempts
    }
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// At least one strategy found a feasible assignment.
    Found(SearchResult),
    /// Every strategy failed.
    Infeasible(InfeasibleError),
}

impl SearchOutcome {
    /// Returns `true` for [`SearchOutcome::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Converts into a `Result`.
    pub fn into_result(self) -> Result<SearchResult, InfeasibleError> {
        match self {
            Self::Found(result) => Ok(result),
            Self::Infeasible(err) => Err(err),
        }
    }
}

/// A winning candidate and the position of its strategy in the list.
#[derive(Debug)]
struct Incumbent {
    cost: f64,
    order: usize,
    strategy: FirstSolutionStrategy,
    assignment: Assignment,
}

impl Incumbent {
    /// Strictly lower cost wins; equal cost goes to the earlier strategy.
    fn beats(&self, other: &Self) -> bool {
        self.cost < other.cost || (self.cost == other.cost && self.order < other.order)
    }
}

/// Runs every configured strategy against a model and keeps the cheapest
/// feasible assignment.
///
/// The engine holds configuration only; each [`search`](Self::search) call
/// is independent.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pickup_routing::constraints::{ConstraintModel, ModelConfig};
/// use pickup_routing::models::{Depot, Fleet, PickupPoint};
/// use pickup_routing::search::{SearchConfig, SearchEngine, SearchOutcome};
///
/// let depot = Depot::new(48.4504, -2.0448).unwrap();
/// let points = vec![
///     PickupPoint::new(1, 48.4604, -2.0348, 2, "09:00", "A").unwrap(),
///     PickupPoint::new(2, 48.4404, -2.0548, 3, "09:30", "B").unwrap(),
/// ];
/// let fleet = Fleet::new(2, 8, 15.0).unwrap();
/// let model = ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).unwrap();
///
/// let engine = SearchEngine::new(SearchConfig::default().with_time_budget(Duration::from_secs(3)));
/// match engine.search(&model).unwrap() {
///     SearchOutcome::Found(result) => assert!(result.assignment().is_feasible(&model)),
///     SearchOutcome::Infeasible(err) => panic!("{err}"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Engine configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches for the cheapest feasible assignment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfig`] for an empty strategy
    /// list. Search exhaustion is not an error; it is reported as
    /// [`SearchOutcome::Infeasible`].
    pub fn search(&self, model: &ConstraintModel<'_>) -> Result<SearchOutcome, ValidationError> {
        self.config.validate()?;
        let strategies = &self.config.strategies;

        if model.num_points() == 0 {
            debug!("no pickups; returning empty routes");
            return Ok(SearchOutcome::Found(SearchResult {
                assignment: Assignment::empty(model.num_vehicles()),
                cost: 0.0,
                strategy: strategies[0],
                attempts: Vec::new(),
            }));
        }

        let (attempts, incumbent) = match self.config.execution {
            ExecutionMode::Sequential => self.run_sequential(model),
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => self.run_parallel(model),
        };

        Ok(match incumbent {
            Some(best) => {
                info!(
                    "best solution by {} at {:.1} m ({} attempts)",
                    best.strategy,
                    best.cost,
                    attempts.len()
                );
                SearchOutcome::Found(SearchResult {
                    assignment: best.assignment,
                    cost: best.cost,
                    strategy: best.strategy,
                    attempts,
                })
            }
            None => {
                let err = InfeasibleError {
                    strategies: strategies.clone(),
                    time_budget: self.config.time_budget,
                };
                warn!("{err}");
                SearchOutcome::Infeasible(err)
            }
        })
    }

    fn run_sequential(
        &self,
        model: &ConstraintModel<'_>,
    ) -> (Vec<StrategyAttempt>, Option<Incumbent>) {
        let overall = Deadline::after(self.config.time_budget);
        let slice = self.config.per_strategy_budget();
        let mut attempts = Vec::with_capacity(self.config.strategies.len());
        let mut incumbent: Option<Incumbent> = None;

        for (order, &strategy) in self.config.strategies.iter().enumerate() {
            let (attempt, found) = self.attempt(model, order, strategy, overall.within(slice));
            attempts.push(attempt);
            if let Some(candidate) = found {
                if incumbent.as_ref().is_none_or(|best| candidate.beats(best)) {
                    incumbent = Some(candidate);
                }
            }
        }
        (attempts, incumbent)
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self, model: &ConstraintModel<'_>) -> (Vec<StrategyAttempt>, Option<Incumbent>) {
        use std::sync::{Mutex, PoisonError};

        use rayon::prelude::*;

        let deadline = Deadline::after(self.config.time_budget);
        let incumbent: Mutex<Option<Incumbent>> = Mutex::new(None);

        let attempts = self
            .config
            .strategies
            .par_iter()
            .enumerate()
            .map(|(order, &strategy)| {
                let (attempt, found) = self.attempt(model, order, strategy, deadline);
                if let Some(candidate) = found {
                    let mut best = incumbent.lock().unwrap_or_else(PoisonError::into_inner);
                    if best.as_ref().is_none_or(|b| candidate.beats(b)) {
                        *best = Some(candidate);
                    }
                }
                attempt
            })
            .collect();

        (
            attempts,
            incumbent
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn attempt(
        &self,
        model: &ConstraintModel<'_>,
        order: usize,
        strategy: FirstSolutionStrategy,
        deadline: Deadline,
    ) -> (StrategyAttempt, Option<Incumbent>) {
        let started = Instant::now();
        let mut attempt = StrategyAttempt::new(strategy);
        attempt.transition(AttemptStatus::Searching);

        let Some(start) = construct(strategy, model) else {
            attempt.transition(AttemptStatus::NoSolution);
            attempt.elapsed = started.elapsed();
            info!("{strategy}: no feasible start");
            return (attempt, None);
        };

        let initial_cost = start.cost(model);
        let assignment = guided_local_search(model, start, &self.config.guided, &deadline);
        let cost = assignment.cost(model);
        attempt.transition(AttemptStatus::Improved);
        attempt.cost = Some(cost);
        attempt.elapsed = started.elapsed();
        info!(
            "{strategy}: {initial_cost:.1} m -> {cost:.1} m in {:?}",
            attempt.elapsed
        );

        (
            attempt,
            Some(Incumbent {
                cost,
                order,
                strategy,
                assignment,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ModelConfig;
    use crate::models::Fleet;
    use crate::testing::{depot, point_at};

    fn quick() -> SearchConfig {
        SearchConfig::default()
            .with_time_budget(Duration::from_secs(2))
            .with_guided(GuidedSearchConfig::default().with_max_iterations(20))
    }

    #[test]
    fn test_empty_strategy_list() {
        let depot = depot();
        let fleet = Fleet::new(1, 4, 5.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &[], fleet, &ModelConfig::default()).expect("valid");
        let engine = SearchEngine::new(quick().with_strategies(Vec::new()));
        assert!(matches!(
            engine.search(&model),
            Err(ValidationError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_points() {
        let depot = depot();
        let fleet = Fleet::new(3, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &[], fleet, &ModelConfig::default()).expect("valid");
        let result = SearchEngine::new(quick())
            .search(&model)
            .expect("valid")
            .into_result()
            .expect("found");
        assert_eq!(result.cost(), 0.0);
        assert_eq!(result.routes().len(), 3);
        assert!(result.routes().iter().all(Vec::is_empty));
    }

    #[test]
    fn test_found_records_attempts() {
        let depot = depot();
        let points = vec![
            point_at(1, 1.0, 0.5, 2),
            point_at(2, -1.0, 1.0, 3),
            point_at(3, 0.5, -1.5, 2),
        ];
        let fleet = Fleet::new(3, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let result = SearchEngine::new(quick())
            .search(&model)
            .expect("valid")
            .into_result()
            .expect("found");
        assert!(result.assignment().is_feasible(&model));
        assert_eq!(result.attempts().len(), 3);
        assert!(result
            .attempts()
            .iter()
            .all(|a| a.status == AttemptStatus::Improved));
        let min = result
            .attempts()
            .iter()
            .filter_map(|a| a.cost)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.cost(), min);
        // the first strategy reaching the minimum wins
        let first = result
            .attempts()
            .iter()
            .find(|a| a.cost == Some(min))
            .map(|a| a.strategy);
        assert_eq!(Some(result.strategy()), first);
    }

    #[test]
    fn test_infeasible_reports_strategies() {
        let depot = depot();
        let points = vec![point_at(1, 1.0, 0.0, 5), point_at(2, -1.0, 0.0, 3)];
        let fleet = Fleet::new(2, 4, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let outcome = SearchEngine::new(quick()).search(&model).expect("valid");
        let err = outcome.into_result().expect_err("infeasible");
        assert_eq!(err.strategies, FirstSolutionStrategy::DEFAULT_ORDER.to_vec());
        assert_eq!(err.time_budget, Duration::from_secs(2));
    }

    #[test]
    fn test_incumbent_tie_keeps_earlier() {
        let a = Incumbent {
            cost: 10.0,
            order: 0,
            strategy: FirstSolutionStrategy::Savings,
            assignment: Assignment::empty(1),
        };
        let b = Incumbent {
            cost: 10.0,
            order: 1,
            strategy: FirstSolutionStrategy::Sweep,
            assignment: Assignment::empty(1),
        };
        assert!(a.beats(&b));
        assert!(!b.beats(&a));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_rule() {
        let depot = depot();
        let points = vec![
            point_at(1, 1.0, 0.5, 2),
            point_at(2, -1.0, 1.0, 3),
            point_at(3, 0.5, -1.5, 2),
        ];
        let fleet = Fleet::new(2, 8, 15.0).expect("valid");
        let model =
            ConstraintModel::build(&depot, &points, fleet, &ModelConfig::default()).expect("valid");
        let engine = SearchEngine::new(quick().with_execution(ExecutionMode::Parallel));
        let result = engine
            .search(&model)
            .expect("valid")
            .into_result()
            .expect("found");
        assert!(result.assignment().is_feasible(&model));
        let min = result
            .attempts()
            .iter()
            .filter_map(|a| a.cost)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.cost(), min);
    }
}
