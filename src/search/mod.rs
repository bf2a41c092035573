//! Strategy search engine.
//!
//! Each configured [`FirstSolutionStrategy`] builds a starting
//! [`Assignment`], which guided local search then improves until the
//! strategy's [`Deadline`]. The cheapest feasible result wins; equal costs
//! go to the strategy listed first.

mod assignment;
mod engine;
mod quota;
mod strategy;

pub use assignment::Assignment;
pub use engine::{
    AttemptStatus, ExecutionMode, SearchConfig, SearchEngine, SearchOutcome, SearchResult,
    StrategyAttempt,
};
pub use quota::{Deadline, Quota, Unbounded};
pub use strategy::FirstSolutionStrategy;
