//! # pickup-routing
//!
//! Depot-anchored pickup route optimization: a capacitated vehicle routing
//! problem with time windows (CVRPTW) over great-circle distances, solved by
//! several construction heuristics followed by guided local search under a
//! wall-clock budget.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Depot, PickupPoint, Fleet, Route, Solution)
//! - [`distance`]: Haversine distance and the depot-plus-points matrix
//! - [`constraints`]: Input validation and the per-call constraint model
//! - [`evaluation`]: Route feasibility checking and cost evaluation
//! - [`constructive`]: First-solution heuristics (Savings, Sweep, insertion)
//! - [`local_search`]: Improvement operators and guided local search
//! - [`search`]: Multi-strategy engine with a time budget
//! - [`extract`]: Node sequences to caller-facing routes
//! - [`fallback`]: Constraint-naive distribution when search fails
//! - [`planner`]: Solve entry points
//! - [`report`]: Serializable output contracts
//! - [`error`]: Validation and infeasibility errors
//!
//! ## Feature flags
//!
//! - `parallel`: run strategies concurrently with rayon

pub mod constraints;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod extract;
pub mod fallback;
pub mod local_search;
pub mod models;
pub mod planner;
pub mod report;
pub mod search;

#[cfg(test)]
mod testing;
